//! Unified error handling for the command line tool.

use crate::config::ConfigError;
use std::path::PathBuf;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Plex Compare Error: {0}")]
    Usage(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Engine error: {0}")]
    Engine(#[from] plexdiff_engine::Error),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Usage(_) | AppError::Config(_) => 2,
            AppError::Engine(_) | AppError::Io { .. } => 1,
        }
    }
}

/// Result type alias for the binary.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use plexdiff_engine::Role;

    #[test]
    fn usage_message() {
        let err = AppError::Usage("Local Listing File Not Specified".into());
        assert_eq!(
            err.to_string(),
            "Plex Compare Error: Local Listing File Not Specified"
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn engine_errors_are_fatal() {
        let err: AppError = plexdiff_engine::Error::SourceUnavailable {
            role: Role::Local,
            reason: "timed out".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Engine error: local source unavailable: timed out"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn io_error_names_the_path() {
        let err = AppError::io(
            "listing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.to_string(), "I/O error on listing.json: not found");
    }
}
