//! Error types for the plexdiff engine.

use crate::Role;
use thiserror::Error;

/// All possible errors from the plexdiff engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Source errors
    #[error("malformed source data: record {index} is missing its {field}")]
    MalformedSourceData { index: usize, field: &'static str },

    #[error("{role} source unavailable: {reason}")]
    SourceUnavailable { role: Role, reason: String },

    // Snapshot errors
    #[error("malformed snapshot at line {line}: {reason}")]
    MalformedSnapshot { line: usize, reason: String },

    #[error("title cannot be written to a line snapshot: {0}")]
    SeparatorInTitle(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::MalformedSourceData {
            index: 3,
            field: "title",
        };
        assert_eq!(
            err.to_string(),
            "malformed source data: record 3 is missing its title"
        );

        let err = Error::SourceUnavailable {
            role: Role::Remote,
            reason: "connection refused".into(),
        };
        assert_eq!(
            err.to_string(),
            "remote source unavailable: connection refused"
        );

        let err = Error::MalformedSnapshot {
            line: 7,
            reason: "missing separator".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed snapshot at line 7: missing separator"
        );
    }
}
