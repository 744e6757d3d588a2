//! Live record sources: Plex servers and directory trees.

pub mod filesystem;
pub mod plex;

pub use filesystem::DirectoryScanner;
pub use plex::{PlexClient, PlexSource};

use crate::config::{Settings, SourceSpec};
use crate::error::Result;
use plexdiff_engine::{Error, RecordSource, Role};

/// Open the source described by `spec` for the given side.
pub fn open(role: Role, spec: &SourceSpec, settings: &Settings) -> Result<Box<dyn RecordSource>> {
    match spec {
        SourceSpec::Plex { address, token } => {
            let client = PlexClient::new(address, token, settings.request_timeout).map_err(|e| {
                Error::SourceUnavailable {
                    role,
                    reason: e.to_string(),
                }
            })?;
            Ok(Box::new(PlexSource::new(client)))
        }
        SourceSpec::Scan { root } => Ok(Box::new(DirectoryScanner::new(root))),
    }
}
