//! Reconciliation of a remote listing against a local one.
//!
//! This is the core of the comparison. Given two listings, it classifies
//! every title as moved, remote-only or local-only.
//!
//! # Algorithm
//!
//! 1. For each remote record, look up the matching local title. Missing
//!    titles are remote-only; titles in a different library are moved.
//! 2. For each local record, check whether the remote listing has the title.
//!    Missing titles are local-only. Moves are never reported from this side.
//! 3. Pass 1 results come first in remote order, then pass 2 results in
//!    local order.
//!
//! When the local listing holds the same title more than once, the last
//! matching record decides the library comparison.

use crate::{LibraryName, Listing, MovieRecord, Title};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// How a title differs between the two sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DifferenceKind {
    /// Present on both sides in different libraries
    #[serde(rename_all = "camelCase")]
    Moved {
        local_library: LibraryName,
        remote_library: LibraryName,
    },
    /// Present only in the remote listing
    RemoteOnly { library: LibraryName },
    /// Present only in the local listing
    LocalOnly { library: LibraryName },
}

/// One reported difference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifferenceRecord {
    pub title: Title,
    #[serde(flatten)]
    pub kind: DifferenceKind,
}

impl DifferenceRecord {
    pub fn moved(
        title: impl Into<Title>,
        local_library: impl Into<LibraryName>,
        remote_library: impl Into<LibraryName>,
    ) -> Self {
        Self {
            title: title.into(),
            kind: DifferenceKind::Moved {
                local_library: local_library.into(),
                remote_library: remote_library.into(),
            },
        }
    }

    pub fn remote_only(title: impl Into<Title>, library: impl Into<LibraryName>) -> Self {
        Self {
            title: title.into(),
            kind: DifferenceKind::RemoteOnly {
                library: library.into(),
            },
        }
    }

    pub fn local_only(title: impl Into<Title>, library: impl Into<LibraryName>) -> Self {
        Self {
            title: title.into(),
            kind: DifferenceKind::LocalOnly {
                library: library.into(),
            },
        }
    }

    /// Human-readable description without column padding.
    pub fn detail(&self) -> String {
        self.padded_detail(0)
    }

    /// Description with the local library of a move padded to `location_width`.
    pub fn padded_detail(&self, location_width: usize) -> String {
        match &self.kind {
            DifferenceKind::Moved {
                local_library,
                remote_library,
            } => format!("{local_library:<location_width$} -> {remote_library}"),
            DifferenceKind::RemoteOnly { library } => format!("Move to Plex local at {library}"),
            DifferenceKind::LocalOnly { library } => format!("Move to Plex server at {library}"),
        }
    }

    pub fn is_moved(&self) -> bool {
        matches!(self.kind, DifferenceKind::Moved { .. })
    }
}

/// Compare `remote` against `local` and return every difference in report order.
pub fn reconcile(remote: &Listing, local: &Listing) -> Vec<DifferenceRecord> {
    let mut differences = Vec::new();

    // Later inserts overwrite earlier ones: the last local match wins.
    let local_by_title: HashMap<&str, &MovieRecord> = local
        .iter()
        .map(|record| (record.title.as_str(), record))
        .collect();

    for remote_movie in remote {
        match local_by_title.get(remote_movie.title.as_str()) {
            None => differences.push(DifferenceRecord::remote_only(
                remote_movie.title.clone(),
                remote_movie.library.clone(),
            )),
            Some(local_movie) if local_movie.library != remote_movie.library => {
                differences.push(DifferenceRecord::moved(
                    remote_movie.title.clone(),
                    local_movie.library.clone(),
                    remote_movie.library.clone(),
                ))
            }
            Some(_) => {}
        }
    }

    let remote_titles: HashSet<&str> = remote.iter().map(|r| r.title.as_str()).collect();

    for local_movie in local {
        if !remote_titles.contains(local_movie.title.as_str()) {
            differences.push(DifferenceRecord::local_only(
                local_movie.title.clone(),
                local_movie.library.clone(),
            ));
        }
    }

    differences
}
