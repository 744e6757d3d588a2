//! Building canonical listings from raw source output.
//!
//! Sources (a Plex server, a directory scan, a test fixture) hand back flat
//! `(title, library)` pairs through the [`RecordSource`] trait. The builder
//! turns those pairs into a [`Listing`] without filtering or deduplicating.

use crate::{error::Result, Error, Listing, MovieRecord, Role};

/// Boxed error returned by record sources.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An unvalidated pair as produced by a source.
///
/// Either field may be absent when the upstream data was incomplete; the
/// builder rejects such records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub title: Option<String>,
    pub library: Option<String>,
}

impl RawRecord {
    /// Create a complete raw record.
    pub fn new(title: impl Into<String>, library: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            library: Some(library.into()),
        }
    }
}

/// Anything that can produce raw movie records.
pub trait RecordSource {
    /// Human-readable description used in logs and errors.
    fn describe(&self) -> String;

    /// Fetch every raw record the source knows about.
    fn fetch(&self) -> std::result::Result<Vec<RawRecord>, BoxError>;

    /// Whether the built listing should be sorted by title.
    fn sorts_by_title(&self) -> bool {
        false
    }
}

impl RecordSource for Vec<RawRecord> {
    fn describe(&self) -> String {
        format!("{} in-memory records", self.len())
    }

    fn fetch(&self) -> std::result::Result<Vec<RawRecord>, BoxError> {
        Ok(self.clone())
    }
}

/// Normalize raw records into a listing, one record per pair, in order.
pub fn build(role: Role, raw: Vec<RawRecord>) -> Result<Listing> {
    let mut listing = Listing::new(role);
    for (index, record) in raw.into_iter().enumerate() {
        let title = record.title.ok_or(Error::MalformedSourceData {
            index,
            field: "title",
        })?;
        let library = record.library.ok_or(Error::MalformedSourceData {
            index,
            field: "library",
        })?;
        listing.push(MovieRecord { title, library });
    }
    Ok(listing)
}

/// Fetch from a source and build its listing.
///
/// Fetch failures become [`Error::SourceUnavailable`] tagged with `role`.
/// The title sort is applied only for sources that ask for it.
pub fn build_from_source(role: Role, source: &dyn RecordSource) -> Result<Listing> {
    let raw = source.fetch().map_err(|e| Error::SourceUnavailable {
        role,
        reason: format!("{}: {}", source.describe(), e),
    })?;

    let mut listing = build(role, raw)?;
    if source.sorts_by_title() {
        listing.sort_by_title();
    }
    Ok(listing)
}
