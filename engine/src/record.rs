//! Movie records and the listings that hold them.

use crate::{LibraryName, Title};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a comparison a listing describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The server being reconciled against
    Remote,
    /// The collection being brought in line with the remote one
    Local,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Remote => f.write_str("remote"),
            Role::Local => f.write_str("local"),
        }
    }
}

/// A single movie and the library it currently lives in.
///
/// Titles are compared byte-for-byte; no case folding or other
/// normalization is applied anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "Title", alias = "title")]
    pub title: Title,
    #[serde(rename = "Library", alias = "library")]
    pub library: LibraryName,
}

impl MovieRecord {
    /// Create a new record.
    pub fn new(title: impl Into<Title>, library: impl Into<LibraryName>) -> Self {
        Self {
            title: title.into(),
            library: library.into(),
        }
    }
}

/// The canonical catalog of one server, scan, or saved snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    role: Role,
    records: Vec<MovieRecord>,
}

impl Listing {
    /// Create an empty listing.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            records: Vec::new(),
        }
    }

    /// Create a listing from records in the given order.
    pub fn from_records(role: Role, records: Vec<MovieRecord>) -> Self {
        Self { role, records }
    }

    /// Builder-style push, handy in tests.
    pub fn with(mut self, title: impl Into<Title>, library: impl Into<LibraryName>) -> Self {
        self.push(MovieRecord::new(title, library));
        self
    }

    pub fn push(&mut self, record: MovieRecord) {
        self.records.push(record);
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MovieRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stable ordinal sort by title.
    pub fn sort_by_title(&mut self) {
        self.records.sort_by(|a, b| a.title.cmp(&b.title));
    }

    pub fn into_records(self) -> Vec<MovieRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Listing {
    type Item = &'a MovieRecord;
    type IntoIter = std::slice::Iter<'a, MovieRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_display() {
        assert_eq!(Role::Remote.to_string(), "remote");
        assert_eq!(Role::Local.to_string(), "local");
    }

    #[test]
    fn build_listing() {
        let listing = Listing::new(Role::Local)
            .with("Alien", "SciFi")
            .with("Up", "Family");

        assert_eq!(listing.role(), Role::Local);
        assert_eq!(listing.len(), 2);
        assert_eq!(listing.records()[1], MovieRecord::new("Up", "Family"));
    }

    #[test]
    fn sort_is_ordinal_and_stable() {
        let mut listing = Listing::new(Role::Local)
            .with("alien", "Lower")
            .with("Zodiac", "Crime")
            .with("Alien", "First")
            .with("Alien", "Second");

        listing.sort_by_title();

        let titles: Vec<_> = listing.iter().map(|r| r.title.as_str()).collect();
        // Uppercase sorts before lowercase in byte order
        assert_eq!(titles, vec!["Alien", "Alien", "Zodiac", "alien"]);
        assert_eq!(listing.records()[0].library, "First");
        assert_eq!(listing.records()[1].library, "Second");
    }

    #[test]
    fn record_serializes_with_capitalized_keys() {
        let record = MovieRecord::new("The Thing", "Horror");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Title":"The Thing","Library":"Horror"}"#);

        let parsed: MovieRecord =
            serde_json::from_str(r#"{"title":"The Thing","library":"Horror"}"#).unwrap();
        assert_eq!(parsed, record);
    }
}
