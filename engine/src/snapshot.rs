//! Snapshot encodings for saving and reloading listings.
//!
//! Two encodings are supported:
//!
//! - **JSON**: an array of `{"Title": .., "Library": ..}` objects.
//! - **Lines**: one `<title> :- <library>` record per line.
//!
//! A snapshot does not carry the listing's role; the caller says which side
//! it is loading.

use crate::{error::Result, Error, Listing, MovieRecord, Role};
use std::fmt;
use std::str::FromStr;

/// Separator between title and library in the line encoding.
pub const LINE_SEPARATOR: &str = " :- ";

/// How a listing is written to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotFormat {
    #[default]
    Json,
    Lines,
}

impl SnapshotFormat {
    /// Guess the encoding of saved text.
    ///
    /// JSON only when the text opens an array of objects (`[` then `{` or
    /// `]`), so line snapshots whose first title starts with `[` still load.
    pub fn detect(text: &str) -> Self {
        match text.trim_start().strip_prefix('[') {
            Some(rest) if rest.trim_start().starts_with(['{', ']']) => SnapshotFormat::Json,
            _ => SnapshotFormat::Lines,
        }
    }
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotFormat::Json => f.write_str("json"),
            SnapshotFormat::Lines => f.write_str("lines"),
        }
    }
}

impl FromStr for SnapshotFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(SnapshotFormat::Json),
            "lines" | "text" | "txt" => Ok(SnapshotFormat::Lines),
            other => Err(format!("unknown snapshot format: {other}")),
        }
    }
}

/// Encode a listing in the given format.
pub fn save(listing: &Listing, format: SnapshotFormat) -> Result<String> {
    match format {
        SnapshotFormat::Json => to_json(listing),
        SnapshotFormat::Lines => to_lines(listing),
    }
}

/// Decode a listing in the given format.
pub fn load(role: Role, text: &str, format: SnapshotFormat) -> Result<Listing> {
    match format {
        SnapshotFormat::Json => from_json(role, text),
        SnapshotFormat::Lines => from_lines(role, text),
    }
}

/// Decode a listing, detecting its format from the text.
pub fn load_detected(role: Role, text: &str) -> Result<Listing> {
    load(role, text, SnapshotFormat::detect(text))
}

/// Serialize to pretty JSON.
pub fn to_json(listing: &Listing) -> Result<String> {
    serde_json::to_string_pretty(listing.records()).map_err(|e| Error::MalformedSnapshot {
        line: e.line(),
        reason: e.to_string(),
    })
}

/// Deserialize from JSON.
pub fn from_json(role: Role, text: &str) -> Result<Listing> {
    let records: Vec<MovieRecord> =
        serde_json::from_str(text).map_err(|e| Error::MalformedSnapshot {
            line: e.line(),
            reason: e.to_string(),
        })?;
    Ok(Listing::from_records(role, records))
}

/// Serialize to the line encoding, one newline-terminated record per line.
pub fn to_lines(listing: &Listing) -> Result<String> {
    let mut out = String::new();
    for movie in listing {
        if movie.title.contains(LINE_SEPARATOR) {
            return Err(Error::SeparatorInTitle(movie.title.clone()));
        }
        out.push_str(&movie.title);
        out.push_str(LINE_SEPARATOR);
        out.push_str(&movie.library);
        out.push('\n');
    }
    Ok(out)
}

/// Deserialize from the line encoding.
///
/// Each line is split on the first separator. Trailing whitespace is
/// trimmed from the library; blank lines are skipped.
pub fn from_lines(role: Role, text: &str) -> Result<Listing> {
    let mut listing = Listing::new(role);
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let malformed = |reason: &str| Error::MalformedSnapshot {
            line: index + 1,
            reason: reason.to_string(),
        };

        let (title, library) = line
            .split_once(LINE_SEPARATOR)
            .ok_or_else(|| malformed("missing ' :- ' separator"))?;
        let library = library.trim_end();

        if title.is_empty() {
            return Err(malformed("empty title"));
        }
        if library.is_empty() {
            return Err(malformed("empty library"));
        }

        listing.push(MovieRecord::new(title, library));
    }
    Ok(listing)
}
