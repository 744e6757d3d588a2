//! Directory tree scanner.
//!
//! Every media file becomes one raw record: the file stem is the title and
//! the containing directory's name is the library.

use plexdiff_engine::{BoxError, RawRecord, RecordSource};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions recognized as movies, compared case-insensitively.
pub const MEDIA_EXTENSIONS: &[&str] = &["mp4", "avi", "m4v", "mkv", "mov", "avchd", "webm"];

/// Recursive scanner rooted at one directory.
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    root: PathBuf,
}

impl DirectoryScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Walk the tree and collect a raw record for every media file.
    ///
    /// The root is canonicalized first so files directly under `.` or `..`
    /// still get a named containing directory.
    pub fn scan(&self) -> io::Result<Vec<RawRecord>> {
        let root = self.root.canonicalize()?;
        let mut records = Vec::new();

        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() || !is_media_file(entry.path()) {
                continue;
            }

            let path = entry.path();
            records.push(RawRecord {
                title: path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned()),
                library: path
                    .parent()
                    .and_then(Path::file_name)
                    .map(|name| name.to_string_lossy().into_owned()),
            });
        }

        tracing::debug!(
            "Scanned {}: {} media files",
            self.root.display(),
            records.len()
        );
        Ok(records)
    }
}

impl RecordSource for DirectoryScanner {
    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }

    fn fetch(&self) -> Result<Vec<RawRecord>, BoxError> {
        Ok(self.scan()?)
    }

    fn sorts_by_title(&self) -> bool {
        true
    }
}

/// Whether the path has one of the media extensions.
pub fn is_media_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            MEDIA_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}
