//! Column-aligned rendering of reconciliation results.

use crate::{DifferenceKind, DifferenceRecord, Listing};
use serde::{Deserialize, Serialize};

/// Separator between the title column and the detail column.
pub const COLUMN_SEPARATOR: &str = " :- ";

/// Column widths measured over both listings.
///
/// Widths cover every record on both sides, not only the differing ones,
/// so reports from the same pair of listings always line up the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnWidths {
    pub title: usize,
    pub location: usize,
}

impl ColumnWidths {
    /// Widest title and library in characters across both listings.
    pub fn measure(remote: &Listing, local: &Listing) -> Self {
        remote
            .iter()
            .chain(local.iter())
            .fold(Self::default(), |widths, movie| Self {
                title: widths.title.max(movie.title.chars().count()),
                location: widths.location.max(movie.library.chars().count()),
            })
    }
}

/// Render one line per difference, in the order given.
pub fn format(differences: &[DifferenceRecord], remote: &Listing, local: &Listing) -> Vec<String> {
    let widths = ColumnWidths::measure(remote, local);
    differences
        .iter()
        .map(|difference| format_line(difference, widths))
        .collect()
}

/// Render a single difference with the given widths.
pub fn format_line(difference: &DifferenceRecord, widths: ColumnWidths) -> String {
    format!(
        "{:<width$}{}{}",
        difference.title,
        COLUMN_SEPARATOR,
        difference.padded_detail(widths.location),
        width = widths.title,
    )
}

/// Count of differences by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub moved: usize,
    pub remote_only: usize,
    pub local_only: usize,
}

impl ReportSummary {
    pub fn from_differences(differences: &[DifferenceRecord]) -> Self {
        let mut summary = Self::default();
        for difference in differences {
            match difference.kind {
                DifferenceKind::Moved { .. } => summary.moved += 1,
                DifferenceKind::RemoteOnly { .. } => summary.remote_only += 1,
                DifferenceKind::LocalOnly { .. } => summary.local_only += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.moved + self.remote_only + self.local_only
    }
}
