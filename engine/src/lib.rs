//! # plexdiff engine
//!
//! Deterministic comparison of two Plex movie catalogs.
//!
//! This crate holds the pure logic behind `plexdiff`: it builds canonical
//! listings from whatever a source produced, reconciles a remote listing
//! against a local one, renders the differences as aligned text and encodes
//! listings as snapshots that can be reloaded later.
//!
//! ## Design Principles
//!
//! - **No IO**: Engine has no knowledge of files, network, or platform
//! - **Deterministic**: Same listings always produce the same report, line for line
//! - **Testable**: Sources are a trait, so tests feed records directly
//!
//! ## Core Concepts
//!
//! ### Listings
//!
//! A [`Listing`] is an ordered sequence of [`MovieRecord`]s (title + library)
//! tagged with a [`Role`], either remote or local. Listings come from a
//! [`RecordSource`] through [`listing::build_from_source`], or from a saved
//! snapshot through [`snapshot::load`].
//!
//! ### Reconciliation
//!
//! [`reconcile`] classifies each title:
//! - moved: on both sides but in different libraries
//! - remote-only: missing from the local listing
//! - local-only: missing from the remote listing
//!
//! Remote-side results come first, in remote order, followed by local-only
//! results in local order.
//!
//! ## Quick Start
//!
//! ```rust
//! use plexdiff_engine::{reconcile, report, DifferenceRecord, Listing, Role};
//!
//! let remote = Listing::new(Role::Remote)
//!     .with("Alien", "SciFi")
//!     .with("Up", "Family");
//! let local = Listing::new(Role::Local)
//!     .with("Alien", "Horror")
//!     .with("Cars", "Family");
//!
//! let differences = reconcile(&remote, &local);
//! assert_eq!(differences[0], DifferenceRecord::moved("Alien", "Horror", "SciFi"));
//!
//! let lines = report::format(&differences, &remote, &local);
//! assert_eq!(lines[0], "Alien :- Horror -> SciFi");
//! ```

pub mod error;
pub mod listing;
pub mod reconcile;
pub mod record;
pub mod report;
pub mod snapshot;

// Re-export main types at crate root
pub use error::Error;
pub use listing::{build, build_from_source, BoxError, RawRecord, RecordSource};
pub use reconcile::{reconcile, DifferenceKind, DifferenceRecord};
pub use record::{Listing, MovieRecord, Role};
pub use report::{ColumnWidths, ReportSummary};
pub use snapshot::SnapshotFormat;

/// Type aliases for clarity
pub type Title = String;
pub type LibraryName = String;
