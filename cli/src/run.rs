//! Execution of a configured run.
//!
//! Every listing is built (or loaded) before any output file is written,
//! so a failure never leaves a partial report or snapshot behind.

use crate::config::{LocalInput, Mode, RunConfig, Settings, SourceSpec};
use crate::error::{AppError, Result};
use crate::source;
use plexdiff_engine::{
    build_from_source, reconcile, report, snapshot, Listing, ReportSummary, Role, SnapshotFormat,
};
use std::fs;
use std::path::Path;

/// Execute the configured mode.
pub fn run(config: &RunConfig) -> Result<()> {
    match &config.mode {
        Mode::Generate {
            source,
            output,
            format,
        } => {
            tracing::info!("Generating listing into {}", output.display());
            let listing = fetch_listing(Role::Remote, source, &config.settings)?;
            save_listing(&listing, output, *format)
        }
        Mode::GenerateBoth {
            remote,
            remote_output,
            local,
            local_output,
            format,
        } => {
            tracing::info!("Generating remote and local listings");
            let remote = fetch_listing(Role::Remote, remote, &config.settings)?;
            let local = fetch_listing(Role::Local, local, &config.settings)?;

            // Encode both before writing either
            let remote_text = snapshot::save(&remote, *format)?;
            let local_text = snapshot::save(&local, *format)?;
            write_listing(&remote, remote_output, remote_text)?;
            write_listing(&local, local_output, local_text)
        }
        Mode::Compare {
            remote_listing,
            local,
            format,
            report,
        } => {
            let remote = load_listing(Role::Remote, remote_listing, *format)?;
            let local = match local {
                LocalInput::Snapshot(path) => load_listing(Role::Local, path, *format)?,
                LocalInput::Live(spec) => fetch_listing(Role::Local, spec, &config.settings)?,
            };

            let lines = compare(&remote, &local);
            write_report(report, &lines)
        }
    }
}

/// Reconcile two listings and render the report lines.
pub fn compare(remote: &Listing, local: &Listing) -> Vec<String> {
    let differences = reconcile(remote, local);
    let summary = ReportSummary::from_differences(&differences);
    tracing::info!(
        "Compared {} remote and {} local movies: {} moved, {} remote only, {} local only",
        remote.len(),
        local.len(),
        summary.moved,
        summary.remote_only,
        summary.local_only
    );
    report::format(&differences, remote, local)
}

fn fetch_listing(role: Role, spec: &SourceSpec, settings: &Settings) -> Result<Listing> {
    let source = source::open(role, spec, settings)?;
    tracing::info!("Fetching {} listing from {}", role, source.describe());

    let listing = build_from_source(role, source.as_ref())?;
    tracing::info!("Built {} listing with {} movies", role, listing.len());
    Ok(listing)
}

fn load_listing(role: Role, path: &Path, format: Option<SnapshotFormat>) -> Result<Listing> {
    let text = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    let format = format.unwrap_or_else(|| SnapshotFormat::detect(&text));

    let listing = snapshot::load(role, &text, format)?;
    tracing::info!(
        "Loaded {} listing from {} ({} format, {} movies)",
        role,
        path.display(),
        format,
        listing.len()
    );
    Ok(listing)
}

fn save_listing(listing: &Listing, path: &Path, format: SnapshotFormat) -> Result<()> {
    let text = snapshot::save(listing, format)?;
    write_listing(listing, path, text)
}

fn write_listing(listing: &Listing, path: &Path, text: String) -> Result<()> {
    fs::write(path, text).map_err(|e| AppError::io(path, e))?;
    tracing::info!(
        "Saved {} listing to {} ({} movies)",
        listing.role(),
        path.display(),
        listing.len()
    );
    Ok(())
}

fn write_report(path: &Path, lines: &[String]) -> Result<()> {
    let mut text = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    fs::write(path, text).map_err(|e| AppError::io(path, e))?;
    tracing::info!("Wrote {} differences to {}", lines.len(), path.display());
    Ok(())
}
