//! plexdiff - compare Plex movie libraries between a remote and a local server.
//!
//! Listings come from a Plex server, a directory scan, or a previously saved
//! snapshot. The comparison itself lives in the plexdiff-engine crate.

mod config;
mod error;
mod run;
mod source;

use crate::config::{Cli, RunConfig};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    // Load .env first so RUST_LOG and PLEX_* from it take effect
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plexdiff=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match RunConfig::from_env(cli).and_then(|config| run::run(&config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Run failed: {:?}", e);
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
