//! Command-line parsing and run configuration.
//!
//! Arguments are parsed once into [`Cli`] and converted into an immutable
//! [`RunConfig`], which is all `run` ever sees.

use crate::error::{AppError, Result};
use clap::{Parser, Subcommand};
use plexdiff_engine::{Role, SnapshotFormat};
use std::path::PathBuf;
use std::time::Duration;

/// Default location of the difference report.
pub const DEFAULT_REPORT_PATH: &str = "PlexMovieDifferences.txt";

/// Default HTTP timeout for Plex requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Generates movie listings from Plex servers or directories and compares
/// them for differences between a remote and a local collection.
#[derive(Parser, Debug)]
#[command(name = "plexdiff", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate a movie listing from one live source and save it
    Generate {
        /// File to write the listing to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
        /// Snapshot encoding: json or lines
        #[arg(long, default_value_t = SnapshotFormat::Json)]
        format: SnapshotFormat,
        /// Address of the Plex server (host:port)
        #[arg(long, value_name = "SERVER_ADDRESS")]
        address: Option<String>,
        /// API token for the Plex Web API (falls back to PLEX_TOKEN)
        #[arg(long, value_name = "API_TOKEN")]
        token: Option<String>,
        /// Scan a directory tree instead of asking a server
        #[arg(long, value_name = "DIR")]
        scan: Option<PathBuf>,
    },
    /// Generate and save both the remote and the local listing in one run
    GenerateBoth {
        #[arg(long, value_name = "FILE")]
        remote_output: PathBuf,
        #[arg(long, value_name = "FILE")]
        local_output: PathBuf,
        #[arg(long, default_value_t = SnapshotFormat::Json)]
        format: SnapshotFormat,
        #[arg(long, value_name = "SERVER_ADDRESS")]
        remote_address: Option<String>,
        #[arg(long, value_name = "API_TOKEN")]
        remote_token: Option<String>,
        #[arg(long, value_name = "DIR")]
        remote_scan: Option<PathBuf>,
        #[arg(long, value_name = "SERVER_ADDRESS")]
        local_address: Option<String>,
        #[arg(long, value_name = "API_TOKEN")]
        local_token: Option<String>,
        #[arg(long, value_name = "DIR")]
        local_scan: Option<PathBuf>,
    },
    /// Compare a remote listing against a local listing or a live local source
    Compare {
        /// Listing generated from the remote server
        #[arg(value_name = "REMOTE_SERVER_LISTING")]
        remote_listing: PathBuf,
        /// Listing generated from the local server; if omitted, a local
        /// source must be given to build the listing in memory
        #[arg(value_name = "LOCAL_SERVER_LISTING")]
        local_listing: Option<PathBuf>,
        #[arg(long, value_name = "SERVER_ADDRESS")]
        local_address: Option<String>,
        #[arg(long, value_name = "API_TOKEN")]
        local_token: Option<String>,
        #[arg(long, value_name = "DIR")]
        local_scan: Option<PathBuf>,
        /// Snapshot encoding of the listing files; detected from content if omitted
        #[arg(long)]
        format: Option<SnapshotFormat>,
        /// Where to write the difference report
        #[arg(long, value_name = "FILE", default_value = DEFAULT_REPORT_PATH)]
        report: PathBuf,
    },
}

/// A live place to fetch a listing from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Plex { address: String, token: String },
    Scan { root: PathBuf },
}

/// Where the local side of a comparison comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalInput {
    Snapshot(PathBuf),
    Live(SourceSpec),
}

/// What a run does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Generate {
        source: SourceSpec,
        output: PathBuf,
        format: SnapshotFormat,
    },
    GenerateBoth {
        remote: SourceSpec,
        remote_output: PathBuf,
        local: SourceSpec,
        local_output: PathBuf,
        format: SnapshotFormat,
    },
    Compare {
        remote_listing: PathBuf,
        local: LocalInput,
        format: Option<SnapshotFormat>,
        report: PathBuf,
    },
}

/// Settings taken from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Timeout for each Plex request
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    /// Load settings through an environment lookup.
    pub fn from_lookup(env: &dyn Fn(&str) -> Option<String>) -> std::result::Result<Self, ConfigError> {
        let request_timeout = match env("PLEX_TIMEOUT_SECS") {
            Some(value) => {
                let secs: u64 = value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(value.clone()))?;
                if secs == 0 {
                    return Err(ConfigError::InvalidTimeout(value));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self { request_timeout })
    }
}

/// Fully validated configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub mode: Mode,
    pub settings: Settings,
}

impl RunConfig {
    /// Load configuration from parsed arguments and the process environment.
    pub fn from_env(cli: Cli) -> Result<Self> {
        Self::from_cli(cli, &|key: &str| std::env::var(key).ok())
    }

    /// Validate parsed arguments. No file or network access happens here.
    pub fn from_cli(cli: Cli, env: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let settings = Settings::from_lookup(env)?;

        let mode = match cli.command {
            Commands::Generate {
                output,
                format,
                address,
                token,
                scan,
            } => {
                let source = resolve_source(Role::Remote, address, token, scan, env)?
                    .ok_or_else(|| {
                        AppError::Usage("No source given: pass --address or --scan".to_string())
                    })?;
                Mode::Generate {
                    source,
                    output,
                    format,
                }
            }
            Commands::GenerateBoth {
                remote_output,
                local_output,
                format,
                remote_address,
                remote_token,
                remote_scan,
                local_address,
                local_token,
                local_scan,
            } => {
                let remote =
                    resolve_source(Role::Remote, remote_address, remote_token, remote_scan, env)?
                        .ok_or_else(|| {
                            AppError::Usage(
                                "Remote Source Not Specified: pass --remote-address or --remote-scan"
                                    .to_string(),
                            )
                        })?;
                let local =
                    resolve_source(Role::Local, local_address, local_token, local_scan, env)?
                        .ok_or_else(|| {
                            AppError::Usage(
                                "Local Source Not Specified: pass --local-address or --local-scan"
                                    .to_string(),
                            )
                        })?;
                Mode::GenerateBoth {
                    remote,
                    remote_output,
                    local,
                    local_output,
                    format,
                }
            }
            Commands::Compare {
                remote_listing,
                local_listing,
                local_address,
                local_token,
                local_scan,
                format,
                report,
            } => {
                let live = resolve_source(Role::Local, local_address, local_token, local_scan, env)?;
                let local = match (local_listing, live) {
                    (Some(_), Some(_)) => {
                        return Err(AppError::Usage(
                            "Give either a local listing file or a local source, not both"
                                .to_string(),
                        ))
                    }
                    (Some(path), None) => LocalInput::Snapshot(path),
                    (None, Some(source)) => LocalInput::Live(source),
                    (None, None) => {
                        return Err(AppError::Usage(
                            "Local Listing File Not Specified".to_string(),
                        ))
                    }
                };
                Mode::Compare {
                    remote_listing,
                    local,
                    format,
                    report,
                }
            }
        };

        Ok(Self { mode, settings })
    }
}

fn resolve_source(
    role: Role,
    address: Option<String>,
    token: Option<String>,
    scan: Option<PathBuf>,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<Option<SourceSpec>> {
    match (address, scan) {
        (Some(_), Some(_)) => Err(AppError::Usage(format!(
            "The {role} source must be either a server address or a scan directory, not both"
        ))),
        (Some(address), None) => {
            let token = token
                .or_else(|| env("PLEX_TOKEN"))
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    AppError::Usage(format!(
                        "API token required for the {role} server at {address}: pass a token flag or set PLEX_TOKEN"
                    ))
                })?;
            Ok(Some(SourceSpec::Plex { address, token }))
        }
        (None, Some(root)) => Ok(Some(SourceSpec::Scan { root })),
        (None, None) => Ok(None),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PLEX_TIMEOUT_SECS value: {0}")]
    InvalidTimeout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn with_token(key: &str) -> Option<String> {
        (key == "PLEX_TOKEN").then(|| "env-token".to_string())
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("plexdiff").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn compare_two_files() {
        let config =
            RunConfig::from_cli(parse(&["compare", "remote.json", "local.json"]), &no_env).unwrap();

        assert_eq!(
            config.mode,
            Mode::Compare {
                remote_listing: PathBuf::from("remote.json"),
                local: LocalInput::Snapshot(PathBuf::from("local.json")),
                format: None,
                report: PathBuf::from(DEFAULT_REPORT_PATH),
            }
        );
        assert_eq!(config.settings, Settings::default());
    }

    #[test]
    fn compare_against_live_local_server() {
        let cli = parse(&[
            "compare",
            "remote.json",
            "--local-address",
            "127.0.0.1:32400",
            "--local-token",
            "abc",
            "--report",
            "out.txt",
        ]);

        let config = RunConfig::from_cli(cli, &no_env).unwrap();

        assert_eq!(
            config.mode,
            Mode::Compare {
                remote_listing: PathBuf::from("remote.json"),
                local: LocalInput::Live(SourceSpec::Plex {
                    address: "127.0.0.1:32400".into(),
                    token: "abc".into(),
                }),
                format: None,
                report: PathBuf::from("out.txt"),
            }
        );
    }

    #[test]
    fn compare_without_local_side_is_usage_error() {
        let err = RunConfig::from_cli(parse(&["compare", "remote.json"]), &no_env).unwrap_err();

        assert!(matches!(err, AppError::Usage(_)));
        assert_eq!(
            err.to_string(),
            "Plex Compare Error: Local Listing File Not Specified"
        );
    }

    #[test]
    fn compare_format_override() {
        let cli = parse(&["compare", "remote.txt", "local.txt", "--format", "lines"]);

        let config = RunConfig::from_cli(cli, &no_env).unwrap();

        assert!(matches!(
            config.mode,
            Mode::Compare {
                format: Some(SnapshotFormat::Lines),
                ..
            }
        ));
    }

    #[test]
    fn compare_with_file_and_live_source_is_usage_error() {
        let cli = parse(&["compare", "r.json", "l.json", "--local-scan", "/movies"]);

        let err = RunConfig::from_cli(cli, &no_env).unwrap_err();
        assert!(matches!(err, AppError::Usage(_)));
    }

    #[test]
    fn token_falls_back_to_environment() {
        let cli = parse(&["generate", "-o", "out.json", "--address", "plex:32400"]);

        let config = RunConfig::from_cli(cli, &with_token).unwrap();

        assert_eq!(
            config.mode,
            Mode::Generate {
                source: SourceSpec::Plex {
                    address: "plex:32400".into(),
                    token: "env-token".into(),
                },
                output: PathBuf::from("out.json"),
                format: SnapshotFormat::Json,
            }
        );
    }

    #[test]
    fn missing_token_is_usage_error() {
        let cli = parse(&["generate", "-o", "out.json", "--address", "plex:32400"]);

        let err = RunConfig::from_cli(cli, &no_env).unwrap_err();
        assert!(matches!(err, AppError::Usage(msg) if msg.contains("PLEX_TOKEN")));
    }

    #[test]
    fn generate_from_scan_in_line_format() {
        let cli = parse(&["generate", "-o", "out.txt", "--format", "lines", "--scan", "/movies"]);

        let config = RunConfig::from_cli(cli, &no_env).unwrap();

        assert_eq!(
            config.mode,
            Mode::Generate {
                source: SourceSpec::Scan {
                    root: PathBuf::from("/movies")
                },
                output: PathBuf::from("out.txt"),
                format: SnapshotFormat::Lines,
            }
        );
    }

    #[test]
    fn generate_needs_exactly_one_source() {
        let none = parse(&["generate", "-o", "out.json"]);
        assert!(matches!(
            RunConfig::from_cli(none, &with_token),
            Err(AppError::Usage(_))
        ));

        let both = parse(&["generate", "-o", "out.json", "--address", "a", "--scan", "/m"]);
        assert!(matches!(
            RunConfig::from_cli(both, &with_token),
            Err(AppError::Usage(_))
        ));
    }

    #[test]
    fn generate_both() {
        let cli = parse(&[
            "generate-both",
            "--remote-output",
            "remote.json",
            "--local-output",
            "local.json",
            "--remote-address",
            "remote:32400",
            "--remote-token",
            "r",
            "--local-scan",
            "/movies",
        ]);

        let config = RunConfig::from_cli(cli, &no_env).unwrap();

        assert_eq!(
            config.mode,
            Mode::GenerateBoth {
                remote: SourceSpec::Plex {
                    address: "remote:32400".into(),
                    token: "r".into(),
                },
                remote_output: PathBuf::from("remote.json"),
                local: SourceSpec::Scan {
                    root: PathBuf::from("/movies")
                },
                local_output: PathBuf::from("local.json"),
                format: SnapshotFormat::Json,
            }
        );
    }

    #[test]
    fn timeout_from_environment() {
        let env = |key: &str| (key == "PLEX_TIMEOUT_SECS").then(|| "5".to_string());
        let settings = Settings::from_lookup(&env).unwrap();
        assert_eq!(settings.request_timeout, Duration::from_secs(5));

        let bad = |key: &str| (key == "PLEX_TIMEOUT_SECS").then(|| "soon".to_string());
        assert!(matches!(
            Settings::from_lookup(&bad),
            Err(ConfigError::InvalidTimeout(_))
        ));
    }
}
