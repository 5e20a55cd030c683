//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (gtfs, realtime, validate), and their associated
//! argument structs. Every tuning flag has an environment variable
//! equivalent for CI pipelines.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "feedcheck",
    version,
    about = "CI health checker for GTFS static and realtime transit feed sources",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        feedcheck gtfs                       Check feeds from ./dataset.json\n  \
        feedcheck realtime                   Check updaters from ./realtime.json\n  \
        feedcheck validate gtfs              Structure-only check, no network\n\n  \
        Docs: https://github.com/feedcheck/feedcheck"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check static GTFS feed sources (sequential)
    Gtfs(GtfsArgs),

    /// Check realtime updater endpoints (concurrent)
    Realtime(RealtimeArgs),

    /// Validate record structure without probing the network
    Validate(ValidateArgs),
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        feedcheck gtfs                            Check ./dataset.json\n  \
        feedcheck gtfs data/dataset.json          Specific dataset file\n  \
        feedcheck gtfs --timeout 30 --retries 3   Patient mode for slow hosts")]
pub struct GtfsArgs {
    /// Dataset file holding the static feed descriptors
    #[arg(default_value = "dataset.json")]
    pub file: PathBuf,

    // -- Tuning --
    /// Per-attempt probe timeout in seconds
    #[arg(
        long,
        env = "FEEDCHECK_TIMEOUT",
        default_value_t = 15,
        help_heading = "Tuning"
    )]
    pub timeout: u64,

    /// Attempts per probe before giving up
    #[arg(
        long,
        env = "FEEDCHECK_RETRIES",
        default_value_t = 2,
        help_heading = "Tuning"
    )]
    pub retries: u32,

    /// Delay between consecutive feed checks in milliseconds
    #[arg(
        long,
        env = "FEEDCHECK_DELAY_MS",
        default_value_t = 500,
        help_heading = "Tuning"
    )]
    pub delay_ms: u64,

    // -- Logging --
    /// Log level for diagnostics (the report itself always prints)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "warn")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        feedcheck realtime                        Check ./realtime.json\n  \
        feedcheck realtime --workers 5            Gentler on shared rate limits\n  \
        JP_API_KEY=... feedcheck realtime         Secrets via the environment")]
pub struct RealtimeArgs {
    /// Realtime file holding the updater descriptors
    #[arg(default_value = "realtime.json")]
    pub file: PathBuf,

    // -- Tuning --
    /// Per-attempt probe timeout in seconds
    #[arg(
        long,
        env = "FEEDCHECK_TIMEOUT",
        default_value_t = 15,
        help_heading = "Tuning"
    )]
    pub timeout: u64,

    /// Attempts per probe before giving up
    #[arg(
        long,
        env = "FEEDCHECK_RETRIES",
        default_value_t = 2,
        help_heading = "Tuning"
    )]
    pub retries: u32,

    /// Concurrent worker pool size
    #[arg(
        long,
        env = "FEEDCHECK_WORKERS",
        default_value_t = 20,
        help_heading = "Tuning"
    )]
    pub workers: usize,

    // -- Logging --
    /// Log level for diagnostics (the report itself always prints)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "warn")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Which record schema to validate against
    pub kind: DatasetKind,

    /// File to validate (defaults to dataset.json / realtime.json)
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: ValidateFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DatasetKind {
    Gtfs,
    Realtime,
}

impl DatasetKind {
    #[must_use]
    pub const fn default_file(self) -> &'static str {
        match self {
            Self::Gtfs => "dataset.json",
            Self::Realtime => "realtime.json",
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ValidateFormat {
    Text,
    Json,
}
