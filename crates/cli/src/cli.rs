//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Realtime Sync - keep a simulation clock aligned with real time
#[derive(Parser, Debug)]
#[command(
    name = "realtime-sync",
    author,
    version,
    about = "Realtime warp synchronization for simulation clocks",
    long_about = "Binds simulation time zero to a real instant and drives the host's \n\
                  time-warp control so the simulation keeps pace with the wall clock.\n\n\
                  Runs against an in-process simulated host and edits the persisted \n\
                  base-time setting."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "REALTIME_SYNC_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "REALTIME_SYNC_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the sync engine against a simulated host
    Run(RunArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),

    /// Bind simulation time zero to an ISO-8601 instant
    Set(SetArgs),

    /// Bind simulation time zero to the current instant
    Now(EditArgs),

    /// Clear the base-time binding
    Unset(EditArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "realtime.toml",
        env = "REALTIME_SYNC_CONFIG"
    )]
    pub config: PathBuf,

    /// Number of ticks to run (0 = until interrupted)
    #[arg(long, default_value = "0", env = "REALTIME_SYNC_TICKS")]
    pub ticks: u64,

    /// Tick period in milliseconds
    #[arg(long, default_value = "100", env = "REALTIME_SYNC_TICK_MS")]
    pub tick_ms: u64,

    /// Host seconds advanced per tick (defaults to the tick period)
    #[arg(long)]
    pub dt: Option<f64>,

    /// Use a virtual wall clock advanced by `dt` instead of the system clock
    #[arg(long)]
    pub virtual_clock: bool,

    /// Initial offset of the simulation against real time, in seconds
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub start_offset: f64,

    /// Keep the status window open (freezes the synchronized state)
    #[arg(long)]
    pub ui_open: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "REALTIME_SYNC_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "realtime.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "realtime.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Simulation seconds to render as a date
    #[arg(long, default_value = "0")]
    pub ut: f64,
}

/// Arguments for the `set` command
#[derive(Parser, Debug)]
pub struct SetArgs {
    /// Path to configuration file (created if missing)
    #[arg(short, long, default_value = "realtime.toml")]
    pub config: PathBuf,

    /// ISO-8601 instant, e.g. 2024-05-01T12:00:00Z
    pub base_time: String,
}

/// Arguments for the `now` and `unset` commands
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Path to configuration file (created if missing)
    #[arg(short, long, default_value = "realtime.toml")]
    pub config: PathBuf,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
