//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "pilot", version, about = "Driving agent CLI")]
pub struct Cli {
    /// Path to config TOML; built-in defaults apply when the file is absent
    #[arg(long, value_name = "FILE", default_value = "etc/pilot.toml")]
    pub config: PathBuf,

    /// Log and print results as JSON instead of pretty text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Drive the agent over the built-in simulator or a recorded frame script
    Drive {
        /// Play back recorded sensor frames, one per line, instead of the simulator
        #[arg(long, value_name = "FILE")]
        script: Option<PathBuf>,

        /// Stop after this many decision cycles
        #[arg(long, value_name = "N")]
        cycles: Option<u64>,

        /// Override race.stage from the config (warmup|qualifying|race|unknown)
        #[arg(long, value_name = "STAGE")]
        stage: Option<String>,

        /// Override race.lanes from the config (comma-separated forward|opposite)
        #[arg(long, value_name = "LIST")]
        lanes: Option<String>,

        /// Override race.lane from the config
        #[arg(long, value_name = "IDX")]
        lane: Option<usize>,

        /// Override race.seed from the config
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,
    },
    /// Validate the config and print the derived agent parameters
    CheckConfig,
    /// Quick health check (codec and simulator round trip)
    SelfCheck,
}
