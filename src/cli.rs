// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `datax-runner`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "datax-runner",
    version,
    about = "Launch and supervise a DataX engine job, streaming its logs.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the runner config file (TOML).
    #[arg(long, value_name = "PATH", default_value = "Datax.toml")]
    pub config: String,

    /// Override the job description file from the config.
    #[arg(long, value_name = "PATH")]
    pub job: Option<String>,

    /// Path to the Java launcher used to start the engine.
    #[arg(long, value_name = "PATH", default_value = "java")]
    pub java: String,

    /// Abort the run after this many seconds.
    #[arg(long, value_name = "SECS", default_value_t = 3600)]
    pub timeout_secs: u64,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DATAX_LOG` or the default level is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the engine command line, but start nothing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
