// src/lib.rs

//! Launch and supervise Alibaba DataX engine runs.
//!
//! `datax-runner` wraps one engine invocation end to end: it builds the
//! fixed JVM argument list from a [`Config`], spawns the engine with both
//! output pipes attached, relays every stdout and stderr line to
//! caller-supplied [`LogSink`]s, and settles the run through exactly one of
//! natural exit, deadline timeout, or cancellation.
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use datax_runner::{Config, DataxProcess, TracingSink};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn demo() -> datax_runner::errors::Result<()> {
//! let cfg = Config {
//!     xms: "512m".into(),
//!     xmx: "512m".into(),
//!     datax_home: "./datax".into(),
//!     jobid: "1".into(),
//!     config_file: "./job.json".into(),
//!     ..Config::default()
//! };
//!
//! let cancel = CancellationToken::new();
//! let mut engine = DataxProcess::new(
//!     cfg,
//!     Arc::new(TracingSink::stdout()),
//!     Arc::new(TracingSink::stderr()),
//! );
//!
//! let pid = engine.exec(&cancel, "java").await?;
//! tracing::info!(pid, "engine running");
//! engine.wait(&cancel, Duration::from_secs(1800)).await?;
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod sink;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::info;

pub use crate::args::build_args;
pub use crate::config::Config;
pub use crate::errors::DataxError;
pub use crate::exec::DataxProcess;
pub use crate::sink::{LogSink, TracingSink};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading, plus the `--job` override
/// - Ctrl-C handling mapped onto cancellation
/// - tracing-backed sinks for both engine streams
/// - `exec` and `wait` with the configured deadline
pub async fn run(args: cli::CliArgs) -> Result<()> {
    let mut cfg = config::load_from_path(&args.config)
        .with_context(|| format!("loading runner config '{}'", args.config))?;

    if let Some(job) = args.job {
        cfg.config_file = job;
    }

    if args.dry_run {
        return print_dry_run(&cfg);
    }

    // Ctrl-C cancels the run; wait() then kills the engine.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            cancel.cancel();
        });
    }

    let timeout = Duration::from_secs(args.timeout_secs);
    let mut engine = DataxProcess::new(
        cfg,
        Arc::new(TracingSink::stdout()),
        Arc::new(TracingSink::stderr()),
    );

    let pid = engine.exec(&cancel, &args.java).await?;
    info!(pid, timeout_secs = args.timeout_secs, "supervising datax job");

    engine.wait(&cancel, timeout).await?;
    info!("datax job finished");
    Ok(())
}

/// Print the resolved engine command line without starting anything.
fn print_dry_run(cfg: &Config) -> Result<()> {
    let argv = build_args(cfg)?;
    println!("datax-runner dry run for job '{}':", cfg.jobid);
    for arg in argv {
        println!("  {arg}");
    }
    Ok(())
}
