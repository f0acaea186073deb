// src/errors.rs

//! Crate-wide error type and result alias.

use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataxError {
    #[error("cannot resolve path {path:?}: {source}")]
    BadPath {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start worker process: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("worker process not started")]
    NotStarted,

    #[error("worker process already started")]
    AlreadyStarted,

    #[error("run timed out after {elapsed:?} (limit {limit:?})")]
    Timeout { limit: Duration, elapsed: Duration },

    #[error("run cancelled")]
    Cancelled,

    /// The worker exited on its own with a non-success status. The status
    /// is passed through verbatim so callers can inspect codes and signals.
    #[error("worker exited with {status}")]
    Failed { status: ExitStatus },
}

pub type Result<T> = std::result::Result<T, DataxError>;
