// src/exec/mod.rs

//! Process supervision layer.
//!
//! - [`process`] owns the engine subprocess: spawning, the completion race
//!   inside `wait`, and forced termination.
//! - `relay` drains the subprocess's stdout and stderr pipes line by line
//!   into the configured sinks.

pub mod process;
pub(crate) mod relay;

pub use process::DataxProcess;
