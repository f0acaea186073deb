// src/sink.rs

//! Log sinks: where relayed engine output lines end up.

use tracing::info;

/// A destination for one output stream's lines.
///
/// The controller calls [`write`](LogSink::write) once per complete line,
/// from a background relay task, in the order the engine produced them.
/// What a line means is entirely the sink's business; buffering,
/// persistence and error handling all live behind this call. The stdout
/// and stderr sinks are supplied independently and may share one
/// underlying object.
pub trait LogSink: Send + Sync {
    /// Deliver one line, without its trailing newline.
    fn write(&self, line: &str);
}

/// Built-in sink that forwards every line to `tracing`, tagged with the
/// stream it came from. The bundled binary uses one per stream.
#[derive(Debug, Clone)]
pub struct TracingSink {
    stream: &'static str,
}

impl TracingSink {
    /// Sink for the engine's stdout.
    pub fn stdout() -> Self {
        Self { stream: "stdout" }
    }

    /// Sink for the engine's stderr.
    pub fn stderr() -> Self {
        Self { stream: "stderr" }
    }
}

impl LogSink for TracingSink {
    fn write(&self, line: &str) {
        info!(stream = self.stream, "{}", line);
    }
}
