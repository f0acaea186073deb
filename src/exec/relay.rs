// src/exec/relay.rs

//! Line relay tasks for the engine's output pipes.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::sink::LogSink;

/// Terminal report of one relay task, sent on the controller's completion
/// channel. Two reports mean both pipes are fully drained.
#[derive(Debug)]
pub(crate) enum RelayReport {
    /// The pipe reached EOF and every line was delivered to the sink.
    Finished,
    /// Reading the pipe failed. The stream counts as finished, and the
    /// controller kills the engine: a broken pipe mid-run means the
    /// process can no longer be observed properly.
    Failed(std::io::Error),
}

/// Spawn the relay task for one output stream.
///
/// The task reads newline-delimited lines until EOF or a read error,
/// forwarding each complete line to `sink`, then sends exactly one
/// [`RelayReport`] and exits. Line order within the stream is preserved.
pub(crate) fn spawn_relay<R>(
    stream: R,
    sink: Arc<dyn LogSink>,
    report_tx: mpsc::Sender<RelayReport>,
    stream_name: &'static str,
) where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();

        let report = loop {
            match lines.next_line().await {
                Ok(Some(line)) => sink.write(&line),
                Ok(None) => break RelayReport::Finished,
                Err(e) => break RelayReport::Failed(e),
            }
        };

        if let RelayReport::Failed(ref e) = report {
            warn!(stream = stream_name, error = %e, "log relay read failed");
        }
        debug!(stream = stream_name, "log relay finished");

        // The channel holds one slot per relay, so this send never blocks.
        // The receiver may already be gone after a timeout or cancellation.
        let _ = report_tx.send(report).await;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;
    use std::pin::Pin;
    use std::sync::Mutex;
    use std::task::{Context, Poll};

    use tokio::io::ReadBuf;

    /// Yields one payload, then fails every further read.
    struct BrokenPipeReader {
        payload: &'static [u8],
        delivered: bool,
    }

    impl AsyncRead for BrokenPipeReader {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            if self.delivered {
                return Poll::Ready(Err(io::ErrorKind::BrokenPipe.into()));
            }
            buf.put_slice(self.payload);
            self.delivered = true;
            Poll::Ready(Ok(()))
        }
    }

    #[derive(Default)]
    struct CollectingSink {
        lines: Mutex<Vec<String>>,
    }

    impl LogSink for CollectingSink {
        fn write(&self, line: &str) {
            self.lines.lock().unwrap().push(line.to_string());
        }
    }

    #[tokio::test]
    async fn read_error_reports_failed_after_delivering_complete_lines() {
        let sink = Arc::new(CollectingSink::default());
        let (tx, mut rx) = mpsc::channel(1);
        let reader = BrokenPipeReader {
            payload: b"one line\n",
            delivered: false,
        };
        spawn_relay(reader, sink.clone(), tx, "stdout");

        let report = rx.recv().await.expect("relay must send one report");
        match report {
            RelayReport::Failed(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            RelayReport::Finished => panic!("expected a failure report, got Finished"),
        }
        // The line completed before the pipe broke, so it reached the sink.
        assert_eq!(sink.lines.lock().unwrap().as_slice(), ["one line"]);

        // Exactly one terminal report per relay.
        assert!(rx.recv().await.is_none());
    }
}
