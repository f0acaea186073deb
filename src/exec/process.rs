// src/exec/process.rs

//! The engine process controller: spawn, stream, and settle one run.

use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::args::build_args;
use crate::config::Config;
use crate::errors::{DataxError, Result};
use crate::exec::relay::{RelayReport, spawn_relay};
use crate::sink::LogSink;

/// Live handles of a started engine run.
struct Running {
    child: Child,
    report_rx: mpsc::Receiver<RelayReport>,
}

/// Supervises exactly one DataX engine invocation.
///
/// Call order is `new`, then [`exec`](DataxProcess::exec), then
/// [`wait`](DataxProcess::wait); [`kill`](DataxProcess::kill) is allowed at
/// any point after `exec`. A controller is not reusable: once `wait` or a
/// kill has settled the run, the engine process is dead and further `kill`
/// calls just report success.
pub struct DataxProcess {
    cfg: Config,
    stdout_sink: Arc<dyn LogSink>,
    stderr_sink: Arc<dyn LogSink>,
    running: Option<Running>,
    disposed: bool,
}

impl DataxProcess {
    /// Create a controller for one run. Nothing is started yet.
    pub fn new(cfg: Config, stdout_sink: Arc<dyn LogSink>, stderr_sink: Arc<dyn LogSink>) -> Self {
        Self {
            cfg,
            stdout_sink,
            stderr_sink,
            running: None,
            disposed: false,
        }
    }

    /// Start the engine process.
    ///
    /// `program` is the worker launcher, typically `java`; locating it is
    /// the caller's business. On success both relay tasks are already
    /// draining the engine's pipes and the returned pid can be registered
    /// externally. Argument building and spawn failures return before any
    /// process exists. A token that is already cancelled refuses to launch.
    pub async fn exec(&mut self, cancel: &CancellationToken, program: &str) -> Result<u32> {
        if self.running.is_some() {
            return Err(DataxError::AlreadyStarted);
        }
        if cancel.is_cancelled() {
            return Err(DataxError::Cancelled);
        }

        let args = build_args(&self.cfg)?;
        if self.cfg.debug {
            info!(program, args = ?args, "resolved engine command line");
        }

        let mut cmd = Command::new(program);
        cmd.args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(DataxError::Spawn)?;

        // Both pipes were requested above, so they are present on any
        // freshly spawned child.
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| DataxError::Spawn(std::io::Error::other("stdout pipe missing")))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| DataxError::Spawn(std::io::Error::other("stderr pipe missing")))?;
        let pid = child
            .id()
            .ok_or_else(|| DataxError::Spawn(std::io::Error::other("worker gone before start")))?;

        // One slot per relay: each sends a single terminal report, so the
        // channel doubles as the completion barrier for natural exit.
        let (report_tx, report_rx) = mpsc::channel(2);
        spawn_relay(stdout, self.stdout_sink.clone(), report_tx.clone(), "stdout");
        spawn_relay(stderr, self.stderr_sink.clone(), report_tx, "stderr");

        info!(pid, jobid = %self.cfg.jobid, "datax engine started");
        self.running = Some(Running { child, report_rx });
        Ok(pid)
    }

    /// Wait for the run to settle, racing natural completion against the
    /// deadline and the cancellation signal.
    ///
    /// Natural completion is only reported after both relay tasks have
    /// finished, so every line the engine wrote before exiting has reached
    /// its sink by the time `wait` returns. A zero exit status is `Ok`; any
    /// other exit comes back verbatim as [`DataxError::Failed`]. Timeout
    /// and cancellation are forceful: the engine is killed, which closes
    /// its ends of the pipes and lets the relays drain out on their own.
    pub async fn wait(&mut self, cancel: &CancellationToken, timeout: Duration) -> Result<()> {
        let running = self.running.as_mut().ok_or(DataxError::NotStarted)?;
        let started = Instant::now();

        let result = tokio::select! {
            res = Self::natural_exit(running) => res,
            _ = sleep(timeout) => {
                warn!(timeout = ?timeout, "run hit its deadline, killing engine");
                Self::dispose(running).await;
                Err(DataxError::Timeout {
                    limit: timeout,
                    elapsed: started.elapsed(),
                })
            }
            _ = cancel.cancelled() => {
                info!("run cancelled, killing engine");
                Self::dispose(running).await;
                Err(DataxError::Cancelled)
            }
        };

        self.disposed = true;
        result
    }

    /// Forcibly terminate the engine.
    ///
    /// Termination is unconditional for a live run. After the run has
    /// already been settled by `wait`, a timeout, a cancellation or an
    /// earlier `kill`, this reports success without touching anything.
    /// Before `exec` there is nothing to kill and the call is an error.
    pub async fn kill(&mut self) -> Result<()> {
        let running = self.running.as_mut().ok_or(DataxError::NotStarted)?;
        if self.disposed {
            return Ok(());
        }

        running.child.kill().await?;
        self.disposed = true;
        info!("datax engine killed");
        Ok(())
    }

    /// The natural-completion path: drain both relay reports, then collect
    /// the exit status. A relay read failure triggers an early kill; the
    /// status observed afterwards reflects that kill.
    async fn natural_exit(running: &mut Running) -> Result<()> {
        let mut open_relays = 2;
        while open_relays > 0 {
            match running.report_rx.recv().await {
                Some(RelayReport::Finished) => open_relays -= 1,
                Some(RelayReport::Failed(e)) => {
                    open_relays -= 1;
                    warn!(error = %e, "log relay broke, killing engine early");
                    if let Err(kill_err) = running.child.start_kill() {
                        debug!(error = %kill_err, "early kill failed, engine already exiting");
                    }
                }
                // Both senders gone without a report; nothing left to drain.
                None => break,
            }
        }

        let status = running.child.wait().await?;
        info!(
            exit_code = status.code().unwrap_or(-1),
            success = status.success(),
            "datax engine exited"
        );
        if status.success() {
            Ok(())
        } else {
            Err(DataxError::Failed { status })
        }
    }

    /// Forceful teardown for the timeout and cancellation paths: kill the
    /// engine and reap it. Best-effort, failures are logged and swallowed.
    async fn dispose(running: &mut Running) {
        if let Err(e) = running.child.kill().await {
            warn!(error = %e, "failed to kill datax engine");
        }
    }
}
