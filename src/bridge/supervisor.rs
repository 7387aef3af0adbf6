//! Process supervisor for the hand-tracking producer.
//!
//! Owns the child process lifecycle: launch with piped stdio, spawn
//! the two stream readers, surface producer status, and terminate the
//! process on shutdown. The launch sequence is modeled as a statum
//! state machine; the [`SupervisorHandle`] is the runtime API the
//! application holds.
//!
//! # State Machine
//!
//! ```text
//! Launching ──launch()──► Streaming ──supervise()──► (task ends)
//! ```
//!
//! # Threading Model
//!
//! `launch` spawns three detached tokio tasks:
//!
//! 1. stdout reader - parses protocol lines into the latest-value store
//! 2. stderr reader - forwards diagnostics to the log
//! 3. waiter - awaits child exit and publishes [`ProducerStatus`]
//!
//! None of them are joined. Shutdown kills the child; end-of-stream
//! then ends the reader loops on their own time.

use std::process::Stdio;
use std::sync::Arc;

use statum::{machine, state};
use tokio::process::{Child, Command};
use tokio::sync::{oneshot, watch};
use tracing::{debug, info, warn};

use super::error::SupervisorError;
use super::latest::LatestStore;
use super::stream_reader::{run_stderr_reader, run_stdout_reader};
use crate::config::BridgeConfig;

/// Observable state of the producer process.
///
/// Published on a watch channel so the application can notice a
/// producer that died mid-session instead of silently starving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProducerStatus {
    /// No producer has been started, or it was stopped deliberately.
    Idle,
    /// The producer is live and its streams are being drained.
    Running,
    /// The producer exited on its own; no further events will arrive.
    Disconnected,
}

/// Lifecycle states for a single producer process launch.
#[state]
#[derive(Debug, Clone)]
pub enum ProducerLifecycle {
    Launching,
    Streaming,
}

/// One launch attempt of the producer process.
///
/// Created in `Launching`, transitions to `Streaming` once the child
/// is spawned and its readers are running.
#[machine]
pub struct ProducerProcess<S: ProducerLifecycle> {
    config: BridgeConfig,
    store: Arc<LatestStore>,
    status_tx: watch::Sender<ProducerStatus>,
    child: Option<Child>,
}

impl ProducerProcess<Launching> {
    pub fn create(
        config: BridgeConfig,
        store: Arc<LatestStore>,
        status_tx: watch::Sender<ProducerStatus>,
    ) -> Self {
        debug!("creating producer process for {:?}", config.executable);
        Self::new(config, store, status_tx, None)
    }

    /// Spawns the child with piped stdio and starts both stream readers.
    ///
    /// # Errors
    ///
    /// * [`SupervisorError::Launch`] - executable missing or spawn denied
    /// * [`SupervisorError::MissingStdio`] - a redirected pipe was not captured
    pub fn launch(mut self) -> Result<ProducerProcess<Streaming>, SupervisorError> {
        let mut command = Command::new(&self.config.executable);
        command
            .args(&self.config.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.config.working_dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn()?;
        info!(
            "producer started: {} {:?}",
            self.config.executable, self.config.args
        );

        let stdout = child
            .stdout
            .take()
            .ok_or(SupervisorError::MissingStdio("stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or(SupervisorError::MissingStdio("stderr"))?;

        tokio::spawn(run_stdout_reader(stdout, self.store.clone()));
        tokio::spawn(run_stderr_reader(stderr));

        // send_replace records the status even with no subscribers;
        // is_running and the double-start guard read it back.
        self.status_tx.send_replace(ProducerStatus::Running);
        self.child = Some(child);

        Ok(self.transition())
    }
}

impl ProducerProcess<Streaming> {
    /// Waits for the child to exit or for a kill request, whichever
    /// comes first, and publishes the resulting status.
    ///
    /// Runs as a detached task. A deliberate kill reports `Idle`; an
    /// exit the application did not ask for reports `Disconnected`.
    pub async fn supervise(mut self, kill_rx: oneshot::Receiver<()>) {
        let mut child = match self.child.take() {
            Some(child) => child,
            None => return,
        };

        tokio::select! {
            status = child.wait() => {
                match status {
                    Ok(status) => warn!("producer exited on its own: {}", status),
                    Err(e) => warn!("failed waiting on producer: {}", e),
                }
                self.status_tx.send_replace(ProducerStatus::Disconnected);
            }
            _ = kill_rx => {
                // Termination errors are suppressed: the process may
                // already be gone, and shutdown must always complete.
                if let Err(e) = child.start_kill() {
                    debug!("producer already gone at stop: {}", e);
                }
                let _ = child.wait().await;
                info!("producer terminated");
                self.status_tx.send_replace(ProducerStatus::Idle);
            }
        }
    }
}

/// Handle for starting and stopping the producer process.
///
/// Exactly one producer can be live per handle; the handle is expected
/// to be driven from a single thread (no concurrent start/stop).
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use handbridge::bridge::{LatestStore, SupervisorHandle};
/// use handbridge::config::BridgeConfig;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(LatestStore::default());
/// let mut supervisor = SupervisorHandle::new(BridgeConfig::default(), store);
///
/// supervisor.start()?;
/// // ... frame loop runs, draining the store ...
/// supervisor.stop();
/// # Ok(())
/// # }
/// ```
pub struct SupervisorHandle {
    config: BridgeConfig,
    store: Arc<LatestStore>,
    status_tx: watch::Sender<ProducerStatus>,
    kill_tx: Option<oneshot::Sender<()>>,
}

impl SupervisorHandle {
    pub fn new(config: BridgeConfig, store: Arc<LatestStore>) -> Self {
        let (status_tx, _) = watch::channel(ProducerStatus::Idle);
        Self {
            config,
            store,
            status_tx,
            kill_tx: None,
        }
    }

    /// Launches the producer and its stream readers.
    ///
    /// A producer that exited on its own may be restarted; a live one
    /// may not.
    ///
    /// # Errors
    ///
    /// * [`SupervisorError::AlreadyRunning`] - a producer is still live
    /// * [`SupervisorError::Launch`] - the executable could not be spawned;
    ///   the application may keep running without control input
    pub fn start(&mut self) -> Result<(), SupervisorError> {
        if *self.status_tx.borrow() == ProducerStatus::Running {
            return Err(SupervisorError::AlreadyRunning);
        }

        let streaming = ProducerProcess::create(
            self.config.clone(),
            self.store.clone(),
            self.status_tx.clone(),
        )
        .launch()?;

        let (kill_tx, kill_rx) = oneshot::channel();
        self.kill_tx = Some(kill_tx);
        tokio::spawn(streaming.supervise(kill_rx));

        Ok(())
    }

    /// Requests termination of the producer. Idempotent, never fails.
    ///
    /// Safe to call when the producer was never started or has already
    /// exited. Returns promptly; the waiter task performs the actual
    /// kill, and the reader tasks are left to drain to end-of-stream.
    pub fn stop(&mut self) {
        match self.kill_tx.take() {
            Some(kill_tx) => {
                if kill_tx.send(()).is_err() {
                    debug!("producer already exited before stop");
                }
            }
            None => debug!("stop called with no producer running"),
        }
    }

    /// Subscribes to producer status changes.
    pub fn status(&self) -> watch::Receiver<ProducerStatus> {
        self.status_tx.subscribe()
    }

    pub fn is_running(&self) -> bool {
        *self.status_tx.borrow() == ProducerStatus::Running
    }
}
