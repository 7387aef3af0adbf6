//! Error definitions for the producer bridge.

use thiserror::Error;

/// Errors reported by the process supervisor.
///
/// Only startup can fail; `stop` suppresses every termination error
/// because it runs during application teardown.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// The tracker executable could not be found or spawned.
    ///
    /// The application may keep running without control input, but the
    /// failure is surfaced to the caller rather than swallowed.
    #[error("failed to launch producer process: {0}")]
    Launch(#[from] std::io::Error),

    /// `start` was called while a producer process is already live.
    #[error("producer process is already running")]
    AlreadyRunning,

    /// A redirected stream was not captured at spawn time.
    #[error("producer {0} was not captured")]
    MissingStdio(&'static str),
}
