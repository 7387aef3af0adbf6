//! Producer-process bridge.
//!
//! Owns the hand-tracker child process and the path from its output
//! streams to the frame loop:
//!
//! 1. [`supervisor`] - process launch, shutdown, and status
//! 2. [`stream_reader`] - background line loops over stdout/stderr
//! 3. [`latest`] - latest-wins hand-off to the frame loop
//!
//! # Architecture
//!
//! ```text
//! tracker ──► stdout reader ──► LatestStore ──► frame loop
//!    │    └─► stderr reader ──► diagnostic log
//!    └─ SupervisorHandle (start/stop, ProducerStatus watch)
//! ```
//!
//! The readers run as detached tokio tasks for the lifetime of the
//! child process. Shutdown kills the child and lets end-of-stream end
//! the loops; the tasks are never joined.

pub mod error;
pub mod latest;
pub mod stream_reader;
pub mod supervisor;

pub use error::SupervisorError;
pub use latest::LatestStore;
pub use supervisor::{ProducerStatus, SupervisorHandle};
