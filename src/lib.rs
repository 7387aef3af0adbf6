//! Bridge between an external hand-tracking process and a real-time
//! application loop.
//!
//! The tracker is a separate process that prints one control event per
//! line on stdout. This crate spawns it, drains its streams in the
//! background, and hands the most recent event of each kind to the
//! frame loop once per tick.
//!
//! # Architecture
//!
//! ```text
//! tracker stdout ──► StreamReader ──► parse_line ──► LatestStore
//!                                                        │
//! tracker stderr ──► StreamReader ──► diagnostic log     ▼
//!                                              FrameDispatcher ──► consumers
//! ```

pub mod bridge;
pub mod config;
pub mod consumers;
pub mod dispatch;
pub mod protocol;
