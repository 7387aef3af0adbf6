//! Background line loops over the producer's output streams.
//!
//! One loop per stream, each blocked on its line read until data
//! arrives or the stream closes. End-of-stream is the normal shutdown
//! path: the child was killed or exited, the pipe drained, the loop
//! returns. No error ever propagates out of a reader task.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{debug, info, warn};

use super::latest::LatestStore;
use crate::protocol::parse_line;

/// Drains the producer's stdout, publishing every recognized event.
///
/// Unrecognized or malformed lines are logged at debug and dropped.
/// Generic over the stream so tests can feed in-memory input.
pub async fn run_stdout_reader<R>(stream: R, store: Arc<LatestStore>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(stream).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                debug!(target: "producer::stdout", "{}", line);
                match parse_line(&line) {
                    Some(event) => store.publish(event),
                    None => debug!("ignoring unrecognized line: {:?}", line),
                }
            }
            Ok(None) => {
                info!("producer stdout closed, stopping reader");
                break;
            }
            Err(e) => {
                warn!("error reading producer stdout: {}", e);
                break;
            }
        }
    }
}

/// Drains the producer's stderr into the diagnostic log.
///
/// Stderr carries free-form tracker diagnostics and is never parsed
/// as protocol data.
pub async fn run_stderr_reader<R>(stream: R)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(stream).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if !line.trim().is_empty() {
                    warn!(target: "producer::stderr", "{}", line);
                }
            }
            Ok(None) => {
                debug!("producer stderr closed, stopping reader");
                break;
            }
            Err(e) => {
                warn!("error reading producer stderr: {}", e);
                break;
            }
        }
    }
}
