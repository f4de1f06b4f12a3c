//! Input source: newline-delimited JSON [`InputEvent`]s.
//!
//! Each non-blank line is parsed as one input and forwarded to the session
//! loop. Malformed lines are logged and skipped. The reader stops at end of
//! input or once the session loop has dropped its receiver.
//!
//! Reading is blocking and runs on its own OS thread, so a pending read
//! never holds up runtime shutdown.

use std::io::BufRead;
use std::thread::JoinHandle;

use stratos_core::InputEvent;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Counters for one reader run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputStats {
    /// Lines parsed and forwarded.
    pub forwarded: u64,
    /// Lines that did not parse.
    pub rejected: u64,
}

/// Spawn a thread forwarding stdin to `tx`.
pub fn spawn_stdin_reader(tx: mpsc::Sender<InputEvent>) -> std::io::Result<JoinHandle<InputStats>> {
    std::thread::Builder::new()
        .name(String::from("stdin-input"))
        .spawn(move || forward_inputs(std::io::stdin().lock(), &tx))
}

/// Read input lines from `reader` and forward them on `tx`.
///
/// Must not be called from inside the async runtime.
pub fn forward_inputs<R: BufRead>(reader: R, tx: &mpsc::Sender<InputEvent>) -> InputStats {
    let mut stats = InputStats::default();

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "failed to read input");
                break;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match serde_json::from_str::<InputEvent>(trimmed) {
            Ok(input) => {
                if tx.blocking_send(input).is_err() {
                    debug!("session loop gone, input reader stopping");
                    break;
                }
                stats.forwarded = stats.forwarded.saturating_add(1);
            }
            Err(e) => {
                warn!(error = %e, line = trimmed, "malformed input ignored");
                stats.rejected = stats.rejected.saturating_add(1);
            }
        }
    }

    debug!(
        forwarded = stats.forwarded,
        rejected = stats.rejected,
        "input stream ended"
    );
    stats
}
