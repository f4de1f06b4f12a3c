//! Session loop runner.
//!
//! This module provides [`run_game`], the top-level async function that
//! drives a started [`Game`]:
//!
//! - **Fixed tick rate**: a `tokio` interval at `1000 / ticks_per_second` ms
//! - **Serialized input**: player inputs arrive on an `mpsc` channel and are
//!   interleaved with ticks by `tokio::select!`, so the game is only ever
//!   touched from this one task
//! - **Pause/resume**: paused ticks are skipped without advancing time
//! - **Termination**: the loop ends on game over or a `Quit` input
//!
//! Closing the input channel does not end a running session; the clock
//! keeps going until the player's stats run out. A paused session can no
//! longer be resumed once the channel is closed, so it ends with
//! [`SessionEnd::InputClosed`].

use std::time::Duration;

use stratos_types::GameOverReason;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::game::{Control, Game};
use crate::input::InputEvent;
use crate::sink::UiSink;
use crate::tick::{TickError, TickOutcome};

/// Milliseconds per second, for the tick period.
const MILLIS_PER_SECOND: u64 = 1000;

/// Errors that can occur during the session loop.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },

    /// The configured tick rate does not give a usable period.
    #[error("invalid tick rate: {ticks_per_second} ticks per second")]
    InvalidTickRate {
        /// The configured rate.
        ticks_per_second: u32,
    },
}

/// Why the session loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The player's stats ran out.
    GameOver(GameOverReason),
    /// The player quit.
    Quit,
    /// The input channel closed while the clock was paused.
    InputClosed,
}

/// Result of a session run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    /// Why the loop stopped.
    pub end: SessionEnd,
    /// Ticks executed by this run (paused ticks excluded).
    pub ticks: u64,
    /// Inputs handled by this run.
    pub inputs: u64,
}

/// Tick period for a tick rate.
///
/// # Errors
///
/// Returns [`RunnerError::InvalidTickRate`] if the rate is zero or faster
/// than one tick per millisecond.
pub fn tick_period(ticks_per_second: u32) -> Result<Duration, RunnerError> {
    MILLIS_PER_SECOND
        .checked_div(u64::from(ticks_per_second))
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .ok_or(RunnerError::InvalidTickRate { ticks_per_second })
}

/// Run the session loop until game over, quit, or the input channel closes
/// on a paused session.
///
/// The game should already be started with [`Game::start`].
///
/// # Errors
///
/// Returns [`RunnerError`] if the tick rate is invalid or a tick fails
/// unrecoverably.
pub async fn run_game<S: UiSink>(
    game: &mut Game<S>,
    mut inputs: mpsc::Receiver<InputEvent>,
) -> Result<SessionResult, RunnerError> {
    let ticks_per_second = game.config().world.ticks_per_second;
    let period = tick_period(ticks_per_second)?;
    let mut result = SessionResult {
        end: SessionEnd::Quit,
        ticks: 0,
        inputs: 0,
    };

    if let Some(reason) = game.game_over() {
        result.end = SessionEnd::GameOver(reason);
        return Ok(result);
    }

    info!(
        ticks_per_second,
        tick_interval_ms = period.as_millis(),
        "session loop starting"
    );

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first interval tick completes immediately; the first game tick
    // should land one period after start.
    interval.tick().await;

    let mut inputs_open = true;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match game.tick()? {
                    TickOutcome::Ran(summary) => {
                        result.ticks = result.ticks.saturating_add(1);
                        if let Some(reason) = summary.game_over {
                            result.end = SessionEnd::GameOver(reason);
                            break;
                        }
                    }
                    TickOutcome::Paused if !inputs_open => {
                        result.end = SessionEnd::InputClosed;
                        break;
                    }
                    TickOutcome::Paused => {}
                }
            }
            received = inputs.recv(), if inputs_open => {
                let Some(input) = received else {
                    inputs_open = false;
                    if game.clock().is_paused() {
                        info!("input channel closed while paused");
                        result.end = SessionEnd::InputClosed;
                        break;
                    }
                    debug!("input channel closed, clock keeps running");
                    continue;
                };
                result.inputs = result.inputs.saturating_add(1);
                debug!(action = input.name(), "input received");
                if game.handle_input(input) == Control::Quit {
                    result.end = SessionEnd::Quit;
                    break;
                }
            }
        }
    }

    info!(
        end = ?result.end,
        ticks = result.ticks,
        inputs = result.inputs,
        final_tick = game.clock().tick(),
        "session loop ended"
    );
    Ok(result)
}
