//! Game clock and simulated time for the Stratos session.
//!
//! The clock is the single source of truth for temporal state. It counts
//! ticks, derives simulated seconds and minutes from the tick counter, and
//! gates the tick cycle through pause and termination flags.
//!
//! # Design Principles
//!
//! - All temporal derivations use checked or saturating arithmetic.
//! - Minutes and the `HH:MM` label are computed from the tick counter and
//!   never stored independently.
//! - Pausing never resets accumulated time. Stopping is permanent for the
//!   session: a stopped clock cannot be resumed.

use crate::config::WorldConfig;

/// Simulated seconds per minute.
const SECONDS_PER_MINUTE: u64 = 60;

/// Minutes per hour.
const MINUTES_PER_HOUR: u64 = 60;

/// Hours per day; the `HH:MM` label wraps after this many hours.
const HOURS_PER_DAY: u64 = 24;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,

    /// Invalid time configuration (e.g. zero simulated seconds per tick).
    #[error("invalid time configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Run state of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    /// Ticks advance time.
    Running,
    /// Ticks are skipped; accumulated time is kept.
    Paused,
    /// The session ended. Terminal.
    Stopped,
}

/// Game clock tracking the session's simulated time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameClock {
    /// Ticks elapsed since the session started.
    tick: u64,

    /// Simulated seconds that pass per tick.
    seconds_per_tick: u64,

    /// Whether ticks currently advance time.
    state: ClockState,
}

impl GameClock {
    /// Create a running clock at tick 0.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `seconds_per_tick` is 0.
    pub fn new(config: &WorldConfig) -> Result<Self, ClockError> {
        Self::from_parts(0, config.seconds_per_tick)
    }

    /// Create a clock at an arbitrary tick (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `seconds_per_tick` is 0.
    pub fn from_parts(tick: u64, seconds_per_tick: u64) -> Result<Self, ClockError> {
        if seconds_per_tick == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "seconds_per_tick must be at least 1".to_owned(),
            });
        }
        Ok(Self {
            tick,
            seconds_per_tick,
            state: ClockState::Running,
        })
    }

    /// Advance the clock by one tick. Returns the new tick number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::TickOverflow`] if the tick counter would exceed
    /// `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.tick = self.tick.checked_add(1).ok_or(ClockError::TickOverflow)?;
        Ok(self.tick)
    }

    /// Return the current tick number.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Return the current run state.
    pub const fn state(&self) -> ClockState {
        self.state
    }

    /// Whether ticks currently advance time.
    pub const fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running)
    }

    /// Whether the clock is paused.
    pub const fn is_paused(&self) -> bool {
        matches!(self.state, ClockState::Paused)
    }

    /// Whether the session ended.
    pub const fn is_stopped(&self) -> bool {
        matches!(self.state, ClockState::Stopped)
    }

    /// Pause the clock. Returns `false` if it was not running.
    pub const fn pause(&mut self) -> bool {
        if self.is_running() {
            self.state = ClockState::Paused;
            true
        } else {
            false
        }
    }

    /// Resume a paused clock. Returns `false` if it was not paused.
    pub const fn resume(&mut self) -> bool {
        if self.is_paused() {
            self.state = ClockState::Running;
            true
        } else {
            false
        }
    }

    /// Stop the clock for good. Returns `false` if it was already stopped.
    pub const fn stop(&mut self) -> bool {
        if self.is_stopped() {
            false
        } else {
            self.state = ClockState::Stopped;
            true
        }
    }

    /// Simulated seconds since the session started (saturating).
    pub const fn elapsed_seconds(&self) -> u64 {
        self.tick.saturating_mul(self.seconds_per_tick)
    }

    /// Simulated whole minutes since the session started.
    pub fn minutes(&self) -> u64 {
        self.elapsed_seconds()
            .checked_div(SECONDS_PER_MINUTE)
            .unwrap_or(0)
    }

    /// The current simulated time as `HH:MM`.
    pub fn label(&self) -> String {
        format_clock(self.minutes())
    }
}

/// Format simulated minutes as a zero-padded 24-hour `HH:MM` label.
pub fn format_clock(minutes: u64) -> String {
    let hours = minutes
        .checked_div(MINUTES_PER_HOUR)
        .and_then(|h| h.checked_rem(HOURS_PER_DAY))
        .unwrap_or(0);
    let mins = minutes.checked_rem(MINUTES_PER_HOUR).unwrap_or(0);
    format!("{hours:02}:{mins:02}")
}
