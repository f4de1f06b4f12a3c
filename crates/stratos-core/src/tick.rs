//! Tick cycle: the fixed-order update that drives a Stratos session.
//!
//! Each running tick goes through these phases:
//!
//! 1. **Advance** -- move the clock forward one tick.
//! 2. **Decay** -- drain energy and food by the configured per-tick rates.
//! 3. **Economy** -- roll the weather, grow crops, release expired resource
//!    cooldowns.
//! 4. **Zone** -- run the active zone's `update` hook.
//! 5. **Termination** -- if energy or food is exhausted, stop the clock for
//!    good and emit the game-over signal (exactly once per session).
//! 6. **Refresh** -- push the HUD and clock to the UI sink.
//!
//! A paused tick does nothing. A tick after termination is an error. The
//! cycle is deterministic given the configured seed and the input sequence.

use rust_decimal::Decimal;
use stratos_player::{StatDelta, exhaustion, update_stats};
use stratos_types::{AlertSeverity, GameOverReason, NodeId, PlotId, Weather};
use tracing::{debug, info};

use crate::clock::ClockError;
use crate::game::{Game, zone_world};
use crate::sink::UiSink;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// The session already ended; the clock will not run again.
    #[error("the game clock has stopped")]
    Terminated,

    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// A world operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: stratos_world::WorldError,
    },
}

/// What one call to [`Game::tick`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The clock is paused; nothing happened.
    Paused,
    /// A tick ran.
    Ran(TickSummary),
}

/// Summary of a single executed tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Simulated minutes after this tick.
    pub minutes: u64,
    /// The weather after this tick.
    pub weather: Weather,
    /// Whether a weather roll fired this tick.
    pub weather_rolled: bool,
    /// Plots whose crops finished growing this tick.
    pub crops_ready: Vec<PlotId>,
    /// Resource nodes whose cooldown ended this tick.
    pub nodes_ready: Vec<NodeId>,
    /// Whether the active zone's update hook failed.
    pub zone_hook_failed: bool,
    /// Set when this tick ended the session.
    pub game_over: Option<GameOverReason>,
}

impl<S: UiSink> Game<S> {
    /// Run one tick of the session.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::Terminated`] once the session has ended, or a
    /// clock error if the tick counter would overflow.
    pub fn tick(&mut self) -> Result<TickOutcome, TickError> {
        if self.clock.is_stopped() {
            return Err(TickError::Terminated);
        }
        if self.clock.is_paused() {
            return Ok(TickOutcome::Paused);
        }

        // --- Phase 1: Advance ---
        let tick = self.clock.advance()?;

        // --- Phase 2: Decay ---
        let decay = StatDelta::energy_and_food(
            Decimal::ZERO.saturating_sub(self.config.decay.energy_per_tick),
            Decimal::ZERO.saturating_sub(self.config.decay.food_per_tick),
        );
        update_stats(&mut self.player, &decay);

        // --- Phase 3: Economy ---
        let rolled = self.eco.update(&mut self.rng);
        if let Some(weather) = rolled {
            info!(tick, weather = weather.label(), "weather changed");
            self.sink.show_alert(
                "Weather Update",
                &format!("The skies have turned {}.", weather.label()),
                AlertSeverity::Info,
            );
        }
        let weather = self.eco.weather();
        let crops_ready = self.farm.grow(weather);
        let nodes_ready = self.resources.expire(tick);
        if !nodes_ready.is_empty() {
            debug!(tick, count = nodes_ready.len(), "resource nodes recharged");
        }

        // --- Phase 4: Zone ---
        let world = zone_world(&self.config, &self.farm, &self.eco, tick);
        let zone_ok = self.zones.update(
            &self.player,
            world,
            &mut self.sink,
            self.config.world.seconds_per_tick,
        );

        // --- Phase 5: Termination ---
        let game_over = exhaustion(&self.player);
        if let Some(reason) = game_over {
            self.clock.stop();
            self.ended = Some(reason);
            self.dialogue.close();
            info!(
                tick,
                ?reason,
                minutes = self.clock.minutes(),
                "game over"
            );
        }

        // --- Phase 6: Refresh ---
        self.sink.update_hud(&self.player);
        self.sink.update_time(self.clock.minutes(), &self.clock.label());
        if let Some(reason) = game_over {
            self.sink.game_over(reason);
        }

        debug!(
            tick,
            energy = %self.player.energy,
            food = %self.player.food,
            weather = weather.label(),
            "tick complete"
        );

        Ok(TickOutcome::Ran(TickSummary {
            tick,
            minutes: self.clock.minutes(),
            weather,
            weather_rolled: rolled.is_some(),
            crops_ready,
            nodes_ready,
            zone_hook_failed: !zone_ok,
            game_over,
        }))
    }
}
