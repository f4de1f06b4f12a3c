//! Environmental systems for the Stratos city.
//!
//! This module owns the process-wide [`EcoState`]: current weather, the
//! solar output it allows, and the pollution level.
//!
//! # Weather transitions
//!
//! Once per tick the weather rolls for a change with a small fixed chance,
//! expressed in basis points (10 bp = 0.1 %). When the roll succeeds a new
//! weather is drawn uniformly from every variant, so the sky may "change"
//! to what it already was.
//!
//! | Weather | Solar | Crop growth |
//! |---------|-------|-------------|
//! | Clear   | ×1    | ×1          |
//! | Cloudy  | ×0.5  | ×0.75       |
//! | Rain    | ×1    | ×1.25       |
//! | Smog    | ×0.2  | ×0.5        |
//!
//! # Determinism
//!
//! The caller supplies the RNG. A seeded generator gives reproducible
//! weather sequences for tests and replays.

use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stratos_types::{EcoState, Weather};
use tracing::debug;

/// Denominator of the basis-point roll.
const BASIS_POINTS: u32 = 10_000;

/// Static parameters of the environment, loaded from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcoSettings {
    /// Solar output under clear skies.
    #[serde(default = "default_base_solar_output")]
    pub base_solar_output: Decimal,
    /// Pollution level at session start (0-100).
    #[serde(default)]
    pub initial_pollution: Decimal,
    /// Per-tick chance of a weather change, in basis points.
    #[serde(default = "default_weather_change_chance_bp")]
    pub weather_change_chance_bp: u32,
}

impl Default for EcoSettings {
    fn default() -> Self {
        Self {
            base_solar_output: default_base_solar_output(),
            initial_pollution: Decimal::ZERO,
            weather_change_chance_bp: default_weather_change_chance_bp(),
        }
    }
}

const fn default_base_solar_output() -> Decimal {
    Decimal::from_parts(5, 0, 0, false, 0)
}

const fn default_weather_change_chance_bp() -> u32 {
    10
}

/// The city's environment: weather and the quantities it drives.
#[derive(Debug, Clone)]
pub struct EcoSystem {
    state: EcoState,
    base_solar_output: Decimal,
    change_chance_bp: u32,
}

impl EcoSystem {
    /// Create the environment with clear skies.
    pub fn new(settings: &EcoSettings) -> Self {
        let mut eco = Self {
            state: EcoState {
                weather: Weather::Clear,
                solar_output: settings.base_solar_output,
                pollution: settings.initial_pollution,
            },
            base_solar_output: settings.base_solar_output,
            change_chance_bp: settings.weather_change_chance_bp.min(BASIS_POINTS),
        };
        eco.set_weather(Weather::Clear);
        eco
    }

    /// Current environmental state.
    pub const fn state(&self) -> &EcoState {
        &self.state
    }

    /// Current weather.
    pub const fn weather(&self) -> Weather {
        self.state.weather
    }

    /// Force the weather and recompute solar output.
    pub fn set_weather(&mut self, weather: Weather) {
        self.state.weather = weather;
        self.state.solar_output = solar_output(self.base_solar_output, weather);
    }

    /// Run one tick of environmental simulation.
    ///
    /// Returns the newly drawn weather when a transition roll succeeded,
    /// or `None` when the sky was left alone this tick.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Weather> {
        let roll = rng.random_range(0..BASIS_POINTS);
        if roll >= self.change_chance_bp {
            return None;
        }

        let index = rng.random_range(0..Weather::ALL.len());
        let weather = Weather::ALL.get(index).copied().unwrap_or_default();
        debug!(from = ?self.state.weather, to = ?weather, "weather transition");
        self.set_weather(weather);
        Some(weather)
    }
}

/// Solar output for a base output under the given weather.
pub fn solar_output(base: Decimal, weather: Weather) -> Decimal {
    base.saturating_mul(weather.solar_multiplier())
}
