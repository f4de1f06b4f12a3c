//! Stat mechanics applied to the player.
//!
//! - Energy and food are clamped to `[0, 100]` after every update
//! - Reputation accumulates without bounds
//! - Faction standing is an integer per faction, adjusted by dialogue
//!
//! Updates never fail: decimal additions saturate instead of overflowing.
//! Rendering is not triggered here; the HUD is refreshed by the game clock
//! after each tick.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stratos_types::{FactionId, GameOverReason, PlayerState, STAT_MAX};

/// A change to apply to the player's three stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDelta {
    /// Change in energy.
    #[serde(default)]
    pub energy: Decimal,
    /// Change in food.
    #[serde(default)]
    pub food: Decimal,
    /// Change in reputation.
    #[serde(default)]
    pub reputation: Decimal,
}

impl StatDelta {
    /// A delta touching only energy.
    pub const fn energy(energy: Decimal) -> Self {
        Self {
            energy,
            food: Decimal::ZERO,
            reputation: Decimal::ZERO,
        }
    }

    /// A delta touching energy and food.
    pub const fn energy_and_food(energy: Decimal, food: Decimal) -> Self {
        Self {
            energy,
            food,
            reputation: Decimal::ZERO,
        }
    }
}

/// Clamp a stat value into `[0, 100]`.
pub fn clamp_stat(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO).min(STAT_MAX)
}

/// Apply a stat delta to the player.
///
/// Energy and food are clamped to `[0, 100]`; reputation is not.
pub fn update_stats(player: &mut PlayerState, delta: &StatDelta) {
    player.energy = clamp_stat(player.energy.saturating_add(delta.energy));
    player.food = clamp_stat(player.food.saturating_add(delta.food));
    player.reputation = player.reputation.saturating_add(delta.reputation);
}

/// Adjust the player's standing with a faction.
///
/// Factions the player has never met start at zero. Returns the new standing.
pub fn adjust_faction_reputation(player: &mut PlayerState, faction: &FactionId, delta: i64) -> i64 {
    let standing = player.faction_reputation.entry(faction.clone()).or_insert(0);
    *standing = standing.saturating_add(delta);
    *standing
}

/// Report which vital stat, if any, has run out.
pub fn exhaustion(player: &PlayerState) -> Option<GameOverReason> {
    let out_of_energy = player.energy <= Decimal::ZERO;
    let out_of_food = player.food <= Decimal::ZERO;
    match (out_of_energy, out_of_food) {
        (true, true) => Some(GameOverReason::Exhausted),
        (true, false) => Some(GameOverReason::EnergyDepleted),
        (false, true) => Some(GameOverReason::FoodDepleted),
        (false, false) => None,
    }
}
