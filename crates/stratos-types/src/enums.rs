//! Enumeration types for the Stratos life-sim.
//!
//! Config files and the browser UI address every variant by its
//! `snake_case` name.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Current sky conditions over the city.
///
/// Weather modulates solar output and crop growth. It is process-wide and
/// changes at most once per tick.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Weather {
    /// Full sun. Solar ×1, growth ×1.
    #[default]
    Clear,
    /// Overcast. Solar ×0.5, growth ×0.75.
    Cloudy,
    /// Rain. Solar ×1, growth ×1.25.
    Rain,
    /// Industrial smog. Solar ×0.2, growth ×0.5.
    Smog,
}

impl Weather {
    /// Every weather variant, in candidate order for random transitions.
    pub const ALL: [Self; 4] = [Self::Clear, Self::Cloudy, Self::Rain, Self::Smog];

    /// Multiplier applied to the base solar output under this weather.
    pub const fn solar_multiplier(self) -> Decimal {
        match self {
            Self::Cloudy => Decimal::from_parts(5, 0, 0, false, 1),
            Self::Smog => Decimal::from_parts(2, 0, 0, false, 1),
            Self::Clear | Self::Rain => Decimal::ONE,
        }
    }

    /// Multiplier applied to every crop's per-tick growth under this weather.
    pub const fn growth_multiplier(self) -> Decimal {
        match self {
            Self::Clear => Decimal::ONE,
            Self::Cloudy => Decimal::from_parts(75, 0, 0, false, 2),
            Self::Rain => Decimal::from_parts(125, 0, 0, false, 2),
            Self::Smog => Decimal::from_parts(5, 0, 0, false, 1),
        }
    }

    /// Lowercase label used in player-facing text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Rain => "rain",
            Self::Smog => "smog",
        }
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Broad category of an item stack.
///
/// Only furniture, plants and tech can be placed in the pod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ItemKind {
    /// Beds, lamps and other pod furniture.
    Furniture,
    /// Decorative or hydroponic plants.
    Plant,
    /// Terminals and gadgets.
    Tech,
    /// Harvested produce from the vertical farm.
    Crop,
    /// Raw materials gathered from resource nodes.
    Resource,
}

impl ItemKind {
    /// Whether items of this kind can be placed in a pod slot.
    pub const fn is_placeable(self) -> bool {
        matches!(self, Self::Furniture | Self::Plant | Self::Tech)
    }
}

// ---------------------------------------------------------------------------
// UI
// ---------------------------------------------------------------------------

/// Severity of a user-visible alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum AlertSeverity {
    /// Neutral information (weather changes, farm status).
    Info,
    /// A player action completed.
    Success,
    /// A player action could not be completed.
    Warning,
    /// Something the player asked for does not exist.
    Error,
}

/// Why the game clock stopped for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum GameOverReason {
    /// Energy reached zero.
    EnergyDepleted,
    /// Food reached zero.
    FoodDepleted,
    /// Energy and food reached zero on the same tick.
    Exhausted,
}

// ---------------------------------------------------------------------------
// Zones
// ---------------------------------------------------------------------------

/// Which zone-logic handler, if any, is bound to a zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ZoneLogicKind {
    /// No handler. Entering and leaving the zone only moves the player.
    #[default]
    Static,
    /// The player's home rooftop with the customizable pod.
    RooftopCommune,
    /// The vertical farm tower with crop plots.
    VerticalFarm,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn solar_multipliers_match_weather() {
        assert_eq!(Weather::Clear.solar_multiplier(), dec!(1));
        assert_eq!(Weather::Rain.solar_multiplier(), dec!(1));
        assert_eq!(Weather::Cloudy.solar_multiplier(), dec!(0.5));
        assert_eq!(Weather::Smog.solar_multiplier(), dec!(0.2));
    }

    #[test]
    fn growth_multipliers_match_weather() {
        assert_eq!(Weather::Clear.growth_multiplier(), dec!(1));
        assert_eq!(Weather::Cloudy.growth_multiplier(), dec!(0.75));
        assert_eq!(Weather::Rain.growth_multiplier(), dec!(1.25));
        assert_eq!(Weather::Smog.growth_multiplier(), dec!(0.5));
    }

    #[test]
    fn only_furnishings_are_placeable() {
        assert!(ItemKind::Furniture.is_placeable());
        assert!(ItemKind::Plant.is_placeable());
        assert!(ItemKind::Tech.is_placeable());
        assert!(!ItemKind::Crop.is_placeable());
        assert!(!ItemKind::Resource.is_placeable());
    }

    #[test]
    fn weather_uses_snake_case_on_the_wire() {
        let json = serde_json::to_string(&Weather::Smog).unwrap_or_default();
        assert_eq!(json, "\"smog\"");
        let kind: ZoneLogicKind =
            serde_json::from_str("\"vertical_farm\"").unwrap_or(ZoneLogicKind::Static);
        assert_eq!(kind, ZoneLogicKind::VerticalFarm);
    }
}
