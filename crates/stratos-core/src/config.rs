//! Configuration loading and typed config structures for Stratos.
//!
//! The canonical configuration lives in `stratos-config.yaml` at the project
//! root; the `STRATOS_CONFIG` environment variable points elsewhere. Every
//! field has a default reproducing the stock game, so a missing file or an
//! empty document yields a playable session.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use stratos_narrative::{DialogueGraph, DialogueNode, QuestDefinition, default_dialogue, default_quests};
use stratos_types::{
    DialogueId, Dimensions, FactionId, ItemId, ItemKind, ItemStack, NodeId, PlotId, PodSlot,
    Position, SlotId, ZoneId, ZoneLogicKind, ZoneRecord,
};
use stratos_world::{CropKind, EcoSettings, HarvestRules, ResourceNodeSpec};
use tracing::info;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "STRATOS_CONFIG";

/// Configuration file used when [`CONFIG_ENV_VAR`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "stratos-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an unplayable game.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.into(),
    }
}

/// Top-level game configuration.
///
/// Mirrors the structure of `stratos-config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Session-level settings (seed, timing, opening dialogue).
    #[serde(default)]
    pub world: WorldConfig,

    /// The player's starting state.
    #[serde(default)]
    pub player: PlayerConfig,

    /// Per-tick stat decay.
    #[serde(default)]
    pub decay: DecayConfig,

    /// Zone table: id, entry point and bound handler.
    #[serde(default = "default_zones")]
    pub zones: Vec<ZoneRecord>,

    /// Catalog of every known item.
    #[serde(default = "default_items")]
    pub items: Vec<ItemStack>,

    /// Weather, solar and farming parameters.
    #[serde(default)]
    pub economy: EconomyConfig,

    /// Gatherable resource nodes.
    #[serde(default = "default_resources")]
    pub resources: Vec<ResourceNodeSpec>,

    /// Placement slots in the player's pod.
    #[serde(default = "default_pod_slots")]
    pub pod_slots: Vec<PodSlot>,

    /// Dialogue nodes.
    #[serde(default = "default_dialogue")]
    pub dialogue: Vec<DialogueNode>,

    /// Quest definitions.
    #[serde(default = "default_quests")]
    pub quests: Vec<QuestDefinition>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            player: PlayerConfig::default(),
            decay: DecayConfig::default(),
            zones: default_zones(),
            items: default_items(),
            economy: EconomyConfig::default(),
            resources: default_resources(),
            pod_slots: default_pod_slots(),
            dialogue: default_dialogue(),
            quests: default_quests(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// An empty document yields the default configuration.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the standard location.
    ///
    /// Reads the file named by `STRATOS_CONFIG` if set (it must exist),
    /// else `stratos-config.yaml` in the working directory if present,
    /// else falls back to the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from) {
            info!(path = %path.display(), "loading configuration from {CONFIG_ENV_VAR}");
            return Self::from_file(&path);
        }

        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            info!(path = %path.display(), "loading configuration");
            Self::from_file(path)
        } else {
            info!("no configuration file found, using defaults");
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Check that the configuration describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero tick rate, negative
    /// decay, duplicate or missing zones, duplicate pod slots, or a broken
    /// dialogue graph.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.ticks_per_second == 0 || self.world.ticks_per_second > 1000 {
            return Err(invalid(format!(
                "world.ticks_per_second must be in 1..=1000, got {}",
                self.world.ticks_per_second
            )));
        }
        if self.decay.energy_per_tick < Decimal::ZERO || self.decay.food_per_tick < Decimal::ZERO {
            return Err(invalid("decay rates must not be negative"));
        }

        let mut zone_ids = BTreeSet::new();
        for zone in &self.zones {
            if zone.id.is_empty() {
                return Err(invalid("zone with an empty id"));
            }
            if !zone_ids.insert(&zone.id) {
                return Err(invalid(format!("duplicate zone id: {}", zone.id)));
            }
        }
        if !zone_ids.contains(&self.player.starting_zone) {
            return Err(invalid(format!(
                "starting zone {} is not in the zone table",
                self.player.starting_zone
            )));
        }

        let mut slot_ids = BTreeSet::new();
        for slot in &self.pod_slots {
            if !slot_ids.insert(&slot.id) {
                return Err(invalid(format!("duplicate pod slot: {}", slot.id)));
            }
        }

        let graph = DialogueGraph::from_nodes(self.dialogue.iter().cloned())
            .map_err(|e| invalid(format!("dialogue: {e}")))?;
        if let Some(opening) = &self.world.opening_dialogue
            && !graph.contains(opening)
        {
            return Err(invalid(format!("opening dialogue {opening} does not exist")));
        }

        Ok(())
    }
}

/// Session-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable session name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Seed for the weather RNG.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Clock ticks per real second.
    #[serde(default = "default_ticks_per_second")]
    pub ticks_per_second: u32,

    /// Simulated seconds that pass per tick.
    #[serde(default = "default_seconds_per_tick")]
    pub seconds_per_tick: u64,

    /// Dialogue opened when the session starts, if any.
    #[serde(default = "default_opening_dialogue")]
    pub opening_dialogue: Option<DialogueId>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            ticks_per_second: default_ticks_per_second(),
            seconds_per_tick: default_seconds_per_tick(),
            opening_dialogue: default_opening_dialogue(),
        }
    }
}

/// The player's starting state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerConfig {
    /// Character name.
    #[serde(default = "default_player_name")]
    pub name: String,

    /// Starting energy (clamped to `[0, 100]`).
    #[serde(default = "default_full_stat")]
    pub initial_energy: Decimal,

    /// Starting food (clamped to `[0, 100]`).
    #[serde(default = "default_full_stat")]
    pub initial_food: Decimal,

    /// Starting reputation.
    #[serde(default)]
    pub initial_reputation: Decimal,

    /// Zone the session starts in.
    #[serde(default = "default_starting_zone")]
    pub starting_zone: ZoneId,

    /// Factions tracked from the start, each at standing 0.
    #[serde(default = "default_factions")]
    pub factions: Vec<FactionId>,

    /// Items the player starts with.
    #[serde(default = "default_starting_inventory")]
    pub starting_inventory: Vec<ItemStack>,

    /// Energy restored by resting.
    #[serde(default = "default_rest_energy")]
    pub rest_energy: Decimal,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: default_player_name(),
            initial_energy: default_full_stat(),
            initial_food: default_full_stat(),
            initial_reputation: Decimal::ZERO,
            starting_zone: default_starting_zone(),
            factions: default_factions(),
            starting_inventory: default_starting_inventory(),
            rest_energy: default_rest_energy(),
        }
    }
}

/// Per-tick stat decay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DecayConfig {
    /// Energy lost per tick.
    #[serde(default = "default_decay_rate")]
    pub energy_per_tick: Decimal,

    /// Food lost per tick.
    #[serde(default = "default_decay_rate")]
    pub food_per_tick: Decimal,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            energy_per_tick: default_decay_rate(),
            food_per_tick: default_decay_rate(),
        }
    }
}

/// Weather, solar output and farming parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EconomyConfig {
    /// Solar output under clear skies.
    #[serde(default = "default_base_solar_output")]
    pub base_solar_output: Decimal,

    /// Pollution at session start.
    #[serde(default)]
    pub initial_pollution: Decimal,

    /// Per-tick weather change chance in basis points.
    #[serde(default = "default_weather_change_chance_bp")]
    pub weather_change_chance_bp: u32,

    /// Units produced by one ordinary harvest.
    #[serde(default = "default_base_harvest_yield")]
    pub base_harvest_yield: Decimal,

    /// The crop that earns the bonus multiplier.
    #[serde(default = "default_bonus_crop")]
    pub bonus_crop: ItemId,

    /// Multiplier for the bonus crop's yield.
    #[serde(default = "default_bonus_multiplier")]
    pub bonus_multiplier: Decimal,

    /// Plantable crop kinds.
    #[serde(default = "default_crops")]
    pub crops: Vec<CropKind>,

    /// Plots of the vertical farm, in display order.
    #[serde(default = "default_farm_plots")]
    pub farm_plots: Vec<PlotId>,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            base_solar_output: default_base_solar_output(),
            initial_pollution: Decimal::ZERO,
            weather_change_chance_bp: default_weather_change_chance_bp(),
            base_harvest_yield: default_base_harvest_yield(),
            bonus_crop: default_bonus_crop(),
            bonus_multiplier: default_bonus_multiplier(),
            crops: default_crops(),
            farm_plots: default_farm_plots(),
        }
    }
}

impl EconomyConfig {
    /// Environment parameters for [`stratos_world::EcoSystem`].
    pub const fn eco_settings(&self) -> EcoSettings {
        EcoSettings {
            base_solar_output: self.base_solar_output,
            initial_pollution: self.initial_pollution,
            weather_change_chance_bp: self.weather_change_chance_bp,
        }
    }

    /// Yield rules for [`stratos_world::FarmRegistry`].
    pub fn harvest_rules(&self) -> HarvestRules {
        HarvestRules {
            base_yield: self.base_harvest_yield,
            bonus_crop: self.bonus_crop.clone(),
            bonus_multiplier: self.bonus_multiplier,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    String::from("Stratos")
}

const fn default_seed() -> u64 {
    42
}

const fn default_ticks_per_second() -> u32 {
    10
}

const fn default_seconds_per_tick() -> u64 {
    6
}

#[allow(clippy::unnecessary_wraps)]
fn default_opening_dialogue() -> Option<DialogueId> {
    Some(DialogueId::new("system_ai_greet"))
}

fn default_player_name() -> String {
    String::from("Nova")
}

const fn default_full_stat() -> Decimal {
    Decimal::ONE_HUNDRED
}

fn default_starting_zone() -> ZoneId {
    ZoneId::new("zone-rooftop-commune")
}

fn default_factions() -> Vec<FactionId> {
    ["Harmonists", "Streamline", "Null"]
        .into_iter()
        .map(FactionId::new)
        .collect()
}

fn default_starting_inventory() -> Vec<ItemStack> {
    default_items()
        .into_iter()
        .filter(|item| item.id.as_str() != "basic_bed")
        .collect()
}

const fn default_rest_energy() -> Decimal {
    Decimal::from_parts(20, 0, 0, false, 0)
}

const fn default_decay_rate() -> Decimal {
    Decimal::from_parts(1, 0, 0, false, 1)
}

const fn default_base_solar_output() -> Decimal {
    Decimal::from_parts(5, 0, 0, false, 0)
}

const fn default_weather_change_chance_bp() -> u32 {
    10
}

const fn default_base_harvest_yield() -> Decimal {
    Decimal::ONE
}

fn default_bonus_crop() -> ItemId {
    ItemId::new("super_grain")
}

const fn default_bonus_multiplier() -> Decimal {
    Decimal::from_parts(15, 0, 0, false, 1)
}

fn default_crops() -> Vec<CropKind> {
    vec![
        CropKind {
            id: ItemId::new("hydroponic_lettuce"),
            name: None,
            growth_per_tick: Decimal::from_parts(5, 0, 0, false, 1),
        },
        CropKind {
            id: ItemId::new("super_grain"),
            name: None,
            growth_per_tick: Decimal::from_parts(25, 0, 0, false, 2),
        },
    ]
}

fn default_farm_plots() -> Vec<PlotId> {
    (0..3)
        .flat_map(|level| (0..3).map(move |i| PlotId::new(format!("plot_{level}_{i}"))))
        .collect()
}

fn zone(id: &str, x: i32, y: i32, logic: ZoneLogicKind) -> ZoneRecord {
    ZoneRecord {
        id: ZoneId::new(id),
        display_name: None,
        entry_point: Position::new(x, y, 0),
        logic,
    }
}

fn default_zones() -> Vec<ZoneRecord> {
    vec![
        zone("zone-rooftop-commune", 80, 80, ZoneLogicKind::RooftopCommune),
        zone("zone-vertical-farm", 50, 250, ZoneLogicKind::VerticalFarm),
        zone("zone-underground-transit", 70, 250, ZoneLogicKind::Static),
        zone("zone-cyber-alley", 30, 350, ZoneLogicKind::Static),
        zone("zone-drone-port", 50, 50, ZoneLogicKind::Static),
        zone("zone-legacy-core", 50, 50, ZoneLogicKind::Static),
    ]
}

fn catalog_item(
    id: &str,
    name: &str,
    quantity: u32,
    kind: ItemKind,
    (w, d, h): (u32, u32, u32),
    icon: &str,
) -> ItemStack {
    ItemStack {
        dimensions: Some(Dimensions { w, d, h }),
        icon: Some(icon.to_owned()),
        ..ItemStack::new(ItemId::new(id), name, Decimal::from(quantity), kind)
    }
}

fn default_items() -> Vec<ItemStack> {
    vec![
        catalog_item(
            "eco_lamp",
            "Eco Lamp",
            1,
            ItemKind::Furniture,
            (15, 15, 25),
            "https://www.svgrepo.com/show/474979/lamp.svg",
        ),
        catalog_item(
            "hydro_plant_small",
            "Small Hydroponic Plant",
            2,
            ItemKind::Plant,
            (20, 20, 20),
            "https://www.svgrepo.com/show/508788/plant-pot-619.svg",
        ),
        catalog_item(
            "data_terminal",
            "Data Terminal",
            1,
            ItemKind::Tech,
            (25, 15, 20),
            "https://www.svgrepo.com/show/309428/terminal.svg",
        ),
        catalog_item(
            "basic_bed",
            "Basic Bed",
            1,
            ItemKind::Furniture,
            (40, 25, 15),
            "https://www.svgrepo.com/show/291776/bed-bedroom.svg",
        ),
    ]
}

fn default_resources() -> Vec<ResourceNodeSpec> {
    ["resource-node-1", "resource-node-2", "resource-node-3"]
        .into_iter()
        .map(|id| ResourceNodeSpec {
            id: NodeId::new(id),
            energy: Decimal::from(25),
            item: ItemStack::new(ItemId::new("crystal"), "Energy Crystal", Decimal::ONE, ItemKind::Resource),
            cooldown_ticks: 50,
        })
        .collect()
}

fn default_pod_slots() -> Vec<PodSlot> {
    [
        ("slot_corner_1", Position::new(5, 5, 0), "Corner Slot"),
        ("slot_wall_1", Position::new(5, 30, 0), "Wall Slot"),
        ("slot_center_1", Position::new(25, 25, 0), "Center Slot"),
    ]
    .into_iter()
    .map(|(id, position, tooltip)| PodSlot {
        id: SlotId::new(id),
        position,
        tooltip: tooltip.to_owned(),
    })
    .collect()
}
