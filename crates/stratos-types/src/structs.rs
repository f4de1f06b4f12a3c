//! Core entity structs for the Stratos life-sim.
//!
//! These are plain data records. The logic that mutates them lives in the
//! `stratos-player`, `stratos-world` and `stratos-core` crates.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ItemKind, Weather, ZoneLogicKind};
use crate::ids::{DialogueId, FactionId, ItemId, PlotId, SlotId, ZoneId};

/// Upper bound of the energy and food stats.
pub const STAT_MAX: Decimal = Decimal::ONE_HUNDRED;

/// Crop progress at which a plot becomes harvestable.
pub const CROP_READY_PROGRESS: Decimal = Decimal::ONE_HUNDRED;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A point in the isometric world, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Horizontal axis.
    pub x: i32,
    /// Depth axis.
    pub y: i32,
    /// Height above the zone floor.
    #[serde(default)]
    pub z: i32,
}

impl Position {
    /// Create a position from its three coordinates.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Footprint of a placeable item (width, depth, height) in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Dimensions {
    /// Width.
    pub w: u32,
    /// Depth.
    pub d: u32,
    /// Height.
    pub h: u32,
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// A quantity of one item kind.
///
/// Within one inventory there is at most one stack per [`ItemId`], and a
/// stack whose quantity reaches zero is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ItemStack {
    /// Unique item kind.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Number of units held. Never negative.
    #[ts(as = "String")]
    #[serde(default = "default_quantity")]
    pub quantity: Decimal,
    /// Item category.
    #[serde(rename = "type")]
    pub kind: ItemKind,
    /// Footprint when placed, if the item is placeable.
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    /// Icon reference for the UI.
    #[serde(default)]
    pub icon: Option<String>,
}

impl ItemStack {
    /// Build a stack with no dimensions or icon.
    pub fn new(id: ItemId, name: impl Into<String>, quantity: Decimal, kind: ItemKind) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            kind,
            dimensions: None,
            icon: None,
        }
    }

    /// Return a copy of this stack with a different quantity.
    #[must_use]
    pub fn with_quantity(&self, quantity: Decimal) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }
}

const fn default_quantity() -> Decimal {
    Decimal::ONE
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// The player character's complete mutable state.
///
/// Owned by the game context for the whole session. Energy and food stay in
/// `[0, 100]`; reputation is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerState {
    /// Character name shown on the HUD.
    pub name: String,
    /// Energy, clamped to `[0, 100]`.
    #[ts(as = "String")]
    pub energy: Decimal,
    /// Food, clamped to `[0, 100]`.
    #[ts(as = "String")]
    pub food: Decimal,
    /// General reputation, unbounded.
    #[ts(as = "String")]
    pub reputation: Decimal,
    /// Standing with each faction.
    pub faction_reputation: BTreeMap<FactionId, i64>,
    /// Item stacks in insertion order.
    pub inventory: Vec<ItemStack>,
    /// Position inside the current zone.
    pub position: Position,
    /// Zone the player is currently in.
    pub current_zone: ZoneId,
    /// Item placed in each occupied pod slot.
    pub pod: BTreeMap<SlotId, ItemId>,
}

// ---------------------------------------------------------------------------
// Environment and farming
// ---------------------------------------------------------------------------

/// Process-wide environmental state, updated once per tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EcoState {
    /// Current weather.
    pub weather: Weather,
    /// Solar output this tick (base output × weather multiplier).
    #[ts(as = "String")]
    pub solar_output: Decimal,
    /// Pollution level, 0-100.
    #[ts(as = "String")]
    pub pollution: Decimal,
}

/// Growth state of one planted farm plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CropPlot {
    /// Kind of crop growing; also the item id produced on harvest.
    pub crop: ItemId,
    /// Growth progress in `[0, 100]`.
    #[ts(as = "String")]
    pub progress: Decimal,
    /// Tick at which the crop was planted.
    pub planted_at_tick: u64,
}

impl CropPlot {
    /// Whether the crop has finished growing.
    pub fn is_ready(&self) -> bool {
        self.progress >= CROP_READY_PROGRESS
    }
}

/// What the UI needs to draw one farm plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlotView {
    /// The plot.
    pub plot: PlotId,
    /// The crop growing there, or `None` for an empty plot.
    pub crop: Option<CropPlot>,
}

// ---------------------------------------------------------------------------
// Zones and the pod
// ---------------------------------------------------------------------------

/// Static description of a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ZoneRecord {
    /// The zone.
    pub id: ZoneId,
    /// Name shown to the player. Derived from the id when absent.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Where the player is placed on entering the zone.
    pub entry_point: Position,
    /// Handler bound to this zone.
    #[serde(default)]
    pub logic: ZoneLogicKind,
}

/// A placement slot inside the player's pod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PodSlot {
    /// The slot.
    pub id: SlotId,
    /// Position of the slot inside the pod area.
    pub position: Position,
    /// Label shown when hovering the slot.
    pub tooltip: String,
}

/// An item placed in a pod slot, resolved for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlacedPodItem {
    /// The slot holding the item.
    pub slot: SlotId,
    /// Where the slot sits in the pod.
    pub position: Position,
    /// Full item data (quantity 1).
    pub item: ItemStack,
}

// ---------------------------------------------------------------------------
// Dialogue presentation
// ---------------------------------------------------------------------------

/// A dialogue node as presented to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DialogueView {
    /// Node being shown.
    pub node: DialogueId,
    /// Who is speaking.
    pub speaker: String,
    /// What they say.
    pub text: String,
    /// Selectable option labels, by index.
    pub options: Vec<String>,
}
