//! Shared type definitions for the Stratos life-sim.
//!
//! This crate is the single source of truth for the data model shared by
//! the simulation crates and the browser UI. Types flow downstream to
//! `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe string wrappers for all entity identifiers
//! - [`enums`] -- Weather, item kinds, alert severities, zone logic kinds
//! - [`structs`] -- Player, item, environment, crop and zone records
//! - [`events`] -- Presentation events emitted towards the UI

pub mod enums;
pub mod events;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{AlertSeverity, GameOverReason, ItemKind, Weather, ZoneLogicKind};
pub use events::UiEvent;
pub use ids::{DialogueId, FactionId, ItemId, NodeId, PlotId, QuestId, SlotId, ZoneId};
pub use structs::{
    CROP_READY_PROGRESS, CropPlot, Dimensions, DialogueView, EcoState, ItemStack, PlacedPodItem,
    PlayerState, PlotView, PodSlot, Position, STAT_MAX, ZoneRecord,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the browser UI.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. The files are written to the
        // `bindings/` directory relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::ZoneId::export_all();
        let _ = crate::ids::ItemId::export_all();
        let _ = crate::ids::PlotId::export_all();
        let _ = crate::ids::DialogueId::export_all();
        let _ = crate::ids::FactionId::export_all();
        let _ = crate::ids::SlotId::export_all();
        let _ = crate::ids::NodeId::export_all();
        let _ = crate::ids::QuestId::export_all();

        // Enums
        let _ = crate::enums::Weather::export_all();
        let _ = crate::enums::ItemKind::export_all();
        let _ = crate::enums::AlertSeverity::export_all();
        let _ = crate::enums::GameOverReason::export_all();
        let _ = crate::enums::ZoneLogicKind::export_all();

        // Structs
        let _ = crate::structs::Position::export_all();
        let _ = crate::structs::Dimensions::export_all();
        let _ = crate::structs::ItemStack::export_all();
        let _ = crate::structs::PlayerState::export_all();
        let _ = crate::structs::EcoState::export_all();
        let _ = crate::structs::CropPlot::export_all();
        let _ = crate::structs::PlotView::export_all();
        let _ = crate::structs::ZoneRecord::export_all();
        let _ = crate::structs::PodSlot::export_all();
        let _ = crate::structs::PlacedPodItem::export_all();
        let _ = crate::structs::DialogueView::export_all();

        // Events
        let _ = crate::events::UiEvent::export_all();
    }
}
