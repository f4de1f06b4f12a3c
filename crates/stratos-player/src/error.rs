//! Error types for the stratos-player crate.
//!
//! All operations that can fail return typed errors rather than panicking.
//! This module defines the error hierarchy used across stat updates,
//! inventory operations and pod customization.

use rust_decimal::Decimal;
use stratos_types::{ItemId, SlotId};

/// Errors that can occur during player state operations.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    /// An item record failed validation (empty id, negative quantity).
    #[error("invalid item: {reason}")]
    InvalidItem {
        /// Description of what is wrong with the record.
        reason: String,
    },

    /// The item is not in the inventory (or not in the item catalog).
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// Attempted to remove more of an item than the player holds.
    #[error("insufficient quantity: wanted {requested} of {item} but only have {available}")]
    InsufficientQuantity {
        /// The item being removed.
        item: ItemId,
        /// The quantity the caller attempted to remove.
        requested: Decimal,
        /// The quantity the player actually holds.
        available: Decimal,
    },

    /// The pod has no slot with this id.
    #[error("unknown pod slot: {0}")]
    UnknownSlot(SlotId),

    /// The item exists but cannot be placed in the pod.
    #[error("item {0} cannot be placed in the pod")]
    NotPlaceable(ItemId),

    /// An arithmetic overflow occurred.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}
