//! Player state logic for the Stratos life-sim.
//!
//! This crate contains everything that operates on [`PlayerState`] without
//! touching the UI or the clock. It sits between `stratos-types` (which
//! defines the data structures) and `stratos-core` (which drives the tick
//! cycle and reports to the UI sink).
//!
//! # Modules
//!
//! - [`error`] -- Error types for all player operations ([`PlayerError`])
//! - [`inventory`] -- Ordered item stacks with add/remove/query
//! - [`pod`] -- Pod slot customization and layout resolution
//! - [`stats`] -- Clamped stat updates, faction standing, exhaustion
//!
//! [`PlayerState`]: stratos_types::PlayerState

pub mod error;
pub mod inventory;
pub mod pod;
pub mod stats;

pub use error::PlayerError;
pub use inventory::{add_item, find_item, has_item, quantity_of, remove_item};
pub use pod::{PodPlacement, customize_pod, pod_layout, resolve_item};
pub use stats::{StatDelta, adjust_faction_reputation, clamp_stat, exhaustion, update_stats};
