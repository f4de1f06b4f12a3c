//! Environment, farming and resources for the Stratos city.
//!
//! This crate is the economy/growth simulator: the weather and the solar
//! output it allows, crop plots in the vertical farm, and gatherable
//! resource nodes with recharge cooldowns. Nothing here renders or logs to
//! the player; `stratos-core` turns the results into UI events.
//!
//! # Modules
//!
//! - [`environment`] -- Weather transitions and solar output ([`EcoSystem`])
//! - [`error`] -- Error types for farm and node operations
//! - [`farming`] -- Crop planting, growth and harvest ([`FarmRegistry`])
//! - [`resource`] -- Resource nodes and the [`CooldownScheduler`]

pub mod environment;
pub mod error;
pub mod farming;
pub mod resource;

// Re-export primary types at crate root.
pub use environment::{EcoSettings, EcoSystem, solar_output};
pub use error::WorldError;
pub use farming::{CropKind, FarmRegistry, HarvestRules};
pub use resource::{CooldownScheduler, GatherYield, ResourceField, ResourceNodeSpec};
