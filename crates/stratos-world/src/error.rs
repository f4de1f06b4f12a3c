//! Error types for the `stratos-world` crate.
//!
//! Harvesting an unready or empty plot is not an error: it yields nothing
//! and leaves the farm untouched.

use stratos_types::{ItemId, NodeId, PlotId};

/// Errors that can occur during farm and resource-node operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The plot already has a crop growing. Harvest it first.
    #[error("plot {0} is already planted")]
    PlotOccupied(PlotId),

    /// The crop kind is not in the crop catalog.
    #[error("unknown crop kind: {0}")]
    UnknownCrop(ItemId),

    /// No resource node with this id exists.
    #[error("resource node not found: {0}")]
    UnknownNode(NodeId),

    /// The node was gathered recently and is still recharging.
    #[error("resource node {node} is recharging until tick {ready_at}")]
    NodeOnCooldown {
        /// The node.
        node: NodeId,
        /// Tick at which the node becomes available again.
        ready_at: u64,
    },

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in world calculation")]
    ArithmeticOverflow,
}
