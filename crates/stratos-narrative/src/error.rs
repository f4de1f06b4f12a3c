//! Error types for the `stratos-narrative` crate.

use stratos_player::PlayerError;
use stratos_types::{DialogueId, QuestId};

/// Errors that can occur in dialogue traversal and quest tracking.
#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    /// No dialogue node with this id exists.
    #[error("dialogue not found: {0}")]
    DialogueNotFound(DialogueId),

    /// A choice was made while no dialogue is open.
    #[error("no dialogue is active")]
    NoActiveDialogue,

    /// The option index does not exist on the current node.
    #[error("invalid dialogue choice {index}: node offers {available} options")]
    InvalidChoice {
        /// The index that was chosen.
        index: usize,
        /// Number of options on the node.
        available: usize,
    },

    /// Two dialogue nodes share an id.
    #[error("duplicate dialogue node: {0}")]
    DuplicateNode(DialogueId),

    /// An option points at a node that does not exist.
    #[error("dialogue node {from} transitions to unknown node {to}")]
    DanglingTransition {
        /// Node owning the option.
        from: DialogueId,
        /// Missing target node.
        to: DialogueId,
    },

    /// No quest with this id is defined.
    #[error("quest not found: {0}")]
    QuestNotFound(QuestId),

    /// The quest has already been started.
    #[error("quest already active: {0}")]
    QuestAlreadyActive(QuestId),

    /// The quest has already been turned in.
    #[error("quest already completed: {0}")]
    QuestAlreadyCompleted(QuestId),

    /// The quest has not been started.
    #[error("quest not active: {0}")]
    QuestNotActive(QuestId),

    /// A player-state operation failed while applying an effect or reward.
    #[error("player error: {0}")]
    Player(#[from] PlayerError),
}
