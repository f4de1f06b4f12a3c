//! Narrative content for the Stratos life-sim.
//!
//! # Modules
//!
//! - [`dialogue`] -- Dialogue graphs, effects and the dialogue state machine
//! - [`error`] -- Error types ([`NarrativeError`])
//! - [`quest`] -- Collect-item quests and the quest log

pub mod dialogue;
pub mod error;
pub mod quest;

pub use dialogue::{
    CONTINUE_LABEL, DialogueEffect, DialogueEngine, DialogueGraph, DialogueNode, DialogueOption,
    DialogueStep, apply_effect, default_dialogue,
};
pub use error::NarrativeError;
pub use quest::{QuestDefinition, QuestLog, QuestProgress, TurnIn, default_quests};
