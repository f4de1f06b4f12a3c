//! Quest tracking: collect-item quests with a one-time reward.
//!
//! A quest asks the player to bring a number of units of one item. Turning
//! in an active quest checks the inventory; when the player holds enough,
//! the items are taken, the reward is applied and the quest is completed.
//! A completed quest can never be started or rewarded again.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stratos_player::{StatDelta, inventory, update_stats};
use stratos_types::{ItemId, PlayerState, QuestId};
use tracing::info;

use crate::error::NarrativeError;

/// A quest as authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestDefinition {
    /// The quest.
    pub id: QuestId,
    /// What the player is asked to do.
    pub description: String,
    /// Item to collect.
    pub target_item: ItemId,
    /// Units of the item required.
    pub target_count: Decimal,
    /// Stat change granted on completion.
    #[serde(default)]
    pub reward: StatDelta,
}

/// How far the player is toward a quest's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestProgress {
    /// Units currently held.
    pub held: Decimal,
    /// Units required.
    pub target: Decimal,
}

impl QuestProgress {
    /// Whether the player holds enough to turn the quest in.
    pub fn is_met(&self) -> bool {
        self.held >= self.target
    }
}

/// Outcome of a turn-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnIn {
    /// The quest was completed and its reward applied.
    Completed(StatDelta),
    /// Not enough items yet; nothing changed.
    InProgress(QuestProgress),
}

/// Known quests and the player's progress through them.
#[derive(Debug, Clone, Default)]
pub struct QuestLog {
    definitions: BTreeMap<QuestId, QuestDefinition>,
    active: BTreeSet<QuestId>,
    completed: BTreeSet<QuestId>,
}

impl QuestLog {
    /// Create a log over the given quest definitions.
    pub fn new(definitions: impl IntoIterator<Item = QuestDefinition>) -> Self {
        Self {
            definitions: definitions.into_iter().map(|q| (q.id.clone(), q)).collect(),
            active: BTreeSet::new(),
            completed: BTreeSet::new(),
        }
    }

    /// Look up a quest definition.
    pub fn definition(&self, id: &QuestId) -> Option<&QuestDefinition> {
        self.definitions.get(id)
    }

    /// Whether the quest is in progress.
    pub fn is_active(&self, id: &QuestId) -> bool {
        self.active.contains(id)
    }

    /// Whether the quest has been turned in.
    pub fn is_completed(&self, id: &QuestId) -> bool {
        self.completed.contains(id)
    }

    /// Start a quest.
    pub fn start(&mut self, id: &QuestId) -> Result<&QuestDefinition, NarrativeError> {
        let quest = self
            .definitions
            .get(id)
            .ok_or_else(|| NarrativeError::QuestNotFound(id.clone()))?;
        if self.completed.contains(id) {
            return Err(NarrativeError::QuestAlreadyCompleted(id.clone()));
        }
        if !self.active.insert(id.clone()) {
            return Err(NarrativeError::QuestAlreadyActive(id.clone()));
        }
        info!(quest = %id, "quest started");
        Ok(quest)
    }

    /// Check the player's progress on a quest.
    pub fn progress(&self, id: &QuestId, player: &PlayerState) -> Result<QuestProgress, NarrativeError> {
        let quest = self
            .definitions
            .get(id)
            .ok_or_else(|| NarrativeError::QuestNotFound(id.clone()))?;
        Ok(QuestProgress {
            held: inventory::quantity_of(&player.inventory, &quest.target_item),
            target: quest.target_count,
        })
    }

    /// Turn in an active quest.
    ///
    /// # Errors
    ///
    /// - [`NarrativeError::QuestNotFound`] if the quest is not defined
    /// - [`NarrativeError::QuestAlreadyCompleted`] if it was already turned in
    /// - [`NarrativeError::QuestNotActive`] if it was never started
    pub fn turn_in(&mut self, id: &QuestId, player: &mut PlayerState) -> Result<TurnIn, NarrativeError> {
        let progress = self.progress(id, player)?;
        if self.completed.contains(id) {
            return Err(NarrativeError::QuestAlreadyCompleted(id.clone()));
        }
        if !self.active.contains(id) {
            return Err(NarrativeError::QuestNotActive(id.clone()));
        }
        if !progress.is_met() {
            return Ok(TurnIn::InProgress(progress));
        }

        let quest = self
            .definitions
            .get(id)
            .ok_or_else(|| NarrativeError::QuestNotFound(id.clone()))?;
        inventory::remove_item(&mut player.inventory, &quest.target_item, quest.target_count)?;
        update_stats(player, &quest.reward);

        let reward = quest.reward;
        self.active.remove(id);
        self.completed.insert(id.clone());
        info!(quest = %id, "quest completed");
        Ok(TurnIn::Completed(reward))
    }
}

/// The built-in quest: bring three energy crystals for 50 energy.
pub fn default_quests() -> Vec<QuestDefinition> {
    vec![QuestDefinition {
        id: QuestId::new("collect_crystals"),
        description: String::from("Collect 3 energy crystals."),
        target_item: ItemId::new("crystal"),
        target_count: Decimal::from(3),
        reward: StatDelta::energy(Decimal::from(50)),
    }]
}
