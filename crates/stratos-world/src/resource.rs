//! Gatherable resource nodes and their recharge cooldowns.
//!
//! Gathering a node grants energy and an item, then puts the node on
//! cooldown for a fixed number of ticks. Cooldowns are tracked by a
//! [`CooldownScheduler`]: one pending ready-tick per key, replaced when the
//! key is re-armed and removable before it fires.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stratos_types::{ItemStack, NodeId};
use tracing::debug;

use crate::error::WorldError;

// ---------------------------------------------------------------------------
// CooldownScheduler
// ---------------------------------------------------------------------------

/// Tick-based cancellable cooldowns keyed by `K`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooldownScheduler<K: Ord> {
    ready_at: BTreeMap<K, u64>,
}

impl<K: Ord + Clone> CooldownScheduler<K> {
    /// Create a scheduler with nothing pending.
    pub const fn new() -> Self {
        Self {
            ready_at: BTreeMap::new(),
        }
    }

    /// Arm a cooldown of `duration` ticks starting at `now`.
    ///
    /// A pending cooldown for the same key is replaced; its ready tick is
    /// returned.
    pub fn arm(&mut self, key: K, now: u64, duration: u64) -> Result<Option<u64>, WorldError> {
        let ready = now.checked_add(duration).ok_or(WorldError::ArithmeticOverflow)?;
        Ok(self.ready_at.insert(key, ready))
    }

    /// Cancel a pending cooldown. Returns `false` if none was pending.
    pub fn cancel(&mut self, key: &K) -> bool {
        self.ready_at.remove(key).is_some()
    }

    /// Tick at which the key becomes ready, if it is pending.
    pub fn ready_at(&self, key: &K) -> Option<u64> {
        self.ready_at.get(key).copied()
    }

    /// Whether the key is still cooling down at `now`.
    pub fn is_cooling(&self, key: &K, now: u64) -> bool {
        self.ready_at.get(key).is_some_and(|ready| now < *ready)
    }

    /// Remove and return every key whose cooldown has elapsed by `now`,
    /// in key order.
    pub fn expire(&mut self, now: u64) -> Vec<K> {
        let expired: Vec<K> = self
            .ready_at
            .iter()
            .filter(|(_, ready)| **ready <= now)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            self.ready_at.remove(key);
        }
        expired
    }

    /// Number of pending cooldowns.
    pub fn pending(&self) -> usize {
        self.ready_at.len()
    }
}

impl<K: Ord + Clone> Default for CooldownScheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Resource nodes
// ---------------------------------------------------------------------------

/// A gatherable resource node, as configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceNodeSpec {
    /// The node.
    pub id: NodeId,
    /// Energy granted per gather.
    pub energy: Decimal,
    /// Item granted per gather.
    pub item: ItemStack,
    /// Ticks before the node can be gathered again.
    pub cooldown_ticks: u64,
}

/// What one successful gather produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatherYield {
    /// Energy to add to the player.
    pub energy: Decimal,
    /// Item to add to the player's inventory.
    pub item: ItemStack,
    /// Tick at which the node is ready again.
    pub ready_at: u64,
}

/// Every resource node in the city plus their cooldowns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceField {
    nodes: BTreeMap<NodeId, ResourceNodeSpec>,
    cooldowns: CooldownScheduler<NodeId>,
}

impl ResourceField {
    /// Build the field from node specs. Later duplicates replace earlier ones.
    pub fn new(specs: impl IntoIterator<Item = ResourceNodeSpec>) -> Self {
        Self {
            nodes: specs.into_iter().map(|s| (s.id.clone(), s)).collect(),
            cooldowns: CooldownScheduler::new(),
        }
    }

    /// Look up a node.
    pub fn node(&self, id: &NodeId) -> Option<&ResourceNodeSpec> {
        self.nodes.get(id)
    }

    /// Whether a node exists and is not cooling down at `now`.
    pub fn is_available(&self, id: &NodeId, now: u64) -> bool {
        self.nodes.contains_key(id) && !self.cooldowns.is_cooling(id, now)
    }

    /// Gather from a node and arm its cooldown.
    ///
    /// # Errors
    ///
    /// - [`WorldError::UnknownNode`] if no such node exists
    /// - [`WorldError::NodeOnCooldown`] if the node is still recharging
    pub fn gather(&mut self, id: &NodeId, now: u64) -> Result<GatherYield, WorldError> {
        let spec = self
            .nodes
            .get(id)
            .ok_or_else(|| WorldError::UnknownNode(id.clone()))?;

        if let Some(ready_at) = self.cooldowns.ready_at(id).filter(|ready| now < *ready) {
            return Err(WorldError::NodeOnCooldown {
                node: id.clone(),
                ready_at,
            });
        }

        let energy = spec.energy;
        let item = spec.item.clone();
        let cooldown = spec.cooldown_ticks;
        self.cooldowns.arm(id.clone(), now, cooldown)?;
        let ready_at = self.cooldowns.ready_at(id).unwrap_or(now);
        debug!(node = %id, ready_at, "resource node gathered");

        Ok(GatherYield {
            energy,
            item,
            ready_at,
        })
    }

    /// Cancel a node's cooldown, making it available at once.
    pub fn cancel_cooldown(&mut self, id: &NodeId) -> bool {
        self.cooldowns.cancel(id)
    }

    /// Release every node whose cooldown elapsed by `now`.
    pub fn expire(&mut self, now: u64) -> Vec<NodeId> {
        self.cooldowns.expire(now)
    }
}
