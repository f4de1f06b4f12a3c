//! Dialogue graphs and the dialogue state machine.
//!
//! A dialogue is a directed graph of [`DialogueNode`]s keyed by id. Each
//! node has a speaker, a line of text and an ordered list of options. An
//! option may carry an effect and may transition to another node; an option
//! without a transition ends the conversation.
//!
//! Cycles are legal. A graph that loops back on itself simply produces a
//! conversation that continues until the player picks a terminal option.
//!
//! Effects are data, not code: [`DialogueEffect`] variants are interpreted
//! by [`apply_effect`] against the player state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stratos_player::{StatDelta, adjust_faction_reputation, update_stats};
use stratos_types::{DialogueId, DialogueView, FactionId, PlayerState};
use tracing::{debug, info};

use crate::error::NarrativeError;

/// Label of the option offered by a node that authors none.
pub const CONTINUE_LABEL: &str = "Continue...";

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

/// A side effect attached to a dialogue option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DialogueEffect {
    /// Change the player's standing with a faction.
    AdjustFactionReputation {
        /// The faction.
        faction: FactionId,
        /// Signed change in standing.
        delta: i64,
    },
    /// Change the player's stats (clamped as usual).
    AdjustStats(StatDelta),
}

/// One selectable option on a dialogue node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueOption {
    /// Label shown to the player.
    pub text: String,
    /// Node to continue with; `None` ends the conversation.
    #[serde(default)]
    pub next: Option<DialogueId>,
    /// Effect applied when the option is chosen.
    #[serde(default)]
    pub effect: Option<DialogueEffect>,
}

impl DialogueOption {
    /// An option that ends the conversation with no effect.
    pub fn end(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next: None,
            effect: None,
        }
    }

    /// An option that moves to another node with no effect.
    pub fn goto(text: impl Into<String>, next: impl Into<DialogueId>) -> Self {
        Self {
            text: text.into(),
            next: Some(next.into()),
            effect: None,
        }
    }

    /// Attach an effect to this option.
    #[must_use]
    pub fn with_effect(mut self, effect: DialogueEffect) -> Self {
        self.effect = Some(effect);
        self
    }
}

/// A node of the dialogue graph. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueNode {
    /// The node id.
    pub id: DialogueId,
    /// Who is speaking.
    pub speaker: String,
    /// What they say.
    pub text: String,
    /// Options in display order.
    #[serde(default)]
    pub options: Vec<DialogueOption>,
}

impl DialogueNode {
    /// The view the UI shows for this node.
    ///
    /// A node without options offers a single terminal "Continue..." option.
    pub fn view(&self) -> DialogueView {
        let options = if self.options.is_empty() {
            vec![String::from(CONTINUE_LABEL)]
        } else {
            self.options.iter().map(|o| o.text.clone()).collect()
        };
        DialogueView {
            node: self.id.clone(),
            speaker: self.speaker.clone(),
            text: self.text.clone(),
            options,
        }
    }
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// A validated dialogue graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogueGraph {
    nodes: BTreeMap<DialogueId, DialogueNode>,
}

impl DialogueGraph {
    /// Build a graph from its nodes.
    ///
    /// # Errors
    ///
    /// - [`NarrativeError::DuplicateNode`] if two nodes share an id
    /// - [`NarrativeError::DanglingTransition`] if an option targets a
    ///   node that does not exist
    pub fn from_nodes(nodes: impl IntoIterator<Item = DialogueNode>) -> Result<Self, NarrativeError> {
        let mut map = BTreeMap::new();
        for node in nodes {
            if map.contains_key(&node.id) {
                return Err(NarrativeError::DuplicateNode(node.id));
            }
            map.insert(node.id.clone(), node);
        }

        for node in map.values() {
            for option in &node.options {
                if let Some(next) = option.next.as_ref().filter(|n| !map.contains_key(*n)) {
                    return Err(NarrativeError::DanglingTransition {
                        from: node.id.clone(),
                        to: next.clone(),
                    });
                }
            }
        }

        Ok(Self { nodes: map })
    }

    /// Look up a node by id.
    pub fn get(&self, id: &DialogueId) -> Option<&DialogueNode> {
        self.nodes.get(id)
    }

    /// Whether a node exists.
    pub fn contains(&self, id: &DialogueId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// Apply a dialogue effect to the player.
pub fn apply_effect(player: &mut PlayerState, effect: &DialogueEffect) {
    match effect {
        DialogueEffect::AdjustFactionReputation { faction, delta } => {
            let standing = adjust_faction_reputation(player, faction, *delta);
            info!(faction = %faction, delta, standing, "faction reputation changed");
        }
        DialogueEffect::AdjustStats(delta) => {
            update_stats(player, delta);
            debug!(energy = %player.energy, food = %player.food, "dialogue adjusted stats");
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Result of choosing a dialogue option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueStep {
    /// The conversation moved to another node.
    Continue(DialogueView),
    /// The conversation is over.
    Ended,
}

impl DialogueStep {
    /// The node now shown, if the conversation continues.
    pub const fn view(&self) -> Option<&DialogueView> {
        match self {
            Self::Continue(view) => Some(view),
            Self::Ended => None,
        }
    }
}

/// The dialogue state machine: a graph plus the node currently shown.
#[derive(Debug, Clone, Default)]
pub struct DialogueEngine {
    graph: DialogueGraph,
    active: Option<DialogueId>,
}

impl DialogueEngine {
    /// Create an engine with no open conversation.
    pub const fn new(graph: DialogueGraph) -> Self {
        Self {
            graph,
            active: None,
        }
    }

    /// The underlying graph.
    pub const fn graph(&self) -> &DialogueGraph {
        &self.graph
    }

    /// The node currently shown, if a conversation is open.
    pub const fn active(&self) -> Option<&DialogueId> {
        self.active.as_ref()
    }

    /// Open a conversation at a node.
    ///
    /// An already open conversation is replaced.
    ///
    /// # Errors
    ///
    /// [`NarrativeError::DialogueNotFound`] if the id is unknown; any open
    /// conversation is left as it was.
    pub fn start(&mut self, id: &DialogueId) -> Result<DialogueView, NarrativeError> {
        let node = self
            .graph
            .get(id)
            .ok_or_else(|| NarrativeError::DialogueNotFound(id.clone()))?;
        let view = node.view();
        self.active = Some(id.clone());
        debug!(node = %id, speaker = %view.speaker, "dialogue node shown");
        Ok(view)
    }

    /// Choose an option on the current node.
    ///
    /// The option's effect runs first. If the option names a next node the
    /// conversation moves there; otherwise it ends.
    ///
    /// # Errors
    ///
    /// - [`NarrativeError::NoActiveDialogue`] if no conversation is open
    /// - [`NarrativeError::InvalidChoice`] if `index` is out of range
    pub fn choose(&mut self, index: usize, player: &mut PlayerState) -> Result<DialogueStep, NarrativeError> {
        let current = self.active.as_ref().ok_or(NarrativeError::NoActiveDialogue)?;
        let node = self
            .graph
            .get(current)
            .ok_or_else(|| NarrativeError::DialogueNotFound(current.clone()))?;

        if node.options.is_empty() {
            if index != 0 {
                return Err(NarrativeError::InvalidChoice { index, available: 1 });
            }
            self.active = None;
            return Ok(DialogueStep::Ended);
        }

        let option = node.options.get(index).ok_or(NarrativeError::InvalidChoice {
            index,
            available: node.options.len(),
        })?;

        if let Some(effect) = &option.effect {
            apply_effect(player, effect);
        }

        if let Some(next) = option.next.clone() {
            return self.start(&next).map(DialogueStep::Continue);
        }
        self.active = None;
        Ok(DialogueStep::Ended)
    }

    /// Close the open conversation, if any. Returns whether one was open.
    pub fn close(&mut self) -> bool {
        self.active.take().is_some()
    }
}

// ---------------------------------------------------------------------------
// Built-in content
// ---------------------------------------------------------------------------

/// The built-in dialogue trees: the Central AI greeting and the Harmonist
/// Elder.
pub fn default_dialogue() -> Vec<DialogueNode> {
    let harmonists = FactionId::new("Harmonists");
    vec![
        DialogueNode {
            id: DialogueId::new("system_ai_greet"),
            speaker: String::from("Central AI"),
            text: String::from(
                "Welcome to Stratos, Grid Citizen. Your journey begins now. Remember, your choices shape the future.",
            ),
            options: vec![
                DialogueOption::end("Understood."),
                DialogueOption::goto("Who are you?", "system_ai_intro"),
            ],
        },
        DialogueNode {
            id: DialogueId::new("system_ai_intro"),
            speaker: String::from("Central AI"),
            text: String::from(
                "I am the core intelligence overseeing Stratos. My purpose is to ensure the city's sustainability and your well-being.",
            ),
            options: vec![DialogueOption::end("Good to know.")],
        },
        DialogueNode {
            id: DialogueId::new("harmonist_elder_greet"),
            speaker: String::from("Harmonist Elder"),
            text: String::from(
                "Greetings, young one. The winds of change are blowing. Do you feel them?",
            ),
            options: vec![
                DialogueOption::goto("I'm not sure what you mean.", "harmonist_elder_explain"),
                DialogueOption::goto("Yes, the city feels... different.", "harmonist_elder_agree")
                    .with_effect(DialogueEffect::AdjustFactionReputation {
                        faction: harmonists.clone(),
                        delta: 5,
                    }),
                DialogueOption::end("I'm too busy for philosophical chats.").with_effect(
                    DialogueEffect::AdjustFactionReputation {
                        faction: harmonists,
                        delta: -2,
                    },
                ),
            ],
        },
        DialogueNode {
            id: DialogueId::new("harmonist_elder_explain"),
            speaker: String::from("Harmonist Elder"),
            text: String::from(
                "The balance between nature and technology is delicate. We Harmonists strive to maintain it. Perhaps you'll understand in time.",
            ),
            options: vec![DialogueOption::end("I'll keep that in mind.")],
        },
        DialogueNode {
            id: DialogueId::new("harmonist_elder_agree"),
            speaker: String::from("Harmonist Elder"),
            text: String::from(
                "Indeed. The Grid hums with new energies, not all of them benign. Stay vigilant.",
            ),
            options: vec![DialogueOption::end("I will. Thank you.")],
        },
    ]
}
