//! Player input events.
//!
//! Each variant maps to exactly one operation on [`crate::Game`]. On the
//! wire an input is a JSON object tagged by `action`:
//!
//! ```json
//! {"action": "change_zone", "zone": "zone-vertical-farm"}
//! {"action": "plant_crop", "plot": "plot_0_1", "crop": "super_grain"}
//! ```

use serde::{Deserialize, Serialize};
use stratos_types::{DialogueId, ItemId, NodeId, PlotId, QuestId, SlotId, ZoneId};

/// One player interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum InputEvent {
    /// Travel to another zone.
    ChangeZone {
        /// Destination.
        zone: ZoneId,
    },
    /// Open a dialogue at a node.
    StartDialogue {
        /// Node to open.
        dialogue: DialogueId,
    },
    /// Pick an option of the open dialogue.
    ChooseOption {
        /// Option index, as shown.
        index: usize,
    },
    /// Plant a crop in an empty plot.
    PlantCrop {
        /// The plot.
        plot: PlotId,
        /// Crop kind to plant.
        crop: ItemId,
    },
    /// Harvest a plot.
    HarvestCrop {
        /// The plot.
        plot: PlotId,
    },
    /// Place an item in a pod slot.
    CustomizePod {
        /// The slot.
        slot: SlotId,
        /// The item.
        item: ItemId,
    },
    /// Gather from a resource node.
    Gather {
        /// The node.
        node: NodeId,
    },
    /// Rest to restore energy.
    Rest,
    /// Accept a quest.
    StartQuest {
        /// The quest.
        quest: QuestId,
    },
    /// Hand in a quest.
    TurnInQuest {
        /// The quest.
        quest: QuestId,
    },
    /// Pause the clock.
    Pause,
    /// Resume the clock.
    Resume,
    /// End the session.
    Quit,
}

impl InputEvent {
    /// Short name of the action, for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ChangeZone { .. } => "change_zone",
            Self::StartDialogue { .. } => "start_dialogue",
            Self::ChooseOption { .. } => "choose_option",
            Self::PlantCrop { .. } => "plant_crop",
            Self::HarvestCrop { .. } => "harvest_crop",
            Self::CustomizePod { .. } => "customize_pod",
            Self::Gather { .. } => "gather",
            Self::Rest => "rest",
            Self::StartQuest { .. } => "start_quest",
            Self::TurnInQuest { .. } => "turn_in_quest",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Quit => "quit",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_json() {
        let event: InputEvent =
            serde_json::from_str(r#"{"action":"plant_crop","plot":"plot_0_1","crop":"super_grain"}"#).unwrap();
        assert_eq!(
            event,
            InputEvent::PlantCrop {
                plot: PlotId::new("plot_0_1"),
                crop: ItemId::new("super_grain"),
            }
        );
        assert_eq!(event.name(), "plant_crop");
    }

    #[test]
    fn unit_actions_need_only_the_tag() {
        let event: InputEvent = serde_json::from_str(r#"{"action":"rest"}"#).unwrap();
        assert_eq!(event, InputEvent::Rest);
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(serde_json::from_str::<InputEvent>(r#"{"action":"fly"}"#).is_err());
    }
}
