//! Events emitted by the simulation towards the presentation layer.
//!
//! The core never renders. Every call it makes on a UI sink has a matching
//! [`UiEvent`], which is what the headless engine streams to the browser
//! as JSON lines.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{AlertSeverity, GameOverReason};
use crate::ids::ZoneId;
use crate::structs::{DialogueView, PlacedPodItem, PlayerState, PlotView, Position};

/// One presentation update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "event", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum UiEvent {
    /// Redraw the HUD from the player state.
    Hud {
        /// Snapshot of the player.
        player: Box<PlayerState>,
    },
    /// Redraw the in-game clock.
    Time {
        /// Simulated minutes since the session started.
        minutes: u64,
        /// The same time formatted as `HH:MM`.
        clock: String,
    },
    /// Open (or replace) the dialogue box.
    Dialogue {
        /// The node to present.
        view: DialogueView,
    },
    /// Close the dialogue box.
    DialogueClosed,
    /// Show a modal alert.
    Alert {
        /// Alert title.
        title: String,
        /// Alert body.
        text: String,
        /// Alert styling.
        severity: AlertSeverity,
    },
    /// Play the enter animation for a zone.
    ZoneEntered {
        /// The zone now in focus.
        zone: ZoneId,
    },
    /// Play the exit animation for a zone.
    ZoneExited {
        /// The zone losing focus.
        zone: ZoneId,
    },
    /// Move the player sprite.
    PlayerMoved {
        /// New position.
        position: Position,
    },
    /// Redraw the pod furnishings.
    PodChanged {
        /// Every occupied slot.
        items: Vec<PlacedPodItem>,
    },
    /// Redraw the farm plots.
    PlotsChanged {
        /// Every plot of the farm, planted or not.
        plots: Vec<PlotView>,
    },
    /// The session ended.
    GameOver {
        /// What ran out.
        reason: GameOverReason,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_by_name() {
        let event = UiEvent::ZoneEntered {
            zone: ZoneId::new("zone-vertical-farm"),
        };
        let json = serde_json::to_string(&event).unwrap_or_default();
        assert_eq!(json, r#"{"event":"zone_entered","zone":"zone-vertical-farm"}"#);
    }

    #[test]
    fn unit_events_carry_only_the_tag() {
        let json = serde_json::to_string(&UiEvent::DialogueClosed).unwrap_or_default();
        assert_eq!(json, r#"{"event":"dialogue_closed"}"#);
    }
}
