//! Game-level error type and its reporting policy.
//!
//! Every operation on [`crate::Game`] returns [`GameError`]. The error knows
//! how it should reach the player: not-found and refused operations become
//! alerts on the UI sink, invalid input is only logged, and internal
//! failures are logged as errors.

use stratos_narrative::NarrativeError;
use stratos_player::PlayerError;
use stratos_types::AlertSeverity;
use stratos_world::WorldError;

use crate::clock::ClockError;
use crate::config::ConfigError;
use crate::zone::ZoneError;

/// How an error is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Something the player asked for does not exist. Shown as an alert.
    NotFound,
    /// The request is well-formed but not allowed right now. Shown as an alert.
    Refused,
    /// The request itself is malformed. Logged only.
    InvalidInput,
    /// A bug or resource limit. Logged only.
    Internal,
}

/// A user-visible alert derived from an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Alert title.
    pub title: &'static str,
    /// Alert body.
    pub text: String,
    /// Alert styling.
    pub severity: AlertSeverity,
}

impl Alert {
    fn new(title: &'static str, text: impl Into<String>, severity: AlertSeverity) -> Self {
        Self {
            title,
            text: text.into(),
            severity,
        }
    }
}

/// Errors returned by game operations.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A zone change was refused.
    #[error("zone error: {0}")]
    Zone(#[from] ZoneError),

    /// A dialogue or quest operation failed.
    #[error("narrative error: {0}")]
    Narrative(#[from] NarrativeError),

    /// A farm or resource operation failed.
    #[error("world error: {0}")]
    World(#[from] WorldError),

    /// An inventory, stat or pod operation failed.
    #[error("player error: {0}")]
    Player(#[from] PlayerError),

    /// The clock could not be built or advanced.
    #[error("clock error: {0}")]
    Clock(#[from] ClockError),

    /// The configuration is unusable.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The session already ended.
    #[error("the session has ended")]
    SessionOver,
}

impl GameError {
    /// Classify the error for reporting.
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Zone(ZoneError::SurfaceMissing { .. }) => ErrorClass::NotFound,
            Self::Narrative(e) => narrative_class(e),
            Self::World(e) => match e {
                WorldError::UnknownCrop(_) | WorldError::UnknownNode(_) => ErrorClass::NotFound,
                WorldError::PlotOccupied(_) | WorldError::NodeOnCooldown { .. } => ErrorClass::Refused,
                WorldError::ArithmeticOverflow => ErrorClass::Internal,
            },
            Self::Player(e) => player_class(e),
            Self::Clock(_) | Self::Config(_) => ErrorClass::Internal,
            Self::SessionOver => ErrorClass::InvalidInput,
        }
    }

    /// The alert to show the player, for user-visible classes.
    pub fn alert(&self) -> Option<Alert> {
        use AlertSeverity::{Error, Warning};

        let alert = match self {
            Self::Zone(ZoneError::SurfaceMissing { name, .. }) => Alert::new(
                "Zone Error",
                format!("Cannot load zone: {name}. Element missing."),
                Error,
            ),
            Self::Narrative(e) => match e {
                NarrativeError::DialogueNotFound(id) => {
                    Alert::new("Dialogue Error", format!("Dialogue not found: {id}."), Error)
                }
                NarrativeError::QuestNotFound(id) => {
                    Alert::new("Quest Error", format!("Quest not found: {id}."), Error)
                }
                NarrativeError::QuestAlreadyActive(_) => {
                    Alert::new("Quest", "This quest is already in progress.", Warning)
                }
                NarrativeError::QuestAlreadyCompleted(_) => {
                    Alert::new("Quest", "This quest has already been completed.", Warning)
                }
                NarrativeError::QuestNotActive(_) => {
                    Alert::new("Quest", "You have not accepted this quest.", Warning)
                }
                NarrativeError::Player(p) => return player_alert(p, "Quest"),
                NarrativeError::NoActiveDialogue
                | NarrativeError::InvalidChoice { .. }
                | NarrativeError::DuplicateNode(_)
                | NarrativeError::DanglingTransition { .. } => return None,
            },
            Self::World(e) => match e {
                WorldError::UnknownCrop(crop) => {
                    Alert::new("Farm Plot", format!("Unknown crop: {crop}."), Error)
                }
                WorldError::PlotOccupied(plot) => {
                    Alert::new("Farm Plot", format!("Plot {plot} is already planted."), Warning)
                }
                WorldError::UnknownNode(node) => {
                    Alert::new("Resource Error", format!("Unknown resource node: {node}."), Error)
                }
                WorldError::NodeOnCooldown { .. } => {
                    Alert::new("Resource Node", "This node is still recharging.", Warning)
                }
                WorldError::ArithmeticOverflow => return None,
            },
            Self::Player(e) => return player_alert(e, "Cannot Customize"),
            Self::Clock(_) | Self::Config(_) | Self::SessionOver => return None,
        };
        Some(alert)
    }
}

/// Alert for a player-state error, titled for the operation that raised it.
fn player_alert(e: &PlayerError, title: &'static str) -> Option<Alert> {
    use AlertSeverity::Warning;

    let alert = match e {
        PlayerError::ItemNotFound(_) => Alert::new(title, "Item not found in inventory.", Warning),
        PlayerError::UnknownSlot(slot) => Alert::new(title, format!("Unknown pod slot: {slot}."), Warning),
        PlayerError::NotPlaceable(item) => {
            Alert::new(title, format!("{item} cannot be placed in the pod."), Warning)
        }
        PlayerError::InsufficientQuantity {
            item,
            requested,
            available,
        } => Alert::new(
            title,
            format!("You need {requested} {item} but only have {available}."),
            Warning,
        ),
        PlayerError::InvalidItem { .. } | PlayerError::ArithmeticOverflow { .. } => return None,
    };
    Some(alert)
}

const fn narrative_class(e: &NarrativeError) -> ErrorClass {
    match e {
        NarrativeError::DialogueNotFound(_) | NarrativeError::QuestNotFound(_) => ErrorClass::NotFound,
        NarrativeError::QuestAlreadyActive(_)
        | NarrativeError::QuestAlreadyCompleted(_)
        | NarrativeError::QuestNotActive(_) => ErrorClass::Refused,
        NarrativeError::NoActiveDialogue | NarrativeError::InvalidChoice { .. } => ErrorClass::InvalidInput,
        NarrativeError::DuplicateNode(_) | NarrativeError::DanglingTransition { .. } => ErrorClass::Internal,
        NarrativeError::Player(p) => player_class(p),
    }
}

const fn player_class(e: &PlayerError) -> ErrorClass {
    match e {
        PlayerError::ItemNotFound(_) | PlayerError::UnknownSlot(_) => ErrorClass::NotFound,
        PlayerError::NotPlaceable(_) | PlayerError::InsufficientQuantity { .. } => ErrorClass::Refused,
        PlayerError::InvalidItem { .. } => ErrorClass::InvalidInput,
        PlayerError::ArithmeticOverflow { .. } => ErrorClass::Internal,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use stratos_types::{DialogueId, ItemId, NodeId, QuestId, SlotId, ZoneId};

    use super::*;

    #[test]
    fn missing_zone_surface_alerts_with_display_name() {
        let err = GameError::from(ZoneError::SurfaceMissing {
            zone: ZoneId::new("zone-drone-port"),
            name: String::from("Drone Port"),
        });
        assert_eq!(err.class(), ErrorClass::NotFound);
        assert_eq!(
            err.alert(),
            Some(Alert {
                title: "Zone Error",
                text: String::from("Cannot load zone: Drone Port. Element missing."),
                severity: AlertSeverity::Error,
            })
        );
    }

    #[test]
    fn unknown_dialogue_is_not_found() {
        let err = GameError::from(NarrativeError::DialogueNotFound(DialogueId::new("nope")));
        assert_eq!(err.class(), ErrorClass::NotFound);
        assert_eq!(err.alert().map(|a| a.severity), Some(AlertSeverity::Error));
    }

    #[test]
    fn bad_choice_is_logged_not_shown() {
        let err = GameError::from(NarrativeError::InvalidChoice {
            index: 4,
            available: 2,
        });
        assert_eq!(err.class(), ErrorClass::InvalidInput);
        assert!(err.alert().is_none());
    }

    #[test]
    fn cooldown_is_refused_with_warning() {
        let err = GameError::from(WorldError::NodeOnCooldown {
            node: NodeId::new("resource-node-1"),
            ready_at: 60,
        });
        assert_eq!(err.class(), ErrorClass::Refused);
        assert_eq!(err.alert().map(|a| a.severity), Some(AlertSeverity::Warning));
    }

    #[test]
    fn missing_pod_item_uses_customize_title() {
        let err = GameError::from(PlayerError::ItemNotFound(ItemId::new("basic_bed")));
        assert_eq!(err.alert().map(|a| a.title), Some("Cannot Customize"));
    }

    #[test]
    fn short_quest_turn_in_alerts() {
        let err = GameError::from(NarrativeError::Player(PlayerError::InsufficientQuantity {
            item: ItemId::new("crystal"),
            requested: dec!(3),
            available: dec!(1),
        }));
        assert_eq!(err.class(), ErrorClass::Refused);
        assert_eq!(
            err.alert(),
            Some(Alert {
                title: "Quest",
                text: String::from("You need 3 crystal but only have 1."),
                severity: AlertSeverity::Warning,
            })
        );
    }

    #[test]
    fn missing_quest_item_alerts() {
        let err = GameError::from(NarrativeError::Player(PlayerError::ItemNotFound(ItemId::new(
            "crystal",
        ))));
        assert_eq!(err.class(), ErrorClass::NotFound);
        assert_eq!(err.alert().map(|a| a.title), Some("Quest"));
    }

    #[test]
    fn every_visible_class_has_an_alert() {
        let player_errors = || {
            vec![
                PlayerError::InvalidItem {
                    reason: String::from("empty id"),
                },
                PlayerError::ItemNotFound(ItemId::new("basic_bed")),
                PlayerError::InsufficientQuantity {
                    item: ItemId::new("crystal"),
                    requested: dec!(2),
                    available: dec!(0.5),
                },
                PlayerError::UnknownSlot(SlotId::new("slot_roof")),
                PlayerError::NotPlaceable(ItemId::new("crystal")),
                PlayerError::ArithmeticOverflow {
                    context: String::from("stack"),
                },
            ]
        };
        let mut errors: Vec<GameError> = vec![
            ZoneError::SurfaceMissing {
                zone: ZoneId::new("zone-drone-port"),
                name: String::from("Drone Port"),
            }
            .into(),
            NarrativeError::DialogueNotFound(DialogueId::new("nope")).into(),
            NarrativeError::QuestNotFound(QuestId::new("nope")).into(),
            NarrativeError::QuestAlreadyActive(QuestId::new("q")).into(),
            NarrativeError::QuestAlreadyCompleted(QuestId::new("q")).into(),
            NarrativeError::QuestNotActive(QuestId::new("q")).into(),
            NarrativeError::NoActiveDialogue.into(),
            WorldError::UnknownCrop(ItemId::new("kelp")).into(),
            WorldError::UnknownNode(NodeId::new("resource-node-9")).into(),
            WorldError::ArithmeticOverflow.into(),
            GameError::SessionOver,
        ];
        errors.extend(player_errors().into_iter().map(GameError::from));
        errors.extend(
            player_errors()
                .into_iter()
                .map(|p| GameError::from(NarrativeError::Player(p))),
        );

        for err in &errors {
            let visible = matches!(err.class(), ErrorClass::NotFound | ErrorClass::Refused);
            assert_eq!(err.alert().is_some(), visible, "{err}");
        }
    }

    #[test]
    fn overflow_is_internal() {
        let err = GameError::from(WorldError::ArithmeticOverflow);
        assert_eq!(err.class(), ErrorClass::Internal);
        assert!(err.alert().is_none());
    }
}
