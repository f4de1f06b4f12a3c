//! UI sink trait and an in-memory recording implementation.
//!
//! The simulation never renders. Everything the player should see is pushed
//! through a [`UiSink`]: HUD and clock refreshes, dialogue boxes, alerts,
//! zone animations, pod and farm redraws, and the final game-over signal.
//! Each call corresponds to one [`UiEvent`], so an implementation only has
//! to provide [`UiSink::emit`]; the named methods build the event.
//!
//! The sink also answers whether a zone has a presentable surface. A zone
//! change to a zone without one is refused.

use std::collections::BTreeSet;

use stratos_types::{
    AlertSeverity, DialogueView, GameOverReason, PlacedPodItem, PlayerState, PlotView, Position,
    UiEvent, ZoneId,
};

/// Title of the alert shown when the session ends.
pub const GAME_OVER_TITLE: &str = "Game Over";

/// Body of the alert shown when the session ends.
pub const GAME_OVER_TEXT: &str = "Your journey in Stratos has ended.";

/// A presentation collaborator.
///
/// Implementations decide how events reach the player (a browser over a
/// pipe, a test recorder, ...). All calls happen on the simulation's single
/// logical thread.
pub trait UiSink {
    /// Deliver one presentation event.
    fn emit(&mut self, event: UiEvent);

    /// Whether the UI can present the given zone.
    fn has_zone_surface(&self, zone: &ZoneId) -> bool;

    /// Redraw the HUD.
    fn update_hud(&mut self, player: &PlayerState) {
        self.emit(UiEvent::Hud {
            player: Box::new(player.clone()),
        });
    }

    /// Redraw the in-game clock.
    fn update_time(&mut self, minutes: u64, clock: &str) {
        self.emit(UiEvent::Time {
            minutes,
            clock: clock.to_owned(),
        });
    }

    /// Open or replace the dialogue box.
    fn show_dialogue(&mut self, view: &DialogueView) {
        self.emit(UiEvent::Dialogue { view: view.clone() });
    }

    /// Close the dialogue box.
    fn close_dialogue(&mut self) {
        self.emit(UiEvent::DialogueClosed);
    }

    /// Show a modal alert.
    fn show_alert(&mut self, title: &str, text: &str, severity: AlertSeverity) {
        self.emit(UiEvent::Alert {
            title: title.to_owned(),
            text: text.to_owned(),
            severity,
        });
    }

    /// Play the enter animation for a zone.
    fn zone_entered(&mut self, zone: &ZoneId) {
        self.emit(UiEvent::ZoneEntered { zone: zone.clone() });
    }

    /// Play the exit animation for a zone.
    fn zone_exited(&mut self, zone: &ZoneId) {
        self.emit(UiEvent::ZoneExited { zone: zone.clone() });
    }

    /// Move the player sprite.
    fn player_moved(&mut self, position: Position) {
        self.emit(UiEvent::PlayerMoved { position });
    }

    /// Redraw the pod furnishings.
    fn pod_changed(&mut self, items: Vec<PlacedPodItem>) {
        self.emit(UiEvent::PodChanged { items });
    }

    /// Redraw the farm plots.
    fn plots_changed(&mut self, plots: Vec<PlotView>) {
        self.emit(UiEvent::PlotsChanged { plots });
    }

    /// Signal the end of the session, followed by the game-over alert.
    fn game_over(&mut self, reason: GameOverReason) {
        self.emit(UiEvent::GameOver { reason });
        self.show_alert(GAME_OVER_TITLE, GAME_OVER_TEXT, AlertSeverity::Error);
    }
}

/// A sink that stores every event in memory.
///
/// By default every zone is presentable; [`RecordingSink::with_surfaces`]
/// restricts presentable zones to an explicit set.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<UiEvent>,
    surfaces: Option<BTreeSet<ZoneId>>,
}

impl RecordingSink {
    /// Create a sink that can present every zone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that can present only the given zones.
    pub fn with_surfaces(zones: impl IntoIterator<Item = ZoneId>) -> Self {
        Self {
            events: Vec::new(),
            surfaces: Some(zones.into_iter().collect()),
        }
    }

    /// Make a zone unpresentable from now on.
    pub fn remove_surface(&mut self, zone: &ZoneId) {
        if let Some(surfaces) = &mut self.surfaces {
            surfaces.remove(zone);
        }
    }

    /// Every event recorded so far, in order.
    pub fn events(&self) -> &[UiEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the sink empty.
    pub fn drain(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    /// Recorded alerts as `(title, text, severity)`.
    pub fn alerts(&self) -> impl Iterator<Item = (&str, &str, AlertSeverity)> {
        self.events.iter().filter_map(|event| match event {
            UiEvent::Alert {
                title,
                text,
                severity,
            } => Some((title.as_str(), text.as_str(), *severity)),
            _ => None,
        })
    }

    /// Whether an alert with this title was recorded.
    pub fn has_alert(&self, title: &str) -> bool {
        self.alerts().any(|(t, _, _)| t == title)
    }

    /// Recorded dialogue views, in order.
    pub fn dialogues(&self) -> impl Iterator<Item = &DialogueView> {
        self.events.iter().filter_map(|event| match event {
            UiEvent::Dialogue { view } => Some(view),
            _ => None,
        })
    }

    /// Number of recorded events matching a predicate.
    pub fn count(&self, predicate: impl Fn(&UiEvent) -> bool) -> usize {
        self.events.iter().filter(|event| predicate(event)).count()
    }
}

impl UiSink for RecordingSink {
    fn emit(&mut self, event: UiEvent) {
        self.events.push(event);
    }

    fn has_zone_surface(&self, zone: &ZoneId) -> bool {
        self.surfaces.as_ref().is_none_or(|s| s.contains(zone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_over_emits_signal_then_alert() {
        let mut sink = RecordingSink::new();
        sink.game_over(GameOverReason::FoodDepleted);
        assert_eq!(
            sink.events().first(),
            Some(&UiEvent::GameOver {
                reason: GameOverReason::FoodDepleted
            })
        );
        let alerts: Vec<_> = sink.alerts().collect();
        assert_eq!(
            alerts,
            vec![(GAME_OVER_TITLE, GAME_OVER_TEXT, AlertSeverity::Error)]
        );
    }

    #[test]
    fn surfaces_default_to_all_zones() {
        let sink = RecordingSink::new();
        assert!(sink.has_zone_surface(&ZoneId::new("zone-anything")));
    }

    #[test]
    fn explicit_surfaces_restrict_zones() {
        let farm = ZoneId::new("zone-vertical-farm");
        let mut sink = RecordingSink::with_surfaces([farm.clone()]);
        assert!(sink.has_zone_surface(&farm));
        assert!(!sink.has_zone_surface(&ZoneId::new("zone-drone-port")));
        sink.remove_surface(&farm);
        assert!(!sink.has_zone_surface(&farm));
    }

    #[test]
    fn drain_empties_the_recording() {
        let mut sink = RecordingSink::new();
        sink.close_dialogue();
        sink.update_time(1, "00:01");
        assert_eq!(sink.drain().len(), 2);
        assert!(sink.events().is_empty());
    }
}
