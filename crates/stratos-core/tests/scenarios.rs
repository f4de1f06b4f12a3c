//! End-to-end session scenarios.
//!
//! Each test builds a [`Game`] from the default configuration with a
//! [`RecordingSink`] and drives it through the public operations, the tick
//! cycle or the async runner, then inspects the recorded UI stream.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use rust_decimal_macros::dec;
use stratos_core::zone::ZoneContext;
use stratos_core::{
    Control, Game, GameConfig, GameError, InputEvent, RecordingSink, SessionEnd, TickOutcome,
    ZoneError, ZoneHookError, ZoneLogic, run_game,
};
use stratos_narrative::DialogueStep;
use stratos_player::inventory;
use stratos_types::{AlertSeverity, GameOverReason, ItemId, PlotId, UiEvent, ZoneId};
use tokio::sync::mpsc;

fn calm_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.economy.weather_change_chance_bp = 0;
    config
}

fn started(sink: RecordingSink) -> Game<RecordingSink> {
    let mut game = Game::new(calm_config(), sink).unwrap();
    game.start().unwrap();
    game
}

/// A zone handler whose hooks always fail, counting how often they ran.
struct Broken {
    calls: Arc<Mutex<u32>>,
}

impl Broken {
    fn fail(&self, ctx: &ZoneContext<'_>) -> Result<(), ZoneHookError> {
        let mut calls = self.calls.lock().unwrap();
        *calls = calls.saturating_add(1);
        Err(ZoneHookError::Failed {
            zone: ctx.zone.clone(),
            reason: String::from("broken on purpose"),
        })
    }
}

impl ZoneLogic for Broken {
    fn on_enter(&mut self, ctx: &mut ZoneContext<'_>) -> Result<(), ZoneHookError> {
        self.fail(ctx)
    }

    fn on_exit(&mut self, ctx: &mut ZoneContext<'_>) -> Result<(), ZoneHookError> {
        self.fail(ctx)
    }

    fn update(&mut self, ctx: &mut ZoneContext<'_>, _delta_seconds: u64) -> Result<(), ZoneHookError> {
        self.fail(ctx)
    }
}

#[test]
fn stats_run_out_after_a_thousand_ticks() {
    let mut game = started(RecordingSink::new());

    let mut ended_at = None;
    for _ in 0..1000 {
        if let TickOutcome::Ran(summary) = game.tick().unwrap()
            && summary.game_over.is_some()
        {
            ended_at = Some(summary.tick);
        }
    }

    assert_eq!(ended_at, Some(1000));
    assert_eq!(game.game_over(), Some(GameOverReason::Exhausted));
    assert!(game.tick().is_err());

    let sink = game.sink();
    assert_eq!(sink.count(|e| matches!(e, UiEvent::GameOver { .. })), 1);
    assert_eq!(
        sink.alerts().filter(|(title, _, _)| *title == "Game Over").collect::<Vec<_>>(),
        vec![("Game Over", "Your journey in Stratos has ended.", AlertSeverity::Error)]
    );
    assert_eq!(game.clock().label(), "01:40");
}

#[test]
fn inputs_after_game_over_change_nothing() {
    let mut game = started(RecordingSink::new());
    game.player_mut().energy = dec!(0.05);
    game.tick().unwrap();
    assert!(game.is_over());

    let before = game.player().clone();
    let events = game.sink().events().len();
    assert_eq!(game.handle_input(InputEvent::Rest), Control::Continue);
    assert!(matches!(game.rest(), Err(GameError::SessionOver)));
    assert_eq!(game.player(), &before);
    assert_eq!(game.sink().events().len(), events);
}

#[test]
fn greeting_walks_to_intro_and_ends() {
    let mut game = started(RecordingSink::new());
    assert_eq!(game.sink().dialogues().count(), 1);

    let step = game.choose_option(1).unwrap();
    assert!(matches!(step, DialogueStep::Continue(ref view) if view.node.as_str() == "system_ai_intro"));

    let step = game.choose_option(0).unwrap();
    assert_eq!(step, DialogueStep::Ended);

    let sink = game.sink();
    assert_eq!(sink.dialogues().count(), 2);
    assert_eq!(sink.count(|e| matches!(e, UiEvent::DialogueClosed)), 1);
    assert!(game.dialogue().active().is_none());
    assert!(game.player().faction_reputation.values().all(|r| *r == 0));
}

#[test]
fn ripe_super_grain_harvests_one_and_a_half() {
    let mut game = started(RecordingSink::new());
    let plot = PlotId::new("p1");
    game.plant_crop(plot.clone(), &ItemId::new("super_grain")).unwrap();
    assert!(game.farm_mut().set_progress(&plot, dec!(100)));

    let harvested = game.harvest_crop(&plot).unwrap();

    assert_eq!(harvested, dec!(1.5));
    assert!(!game.farm().has_crop(&plot));
    assert_eq!(
        inventory::quantity_of(&game.player().inventory, &ItemId::new("super_grain")),
        dec!(1.5)
    );
    assert!(game.sink().has_alert("Item Acquired"));
}

#[test]
fn missing_surface_keeps_the_current_zone() {
    let mut sink = RecordingSink::with_surfaces(calm_config().zones.iter().map(|z| z.id.clone()));
    sink.remove_surface(&ZoneId::new("zone-drone-port"));
    let mut game = started(sink);
    let position = game.player().position;

    game.handle_input(InputEvent::ChangeZone {
        zone: ZoneId::new("zone-drone-port"),
    });

    assert_eq!(game.zones().active(), &ZoneId::new("zone-rooftop-commune"));
    assert_eq!(game.player().current_zone, ZoneId::new("zone-rooftop-commune"));
    assert_eq!(game.player().position, position);
    assert_eq!(
        game.sink().alerts().last(),
        Some(("Zone Error", "Cannot load zone: Drone Port. Element missing.", AlertSeverity::Error))
    );
}

#[test]
fn unregistered_zone_is_entered_without_moving() {
    let mut game = started(RecordingSink::new());
    let position = game.player().position;
    let target = ZoneId::new("zone-hidden-lab");

    let change = game.change_zone(&target).unwrap();

    assert_eq!(change.moved_to, None);
    assert_eq!(game.zones().active(), &target);
    assert_eq!(game.player().position, position);
    assert!(game.sink().events().contains(&UiEvent::ZoneEntered { zone: target }));
    assert_eq!(game.zones().display_name(&ZoneId::new("zone-hidden-lab")), "Hidden Lab");
}

#[test]
fn failing_hooks_never_stop_the_session() {
    let mut game = started(RecordingSink::new());
    let calls = Arc::new(Mutex::new(0));
    let port = ZoneId::new("zone-drone-port");
    game.zones_mut().register(
        port.clone(),
        Box::new(Broken {
            calls: Arc::clone(&calls),
        }),
    );

    let change = game.change_zone(&port).unwrap();
    assert_eq!(change.hook_failures, 1);
    assert_eq!(game.zones().active(), &port);

    let TickOutcome::Ran(summary) = game.tick().unwrap() else {
        return;
    };
    assert!(summary.zone_hook_failed);
    assert_eq!(game.clock().tick(), 1);

    let change = game.change_zone(&ZoneId::new("zone-vertical-farm")).unwrap();
    assert_eq!(change.hook_failures, 1);
    assert_eq!(*calls.lock().unwrap(), 3);
}

#[test]
fn pause_freezes_time_and_stats() {
    let mut game = started(RecordingSink::new());
    game.tick().unwrap();
    game.pause().unwrap();

    for _ in 0..20 {
        assert_eq!(game.tick().unwrap(), TickOutcome::Paused);
    }
    assert_eq!(game.clock().tick(), 1);
    assert_eq!(game.player().energy, dec!(99.9));

    assert!(game.resume().unwrap());
    assert!(!game.resume().unwrap());
    game.tick().unwrap();
    assert_eq!(game.clock().tick(), 2);
    assert_eq!(game.player().energy, dec!(99.8));
}

#[test]
fn surface_errors_are_zone_errors() {
    let sink = RecordingSink::with_surfaces(Vec::new());
    let mut game = Game::new(calm_config(), sink).unwrap();
    let err = game.start().unwrap_err();
    assert!(matches!(err, GameError::Zone(ZoneError::SurfaceMissing { .. })));
    assert!(game.sink().has_alert("Zone Error"));
}

#[tokio::test(start_paused = true)]
async fn runner_applies_inputs_between_ticks() {
    let mut game = started(RecordingSink::new());
    let (tx, rx) = mpsc::channel(8);
    tx.send(InputEvent::ChangeZone {
        zone: ZoneId::new("zone-vertical-farm"),
    })
    .await
    .unwrap();
    tx.send(InputEvent::PlantCrop {
        plot: PlotId::new("plot_0_0"),
        crop: ItemId::new("hydroponic_lettuce"),
    })
    .await
    .unwrap();
    tx.send(InputEvent::Quit).await.unwrap();

    let result = run_game(&mut game, rx).await.unwrap();

    assert_eq!(result.end, SessionEnd::Quit);
    assert_eq!(result.inputs, 3);
    assert_eq!(game.zones().active(), &ZoneId::new("zone-vertical-farm"));
    assert!(game.farm().has_crop(&PlotId::new("plot_0_0")));
    assert!(game.sink().count(|e| matches!(e, UiEvent::PlotsChanged { .. })) >= 2);
}
