//! The game context: every piece of session state, owned in one place.
//!
//! A [`Game`] is built from a [`GameConfig`] and a [`UiSink`]. It exposes
//! one method per player operation plus [`Game::handle_input`], which maps
//! an [`InputEvent`] onto those methods and applies the reporting policy
//! of [`GameError::class`]. The tick cycle lives in [`crate::tick`].

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use stratos_narrative::{DialogueEngine, DialogueGraph, DialogueStep, QuestLog, TurnIn};
use stratos_player::{PodPlacement, StatDelta, clamp_stat, customize_pod, inventory, pod_layout, update_stats};
use stratos_types::{
    AlertSeverity, DialogueId, DialogueView, GameOverReason, ItemId, ItemStack, NodeId, PlayerState,
    PlotId, Position, QuestId, SlotId, ZoneId,
};
use stratos_world::{EcoSystem, FarmRegistry, GatherYield, ResourceField};
use tracing::{error, info, warn};

use crate::clock::GameClock;
use crate::config::GameConfig;
use crate::error::{ErrorClass, GameError};
use crate::input::InputEvent;
use crate::sink::UiSink;
use crate::zone::{ZoneChange, ZoneDispatcher, ZoneWorld};

/// What the caller should do after an input was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep running.
    Continue,
    /// The player asked to end the session.
    Quit,
}

/// The explicitly constructed simulation context.
#[derive(Debug)]
pub struct Game<S: UiSink> {
    pub(crate) config: GameConfig,
    pub(crate) clock: GameClock,
    pub(crate) player: PlayerState,
    pub(crate) eco: EcoSystem,
    pub(crate) farm: FarmRegistry,
    pub(crate) resources: ResourceField,
    pub(crate) dialogue: DialogueEngine,
    pub(crate) quests: QuestLog,
    pub(crate) zones: ZoneDispatcher,
    pub(crate) rng: StdRng,
    pub(crate) sink: S,
    pub(crate) ended: Option<GameOverReason>,
}

/// Borrow the world state zone hooks see, field by field so the caller can
/// still mutate the player and the dispatcher.
pub(crate) fn zone_world<'a>(
    config: &'a GameConfig,
    farm: &'a FarmRegistry,
    eco: &'a EcoSystem,
    tick: u64,
) -> ZoneWorld<'a> {
    ZoneWorld {
        farm,
        farm_plots: &config.economy.farm_plots,
        pod_slots: &config.pod_slots,
        catalog: &config.items,
        eco: eco.state(),
        tick,
    }
}

/// Build the player's starting state from configuration.
///
/// # Errors
///
/// Returns [`GameError::Player`] if a starting inventory record is invalid.
pub fn initial_player(config: &GameConfig) -> Result<PlayerState, GameError> {
    let player = &config.player;
    let mut items = Vec::new();
    for stack in &player.starting_inventory {
        inventory::add_item(&mut items, stack)?;
    }
    let position = config
        .zones
        .iter()
        .find(|z| z.id == player.starting_zone)
        .map_or_else(Position::default, |z| z.entry_point);

    Ok(PlayerState {
        name: player.name.clone(),
        energy: clamp_stat(player.initial_energy),
        food: clamp_stat(player.initial_food),
        reputation: player.initial_reputation,
        faction_reputation: player.factions.iter().map(|f| (f.clone(), 0)).collect(),
        inventory: items,
        position,
        current_zone: player.starting_zone.clone(),
        pod: BTreeMap::new(),
    })
}

impl<S: UiSink> Game<S> {
    /// Build a session from configuration.
    ///
    /// Nothing is shown until [`Game::start`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if the configuration fails validation or
    /// describes an invalid starting state.
    pub fn new(config: GameConfig, sink: S) -> Result<Self, GameError> {
        config.validate()?;
        let clock = GameClock::new(&config.world)?;
        let player = initial_player(&config)?;
        let graph = DialogueGraph::from_nodes(config.dialogue.iter().cloned())?;
        let economy = &config.economy;

        Ok(Self {
            clock,
            player,
            eco: EcoSystem::new(&economy.eco_settings()),
            farm: FarmRegistry::new(economy.crops.clone(), economy.harvest_rules()),
            resources: ResourceField::new(config.resources.iter().cloned()),
            dialogue: DialogueEngine::new(graph),
            quests: QuestLog::new(config.quests.iter().cloned()),
            zones: ZoneDispatcher::new(&config.zones, config.player.starting_zone.clone()),
            rng: StdRng::seed_from_u64(config.world.seed),
            sink,
            ended: None,
            config,
        })
    }

    /// Enter the starting zone, draw the HUD and clock, and open the
    /// opening dialogue.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if the starting zone cannot be presented or the
    /// opening dialogue does not exist. The error is also reported.
    pub fn start(&mut self) -> Result<(), GameError> {
        info!(
            world = %self.config.world.name,
            player = %self.player.name,
            zone = %self.player.current_zone,
            "session starting"
        );
        let starting = self.config.player.starting_zone.clone();
        self.change_zone(&starting).inspect_err(|e| self.report(e))?;
        self.sink.update_time(self.clock.minutes(), &self.clock.label());

        if let Some(opening) = self.config.world.opening_dialogue.clone() {
            self.start_dialogue(&opening).inspect_err(|e| self.report(e))?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The configuration the session was built from.
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The player.
    pub const fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Mutable access to the player, for embedders and scenario setup.
    pub const fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    /// The game clock.
    pub const fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// The environment.
    pub const fn eco(&self) -> &EcoSystem {
        &self.eco
    }

    /// Mutable access to the environment.
    pub const fn eco_mut(&mut self) -> &mut EcoSystem {
        &mut self.eco
    }

    /// Planted crops.
    pub const fn farm(&self) -> &FarmRegistry {
        &self.farm
    }

    /// Mutable access to planted crops.
    pub const fn farm_mut(&mut self) -> &mut FarmRegistry {
        &mut self.farm
    }

    /// Resource nodes.
    pub const fn resources(&self) -> &ResourceField {
        &self.resources
    }

    /// The dialogue state machine.
    pub const fn dialogue(&self) -> &DialogueEngine {
        &self.dialogue
    }

    /// The quest log.
    pub const fn quests(&self) -> &QuestLog {
        &self.quests
    }

    /// The zone dispatcher.
    pub const fn zones(&self) -> &ZoneDispatcher {
        &self.zones
    }

    /// Mutable access to the zone dispatcher, e.g. to register handlers.
    pub const fn zones_mut(&mut self) -> &mut ZoneDispatcher {
        &mut self.zones
    }

    /// The UI sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the UI sink.
    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the game and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Why the session ended, if it has.
    pub const fn game_over(&self) -> Option<GameOverReason> {
        self.ended
    }

    /// Whether the session ended.
    pub const fn is_over(&self) -> bool {
        self.ended.is_some()
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Apply one player input, reporting any failure.
    pub fn handle_input(&mut self, input: InputEvent) -> Control {
        let action = input.name();
        let result = match input {
            InputEvent::Quit => {
                info!("quit requested");
                return Control::Quit;
            }
            InputEvent::ChangeZone { zone } => self.change_zone(&zone).map(drop),
            InputEvent::StartDialogue { dialogue } => self.start_dialogue(&dialogue).map(drop),
            InputEvent::ChooseOption { index } => self.choose_option(index).map(drop),
            InputEvent::PlantCrop { plot, crop } => self.plant_crop(plot, &crop),
            InputEvent::HarvestCrop { plot } => self.harvest_crop(&plot).map(drop),
            InputEvent::CustomizePod { slot, item } => self.customize_pod(&slot, &item).map(drop),
            InputEvent::Gather { node } => self.gather(&node).map(drop),
            InputEvent::Rest => self.rest(),
            InputEvent::StartQuest { quest } => self.start_quest(&quest),
            InputEvent::TurnInQuest { quest } => self.turn_in_quest(&quest).map(drop),
            InputEvent::Pause => self.pause().map(drop),
            InputEvent::Resume => self.resume().map(drop),
        };
        if let Err(e) = result {
            warn!(action, error = %e, "input rejected");
            self.report(&e);
        }
        Control::Continue
    }

    /// Report an error according to its class.
    pub fn report(&mut self, err: &GameError) {
        match err.class() {
            ErrorClass::NotFound | ErrorClass::Refused => {
                if let Some(alert) = err.alert() {
                    self.sink.show_alert(alert.title, &alert.text, alert.severity);
                }
            }
            ErrorClass::InvalidInput => {}
            ErrorClass::Internal => error!(error = %err, "internal game error"),
        }
    }

    const fn ensure_running(&self) -> Result<(), GameError> {
        if self.ended.is_some() {
            Err(GameError::SessionOver)
        } else {
            Ok(())
        }
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Travel to another zone.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Zone`] if the zone cannot be presented.
    pub fn change_zone(&mut self, zone: &ZoneId) -> Result<ZoneChange, GameError> {
        self.ensure_running()?;
        let world = zone_world(&self.config, &self.farm, &self.eco, self.clock.tick());
        let change = self
            .zones
            .change_zone(zone, &mut self.player, world, &mut self.sink)?;
        self.sink.update_hud(&self.player);
        Ok(change)
    }

    /// Open a dialogue at a node.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Narrative`] if the node does not exist.
    pub fn start_dialogue(&mut self, id: &DialogueId) -> Result<DialogueView, GameError> {
        self.ensure_running()?;
        let view = self.dialogue.start(id)?;
        self.sink.show_dialogue(&view);
        Ok(view)
    }

    /// Choose an option of the open dialogue.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Narrative`] if no dialogue is open or the index
    /// is out of range.
    pub fn choose_option(&mut self, index: usize) -> Result<DialogueStep, GameError> {
        self.ensure_running()?;
        let step = self.dialogue.choose(index, &mut self.player)?;
        match &step {
            DialogueStep::Continue(view) => self.sink.show_dialogue(view),
            DialogueStep::Ended => self.sink.close_dialogue(),
        }
        self.sink.update_hud(&self.player);
        Ok(step)
    }

    /// Plant a crop in an empty plot.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::World`] if the crop kind is unknown or the plot
    /// is already planted.
    pub fn plant_crop(&mut self, plot: PlotId, crop: &ItemId) -> Result<(), GameError> {
        self.ensure_running()?;
        self.farm.plant(plot, crop, self.clock.tick())?;
        self.sink
            .plots_changed(self.farm.views(&self.config.economy.farm_plots));
        Ok(())
    }

    /// Harvest a plot. Returns the units added to the inventory, which is
    /// zero when the plot is empty or not ready.
    ///
    /// The plot is cleared only after the produce is stored, so a failed
    /// store leaves the crop in the ground.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if the yield cannot be computed or stored.
    pub fn harvest_crop(&mut self, plot: &PlotId) -> Result<Decimal, GameError> {
        self.ensure_running()?;
        let Some(stack) = self.farm.produce(plot)? else {
            return Ok(Decimal::ZERO);
        };
        inventory::add_item(&mut self.player.inventory, &stack)?;
        self.farm.harvest(plot)?;
        self.item_acquired(&stack);
        self.sink
            .plots_changed(self.farm.views(&self.config.economy.farm_plots));
        self.sink.update_hud(&self.player);
        Ok(stack.quantity)
    }

    /// Place an inventory item in a pod slot.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Player`] if the slot or the item does not exist
    /// or the item cannot be placed.
    pub fn customize_pod(&mut self, slot: &SlotId, item: &ItemId) -> Result<PodPlacement, GameError> {
        self.ensure_running()?;
        let placement = customize_pod(
            &mut self.player,
            &self.config.pod_slots,
            &self.config.items,
            slot,
            item,
        )?;
        info!(slot = %slot, item = %item, "pod customized");
        self.sink.show_alert(
            "Pod Customized",
            &format!("{} placed in {}.", placement.placed.name, placement.slot.tooltip),
            AlertSeverity::Success,
        );
        self.sink.pod_changed(pod_layout(
            &self.player,
            &self.config.pod_slots,
            &self.config.items,
        ));
        self.sink.update_hud(&self.player);
        Ok(placement)
    }

    /// Gather from a resource node: energy plus an item, then a cooldown.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::World`] if the node does not exist or is
    /// recharging.
    pub fn gather(&mut self, node: &NodeId) -> Result<GatherYield, GameError> {
        self.ensure_running()?;
        let gathered = self.resources.gather(node, self.clock.tick())?;
        if let Err(e) = inventory::add_item(&mut self.player.inventory, &gathered.item) {
            self.resources.cancel_cooldown(node);
            return Err(e.into());
        }
        update_stats(&mut self.player, &StatDelta::energy(gathered.energy));
        info!(node = %node, ready_at = gathered.ready_at, "resource gathered");
        self.item_acquired(&gathered.item);
        self.sink.update_hud(&self.player);
        Ok(gathered)
    }

    /// Rest in the pod to restore energy.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionOver`] after the session ended.
    pub fn rest(&mut self) -> Result<(), GameError> {
        self.ensure_running()?;
        let amount = self.config.player.rest_energy;
        update_stats(&mut self.player, &StatDelta::energy(amount));
        self.sink.show_alert(
            "Rest",
            &format!("Energy restored by {amount} units."),
            AlertSeverity::Success,
        );
        self.sink.update_hud(&self.player);
        Ok(())
    }

    /// Accept a quest.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Narrative`] if the quest does not exist or was
    /// already started or completed.
    pub fn start_quest(&mut self, quest: &QuestId) -> Result<(), GameError> {
        self.ensure_running()?;
        let description = self.quests.start(quest)?.description.clone();
        self.sink
            .show_alert("Quest Started", &description, AlertSeverity::Info);
        Ok(())
    }

    /// Hand in a quest.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Narrative`] if the quest does not exist, was not
    /// started, or was already completed.
    pub fn turn_in_quest(&mut self, quest: &QuestId) -> Result<TurnIn, GameError> {
        self.ensure_running()?;
        let outcome = self.quests.turn_in(quest, &mut self.player)?;
        match &outcome {
            TurnIn::Completed(reward) => {
                self.sink.show_alert(
                    "Quest Complete",
                    &format!("Reward: +{} energy.", reward.energy),
                    AlertSeverity::Success,
                );
                self.sink.update_hud(&self.player);
            }
            TurnIn::InProgress(progress) => {
                self.sink.show_alert(
                    "Quest",
                    &format!("Collected {} of {}.", progress.held, progress.target),
                    AlertSeverity::Info,
                );
            }
        }
        Ok(outcome)
    }

    /// Pause the clock. Returns `false` if it was not running.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionOver`] after the session ended.
    pub fn pause(&mut self) -> Result<bool, GameError> {
        self.ensure_running()?;
        let paused = self.clock.pause();
        if paused {
            info!(tick = self.clock.tick(), "game paused");
        }
        Ok(paused)
    }

    /// Resume a paused clock. Returns `false` if it was not paused.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::SessionOver`] after the session ended.
    pub fn resume(&mut self) -> Result<bool, GameError> {
        self.ensure_running()?;
        let resumed = self.clock.resume();
        if resumed {
            info!(tick = self.clock.tick(), "game resumed");
        }
        Ok(resumed)
    }

    fn item_acquired(&mut self, stack: &ItemStack) {
        self.sink.show_alert(
            "Item Acquired",
            &format!("You got {}x {}!", stack.quantity, stack.name),
            AlertSeverity::Success,
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;
    use stratos_player::PlayerError;
    use stratos_types::{FactionId, ItemKind, UiEvent};

    use super::*;
    use crate::sink::RecordingSink;

    fn game() -> Game<RecordingSink> {
        Game::new(GameConfig::default(), RecordingSink::new()).unwrap()
    }

    #[test]
    fn initial_player_matches_config() {
        let g = game();
        let p = g.player();
        assert_eq!(p.name, "Nova");
        assert_eq!(p.energy, dec!(100));
        assert_eq!(p.position, Position::new(80, 80, 0));
        assert_eq!(p.faction_reputation.get(&FactionId::new("Null")), Some(&0));
        assert_eq!(inventory::quantity_of(&p.inventory, &ItemId::new("hydro_plant_small")), dec!(2));
    }

    #[test]
    fn initial_stats_are_clamped() {
        let mut config = GameConfig::default();
        config.player.initial_energy = dec!(250);
        config.player.initial_food = dec!(-5);
        let g = Game::new(config, RecordingSink::new()).unwrap();
        assert_eq!(g.player().energy, dec!(100));
        assert_eq!(g.player().food, dec!(0));
    }

    #[test]
    fn start_enters_zone_and_opens_dialogue() {
        let mut g = game();
        g.start().unwrap();
        let sink = g.sink();
        assert!(sink.events().contains(&UiEvent::ZoneEntered {
            zone: ZoneId::new("zone-rooftop-commune")
        }));
        assert_eq!(
            sink.dialogues().next().map(|v| v.speaker.as_str()),
            Some("Central AI")
        );
        assert!(g.dialogue().active().is_some());
    }

    #[test]
    fn unknown_dialogue_alerts_and_changes_nothing() {
        let mut g = game();
        let control = g.handle_input(InputEvent::StartDialogue {
            dialogue: DialogueId::new("missing"),
        });
        assert_eq!(control, Control::Continue);
        assert!(g.sink().has_alert("Dialogue Error"));
        assert!(g.dialogue().active().is_none());
    }

    #[test]
    fn invalid_choice_is_not_shown() {
        let mut g = game();
        g.handle_input(InputEvent::ChooseOption { index: 0 });
        assert!(g.sink().alerts().next().is_none());
    }

    #[test]
    fn rest_restores_twenty_energy() {
        let mut g = game();
        g.player_mut().energy = dec!(50);
        g.handle_input(InputEvent::Rest);
        assert_eq!(g.player().energy, dec!(70));
        let alert = g.sink().alerts().last();
        assert_eq!(
            alert,
            Some(("Rest", "Energy restored by 20 units.", AlertSeverity::Success))
        );
    }

    #[test]
    fn customize_pod_places_and_alerts() {
        let mut g = game();
        let placement = g
            .customize_pod(&SlotId::new("slot_corner_1"), &ItemId::new("eco_lamp"))
            .unwrap();
        assert_eq!(placement.returned, None);
        assert!(g.sink().alerts().any(|(title, text, _)| {
            title == "Pod Customized" && text == "Eco Lamp placed in Corner Slot."
        }));
        assert!(!inventory::has_item(&g.player().inventory, &ItemId::new("eco_lamp"), dec!(1)));
        assert_eq!(g.sink().count(|e| matches!(e, UiEvent::PodChanged { .. })), 1);
    }

    #[test]
    fn customize_missing_item_warns() {
        let mut g = game();
        g.handle_input(InputEvent::CustomizePod {
            slot: SlotId::new("slot_corner_1"),
            item: ItemId::new("basic_bed"),
        });
        assert_eq!(
            g.sink().alerts().last(),
            Some(("Cannot Customize", "Item not found in inventory.", AlertSeverity::Warning))
        );
        assert!(g.player().pod.is_empty());
    }

    #[test]
    fn gather_grants_energy_item_and_cooldown() {
        let mut g = game();
        g.player_mut().energy = dec!(50);
        let node = NodeId::new("resource-node-1");
        let gathered = g.gather(&node).unwrap();
        assert_eq!(gathered.ready_at, 50);
        assert_eq!(g.player().energy, dec!(75));
        assert_eq!(inventory::quantity_of(&g.player().inventory, &ItemId::new("crystal")), dec!(1));
        assert!(g.sink().alerts().any(|(title, text, _)| {
            title == "Item Acquired" && text == "You got 1x Energy Crystal!"
        }));

        g.handle_input(InputEvent::Gather { node });
        assert!(g.sink().has_alert("Resource Node"));
        assert_eq!(g.player().energy, dec!(75));
    }

    #[test]
    fn plant_on_occupied_plot_is_refused() {
        let mut g = game();
        let plot = PlotId::new("plot_1_1");
        g.plant_crop(plot.clone(), &ItemId::new("hydroponic_lettuce")).unwrap();
        g.handle_input(InputEvent::PlantCrop {
            plot,
            crop: ItemId::new("super_grain"),
        });
        assert!(g.sink().has_alert("Farm Plot"));
        assert_eq!(g.farm().active_count(), 1);
    }

    #[test]
    fn harvest_unready_plot_yields_nothing() {
        let mut g = game();
        let plot = PlotId::new("plot_0_0");
        g.plant_crop(plot.clone(), &ItemId::new("super_grain")).unwrap();
        let before = g.player().clone();
        assert_eq!(g.harvest_crop(&plot).unwrap(), dec!(0));
        assert_eq!(g.harvest_crop(&PlotId::new("plot_2_2")).unwrap(), dec!(0));
        assert_eq!(g.player(), &before);
        assert!(g.farm().has_crop(&plot));
    }

    #[test]
    fn failed_store_keeps_the_crop() {
        let mut g = game();
        let plot = PlotId::new("plot_0_0");
        let grain = ItemId::new("super_grain");
        g.plant_crop(plot.clone(), &grain).unwrap();
        assert!(g.farm_mut().set_progress(&plot, dec!(100)));
        g.player_mut().inventory.push(ItemStack::new(
            grain.clone(),
            "super grain",
            Decimal::MAX,
            ItemKind::Crop,
        ));

        let err = g.harvest_crop(&plot).unwrap_err();

        assert!(matches!(err, GameError::Player(PlayerError::ArithmeticOverflow { .. })));
        assert!(g.farm().has_crop(&plot));
        assert_eq!(g.farm().get(&plot).unwrap().progress, dec!(100));
        assert_eq!(inventory::quantity_of(&g.player().inventory, &grain), Decimal::MAX);

        g.player_mut().inventory.retain(|s| s.id != grain);
        assert_eq!(g.harvest_crop(&plot).unwrap(), dec!(1.5));
        assert!(!g.farm().has_crop(&plot));
    }

    #[test]
    fn failed_store_leaves_the_node_ready() {
        let mut g = game();
        g.player_mut().energy = dec!(50);
        let node = NodeId::new("resource-node-1");
        let crystal = ItemId::new("crystal");
        g.player_mut().inventory.push(ItemStack::new(
            crystal.clone(),
            "Energy Crystal",
            Decimal::MAX,
            ItemKind::Resource,
        ));

        assert!(g.gather(&node).is_err());

        assert_eq!(g.player().energy, dec!(50));
        assert!(g.resources().is_available(&node, 0));
        assert_eq!(inventory::quantity_of(&g.player().inventory, &crystal), Decimal::MAX);
    }

    #[test]
    fn quest_flow_through_inputs() {
        let mut g = game();
        let quest = QuestId::new("collect_crystals");
        g.handle_input(InputEvent::StartQuest { quest: quest.clone() });
        assert!(g.sink().has_alert("Quest Started"));

        let crystal = ItemStack::new(ItemId::new("crystal"), "Energy Crystal", dec!(3), ItemKind::Resource);
        inventory::add_item(&mut g.player_mut().inventory, &crystal).unwrap();
        g.player_mut().energy = dec!(10);

        g.handle_input(InputEvent::TurnInQuest { quest: quest.clone() });
        assert!(g.sink().has_alert("Quest Complete"));
        assert_eq!(g.player().energy, dec!(60));

        g.handle_input(InputEvent::TurnInQuest { quest });
        assert_eq!(g.player().energy, dec!(60));
        assert_eq!(
            g.sink().alerts().last().map(|(_, _, severity)| severity),
            Some(AlertSeverity::Warning)
        );
    }

    #[test]
    fn quit_returns_quit() {
        let mut g = game();
        assert_eq!(g.handle_input(InputEvent::Quit), Control::Quit);
    }

    #[test]
    fn pause_and_resume_through_inputs() {
        let mut g = game();
        g.handle_input(InputEvent::Pause);
        assert!(g.clock().is_paused());
        g.handle_input(InputEvent::Resume);
        assert!(g.clock().is_running());
    }
}
