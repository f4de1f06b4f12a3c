//! Zone dispatch: the active zone, zone handlers and zone changes.
//!
//! Exactly one zone is active at a time. Each zone is bound to a
//! [`ZoneHandler`], chosen per zone from configuration. Handlers implement
//! [`ZoneLogic`], whose hooks all default to no-ops, so a zone without
//! behavior costs nothing.
//!
//! Hook failures are isolated: a failing `on_exit`, `on_enter` or `update`
//! is logged and counted but never aborts the zone change or the tick that
//! triggered it.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use stratos_player::pod_layout;
use stratos_types::{
    EcoState, ItemStack, PlayerState, PlotId, PodSlot, Position, ZoneId, ZoneLogicKind, ZoneRecord,
};
use stratos_world::FarmRegistry;
use tracing::{debug, info, warn};

use crate::sink::UiSink;

/// A zone hook failed. Logged by the dispatcher, never propagated.
#[derive(Debug, thiserror::Error)]
pub enum ZoneHookError {
    /// A UI element the handler renders into is not configured.
    #[error("zone {zone}: {element} not found")]
    MissingElement {
        /// The zone whose hook failed.
        zone: ZoneId,
        /// The element that is missing.
        element: &'static str,
    },

    /// A custom handler reported a failure.
    #[error("zone {zone}: {reason}")]
    Failed {
        /// The zone whose hook failed.
        zone: ZoneId,
        /// Description of the failure.
        reason: String,
    },
}

/// A zone change was refused. State is unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ZoneError {
    /// The UI has no surface to present the target zone.
    #[error("zone {zone} cannot be presented")]
    SurfaceMissing {
        /// The requested zone.
        zone: ZoneId,
        /// Its display name.
        name: String,
    },
}

/// Read-only world state a zone hook may inspect.
#[derive(Debug, Clone, Copy)]
pub struct ZoneWorld<'a> {
    /// Planted crops.
    pub farm: &'a FarmRegistry,
    /// Plots of the vertical farm, in display order.
    pub farm_plots: &'a [PlotId],
    /// Slots of the player's pod.
    pub pod_slots: &'a [PodSlot],
    /// Item catalog.
    pub catalog: &'a [ItemStack],
    /// Current environment.
    pub eco: &'a EcoState,
    /// Current tick.
    pub tick: u64,
}

/// Everything a hook receives.
pub struct ZoneContext<'a> {
    /// The zone whose hook runs.
    pub zone: &'a ZoneId,
    /// The player.
    pub player: &'a PlayerState,
    /// World state.
    pub world: ZoneWorld<'a>,
    /// Presentation sink.
    pub sink: &'a mut dyn UiSink,
}

/// Behavior bound to a zone. Every hook defaults to a no-op.
pub trait ZoneLogic: Send {
    /// Called when the zone becomes active.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneHookError`] if the handler cannot run. The zone change
    /// completes regardless.
    fn on_enter(&mut self, ctx: &mut ZoneContext<'_>) -> Result<(), ZoneHookError> {
        let _ = ctx;
        Ok(())
    }

    /// Called when the zone stops being active.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneHookError`] if the handler cannot run. The zone change
    /// completes regardless.
    fn on_exit(&mut self, ctx: &mut ZoneContext<'_>) -> Result<(), ZoneHookError> {
        let _ = ctx;
        Ok(())
    }

    /// Called once per tick while the zone is active.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneHookError`] if the update fails. The tick continues.
    fn update(&mut self, ctx: &mut ZoneContext<'_>, delta_seconds: u64) -> Result<(), ZoneHookError> {
        let _ = (ctx, delta_seconds);
        Ok(())
    }
}

/// The player's home rooftop: renders the pod on entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct RooftopCommune;

impl ZoneLogic for RooftopCommune {
    fn on_enter(&mut self, ctx: &mut ZoneContext<'_>) -> Result<(), ZoneHookError> {
        if ctx.world.pod_slots.is_empty() {
            return Err(ZoneHookError::MissingElement {
                zone: ctx.zone.clone(),
                element: "pod area",
            });
        }
        let layout = pod_layout(ctx.player, ctx.world.pod_slots, ctx.world.catalog);
        ctx.sink.pod_changed(layout);
        Ok(())
    }
}

/// The vertical farm tower: renders plots on entry and whenever a crop
/// finishes growing.
#[derive(Debug, Clone, Default)]
pub struct VerticalFarm {
    ready: BTreeSet<PlotId>,
}

impl VerticalFarm {
    fn ready_plots(farm: &FarmRegistry) -> BTreeSet<PlotId> {
        farm.planted()
            .filter(|(_, crop)| crop.is_ready())
            .map(|(plot, _)| plot.clone())
            .collect()
    }
}

impl ZoneLogic for VerticalFarm {
    fn on_enter(&mut self, ctx: &mut ZoneContext<'_>) -> Result<(), ZoneHookError> {
        if ctx.world.farm_plots.is_empty() {
            return Err(ZoneHookError::MissingElement {
                zone: ctx.zone.clone(),
                element: "farm tower",
            });
        }
        self.ready = Self::ready_plots(ctx.world.farm);
        ctx.sink.plots_changed(ctx.world.farm.views(ctx.world.farm_plots));
        Ok(())
    }

    fn update(&mut self, ctx: &mut ZoneContext<'_>, _delta_seconds: u64) -> Result<(), ZoneHookError> {
        let ready = Self::ready_plots(ctx.world.farm);
        let newly_ready = ready.difference(&self.ready).count();
        if newly_ready > 0 {
            debug!(zone = %ctx.zone, newly_ready, "crops ready for harvest");
            ctx.sink.plots_changed(ctx.world.farm.views(ctx.world.farm_plots));
        }
        self.ready = ready;
        Ok(())
    }
}

/// Handler bound to one zone.
pub enum ZoneHandler {
    /// No behavior.
    Static,
    /// See [`RooftopCommune`].
    RooftopCommune(RooftopCommune),
    /// See [`VerticalFarm`].
    VerticalFarm(VerticalFarm),
    /// An embedder-supplied handler.
    Custom(Box<dyn ZoneLogic>),
}

impl ZoneHandler {
    /// The built-in handler for a configured logic kind.
    pub fn from_kind(kind: ZoneLogicKind) -> Self {
        match kind {
            ZoneLogicKind::Static => Self::Static,
            ZoneLogicKind::RooftopCommune => Self::RooftopCommune(RooftopCommune),
            ZoneLogicKind::VerticalFarm => Self::VerticalFarm(VerticalFarm::default()),
        }
    }

    fn logic(&mut self) -> Option<&mut dyn ZoneLogic> {
        match self {
            Self::Static => None,
            Self::RooftopCommune(logic) => Some(logic),
            Self::VerticalFarm(logic) => Some(logic),
            Self::Custom(logic) => Some(logic.as_mut()),
        }
    }
}

impl fmt::Debug for ZoneHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => f.write_str("Static"),
            Self::RooftopCommune(_) => f.write_str("RooftopCommune"),
            Self::VerticalFarm(_) => f.write_str("VerticalFarm"),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Hook {
    Enter,
    Exit,
    Update(u64),
}

impl Hook {
    const fn name(self) -> &'static str {
        match self {
            Self::Enter => "on_enter",
            Self::Exit => "on_exit",
            Self::Update(_) => "update",
        }
    }
}

/// Outcome of a successful zone change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneChange {
    /// Zone that was active before.
    pub from: ZoneId,
    /// Zone that is active now.
    pub to: ZoneId,
    /// Where the player was placed, if the zone has an entry point.
    pub moved_to: Option<Position>,
    /// Hooks that failed during the change.
    pub hook_failures: usize,
}

/// Tracks the active zone and dispatches to zone handlers.
#[derive(Debug)]
pub struct ZoneDispatcher {
    records: BTreeMap<ZoneId, ZoneRecord>,
    handlers: BTreeMap<ZoneId, ZoneHandler>,
    active: ZoneId,
}

impl ZoneDispatcher {
    /// Build the dispatcher from the zone table. `active` becomes the active
    /// zone without running any hook; call [`change_zone`] on it to enter.
    ///
    /// [`change_zone`]: ZoneDispatcher::change_zone
    pub fn new(records: &[ZoneRecord], active: ZoneId) -> Self {
        let handlers = records
            .iter()
            .map(|r| (r.id.clone(), ZoneHandler::from_kind(r.logic)))
            .collect();
        Self {
            records: records.iter().map(|r| (r.id.clone(), r.clone())).collect(),
            handlers,
            active,
        }
    }

    /// Bind a custom handler to a zone, replacing any existing one.
    pub fn register(&mut self, zone: ZoneId, logic: Box<dyn ZoneLogic>) {
        self.handlers.insert(zone, ZoneHandler::Custom(logic));
    }

    /// The active zone.
    pub const fn active(&self) -> &ZoneId {
        &self.active
    }

    /// The configured record of a zone.
    pub fn record(&self, zone: &ZoneId) -> Option<&ZoneRecord> {
        self.records.get(zone)
    }

    /// The handler bound to a zone, if any.
    pub fn handler(&self, zone: &ZoneId) -> Option<&ZoneHandler> {
        self.handlers.get(zone)
    }

    /// Name shown to the player for a zone.
    pub fn display_name(&self, zone: &ZoneId) -> String {
        self.records
            .get(zone)
            .and_then(|r| r.display_name.clone())
            .unwrap_or_else(|| derive_display_name(zone))
    }

    /// Make `target` the active zone.
    ///
    /// Runs the old zone's `on_exit` (only when actually leaving it), makes
    /// the target active, runs its `on_enter`, then moves the player to the
    /// target's entry point if it has one.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::SurfaceMissing`] if the sink cannot present the
    /// target. Nothing changes in that case.
    pub fn change_zone(
        &mut self,
        target: &ZoneId,
        player: &mut PlayerState,
        world: ZoneWorld<'_>,
        sink: &mut dyn UiSink,
    ) -> Result<ZoneChange, ZoneError> {
        if !sink.has_zone_surface(target) {
            warn!(zone = %target, "zone has no presentable surface");
            return Err(ZoneError::SurfaceMissing {
                zone: target.clone(),
                name: self.display_name(target),
            });
        }

        let from = self.active.clone();
        let mut hook_failures: usize = 0;

        if from != *target {
            if !self.run_hook(&from, Hook::Exit, player, world, sink) {
                hook_failures = hook_failures.saturating_add(1);
            }
            sink.zone_exited(&from);
        }

        self.active = target.clone();
        player.current_zone = target.clone();

        if !self.run_hook(target, Hook::Enter, player, world, sink) {
            hook_failures = hook_failures.saturating_add(1);
        }
        sink.zone_entered(target);

        let moved_to = self.records.get(target).map(|r| r.entry_point);
        if let Some(position) = moved_to {
            player.position = position;
            sink.player_moved(position);
        }

        info!(from = %from, to = %target, hook_failures, "zone changed");
        Ok(ZoneChange {
            from,
            to: target.clone(),
            moved_to,
            hook_failures,
        })
    }

    /// Run the active zone's `update` hook. Returns `false` if it failed.
    pub fn update(
        &mut self,
        player: &PlayerState,
        world: ZoneWorld<'_>,
        sink: &mut dyn UiSink,
        delta_seconds: u64,
    ) -> bool {
        let active = self.active.clone();
        self.run_hook(&active, Hook::Update(delta_seconds), player, world, sink)
    }

    fn run_hook(
        &mut self,
        zone: &ZoneId,
        hook: Hook,
        player: &PlayerState,
        world: ZoneWorld<'_>,
        sink: &mut dyn UiSink,
    ) -> bool {
        let Some(logic) = self.handlers.get_mut(zone).and_then(ZoneHandler::logic) else {
            return true;
        };
        let mut ctx = ZoneContext {
            zone,
            player,
            world,
            sink,
        };
        let result = match hook {
            Hook::Enter => logic.on_enter(&mut ctx),
            Hook::Exit => logic.on_exit(&mut ctx),
            Hook::Update(delta) => logic.update(&mut ctx, delta),
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                warn!(zone = %zone, hook = hook.name(), error = %e, "zone hook failed");
                false
            }
        }
    }
}

/// Derive a display name from a zone id: `zone-vertical-farm` -> "Vertical Farm".
pub fn derive_display_name(zone: &ZoneId) -> String {
    let raw = zone.as_str();
    let stem = raw.strip_prefix("zone-").unwrap_or(raw);
    stem.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
