//! Game clock, zone dispatch, tick cycle and orchestration for Stratos.
//!
//! This crate ties the player, world and narrative crates into one session:
//! a [`Game`] owns every piece of state, the tick cycle advances it at a
//! fixed rate, and a [`UiSink`] receives everything the player should see.
//!
//! # Modules
//!
//! - [`clock`] -- Game clock with tick counter, simulated minutes, pause and
//!   termination.
//! - [`config`] -- Configuration loading from `stratos-config.yaml` into
//!   strongly-typed structs.
//! - [`error`] -- [`GameError`] and its reporting classes.
//! - [`game`] -- The [`Game`] context and one method per player operation.
//! - [`input`] -- [`InputEvent`], the player input surface.
//! - [`runner`] -- The async session loop ([`run_game`]).
//! - [`sink`] -- The [`UiSink`] trait and [`RecordingSink`].
//! - [`tick`] -- The fixed-order tick cycle.
//! - [`zone`] -- Zone handlers and the [`ZoneDispatcher`].
//!
//! [`run_game`]: runner::run_game
//! [`RecordingSink`]: sink::RecordingSink
//! [`ZoneDispatcher`]: zone::ZoneDispatcher

pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod runner;
pub mod sink;
pub mod tick;
pub mod zone;

pub use clock::{ClockError, GameClock};
pub use config::{ConfigError, GameConfig};
pub use error::{ErrorClass, GameError};
pub use game::{Control, Game};
pub use input::InputEvent;
pub use runner::{RunnerError, SessionEnd, SessionResult, run_game};
pub use sink::{RecordingSink, UiSink};
pub use tick::{TickError, TickOutcome, TickSummary};
pub use zone::{ZoneChange, ZoneDispatcher, ZoneError, ZoneHandler, ZoneHookError, ZoneLogic};
