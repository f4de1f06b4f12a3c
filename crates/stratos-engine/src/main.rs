//! Headless engine binary for Stratos.
//!
//! Runs one game session with no browser attached: player inputs arrive as
//! JSON lines on stdin, UI events leave as JSON lines on stdout, and logs go
//! to stderr.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing, stderr)
//! 2. Load configuration (`STRATOS_CONFIG` or `stratos-config.yaml`)
//! 3. Build the game with a JSON-lines sink over stdout
//! 4. Start the session: enter the starting zone, open the opening dialogue
//! 5. Spawn the stdin reader feeding the input channel
//! 6. Run the session loop until game over or quit
//! 7. Log the result
//!
//! Set `STRATOS_LOG_FORMAT=json` for JSON log lines.

mod error;
mod stdin_input;
mod stdout_sink;

use stratos_core::{Game, GameConfig, run_game};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::stdout_sink::JsonLinesSink;

/// Capacity of the input channel between the stdin reader and the loop.
const INPUT_CHANNEL_CAPACITY: usize = 64;

/// Environment variable selecting the log format.
const LOG_FORMAT_ENV_VAR: &str = "STRATOS_LOG_FORMAT";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration, game setup or the session loop fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    init_logging();
    info!("stratos-engine starting");

    // 2. Load configuration.
    let config = GameConfig::load().map_err(EngineError::from)?;
    info!(
        world_name = %config.world.name,
        seed = config.world.seed,
        ticks_per_second = config.world.ticks_per_second,
        zones = config.zones.len(),
        "Configuration loaded"
    );

    // 3. Build the game.
    let surfaces: Vec<_> = config.zones.iter().map(|z| z.id.clone()).collect();
    let sink = JsonLinesSink::new(std::io::stdout(), surfaces);
    let mut game = Game::new(config, sink).map_err(EngineError::from)?;

    // 4. Start the session.
    game.start().map_err(EngineError::from)?;

    // 5. Feed stdin into the input channel.
    let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
    // The reader thread is left running; it ends with the process.
    stdin_input::spawn_stdin_reader(tx)?;

    // 6. Run the session.
    let result = run_game(&mut game, rx).await.map_err(EngineError::from)?;

    // 7. Log results.
    info!(
        end = ?result.end,
        ticks = result.ticks,
        inputs = result.inputs,
        clock = %game.clock().label(),
        events_written = game.sink().written(),
        "stratos-engine shutdown complete"
    );

    Ok(())
}

/// Install the tracing subscriber: `RUST_LOG` filter (default `info`),
/// written to stderr so stdout carries only UI events.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(LOG_FORMAT_ENV_VAR).is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    }
}
