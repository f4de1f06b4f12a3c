//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup and the session loop.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: stratos_core::ConfigError,
    },

    /// The session could not be built or started.
    #[error("game error: {source}")]
    Game {
        /// The underlying game error.
        #[from]
        source: stratos_core::GameError,
    },

    /// The session loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: stratos_core::RunnerError,
    },
}
