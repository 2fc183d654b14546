//! Cascade simulation engine.
//!
//! Models failure propagation across a small weighted network of units. The
//! engine is a set of pure functions over [`SystemState`] snapshots; a
//! [`Session`] owns the current snapshot for hosts that need a single writer.
//!
//! # Modules
//!
//! - [`systems`]: graph index, contagion step, pulse optimizer, deception mask, intel
//! - [`config`]: TOML-backed tuning
//! - [`session`]: single-writer host with log and news feeds
//! - [`setup`]: the reference supply network

use thiserror::Error;

pub mod config;
pub mod session;
pub mod setup;
pub mod systems;

pub use cascade_events::{Census, Edge, NewsEvent, SystemState, Unit, UnitState};

// Re-export config types
pub use config::{
    default_config_toml, ConfigError, EngineConfig, PropagationConfig, PulseConfig, SessionConfig,
    TomlSerializeError,
};

pub use session::Session;
pub use setup::create_reference_network;

// Re-export the engine entry points
pub use systems::{
    apply_pulse, calculate_contagion, classify_after_shock, generate_deception, inject_event,
    optimize_pulse, simulate_news, step, step_with_rng, DeceptionParams, GraphIndex,
    IntelParams, NewsGenerator, PulseParams,
};

/// Errors surfaced to hosts.
///
/// Engine functions themselves never fail; these come from configuration and
/// from session commands naming units that do not exist.
#[derive(Debug, Error)]
pub enum CascadeError {
    /// Error loading configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// A command named a unit not present in the snapshot
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
}
