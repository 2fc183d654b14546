//! Shared data types for the cascade simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for all other crates in the workspace.

pub mod news;
pub mod system;
pub mod unit;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

// Re-export unit types
pub use unit::{clamp01, ModelOfSelf, Position, Unit, UnitState};

// Re-export snapshot types
pub use system::{
    Census, Edge, SystemState, DEFAULT_COLLAPSE_SHARPNESS, DEFAULT_DECAY_RATE,
    DEFAULT_TRANSMISSION_FACTOR,
};

// Re-export news types
pub use news::{generate_event_id, now_millis, NewsEvent};
