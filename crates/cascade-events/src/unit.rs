//! Unit Types
//!
//! Nodes of the dependency network and their derived labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Clamps a value into `[0, 1]` inclusive.
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Health label of a unit.
///
/// `Collapsed` is terminal: once a unit reaches it no engine operation moves
/// it back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitState {
    #[default]
    Stable,
    Stressed,
    Collapsed,
}

impl UnitState {
    /// Returns true for the absorbing state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, UnitState::Collapsed)
    }

    /// Returns all state variants.
    pub fn all() -> &'static [UnitState] {
        &[UnitState::Stable, UnitState::Stressed, UnitState::Collapsed]
    }
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UnitState::Stable => "STABLE",
            UnitState::Stressed => "STRESSED",
            UnitState::Collapsed => "COLLAPSED",
        };
        f.write_str(label)
    }
}

/// Render-space coordinate. Ignored by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position(pub [f64; 3]);

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self([x, y, z])
    }
}

/// What a unit reports about itself, as opposed to its true stress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOfSelf {
    /// Masked morale shown to observers
    pub perceived_morale: f64,
    /// Reserved; no engine operation reads or writes it
    pub is_detected: bool,
}

impl Default for ModelOfSelf {
    fn default() -> Self {
        Self {
            perceived_morale: 1.0,
            is_detected: false,
        }
    }
}

/// A node in the dependency network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Stable unique identifier
    pub id: String,
    /// Render-space position
    #[serde(default)]
    pub position: Position,
    /// Threshold stress must statistically exceed to collapse (phi)
    pub resilience: f64,
    /// Accumulated load (sigma)
    pub stress: f64,
    /// Current health label
    #[serde(default)]
    pub state: UnitState,
    #[serde(default)]
    pub model_of_self: ModelOfSelf,
}

impl Unit {
    /// Creates a stable unit at the origin.
    pub fn new(id: impl Into<String>, resilience: f64, stress: f64) -> Self {
        Self {
            id: id.into(),
            position: Position::default(),
            resilience,
            stress,
            state: UnitState::Stable,
            model_of_self: ModelOfSelf::default(),
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_state(mut self, state: UnitState) -> Self {
        self.state = state;
        self
    }

    pub fn with_perceived_morale(mut self, morale: f64) -> Self {
        self.model_of_self.perceived_morale = morale;
        self
    }

    pub fn is_collapsed(&self) -> bool {
        self.state.is_terminal()
    }
}
