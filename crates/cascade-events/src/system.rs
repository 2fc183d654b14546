//! System Snapshot Types
//!
//! The aggregate network state handed between engine operations. Snapshots are
//! never mutated in place; every operation returns a new one.

use serde::{Deserialize, Serialize};

use crate::unit::{Unit, UnitState};

/// Default transmission factor (tau)
pub const DEFAULT_TRANSMISSION_FACTOR: f64 = 0.15;
/// Default decay rate (gamma)
pub const DEFAULT_DECAY_RATE: f64 = 0.05;
/// Default collapse sharpness (k)
pub const DEFAULT_COLLAPSE_SHARPNESS: f64 = 10.0;

fn default_weight() -> f64 {
    1.0
}

/// Undirected connection between two units.
///
/// Endpoints may name units that do not exist; such edges are inert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl Edge {
    /// Creates an edge with unit weight.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::weighted(source, target, 1.0)
    }

    pub fn weighted(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }
}

/// Complete network snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemState {
    pub units: Vec<Unit>,
    pub connections: Vec<Edge>,
    /// Global transmission factor (tau)
    pub global_transmission_factor: f64,
    /// Per-step stress decay (gamma); falls back to [`DEFAULT_DECAY_RATE`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decay_rate: Option<f64>,
    /// Steepness of the collapse sigmoid (k); falls back to [`DEFAULT_COLLAPSE_SHARPNESS`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapse_sharpness: Option<f64>,
    /// Intensity of the most recent pulse applied by a host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_pulse_intensity: Option<f64>,
}

impl SystemState {
    /// Creates a snapshot with the default transmission factor and no overrides.
    pub fn new(units: Vec<Unit>, connections: Vec<Edge>) -> Self {
        Self {
            units,
            connections,
            global_transmission_factor: DEFAULT_TRANSMISSION_FACTOR,
            decay_rate: None,
            collapse_sharpness: None,
            last_pulse_intensity: None,
        }
    }

    pub fn with_transmission_factor(mut self, tau: f64) -> Self {
        self.global_transmission_factor = tau;
        self
    }

    pub fn with_decay_rate(mut self, gamma: f64) -> Self {
        self.decay_rate = Some(gamma);
        self
    }

    pub fn with_collapse_sharpness(mut self, k: f64) -> Self {
        self.collapse_sharpness = Some(k);
        self
    }

    /// Effective decay rate.
    pub fn decay_rate(&self) -> f64 {
        self.decay_rate.unwrap_or(DEFAULT_DECAY_RATE)
    }

    /// Effective collapse sharpness.
    pub fn collapse_sharpness(&self) -> f64 {
        self.collapse_sharpness.unwrap_or(DEFAULT_COLLAPSE_SHARPNESS)
    }

    /// Looks up a unit by id.
    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Returns a copy of this snapshot with `units` replaced.
    pub fn with_units(&self, units: Vec<Unit>) -> Self {
        Self {
            units,
            ..self.clone()
        }
    }

    /// Returns a copy of this snapshot with the unit `id` rewritten by `f`.
    ///
    /// Unknown ids yield an unchanged copy.
    pub fn map_unit(&self, id: &str, mut f: impl FnMut(&Unit) -> Unit) -> Self {
        let units = self
            .units
            .iter()
            .map(|u| if u.id == id { f(u) } else { u.clone() })
            .collect();
        self.with_units(units)
    }

    /// Counts units per state.
    pub fn census(&self) -> Census {
        self.units.iter().fold(Census::default(), |mut c, u| {
            match u.state {
                UnitState::Stable => c.stable += 1,
                UnitState::Stressed => c.stressed += 1,
                UnitState::Collapsed => c.collapsed += 1,
            }
            c
        })
    }

    /// Parses a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the snapshot as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Unit counts per state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub stable: usize,
    pub stressed: usize,
    pub collapsed: usize,
}

impl Census {
    pub fn total(&self) -> usize {
        self.stable + self.stressed + self.collapsed
    }
}
