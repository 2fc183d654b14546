//! Pulse Optimizer
//!
//! Smallest stress injection that pushes a unit past its resilience.

use serde::{Deserialize, Serialize};

use cascade_events::{clamp01, Unit, UnitState};

/// Tuning for pulse calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseParams {
    /// Weight given to ambient neighbor flux (tau)
    pub transmission_factor: f64,
    /// Margin above resilience (epsilon)
    pub epsilon: f64,
}

impl Default for PulseParams {
    fn default() -> Self {
        Self {
            transmission_factor: 0.15,
            epsilon: 0.01,
        }
    }
}

/// Minimal non-negative increment that lifts `unit` over its resilience.
///
/// `max(0, resilience - (stress + tau * neighbor_flux) + epsilon)`
pub fn optimize_pulse(unit: &Unit, neighbor_flux: f64, params: &PulseParams) -> f64 {
    let required = unit.resilience - (unit.stress + params.transmission_factor * neighbor_flux);
    (required + params.epsilon).max(0.0)
}

/// Applies `pulse` to `unit` using the hard threshold rule.
///
/// The result is `COLLAPSED` when the new stress reaches resilience, otherwise
/// `STRESSED`. This is deliberately not the sigmoid rule used by the step
/// engine. Collapsed units come back unchanged.
pub fn apply_pulse(unit: &Unit, pulse: f64) -> Unit {
    if unit.is_collapsed() {
        return unit.clone();
    }
    let stress = clamp01(unit.stress + pulse);
    let state = if stress >= unit.resilience {
        UnitState::Collapsed
    } else {
        UnitState::Stressed
    };
    Unit {
        stress,
        state,
        ..unit.clone()
    }
}
