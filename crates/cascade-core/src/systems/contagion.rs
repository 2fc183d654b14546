//! Contagion Step
//!
//! One synchronous propagation pass: every surviving unit decays, absorbs flux
//! from collapsed neighbors, then takes a single collapse draw.

use rand::Rng;
use tracing::debug;

use cascade_events::{clamp01, SystemState, Unit, UnitState};

use super::graph::{index_units, GraphIndex};

/// Fraction of resilience above which a surviving unit is labelled stressed
pub const STRESSED_FRACTION: f64 = 0.5;

/// Logistic function.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Probability that a unit at `stress` collapses this step.
pub fn collapse_probability(stress: f64, resilience: f64, sharpness: f64) -> f64 {
    sigmoid(sharpness * (stress - resilience))
}

/// Label for a unit that survived its collapse draw.
pub fn surviving_state(stress: f64, resilience: f64) -> UnitState {
    if stress > resilience * STRESSED_FRACTION {
        UnitState::Stressed
    } else {
        UnitState::Stable
    }
}

/// Advances the network by one step.
///
/// `draw` must yield uniform samples in `[0, 1)`. It is called exactly once per
/// non-collapsed unit, in unit order, so a fixed sequence reproduces the output
/// bit for bit. All flux is read from `state`; no unit sees another unit's
/// update from the same step.
pub fn step<F>(state: &SystemState, mut draw: F) -> SystemState
where
    F: FnMut() -> f64,
{
    let tau = state.global_transmission_factor;
    let gamma = state.decay_rate();
    let k = state.collapse_sharpness();

    let graph = GraphIndex::build(&state.connections);
    let previous = index_units(&state.units);

    let units: Vec<Unit> = state
        .units
        .iter()
        .map(|unit| {
            if unit.is_collapsed() {
                return unit.clone();
            }

            let flux = graph.collapsed_flux(&unit.id, &previous);
            let next_stress = clamp01((1.0 - gamma) * unit.stress + tau * flux);
            let probability = collapse_probability(next_stress, unit.resilience, k);

            let next_state = if probability > draw() {
                debug!(
                    unit = %unit.id,
                    stress = next_stress,
                    probability,
                    "unit collapsed"
                );
                UnitState::Collapsed
            } else {
                surviving_state(next_stress, unit.resilience)
            };

            Unit {
                stress: next_stress,
                state: next_state,
                ..unit.clone()
            }
        })
        .collect();

    state.with_units(units)
}

/// Advances one step drawing from `rng`.
pub fn step_with_rng<R: Rng + ?Sized>(state: &SystemState, rng: &mut R) -> SystemState {
    step(state, || rng.gen::<f64>())
}

/// Advances one step using the thread-local RNG.
pub fn calculate_contagion(state: &SystemState) -> SystemState {
    step_with_rng(state, &mut rand::thread_rng())
}
