//! Deception Mask
//!
//! Display-only compression of true stress. Nothing here feeds back into
//! propagation.

use serde::{Deserialize, Serialize};

use cascade_events::{clamp01, SystemState, Unit};

/// Tuning for the masking curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeceptionParams {
    /// Stress up to which values are reported truthfully (delta)
    pub disclosure_threshold: f64,
    /// Curvature of the log compression above the threshold (alpha)
    pub compression: f64,
}

impl Default for DeceptionParams {
    fn default() -> Self {
        Self {
            disclosure_threshold: 0.7,
            compression: 8.0,
        }
    }
}

/// Maps true stress to reported stress.
///
/// Identity up to `delta`; above it the excess is log-compressed so that
/// `sigma = 1` still reports 1.
pub fn generate_deception(sigma: f64, params: &DeceptionParams) -> f64 {
    let delta = params.disclosure_threshold;
    let alpha = params.compression;
    if sigma <= delta {
        return sigma;
    }
    let range = 1.0 - delta;
    let compressed = (1.0 + alpha * (sigma - delta)).ln() / (1.0 + alpha * range).ln();
    clamp01(delta + compressed * range)
}

/// Returns a copy of `state` with every unit's perceived morale recomputed as
/// `1 - generate_deception(stress)`.
pub fn refresh_perceived_morale(state: &SystemState, params: &DeceptionParams) -> SystemState {
    let units = state
        .units
        .iter()
        .map(|u| {
            let mut unit: Unit = u.clone();
            unit.model_of_self.perceived_morale = 1.0 - generate_deception(u.stress, params);
            unit
        })
        .collect();
    state.with_units(units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_below_threshold() {
        let params = DeceptionParams::default();
        assert_eq!(generate_deception(0.5, &params), 0.5);
        assert_eq!(generate_deception(0.7, &params), 0.7);
        assert_eq!(generate_deception(0.0, &params), 0.0);
    }

    #[test]
    fn test_full_stress_reports_one() {
        let reported = generate_deception(1.0, &DeceptionParams::default());
        assert!((reported - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_monotonic_above_threshold() {
        let params = DeceptionParams::default();
        let mut previous = generate_deception(0.7, &params);
        for i in 71..=100 {
            let reported = generate_deception(i as f64 / 100.0, &params);
            assert!(reported >= previous);
            assert!(reported <= 1.0);
            previous = reported;
        }
    }

    #[test]
    fn test_log_curve_overstates_moderate_excess() {
        // Concave compression lifts mid-range values toward the ceiling
        let reported = generate_deception(0.8, &DeceptionParams::default());
        assert!(reported > 0.8);
        assert!(reported < 1.0);
    }

    #[test]
    fn test_refresh_perceived_morale() {
        let state = SystemState::new(
            vec![Unit::new("A", 0.5, 0.2), Unit::new("B", 0.5, 1.0)],
            Vec::new(),
        );
        let masked = refresh_perceived_morale(&state, &DeceptionParams::default());

        assert!((masked.units[0].model_of_self.perceived_morale - 0.8).abs() < 1e-12);
        assert!(masked.units[1].model_of_self.perceived_morale.abs() < 1e-12);
        // Stress and labels are untouched
        assert_eq!(masked.units[0].stress, 0.2);
        assert_eq!(masked.units[1].state, state.units[1].state);
    }
}
