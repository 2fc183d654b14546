//! Reference network setup.

use cascade_events::{Edge, Position, SystemState, Unit};

use crate::config::PropagationConfig;

/// (id, position, resilience, stress, perceived morale)
const REFERENCE_UNITS: &[(&str, [f64; 3], f64, f64, f64)] = &[
    ("TSMC-FAB-18", [-2.0, 0.0, 0.0], 0.95, 0.45, 0.98),
    ("ASML-LITHO", [-4.0, 2.0, -1.0], 0.85, 0.20, 0.95),
    ("NVIDIA-CORP", [0.0, 0.0, 0.0], 0.65, 0.35, 0.90),
    ("APPLE-GLOBAL", [2.0, -1.0, 2.0], 0.75, 0.25, 0.96),
    ("AWS-CLOUDS", [3.0, 2.0, -1.0], 0.70, 0.15, 0.98),
    ("FOXCONN-ASSEMBLY", [0.0, -3.0, 1.0], 0.55, 0.50, 0.65),
];

const REFERENCE_EDGES: &[(&str, &str)] = &[
    ("ASML-LITHO", "TSMC-FAB-18"),
    ("TSMC-FAB-18", "NVIDIA-CORP"),
    ("NVIDIA-CORP", "APPLE-GLOBAL"),
    ("NVIDIA-CORP", "AWS-CLOUDS"),
    ("TSMC-FAB-18", "FOXCONN-ASSEMBLY"),
    ("FOXCONN-ASSEMBLY", "APPLE-GLOBAL"),
];

/// Builds the six-unit semiconductor supply network, all units stable.
pub fn create_reference_network(propagation: &PropagationConfig) -> SystemState {
    let units = REFERENCE_UNITS
        .iter()
        .map(|&(id, [x, y, z], resilience, stress, morale)| {
            Unit::new(id, resilience, stress)
                .with_position(Position::new(x, y, z))
                .with_perceived_morale(morale)
        })
        .collect();
    let edges = REFERENCE_EDGES
        .iter()
        .map(|&(a, b)| Edge::new(a, b))
        .collect();

    let mut state = propagation.apply_to(SystemState::new(units, edges));
    state.last_pulse_intensity = Some(0.0);
    state
}
