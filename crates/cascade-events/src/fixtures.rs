//! Sample networks for testing.
//!
//! This module provides ready-made snapshots for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // cascade-events = { path = "../cascade-events", features = ["test-fixtures"] }
//!
//! use cascade_events::fixtures;
//!
//! let state = fixtures::reference_network();
//! ```

use crate::{Edge, SystemState, Unit, UnitState};

/// Returns the six-unit semiconductor supply network.
///
/// Contains:
/// - 6 units, all `STABLE`, resilience between 0.55 and 0.95
/// - 6 unit-weight edges forming a single connected component
/// - transmission factor 0.15, no decay or sharpness overrides
pub fn reference_network() -> SystemState {
    let json = include_str!("../tests/fixtures/reference_network.json");
    SystemState::from_json(json).expect("Failed to parse reference_network.json")
}

/// Returns the two-unit chain A (phi 0.9) -- B (phi 0.5), both at stress 0.1.
///
/// Transmission 0.5, no decay. `A` is already collapsed so a single step
/// exercises contagion into `B`.
pub fn collapsed_pair() -> SystemState {
    SystemState::new(
        vec![
            Unit::new("A", 0.9, 0.1).with_state(UnitState::Collapsed),
            Unit::new("B", 0.5, 0.1),
        ],
        vec![Edge::new("A", "B")],
    )
    .with_transmission_factor(0.5)
    .with_decay_rate(0.0)
}

/// Returns a single unit with no edges.
pub fn isolated_unit(stress: f64) -> SystemState {
    SystemState::new(vec![Unit::new("SOLO", 0.8, stress)], Vec::new())
}
