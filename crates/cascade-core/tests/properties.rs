//! Engine property tests
//!
//! Invariants that must hold for every snapshot the engine produces.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use cascade_core::{
    generate_deception, optimize_pulse, step, step_with_rng, DeceptionParams, PulseParams,
};
use cascade_events::{fixtures, Edge, SystemState, Unit, UnitState};

/// Draw that never triggers collapse.
fn never() -> f64 {
    0.999_999_999
}

/// Random network with roughly a quarter of units collapsed.
fn random_network(rng: &mut SmallRng, size: usize) -> SystemState {
    let units = (0..size)
        .map(|i| {
            let unit = Unit::new(format!("U{i}"), rng.gen(), rng.gen());
            if rng.gen_bool(0.25) {
                unit.with_state(UnitState::Collapsed)
            } else {
                unit
            }
        })
        .collect();
    let edges = (0..size * 2)
        .map(|_| {
            Edge::new(
                format!("U{}", rng.gen_range(0..size + 2)),
                format!("U{}", rng.gen_range(0..size)),
            )
        })
        .collect();
    SystemState::new(units, edges)
        .with_transmission_factor(rng.gen())
        .with_decay_rate(rng.gen_range(0.0..0.2))
}

#[test]
fn test_collapse_is_absorbing() {
    let mut rng = SmallRng::seed_from_u64(11);
    for _ in 0..50 {
        let mut state = random_network(&mut rng, 12);
        for _ in 0..10 {
            let next = step_with_rng(&state, &mut rng);
            for (before, after) in state.units.iter().zip(&next.units) {
                if before.is_collapsed() {
                    assert_eq!(before, after, "collapsed unit {} changed", before.id);
                }
            }
            state = next;
        }
    }
}

#[test]
fn test_stress_stays_bounded() {
    let mut rng = SmallRng::seed_from_u64(12);
    for _ in 0..50 {
        let mut state = random_network(&mut rng, 10).with_transmission_factor(1.0);
        for _ in 0..10 {
            state = step_with_rng(&state, &mut rng);
            assert!(state
                .units
                .iter()
                .all(|u| (0.0..=1.0).contains(&u.stress)));
        }
    }
}

#[test]
fn test_decay_only_without_contagion() {
    let state = fixtures::reference_network()
        .with_transmission_factor(0.0)
        .with_decay_rate(0.1);
    let next = step(&state, never);

    for (before, after) in state.units.iter().zip(&next.units) {
        assert!((after.stress - 0.9 * before.stress).abs() < 1e-12);
        assert!(after.stress < before.stress);
    }
}

#[test]
fn test_zero_degree_node() {
    let state = fixtures::isolated_unit(0.6);
    let next = step(&state, never);

    assert!((next.units[0].stress - 0.95 * 0.6).abs() < 1e-12);
}

#[test]
fn test_optimizer_non_negative() {
    let mut rng = SmallRng::seed_from_u64(13);
    let params = PulseParams::default();
    for _ in 0..1000 {
        let unit = Unit::new("X", rng.gen(), rng.gen());
        assert!(optimize_pulse(&unit, rng.gen(), &params) >= 0.0);
    }
}

#[test]
fn test_optimizer_exactness() {
    let unit = Unit::new("NVIDIA-CORP", 0.65, 0.35);
    let pulse = optimize_pulse(&unit, 0.0, &PulseParams::default());
    // (0.65 - 0.35) + 0.01
    assert!((pulse - 0.31).abs() < 1e-9);
}

#[test]
fn test_deception_edges() {
    let params = DeceptionParams::default();
    assert_eq!(generate_deception(0.5, &params), 0.5);
    assert!((generate_deception(1.0, &params) - 1.0).abs() < 1e-12);
}

#[test]
fn test_collapsed_neighbor_scenario() {
    let state = fixtures::collapsed_pair();

    let survived = step(&state, never);
    let b = survived.unit("B").unwrap();
    assert!((b.stress - 0.6).abs() < 1e-12);
    assert_eq!(b.state, UnitState::Stressed);

    // sigmoid(10 * (0.6 - 0.5)) ~ 0.731, so a low draw collapses B
    let collapsed = step(&state, || 0.5);
    let b = collapsed.unit("B").unwrap();
    assert!((b.stress - 0.6).abs() < 1e-12);
    assert_eq!(b.state, UnitState::Collapsed);

    assert_eq!(survived.unit("A"), state.unit("A"));
}

#[test]
fn test_unknown_endpoints_are_inert() {
    let state = SystemState::new(
        vec![Unit::new("A", 0.9, 0.4)],
        vec![Edge::new("A", "GHOST"), Edge::new("PHANTOM", "GHOST")],
    )
    .with_transmission_factor(1.0);
    let next = step(&state, never);

    assert!((next.units[0].stress - 0.95 * 0.4).abs() < 1e-12);
}
