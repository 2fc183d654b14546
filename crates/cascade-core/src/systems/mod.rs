//! Engine systems
//!
//! Pure functions over [`cascade_events::SystemState`] snapshots.

pub mod contagion;
pub mod deception;
pub mod graph;
pub mod intel;
pub mod pulse;

pub use contagion::{
    calculate_contagion, collapse_probability, sigmoid, step, step_with_rng, surviving_state,
    STRESSED_FRACTION,
};
pub use deception::{generate_deception, refresh_perceived_morale, DeceptionParams};
pub use graph::{index_units, GraphIndex, Neighbor};
pub use intel::{
    classify_after_shock, inject_event, simulate_news, IntelParams, NewsGenerator,
    DEFAULT_HEADLINES, DEFAULT_SOURCES, DEFAULT_TARGETS,
};
pub use pulse::{apply_pulse, optimize_pulse, PulseParams};
