//! Intel Generator
//!
//! Samples exogenous news shocks and lands them on their target unit.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use cascade_events::{
    clamp01, generate_event_id, now_millis, NewsEvent, SystemState, Unit, UnitState,
};

use super::contagion::surviving_state;

/// Wire-service labels news is attributed to
pub const DEFAULT_SOURCES: &[&str] = &["REUTERS", "BLOOMBERG", "WSJ", "AP", "AL JAZEERA", "NIKKEI"];

/// Headline pool
pub const DEFAULT_HEADLINES: &[&str] = &[
    "Supply chain bottleneck: Logistics alert issued",
    "Advanced chip demand hits record highs",
    "Cyber-sec breach at assembly node",
    "Trade tensions ignite energy price concerns",
    "Regulatory audit impacts autonomous segments",
    "Logistics strike: International shipping delays",
    "Manufacturing zone hit by weather anomaly",
    "Lithography breakthrough announced",
    "Logistics network signal spikes detected",
];

/// Units a shock may land on
pub const DEFAULT_TARGETS: &[&str] = &[
    "TSMC-FAB-18",
    "ASML-LITHO",
    "NVIDIA-CORP",
    "APPLE-GLOBAL",
    "AWS-CLOUDS",
    "FOXCONN-ASSEMBLY",
];

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Sampling parameters and catalogs for generated news.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntelParams {
    /// Lower bound of the impact range
    pub min_impact: f64,
    /// Width of the impact range; impacts fall in `[min, min + span)`
    pub impact_span: f64,
    pub persistence: f64,
    pub sources: Vec<String>,
    pub headlines: Vec<String>,
    pub targets: Vec<String>,
}

impl Default for IntelParams {
    fn default() -> Self {
        Self {
            min_impact: 0.05,
            impact_span: 0.15,
            persistence: 1.0,
            sources: to_owned_list(DEFAULT_SOURCES),
            headlines: to_owned_list(DEFAULT_HEADLINES),
            targets: to_owned_list(DEFAULT_TARGETS),
        }
    }
}

/// Draws news events from an [`IntelParams`] catalog.
///
/// Catalog lists are expected to be non-empty; see
/// [`crate::config::EngineConfig::validate`]. An empty list yields an empty
/// field rather than a panic.
#[derive(Debug, Clone, Default)]
pub struct NewsGenerator {
    params: IntelParams,
}

impl NewsGenerator {
    pub fn new(params: IntelParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &IntelParams {
        &self.params
    }

    /// Samples one event. Source, headline and target are chosen
    /// independently and uniformly.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> NewsEvent {
        let id = generate_event_id(rng.gen());
        let source = pick(&self.params.sources, rng);
        let headline = pick(&self.params.headlines, rng);
        let impact_node_id = pick(&self.params.targets, rng);
        let stress_impact = self.params.min_impact + rng.gen::<f64>() * self.params.impact_span;

        NewsEvent {
            id,
            timestamp: now_millis(),
            source,
            headline,
            impact_node_id,
            stress_impact,
            persistence: self.params.persistence,
        }
    }
}

fn pick<R: Rng + ?Sized>(items: &[String], rng: &mut R) -> String {
    items.choose(rng).cloned().unwrap_or_default()
}

/// Samples an event from the default catalog using the thread-local RNG.
pub fn simulate_news() -> NewsEvent {
    NewsGenerator::default().generate(&mut rand::thread_rng())
}

/// Adds the event's effective impact to its target's stress.
///
/// The target's label is left as is; see [`classify_after_shock`]. Collapsed
/// and unknown targets leave the snapshot unchanged.
pub fn inject_event(state: &SystemState, event: &NewsEvent) -> SystemState {
    state.map_unit(&event.impact_node_id, |u| {
        if u.is_collapsed() {
            return u.clone();
        }
        Unit {
            stress: clamp01(u.stress + event.effective_impact()),
            ..u.clone()
        }
    })
}

/// Re-derives a unit's label after a shock.
///
/// Strictly above resilience means collapse; otherwise the usual stressed
/// fraction applies. Collapsed units stay collapsed.
pub fn classify_after_shock(unit: &Unit) -> UnitState {
    if unit.is_collapsed() || unit.stress > unit.resilience {
        UnitState::Collapsed
    } else {
        surviving_state(unit.stress, unit.resilience)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn event_for(target: &str, impact: f64) -> NewsEvent {
        NewsEvent {
            id: "intel_test".to_string(),
            timestamp: 0,
            source: "AP".to_string(),
            headline: "Cyber-sec breach at assembly node".to_string(),
            impact_node_id: target.to_string(),
            stress_impact: impact,
            persistence: 1.0,
        }
    }

    fn pair() -> SystemState {
        SystemState::new(
            vec![Unit::new("A", 0.6, 0.3), Unit::new("B", 0.6, 0.3)],
            Vec::new(),
        )
    }

    #[test]
    fn test_generated_fields_come_from_catalog() {
        let generator = NewsGenerator::default();
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..200 {
            let event = generator.generate(&mut rng);
            assert!(DEFAULT_SOURCES.contains(&event.source.as_str()));
            assert!(DEFAULT_HEADLINES.contains(&event.headline.as_str()));
            assert!(DEFAULT_TARGETS.contains(&event.impact_node_id.as_str()));
            assert!(event.stress_impact >= 0.05 && event.stress_impact < 0.20);
            assert_eq!(event.persistence, 1.0);
        }
    }

    #[test]
    fn test_generation_is_seed_deterministic() {
        let generator = NewsGenerator::default();
        let mut rng1 = SmallRng::seed_from_u64(7);
        let mut rng2 = SmallRng::seed_from_u64(7);

        let a = generator.generate(&mut rng1);
        let b = generator.generate(&mut rng2);
        assert_eq!(a.id, b.id);
        assert_eq!(a.impact_node_id, b.impact_node_id);
        assert_eq!(a.stress_impact, b.stress_impact);
    }

    #[test]
    fn test_simulate_news_uses_default_catalog() {
        let event = simulate_news();
        assert!(DEFAULT_TARGETS.contains(&event.impact_node_id.as_str()));
        assert!(event.timestamp > 0);
    }

    #[test]
    fn test_empty_catalog_does_not_panic() {
        let generator = NewsGenerator::new(IntelParams {
            targets: Vec::new(),
            ..IntelParams::default()
        });
        let event = generator.generate(&mut SmallRng::seed_from_u64(1));
        assert!(event.impact_node_id.is_empty());
    }

    #[test]
    fn test_inject_touches_only_target() {
        let state = pair();
        let next = inject_event(&state, &event_for("A", 0.1));

        assert!((next.unit("A").unwrap().stress - 0.4).abs() < 1e-12);
        assert_eq!(next.unit("A").unwrap().state, UnitState::Stable);
        assert_eq!(next.unit("B"), state.unit("B"));
    }

    #[test]
    fn test_inject_scales_by_persistence_and_clamps() {
        let mut event = event_for("A", 0.4);
        event.persistence = 0.5;
        let next = inject_event(&pair(), &event);
        assert!((next.unit("A").unwrap().stress - 0.5).abs() < 1e-12);

        let mut big = event_for("A", 0.9);
        big.persistence = 2.0;
        let next = inject_event(&pair(), &big);
        assert_eq!(next.unit("A").unwrap().stress, 1.0);
    }

    #[test]
    fn test_inject_unknown_or_collapsed_target_is_noop() {
        let state = pair();
        assert_eq!(inject_event(&state, &event_for("GHOST", 0.1)), state);

        let collapsed = state.map_unit("A", |u| u.clone().with_state(UnitState::Collapsed));
        assert_eq!(inject_event(&collapsed, &event_for("A", 0.1)), collapsed);
    }

    #[test]
    fn test_classify_after_shock() {
        assert_eq!(classify_after_shock(&Unit::new("X", 0.6, 0.61)), UnitState::Collapsed);
        assert_eq!(classify_after_shock(&Unit::new("X", 0.6, 0.6)), UnitState::Stressed);
        assert_eq!(classify_after_shock(&Unit::new("X", 0.6, 0.3)), UnitState::Stable);
        let dead = Unit::new("X", 0.6, 0.0).with_state(UnitState::Collapsed);
        assert_eq!(classify_after_shock(&dead), UnitState::Collapsed);
    }
}
