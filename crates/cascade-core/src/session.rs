//! Host Session
//!
//! Single writer over the current snapshot. Every command computes a complete
//! new [`SystemState`] from the old one and swaps it in, so a reader holding a
//! clone of the previous snapshot never sees a partial update.

use std::collections::VecDeque;

use rand::Rng;
use tracing::{debug, info, warn};

use cascade_events::{Census, NewsEvent, SystemState, Unit};

use crate::config::EngineConfig;
use crate::systems::{
    apply_pulse, classify_after_shock, index_units, inject_event, optimize_pulse,
    refresh_perceived_morale, step_with_rng, GraphIndex, NewsGenerator,
};
use crate::CascadeError;

/// First line of every log feed
pub const READY_LINE: &str = "[SYS_READY] APEX_KERNEL LOADED.";

/// Owns the live snapshot plus the bounded log and news feeds.
#[derive(Debug, Clone)]
pub struct Session {
    state: SystemState,
    config: EngineConfig,
    generator: NewsGenerator,
    /// Newest first
    logs: VecDeque<String>,
    /// Newest first
    news: VecDeque<NewsEvent>,
    selected: Option<String>,
    steps: u64,
}

impl Session {
    /// Creates a session over `state`.
    pub fn new(state: SystemState, config: EngineConfig) -> Self {
        let generator = NewsGenerator::new(config.intel.clone());
        let mut logs = VecDeque::with_capacity(config.session.log_capacity);
        logs.push_front(READY_LINE.to_string());
        Self {
            state,
            config,
            generator,
            logs,
            news: VecDeque::new(),
            selected: None,
            steps: 0,
        }
    }

    pub fn state(&self) -> &SystemState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Log lines, newest first.
    pub fn logs(&self) -> impl Iterator<Item = &str> {
        self.logs.iter().map(String::as_str)
    }

    /// Recent news, newest first.
    pub fn news(&self) -> impl Iterator<Item = &NewsEvent> {
        self.news.iter()
    }

    /// Number of propagation steps run so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Marks `unit_id` as the host's current selection.
    pub fn select(&mut self, unit_id: &str) -> Result<&Unit, CascadeError> {
        let unit = self
            .state
            .unit(unit_id)
            .ok_or_else(|| CascadeError::UnknownUnit(unit_id.to_string()))?;
        self.selected = Some(unit.id.clone());
        Ok(unit)
    }

    /// The selected unit as it stands in the current snapshot.
    pub fn selected(&self) -> Option<&Unit> {
        self.selected.as_deref().and_then(|id| self.state.unit(id))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Runs one contagion step and adopts the result.
    pub fn propagate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Census {
        let next = step_with_rng(&self.state, rng);
        self.adopt(next);
        self.steps += 1;

        let census = self.state.census();
        info!(
            step = self.steps,
            stable = census.stable,
            stressed = census.stressed,
            collapsed = census.collapsed,
            "propagated"
        );
        self.log("CASCADE_SIGNAL: BROADCASTING CONTAGION VECTOR.".to_string());
        census
    }

    /// Fires the minimal collapsing pulse at `unit_id` and returns its intensity.
    ///
    /// Already collapsed targets are left alone and report 0.
    pub fn pulse(&mut self, unit_id: &str) -> Result<f64, CascadeError> {
        let unit = self
            .state
            .unit(unit_id)
            .ok_or_else(|| CascadeError::UnknownUnit(unit_id.to_string()))?;

        if unit.is_collapsed() {
            debug!(unit = unit_id, "pulse skipped, target already collapsed");
            self.log(format!("APEX_CORE: TARGET {} ALREADY COLLAPSED.", unit_id));
            return Ok(0.0);
        }

        let flux = if self.config.pulse.include_neighbor_flux {
            GraphIndex::build(&self.state.connections)
                .collapsed_flux(unit_id, &index_units(&self.state.units))
        } else {
            0.0
        };
        let pulse = optimize_pulse(unit, flux, &self.config.pulse.params());

        let mut next = self.state.map_unit(unit_id, |u| apply_pulse(u, pulse));
        next.last_pulse_intensity = Some(pulse);
        self.adopt(next);

        info!(unit = unit_id, pulse, flux, "pulse applied");
        self.log(format!(
            "APEX_CORE: TARGETING {}. PULSE_INTENSITY: {:.4}",
            unit_id, pulse
        ));
        Ok(pulse)
    }

    /// Lands `event` on its target and records it in the news feed.
    ///
    /// The target's label is re-derived with [`classify_after_shock`]. Events
    /// aimed at unknown units are still recorded but change nothing.
    pub fn ingest(&mut self, event: NewsEvent) {
        let target = event.impact_node_id.clone();
        if self.state.unit(&target).is_none() {
            warn!(unit = %target, event = %event.id, "news event targets unknown unit");
        }

        let shocked = inject_event(&self.state, &event);
        let next = shocked.map_unit(&target, |u| {
            let mut unit = u.clone();
            unit.state = classify_after_shock(u);
            unit
        });
        self.adopt(next);

        info!(
            source = %event.source,
            unit = %target,
            impact = event.effective_impact(),
            "news ingested"
        );
        self.log(event.feed_line());

        self.news.push_front(event);
        self.news.truncate(self.config.session.news_capacity);
    }

    /// Generates a news event from the configured catalog and ingests it.
    pub fn ingest_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> NewsEvent {
        let event = self.generator.generate(rng);
        self.ingest(event.clone());
        event
    }

    fn adopt(&mut self, next: SystemState) {
        self.state = refresh_perceived_morale(&next, &self.config.deception);
    }

    fn log(&mut self, message: String) {
        let line = if message.starts_with('[') {
            message
        } else {
            format!("[STEP {:04}] {}", self.steps, message)
        };
        self.logs.push_front(line);
        self.logs.truncate(self.config.session.log_capacity);
    }
}
