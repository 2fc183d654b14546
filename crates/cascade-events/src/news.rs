//! News Event Types
//!
//! Exogenous shocks produced by the intel generator. A news event is consumed
//! once by whoever applies it and carries no lifecycle of its own.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::{Builder, Uuid};

/// An externally sourced stress shock aimed at one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsEvent {
    pub id: String,
    /// Unix time in milliseconds
    pub timestamp: u64,
    pub source: String,
    pub headline: String,
    /// Id of the unit the shock lands on
    pub impact_node_id: String,
    pub stress_impact: f64,
    pub persistence: f64,
}

impl NewsEvent {
    /// Stress actually delivered to the target.
    pub fn effective_impact(&self) -> f64 {
        self.stress_impact * self.persistence
    }

    /// Feed line in the `[INTEL] SOURCE: HEADLINE` format.
    pub fn feed_line(&self) -> String {
        format!("[INTEL] {}: {}", self.source, self.headline.to_uppercase())
    }
}

/// Builds an event id from 16 random bytes.
///
/// Taking the bytes from the caller keeps ids reproducible under a seeded RNG.
pub fn generate_event_id(random_bytes: [u8; 16]) -> String {
    let uuid: Uuid = Builder::from_random_bytes(random_bytes).into_uuid();
    format!("intel_{}", uuid.simple())
}

/// Current wall-clock time in unix milliseconds.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
