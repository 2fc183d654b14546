//! Configuration loading for the engine.
//!
//! Every tunable is read from an optional TOML file. Missing tables and keys
//! fall back to the defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use cascade_events::{
    SystemState, DEFAULT_COLLAPSE_SHARPNESS, DEFAULT_DECAY_RATE, DEFAULT_TRANSMISSION_FACTOR,
};

use crate::systems::{DeceptionParams, IntelParams, PulseParams};

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub propagation: PropagationConfig,
    #[serde(default)]
    pub pulse: PulseConfig,
    #[serde(default)]
    pub deception: DeceptionParams,
    #[serde(default)]
    pub intel: IntelParams,
    #[serde(default)]
    pub session: SessionConfig,
}

impl EngineConfig {
    /// Loads and validates configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns this configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, TomlSerializeError> {
        toml::to_string_pretty(self).map_err(TomlSerializeError)
    }

    /// Checks every parameter against its domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.propagation;
        check_unit_interval("propagation.transmission_factor", p.transmission_factor)?;
        check_unit_interval("propagation.decay_rate", p.decay_rate)?;
        check_non_negative("propagation.collapse_sharpness", p.collapse_sharpness)?;

        check_unit_interval("pulse.transmission_factor", self.pulse.transmission_factor)?;
        check_non_negative("pulse.epsilon", self.pulse.epsilon)?;

        // delta = 1 leaves an empty compression range
        let delta = self.deception.disclosure_threshold;
        if !(0.0..1.0).contains(&delta) {
            return Err(invalid("deception.disclosure_threshold", "must be in [0, 1)"));
        }
        let compression = self.deception.compression;
        if !compression.is_finite() || compression <= 0.0 {
            return Err(invalid("deception.compression", "must be positive and finite"));
        }

        let intel = &self.intel;
        check_non_negative("intel.min_impact", intel.min_impact)?;
        check_non_negative("intel.impact_span", intel.impact_span)?;
        check_non_negative("intel.persistence", intel.persistence)?;
        for (key, list) in [
            ("intel.sources", &intel.sources),
            ("intel.headlines", &intel.headlines),
            ("intel.targets", &intel.targets),
        ] {
            if list.is_empty() {
                return Err(invalid(key, "must not be empty"));
            }
        }

        if self.session.log_capacity == 0 {
            return Err(invalid("session.log_capacity", "must be at least 1"));
        }
        if self.session.news_capacity == 0 {
            return Err(invalid("session.news_capacity", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(key: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { key, reason }
}

fn check_unit_interval(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(key, "must be in [0, 1]"))
    }
}

fn check_non_negative(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(key, "must be finite and non-negative"))
    }
}

/// Propagation defaults stamped onto new snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationConfig {
    /// Global transmission factor (tau)
    pub transmission_factor: f64,
    /// Per-step decay (gamma)
    pub decay_rate: f64,
    /// Collapse sigmoid steepness (k)
    pub collapse_sharpness: f64,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            transmission_factor: DEFAULT_TRANSMISSION_FACTOR,
            decay_rate: DEFAULT_DECAY_RATE,
            collapse_sharpness: DEFAULT_COLLAPSE_SHARPNESS,
        }
    }
}

impl PropagationConfig {
    /// Returns `state` carrying these parameters.
    pub fn apply_to(&self, state: SystemState) -> SystemState {
        state
            .with_transmission_factor(self.transmission_factor)
            .with_decay_rate(self.decay_rate)
            .with_collapse_sharpness(self.collapse_sharpness)
    }
}

/// Pulse settings used by the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    pub transmission_factor: f64,
    pub epsilon: f64,
    /// Feed the target's collapsed-neighbor flux into the optimizer instead of 0
    pub include_neighbor_flux: bool,
}

impl Default for PulseConfig {
    fn default() -> Self {
        let params = PulseParams::default();
        Self {
            transmission_factor: params.transmission_factor,
            epsilon: params.epsilon,
            include_neighbor_flux: false,
        }
    }
}

impl PulseConfig {
    pub fn params(&self) -> PulseParams {
        PulseParams {
            transmission_factor: self.transmission_factor,
            epsilon: self.epsilon,
        }
    }
}

/// Feed sizes kept by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum log lines retained
    pub log_capacity: usize,
    /// Maximum news events retained
    pub news_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            log_capacity: 20,
            news_capacity: 5,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
    /// A value outside its domain
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        key: &'static str,
        reason: &'static str,
    },
}

/// Error that can occur during TOML serialization.
#[derive(Debug, Error)]
#[error("TOML serialize error: {0}")]
pub struct TomlSerializeError(#[source] pub toml::ser::Error);

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Cascade Engine Configuration

[propagation]
transmission_factor = 0.15
decay_rate = 0.05
collapse_sharpness = 10.0

[pulse]
transmission_factor = 0.15
epsilon = 0.01
include_neighbor_flux = false

[deception]
disclosure_threshold = 0.7
compression = 8.0

[intel]
min_impact = 0.05
impact_span = 0.15
persistence = 1.0
sources = ["REUTERS", "BLOOMBERG", "WSJ", "AP", "AL JAZEERA", "NIKKEI"]
headlines = [
    "Supply chain bottleneck: Logistics alert issued",
    "Advanced chip demand hits record highs",
    "Cyber-sec breach at assembly node",
    "Trade tensions ignite energy price concerns",
    "Regulatory audit impacts autonomous segments",
    "Logistics strike: International shipping delays",
    "Manufacturing zone hit by weather anomaly",
    "Lithography breakthrough announced",
    "Logistics network signal spikes detected",
]
targets = [
    "TSMC-FAB-18",
    "ASML-LITHO",
    "NVIDIA-CORP",
    "APPLE-GLOBAL",
    "AWS-CLOUDS",
    "FOXCONN-ASSEMBLY",
]

[session]
log_capacity = 20
news_capacity = 5
"#
    .to_string()
}
