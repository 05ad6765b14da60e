//! Run configuration and validation.

use serde::Deserialize;
use sprawl_core::ConfigError;
use sprawl_propagator::{GlobalScalars, PropagatorConfig};

/// Complete configuration for a layout run.
///
/// Deserialized from camelCase JSON; every key is optional. Call
/// [`validate()`](Self::validate) (or use [`from_json`](Self::from_json),
/// which does) before handing the config to the engine.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Settings forwarded to the propagator.
    pub propagator: PropagatorConfig,
    /// Hop budget of fresh broadcasts. Default: 3.
    pub ttl: i32,
    /// Ideal edge length. Default: 1.0.
    pub k: f32,
    /// Repulsion scale. Default: 1.0.
    pub walshaw_constant: f32,
    /// Superstep limit of one flooding run. Default: 64.
    pub max_supersteps: u64,
    /// Number of layout iterations (flooding run plus displacement).
    /// Default: 10.
    pub iterations: u32,
    /// Number of worker threads. Default: 1.
    pub worker_count: u32,
    /// Seed for initial placement. Default: 0.
    pub seed: u64,
    /// Maximum displacement per vertex in the first iteration.
    /// Default: 1.0.
    pub initial_temperature: f32,
    /// Factor applied to the temperature after each iteration, in
    /// `(0, 1]`. Default: 0.95.
    pub cooling_factor: f32,
    /// Fold degree-one vertices into their neighbor for the duration of
    /// the layout. Default: true.
    pub prune_satellites: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            propagator: PropagatorConfig::default(),
            ttl: 3,
            k: 1.0,
            walshaw_constant: 1.0,
            max_supersteps: 64,
            iterations: 10,
            worker_count: 1,
            seed: 0,
            initial_temperature: 1.0,
            cooling_factor: 0.95,
            prune_satellites: true,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.propagator.validate()?;
        if !self.k.is_finite() || self.k <= 0.0 {
            return Err(ConfigError::InvalidIdealLength { value: self.k });
        }
        if !self.walshaw_constant.is_finite() || self.walshaw_constant < 0.0 {
            return Err(ConfigError::InvalidWalshawConstant {
                value: self.walshaw_constant,
            });
        }
        if self.ttl < 0 {
            return Err(ConfigError::NegativeTtl { value: self.ttl });
        }
        if self.max_supersteps == 0 {
            return Err(ConfigError::ZeroCount {
                name: "maxSupersteps",
            });
        }
        if self.iterations == 0 {
            return Err(ConfigError::ZeroCount { name: "iterations" });
        }
        if self.worker_count == 0 {
            return Err(ConfigError::ZeroCount { name: "workerCount" });
        }
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "initialTemperature",
                reason: format!("must be finite and positive, got {}", self.initial_temperature),
            });
        }
        if !self.cooling_factor.is_finite()
            || self.cooling_factor <= 0.0
            || self.cooling_factor > 1.0
        {
            return Err(ConfigError::OutOfRange {
                name: "coolingFactor",
                reason: format!("must be in (0, 1], got {}", self.cooling_factor),
            });
        }
        Ok(())
    }

    /// Initial values of the run-level scalar slots.
    pub fn scalars(&self) -> GlobalScalars {
        GlobalScalars {
            k: self.k,
            walshaw_constant: self.walshaw_constant,
        }
    }
}
