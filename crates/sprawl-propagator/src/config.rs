//! Propagator configuration.
//!
//! Keys follow the camelCase names used by run configuration files.
//! Every key is optional; missing keys take the documented default.

use serde::Deserialize;
use sprawl_core::ConfigError;
use sprawl_force::ForceLawKind;

/// Settings consumed by the [`Propagator`](crate::Propagator).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PropagatorConfig {
    /// Force law variant. Default: Fruchterman–Reingold. Unknown names
    /// fall back to the default with a warning.
    pub force_law: ForceLawKind,
    /// Route forwarded messages through the per-vertex queue instead of
    /// sending them immediately. Default: `false`.
    pub use_message_queues: bool,
    /// Fraction of a vertex's edge count drained from its queue per
    /// superstep, in `(0, 1]`. Default: `0.1`.
    pub queue_flush_ratio: f32,
    /// Weight each contribution by the direction cosine/sine of the
    /// peer. Default: `false`.
    pub use_angle_weighting: bool,
}

impl Default for PropagatorConfig {
    fn default() -> Self {
        Self {
            force_law: ForceLawKind::default(),
            use_message_queues: false,
            queue_flush_ratio: 0.1,
            use_angle_weighting: false,
        }
    }
}

impl PropagatorConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = self.queue_flush_ratio;
        if !r.is_finite() || r <= 0.0 || r > 1.0 {
            return Err(ConfigError::InvalidFlushRatio { value: r });
        }
        Ok(())
    }

    /// Maximum number of queued messages a vertex with `edge_count`
    /// edges may send in one superstep: `ceil(ratio * edge_count)`.
    pub fn drain_budget(&self, edge_count: u32) -> usize {
        (self.queue_flush_ratio * edge_count as f32).ceil() as usize
    }
}
