//! LinLog energy-model force law.
//!
//! Attraction is linear in distance, repulsion falls off with `k / d`.
//! Tends to separate clusters more clearly than Fruchterman–Reingold.

use sprawl_core::geometry::scale;
use sprawl_core::{Separation, Vec2};

use crate::law::{degree_weight, ForceLaw};

/// LinLog law for a fixed ideal edge length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinLog {
    k: f32,
}

impl LinLog {
    /// Create the law for ideal edge length `k`.
    pub fn new(k: f32) -> Self {
        Self { k }
    }
}

impl ForceLaw for LinLog {
    fn name(&self) -> &str {
        "linlog"
    }

    fn ideal_length(&self) -> f32 {
        self.k
    }

    fn attractive(&self, sep: Separation, deg_self: u32, deg_peer: u32) -> Vec2 {
        let (distance, _) = sep.clamped();
        scale(sep.unit(), distance * degree_weight(deg_self, deg_peer))
    }

    fn repulsive(&self, sep: Separation, _deg_self: u32, _deg_peer: u32) -> Vec2 {
        let (distance, _) = sep.clamped();
        scale(sep.unit(), self.k / distance)
    }
}
