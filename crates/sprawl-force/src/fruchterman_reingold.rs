//! Fruchterman–Reingold force law, the default.
//!
//! Attraction grows with `d² / k`, scaled by the symmetric
//! [`degree_weight`]. Repulsion grows with `k² / d` and is not
//! degree-weighted.

use sprawl_core::geometry::scale;
use sprawl_core::{Separation, Vec2};

use crate::law::{degree_weight, ForceLaw};

/// Fruchterman–Reingold law for a fixed ideal edge length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FruchtermanReingold {
    k: f32,
    k_squared: f32,
}

impl FruchtermanReingold {
    /// Create the law for ideal edge length `k`.
    pub fn new(k: f32) -> Self {
        Self {
            k,
            k_squared: k * k,
        }
    }
}

impl ForceLaw for FruchtermanReingold {
    fn name(&self) -> &str {
        "fruchterman-reingold"
    }

    fn ideal_length(&self) -> f32 {
        self.k
    }

    fn attractive(&self, sep: Separation, deg_self: u32, deg_peer: u32) -> Vec2 {
        let (_, square_distance) = sep.clamped();
        let magnitude = square_distance / self.k * degree_weight(deg_self, deg_peer);
        scale(sep.unit(), magnitude)
    }

    fn repulsive(&self, sep: Separation, _deg_self: u32, _deg_peer: u32) -> Vec2 {
        let (distance, _) = sep.clamped();
        scale(sep.unit(), self.k_squared / distance)
    }
}
