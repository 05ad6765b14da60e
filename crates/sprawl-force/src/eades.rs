//! Eades spring-electrical force law.
//!
//! Springs pull with `2 ln(d / k)`, which turns into a push once the
//! endpoints are closer than `k`. Repulsion falls off with `k² / d²`.

use sprawl_core::geometry::scale;
use sprawl_core::{Separation, Vec2};

use crate::law::{degree_weight, ForceLaw};

/// Eades law for a fixed ideal edge length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Eades {
    k: f32,
}

impl Eades {
    /// Spring stiffness constant.
    const STIFFNESS: f32 = 2.0;

    /// Create the law for ideal edge length `k`.
    pub fn new(k: f32) -> Self {
        Self { k }
    }
}

impl ForceLaw for Eades {
    fn name(&self) -> &str {
        "eades"
    }

    fn ideal_length(&self) -> f32 {
        self.k
    }

    fn attractive(&self, sep: Separation, deg_self: u32, deg_peer: u32) -> Vec2 {
        let (distance, _) = sep.clamped();
        let magnitude =
            Self::STIFFNESS * (distance / self.k).ln() * degree_weight(deg_self, deg_peer);
        scale(sep.unit(), magnitude)
    }

    fn repulsive(&self, sep: Separation, _deg_self: u32, _deg_peer: u32) -> Vec2 {
        let (_, square_distance) = sep.clamped();
        scale(sep.unit(), self.k * self.k / square_distance)
    }
}
