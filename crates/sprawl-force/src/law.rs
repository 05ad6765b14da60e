//! The [`ForceLaw`] trait and the closed [`ForceLawKind`] enumeration.

use std::fmt;

use serde::Deserialize;
use sprawl_core::{Separation, Vec2};

use crate::{Eades, FruchtermanReingold, LinLog};

/// A pairwise force law between a vertex and one peer.
///
/// # Contract
///
/// - Both methods are pure: same inputs, same outputs, no side effects.
/// - Both methods return finite vectors for any finite `sep`, including
///   `sep.distance == 0`.
/// - The returned vectors point **towards** the peer. The propagator adds
///   attraction and subtracts (scaled) repulsion.
/// - `deg_self` and `deg_peer` are effective degrees; a law must not rely
///   on them being non-zero.
///
/// # Object safety
///
/// This trait is object-safe; the propagator holds its law as
/// `Box<dyn ForceLaw>`.
pub trait ForceLaw: Send + Sync + fmt::Debug {
    /// Canonical name, as accepted by [`ForceLawKind::from_name`].
    fn name(&self) -> &str;

    /// Ideal edge length this instance was built with.
    fn ideal_length(&self) -> f32;

    /// Attractive contribution of the peer on this vertex.
    fn attractive(&self, sep: Separation, deg_self: u32, deg_peer: u32) -> Vec2;

    /// Repulsive contribution of the peer on this vertex.
    fn repulsive(&self, sep: Separation, deg_self: u32, deg_peer: u32) -> Vec2;
}

/// Symmetric degree weighting applied to attraction.
///
/// `2 / (deg_a + deg_b)` with both degrees clamped to at least one, so
/// hub vertices are pulled less hard by each individual neighbor and
/// swapping the endpoints leaves the weight unchanged.
pub fn degree_weight(deg_a: u32, deg_b: u32) -> f32 {
    let a = deg_a.max(1) as f32;
    let b = deg_b.max(1) as f32;
    2.0 / (a + b)
}

/// Named force-law variants.
///
/// Deserializes from a law name; unknown names resolve to the default
/// ([`ForceLawKind::FruchtermanReingold`]) with a warning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ForceLawKind {
    /// Fruchterman–Reingold: attraction `d²/k`, repulsion `k²/d`.
    #[default]
    FruchtermanReingold,
    /// Eades spring-electrical: logarithmic springs, inverse-square repulsion.
    Eades,
    /// LinLog energy model: linear attraction, `k/d` repulsion.
    LinLog,
}

impl ForceLawKind {
    /// All variants, in declaration order.
    pub const ALL: [ForceLawKind; 3] = [Self::FruchtermanReingold, Self::Eades, Self::LinLog];

    /// Look up a variant by name.
    ///
    /// Matching ignores ASCII case and surrounding whitespace. Returns
    /// `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fr" | "fruchterman-reingold" | "fruchtermanreingold" => {
                Some(Self::FruchtermanReingold)
            }
            "eades" | "spring" => Some(Self::Eades),
            "linlog" | "lin-log" => Some(Self::LinLog),
            _ => None,
        }
    }

    /// Look up a variant by name, falling back to the default.
    ///
    /// An unresolvable name is a configuration warning, not an error.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            let fallback = Self::default();
            tracing::warn!(
                requested = name,
                fallback = fallback.name(),
                "unknown force law, using default"
            );
            fallback
        })
    }

    /// Canonical name of this variant.
    pub fn name(self) -> &'static str {
        match self {
            Self::FruchtermanReingold => "fruchterman-reingold",
            Self::Eades => "eades",
            Self::LinLog => "linlog",
        }
    }

    /// Build a law instance for ideal edge length `k`.
    pub fn instantiate(self, k: f32) -> Box<dyn ForceLaw> {
        match self {
            Self::FruchtermanReingold => Box::new(FruchtermanReingold::new(k)),
            Self::Eades => Box::new(Eades::new(k)),
            Self::LinLog => Box::new(LinLog::new(k)),
        }
    }
}

impl From<String> for ForceLawKind {
    fn from(name: String) -> Self {
        Self::resolve(&name)
    }
}

impl fmt::Display for ForceLawKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
