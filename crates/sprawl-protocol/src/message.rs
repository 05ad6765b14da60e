//! The [`LayoutMessage`] type and its propagation rules.

use sprawl_core::{Vec2, VertexId};

/// Position announcement flooded between vertices.
///
/// Immutable once built: a hop never edits a message, it produces a
/// successor. Along any propagation chain `ttl` decreases by exactly one
/// per hop and origin, position and degree are carried verbatim.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutMessage {
    origin: VertexId,
    position: Vec2,
    degree: u32,
    ttl: i32,
    zombie: bool,
}

impl LayoutMessage {
    /// A fresh broadcast from `origin` with a hop budget of `ttl`.
    pub fn fresh(origin: VertexId, position: Vec2, degree: u32, ttl: i32) -> Self {
        Self {
            origin,
            position,
            degree,
            ttl,
            zombie: false,
        }
    }

    /// Reassemble a message from decoded parts.
    pub(crate) fn from_parts(
        origin: VertexId,
        position: Vec2,
        degree: u32,
        ttl: i32,
        zombie: bool,
    ) -> Self {
        Self {
            origin,
            position,
            degree,
            ttl,
            zombie,
        }
    }

    /// The vertex whose position this message carries.
    pub fn origin(&self) -> VertexId {
        self.origin
    }

    /// Position of the origin when the message was created.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Effective degree of the origin.
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// Remaining hop budget.
    pub fn ttl(&self) -> i32 {
        self.ttl
    }

    /// Whether the message was explicitly marked terminal.
    pub fn is_marked_zombie(&self) -> bool {
        self.zombie
    }

    /// Whether the message must not be re-propagated.
    ///
    /// True when explicitly marked, or when the hop budget is exhausted
    /// (`ttl <= 0`, which also covers an invalid negative ttl).
    pub fn is_zombie(&self) -> bool {
        self.zombie || self.ttl <= 0
    }

    /// The successor handed to neighbors on the next hop.
    ///
    /// Copies origin, position and degree and decrements `ttl`. Returns
    /// `None` for a zombie: a spent message never travels further.
    pub fn propagate(&self) -> Option<Self> {
        if self.is_zombie() {
            return None;
        }
        Some(Self {
            ttl: self.ttl - 1,
            ..*self
        })
    }

    /// A one-hop terminal echo of this message.
    ///
    /// The result has `ttl == 0` and is marked zombie, so its receivers
    /// fold it in but never forward it. Lets one more ring of neighbors
    /// see a position without continuing the flood.
    pub fn propagate_and_die(&self) -> Self {
        Self {
            ttl: 0,
            zombie: true,
            ..*self
        }
    }
}
