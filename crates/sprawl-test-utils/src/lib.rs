//! Test utilities and graph fixtures for Sprawl development.
//!
//! Message builders for hand-assembled inboxes, tolerance comparisons
//! for force vectors, and the standard graph shapes in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use sprawl_core::{Vec2, VertexId};
use sprawl_protocol::LayoutMessage;

pub use fixtures::{cycle, grid, path, star, two_clusters, EdgeList};

/// A live broadcast from `origin` with hop budget `ttl`.
pub fn live_message(origin: i64, position: Vec2, degree: u32, ttl: i32) -> LayoutMessage {
    LayoutMessage::fresh(VertexId(origin), position, degree, ttl)
}

/// A terminal echo from `origin`: folded by its receiver, never forwarded.
pub fn zombie_message(origin: i64, position: Vec2, degree: u32) -> LayoutMessage {
    LayoutMessage::fresh(VertexId(origin), position, degree, 1).propagate_and_die()
}

/// One live message per `(origin, position)` pair, all with `degree` and `ttl`.
pub fn inbox(
    peers: impl IntoIterator<Item = (i64, Vec2)>,
    degree: u32,
    ttl: i32,
) -> Vec<LayoutMessage> {
    peers
        .into_iter()
        .map(|(origin, position)| live_message(origin, position, degree, ttl))
        .collect()
}

/// Component-wise comparison within `tol`.
pub fn approx_eq(a: Vec2, b: Vec2, tol: f32) -> bool {
    (a[0] - b[0]).abs() <= tol && (a[1] - b[1]).abs() <= tol
}

/// Whether both components are finite.
pub fn is_finite(v: Vec2) -> bool {
    v[0].is_finite() && v[1].is_finite()
}
