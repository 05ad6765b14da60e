//! Pairwise force laws for Sprawl force-directed layout.
//!
//! A [`ForceLaw`] turns the [`Separation`](sprawl_core::Separation) between
//! a vertex and one peer into an attractive and a repulsive contribution.
//! Laws are pure and total: coincident endpoints are clamped to
//! [`MIN_DISTANCE`](sprawl_core::MIN_DISTANCE) rather than producing a
//! non-finite force.
//!
//! The set of laws is closed. [`ForceLawKind`] names each variant and is
//! resolved once, when the run configuration is parsed.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod eades;
pub mod fruchterman_reingold;
pub mod law;
pub mod linlog;

pub use eades::Eades;
pub use fruchterman_reingold::FruchtermanReingold;
pub use law::{degree_weight, ForceLaw, ForceLawKind};
pub use linlog::LinLog;
