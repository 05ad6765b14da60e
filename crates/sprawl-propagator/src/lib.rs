//! Per-superstep vertex computation for Sprawl force-directed layout.
//!
//! The [`Propagator`] is invoked once per vertex per superstep with the
//! vertex's exclusively-owned [`LayoutVertexState`] and the inbox
//! delivered at the previous barrier. It folds each unseen peer's
//! attraction and repulsion into the vertex's force, forwards live
//! messages one hop further (immediately, or through the vertex's local
//! queue), and reports activity through the [`RoundContext`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod context;
pub mod propagator;
pub mod state;

pub use config::PropagatorConfig;
pub use context::{GlobalScalars, Outgoing, RoundContext, Target};
pub use propagator::{Propagator, RoundReport};
pub use state::LayoutVertexState;
