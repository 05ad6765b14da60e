//! Sprawl: distributed force-directed graph layout over bulk-synchronous
//! message passing.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Sprawl sub-crates. For most users, adding `sprawl` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use sprawl::prelude::*;
//!
//! // Two triangles joined by a bridge, plus one whisker.
//! let graph = LayoutGraph::from_edges([
//!     (0, 1), (1, 2), (2, 0),
//!     (3, 4), (4, 5), (5, 3),
//!     (2, 3), (5, 6),
//! ]);
//! let config = EngineConfig {
//!     iterations: 4,
//!     worker_count: 2,
//!     seed: 42,
//!     ..Default::default()
//! };
//! let mut engine = LayoutEngine::new(graph, config).unwrap();
//! let result = engine.run().unwrap();
//! assert_eq!(result.positions.len(), 7);
//! assert_eq!(result.iterations, 4);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `sprawl-core` | IDs, geometry helpers, shared errors |
//! | [`force`] | `sprawl-force` | Force laws (Fruchterman-Reingold, Eades, LinLog) |
//! | [`protocol`] | `sprawl-protocol` | Layout message and its wire codec |
//! | [`aggregate`] | `sprawl-aggregate` | Barrier-merged reducers and slots |
//! | [`propagator`] | `sprawl-propagator` | Per-vertex message folding and forwarding |
//! | [`engine`] | `sprawl-engine` | Graph loading, satellite pruning, the superstep engine |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and IDs (`sprawl-core`).
///
/// Contains [`types::VertexId`], [`types::SuperstepId`], the 2D geometry
/// helpers, and the configuration and decode errors.
pub use sprawl_core as types;

/// Force laws (`sprawl-force`).
///
/// The [`force::ForceLaw`] trait and its implementations, selected by
/// name through [`force::ForceLawKind`].
pub use sprawl_force as force;

/// Layout message and wire codec (`sprawl-protocol`).
pub use sprawl_protocol as protocol;

/// Aggregators merged at the superstep barrier (`sprawl-aggregate`).
pub use sprawl_aggregate as aggregate;

/// Per-vertex layout step (`sprawl-propagator`).
///
/// [`propagator::Propagator::compute`] folds one superstep's inbox into a
/// vertex's force and forwards live messages.
pub use sprawl_propagator as propagator;

/// Graph model and superstep engine (`sprawl-engine`).
///
/// [`engine::LayoutEngine`] drives flooding runs and displacement until
/// the configured number of iterations has completed.
pub use sprawl_engine as engine;

/// Common imports for typical Sprawl usage.
///
/// ```rust
/// use sprawl::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use sprawl_core::{ConfigError, DecodeError, SuperstepId, Vec2, VertexId};

    // Force laws
    pub use sprawl_force::{ForceLaw, ForceLawKind};

    // Messages
    pub use sprawl_protocol::LayoutMessage;

    // Propagation
    pub use sprawl_propagator::{GlobalScalars, LayoutVertexState, Propagator, PropagatorConfig};

    // Engine
    pub use sprawl_engine::{
        BoundingBox, EngineConfig, EngineError, IterationReport, LayoutEngine, LayoutGraph,
        LayoutResult, SuperstepMetrics,
    };
}
