//! Core types for the Sprawl layout framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other crate in the workspace: vertex
//! and superstep identifiers, planar geometry helpers, and the error
//! types surfaced at subsystem boundaries.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod id;

pub use error::{ConfigError, DecodeError};
pub use geometry::{Separation, Vec2, MIN_DISTANCE};
pub use id::{SuperstepId, VertexId, WorkerId};
