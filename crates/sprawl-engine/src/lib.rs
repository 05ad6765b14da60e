//! In-process bulk-synchronous engine driving Sprawl layouts.
//!
//! Provides [`LayoutEngine`], a reference substrate that runs the
//! propagator over a [`LayoutGraph`] superstep by superstep: worker
//! threads compute their partitions, a coordinator routes messages and
//! freezes aggregates at each barrier, and a displacement phase moves the
//! vertices between flooding runs.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod metrics;
mod worker;

pub use config::EngineConfig;
pub use error::EngineError;
pub use graph::{LayoutGraph, Satellites};
pub use layout::{BoundingBox, IterationReport, LayoutEngine, LayoutResult};
pub use metrics::SuperstepMetrics;
