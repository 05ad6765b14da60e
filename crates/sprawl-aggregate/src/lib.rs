//! Superstep aggregators for Sprawl.
//!
//! An aggregator reduces many independent contributions into one value
//! per superstep. The reducer is stateless ([`Aggregator`]); the state
//! lives in a [`Slot`], which owns the lifecycle:
//!
//! 1. contributions accumulate into the slot's pending value during
//!    superstep `N` (directly, or as worker-local partials absorbed at
//!    the barrier);
//! 2. [`Slot::barrier`] freezes the pending value;
//! 3. the frozen value is read-only for every vertex in superstep `N + 1`.
//!
//! Slots are explicit objects threaded through the round loop; there is
//! no process-global aggregator state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aggregator;
pub mod map;
pub mod set;
pub mod slot;

pub use aggregator::{Aggregator, BooleanOr, Constant, IntSum};
pub use map::{merge, MapAggregator, MergePolicy, MergeValue};
pub use set::IdSetUnion;
pub use slot::{Persistence, Slot};
