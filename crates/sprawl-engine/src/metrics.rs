//! Per-superstep metrics.
//!
//! [`SuperstepMetrics`] captures what one barrier observed: how many
//! messages it routed and whether any vertex was still active.

use sprawl_core::SuperstepId;

/// Metrics collected for a single superstep.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SuperstepMetrics {
    /// Layout iteration the superstep belongs to (zero-based).
    pub iteration: u32,
    /// Superstep within the iteration's flooding run.
    pub superstep: SuperstepId,
    /// Messages routed into next-superstep inboxes at this barrier,
    /// counted per receiving vertex.
    pub messages_delivered: u64,
    /// Inbox messages handed to the propagator during this superstep.
    pub messages_consumed: u64,
    /// Value of the activity aggregator after the barrier.
    pub active: bool,
    /// Wall-clock time from the start of the superstep through the
    /// barrier, in microseconds.
    pub elapsed_us: u64,
}
