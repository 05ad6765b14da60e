//! Execution context handed to the propagator for one vertex-step.

use sprawl_aggregate::{Aggregator, BooleanOr};
use sprawl_core::{SuperstepId, VertexId};
use sprawl_protocol::LayoutMessage;

/// Run-level scalars, read from their constant aggregators.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobalScalars {
    /// Ideal edge length `k`.
    pub k: f32,
    /// Repulsion scale applied to every repulsive contribution.
    pub walshaw_constant: f32,
}

impl Default for GlobalScalars {
    fn default() -> Self {
        Self {
            k: 1.0,
            walshaw_constant: 1.0,
        }
    }
}

/// Where an outgoing message goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// Every neighbor of the sending vertex.
    Neighbors,
    /// One specific vertex.
    Vertex(VertexId),
}

/// A message queued for delivery at the next barrier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outgoing {
    /// Delivery target.
    pub target: Target,
    /// The message.
    pub message: LayoutMessage,
}

/// Split-borrow view over the worker-owned buffers for one vertex.
///
/// Sends land in the worker's outbox and are routed at the barrier, so
/// nothing sent in superstep `N` is visible before `N + 1`. Activity is
/// folded into the worker-local partial of the activity aggregator.
pub struct RoundContext<'a> {
    vertex: VertexId,
    edge_count: u32,
    superstep: SuperstepId,
    scalars: GlobalScalars,
    outbox: &'a mut Vec<Outgoing>,
    activity: &'a mut bool,
}

impl<'a> RoundContext<'a> {
    /// Build the context for `vertex`.
    pub fn new(
        vertex: VertexId,
        edge_count: u32,
        superstep: SuperstepId,
        scalars: GlobalScalars,
        outbox: &'a mut Vec<Outgoing>,
        activity: &'a mut bool,
    ) -> Self {
        Self {
            vertex,
            edge_count,
            superstep,
            scalars,
            outbox,
            activity,
        }
    }

    /// The vertex being computed.
    pub fn vertex(&self) -> VertexId {
        self.vertex
    }

    /// Number of graph edges incident to the vertex.
    pub fn edge_count(&self) -> u32 {
        self.edge_count
    }

    /// Current superstep.
    pub fn superstep(&self) -> SuperstepId {
        self.superstep
    }

    /// Run-level scalars frozen at the last barrier.
    pub fn scalars(&self) -> GlobalScalars {
        self.scalars
    }

    /// Broadcast `message` to every neighbor.
    pub fn send_to_neighbors(&mut self, message: LayoutMessage) {
        self.outbox.push(Outgoing {
            target: Target::Neighbors,
            message,
        });
    }

    /// Send `message` to a single vertex.
    pub fn send_to(&mut self, target: VertexId, message: LayoutMessage) {
        self.outbox.push(Outgoing {
            target: Target::Vertex(target),
            message,
        });
    }

    /// Report that this vertex is still propagating.
    pub fn report_activity(&mut self) {
        BooleanOr.aggregate(self.activity, true);
    }
}
