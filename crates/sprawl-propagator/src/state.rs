//! Per-vertex mutable layout state.

use std::collections::VecDeque;

use indexmap::IndexSet;
use sprawl_core::{geometry, Vec2, VertexId};
use sprawl_protocol::LayoutMessage;

/// Everything a vertex owns across supersteps.
///
/// Exclusively owned by the vertex's worker. The propagator mutates it
/// during `compute`; the engine mutates it between iterations
/// (displacement, cooling, reset).
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutVertexState {
    position: Vec2,
    force: Vec2,
    analyzed: IndexSet<VertexId>,
    moving: bool,
    reset_done: bool,
    queue: VecDeque<LayoutMessage>,
    one_degree_satellites: u32,
}

impl LayoutVertexState {
    /// State for a vertex placed at `position`, with no force and an
    /// empty queue. `reset_done` starts false until the coordinate reset
    /// has happened.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            force: [0.0, 0.0],
            analyzed: IndexSet::new(),
            moving: false,
            reset_done: false,
            queue: VecDeque::new(),
            one_degree_satellites: 0,
        }
    }

    /// Current position.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Move the vertex.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Accumulated force since the last displacement.
    pub fn force(&self) -> Vec2 {
        self.force
    }

    /// Add `delta` to the accumulated force.
    pub fn add_force(&mut self, delta: Vec2) {
        self.force = geometry::add(self.force, delta);
    }

    /// Return the accumulated force and reset it to zero.
    pub fn take_force(&mut self) -> Vec2 {
        std::mem::replace(&mut self.force, [0.0, 0.0])
    }

    /// Whether `origin` has already contributed to this vertex in the
    /// current layout iteration.
    pub fn is_analyzed(&self, origin: VertexId) -> bool {
        self.analyzed.contains(&origin)
    }

    /// Record `origin` as analyzed. Returns `false` if it already was.
    pub fn analyze(&mut self, origin: VertexId) -> bool {
        self.analyzed.insert(origin)
    }

    /// Number of distinct origins analyzed this iteration.
    pub fn analyzed_count(&self) -> usize {
        self.analyzed.len()
    }

    /// Origins analyzed this iteration, in first-seen order.
    pub fn analyzed(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.analyzed.iter().copied()
    }

    /// Whether the force changed since the last displacement.
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Flag the vertex as moving.
    pub fn set_moving(&mut self) {
        self.moving = true;
    }

    /// Whether the coordinate reset has completed. Attraction is only
    /// applied once it has.
    pub fn is_reset_done(&self) -> bool {
        self.reset_done
    }

    /// Mark the coordinate reset as completed.
    pub fn mark_reset_done(&mut self) {
        self.reset_done = true;
    }

    /// Close a layout iteration: forget analyzed origins, clear the
    /// moving flag and drop any still-queued messages.
    ///
    /// Queued messages carry positions from before displacement; with
    /// `analyzed` cleared they would be folded in again as fresh
    /// contributions. Position and force are untouched.
    pub fn begin_iteration(&mut self) {
        self.analyzed.clear();
        self.moving = false;
        self.queue.clear();
    }

    /// Append a message to the local queue.
    pub fn enqueue(&mut self, message: LayoutMessage) {
        self.queue.push_back(message);
    }

    /// Remove up to `max` messages from the front of the queue.
    pub fn dequeue(&mut self, max: usize) -> impl Iterator<Item = LayoutMessage> + '_ {
        let n = max.min(self.queue.len());
        self.queue.drain(..n)
    }

    /// Number of messages waiting in the queue.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Degree-one neighbors pruned into this vertex.
    pub fn satellites(&self) -> u32 {
        self.one_degree_satellites
    }

    /// Record one more pruned degree-one neighbor.
    pub fn add_satellite(&mut self) {
        self.one_degree_satellites = self.one_degree_satellites.saturating_add(1);
    }

    /// Degree advertised to peers: own edges plus pruned satellites.
    pub fn effective_degree(&self, edge_count: u32) -> u32 {
        edge_count.saturating_add(self.one_degree_satellites)
    }
}
