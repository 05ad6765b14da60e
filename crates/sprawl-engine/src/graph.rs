//! Undirected layout graph and degree-one satellite pruning.
//!
//! [`LayoutGraph`] keeps adjacency in first-insertion order so vertex
//! enumeration (and therefore partitioning and message routing) is
//! deterministic for a given edge list.

use std::f32::consts::TAU;

use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;
use sprawl_core::{Vec2, VertexId};

/// Neighbor list, inline for typical sparse-graph degrees.
pub type Neighbors = SmallVec<[VertexId; 8]>;

/// Simple undirected graph keyed by [`VertexId`].
///
/// Self-loops and duplicate edges are ignored on insertion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutGraph {
    adjacency: IndexMap<VertexId, Neighbors>,
}

impl LayoutGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from raw `(a, b)` id pairs.
    pub fn from_edges(edges: impl IntoIterator<Item = (i64, i64)>) -> Self {
        let mut graph = Self::new();
        for (a, b) in edges {
            graph.add_edge(VertexId(a), VertexId(b));
        }
        graph
    }

    /// Insert an isolated vertex. No-op if already present.
    pub fn add_vertex(&mut self, id: VertexId) {
        self.adjacency.entry(id).or_default();
    }

    /// Insert an undirected edge, creating missing endpoints.
    ///
    /// Returns `false` if the edge was a self-loop or already present.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> bool {
        self.add_vertex(a);
        self.add_vertex(b);
        if a == b || self.has_edge(a, b) {
            return false;
        }
        self.adjacency.entry(a).or_default().push(b);
        self.adjacency.entry(b).or_default().push(a);
        true
    }

    /// Whether `a` and `b` are adjacent.
    pub fn has_edge(&self, a: VertexId, b: VertexId) -> bool {
        self.adjacency.get(&a).is_some_and(|n| n.contains(&b))
    }

    /// Whether `id` is a vertex of this graph.
    pub fn contains(&self, id: VertexId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Neighbors of `id`, empty for unknown vertices.
    pub fn neighbors(&self, id: VertexId) -> &[VertexId] {
        self.adjacency.get(&id).map(|n| n.as_slice()).unwrap_or(&[])
    }

    /// Number of incident edges.
    pub fn degree(&self, id: VertexId) -> u32 {
        self.neighbors(id).len() as u32
    }

    /// Position of `id` in insertion order.
    pub fn index_of(&self, id: VertexId) -> Option<usize> {
        self.adjacency.get_index_of(&id)
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|n| n.len()).sum::<usize>() / 2
    }

    /// Whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Split off degree-one vertices whose single neighbor has a higher
    /// degree.
    ///
    /// Returns the working graph without those vertices and the record
    /// of which anchor absorbed which satellites. Pairs of degree-one
    /// vertices connected to each other are kept: neither side is a
    /// better anchor than the other.
    pub fn prune_satellites(&self) -> (LayoutGraph, Satellites) {
        let mut satellites = Satellites::default();
        for (&id, neighbors) in &self.adjacency {
            if let [anchor] = neighbors.as_slice() {
                if self.degree(*anchor) > 1 {
                    satellites.anchors.entry(*anchor).or_default().push(id);
                    satellites.members.insert(id);
                }
            }
        }

        let mut working = LayoutGraph::new();
        for (&id, neighbors) in &self.adjacency {
            if satellites.is_satellite(id) {
                continue;
            }
            working.add_vertex(id);
            for &n in neighbors {
                if !satellites.is_satellite(n) {
                    working.add_edge(id, n);
                }
            }
        }
        (working, satellites)
    }
}

/// Degree-one vertices removed from the working graph, grouped by the
/// anchor they hang off.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Satellites {
    anchors: IndexMap<VertexId, Vec<VertexId>>,
    members: IndexSet<VertexId>,
}

impl Satellites {
    /// Satellites of `anchor`, in graph order.
    pub fn of(&self, anchor: VertexId) -> &[VertexId] {
        self.anchors.get(&anchor).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of satellites folded into `anchor`.
    pub fn count(&self, anchor: VertexId) -> u32 {
        self.of(anchor).len() as u32
    }

    /// Whether `id` was pruned.
    pub fn is_satellite(&self, id: VertexId) -> bool {
        self.members.contains(&id)
    }

    /// Total number of pruned vertices.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether nothing was pruned.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Anchors with at least one satellite, in graph order.
    pub fn anchors(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.anchors.keys().copied()
    }

    /// Place every satellite around its anchor.
    ///
    /// Each anchor's satellites get an equal share of the circle of
    /// radius `radius` around it, starting at angle zero. `anchor_position`
    /// returns `None` for anchors without a position, whose satellites
    /// are skipped.
    pub fn place<F>(&self, radius: f32, anchor_position: F) -> Vec<(VertexId, Vec2)>
    where
        F: Fn(VertexId) -> Option<Vec2>,
    {
        let mut placed = Vec::with_capacity(self.len());
        for (&anchor, satellites) in &self.anchors {
            let Some([ax, ay]) = anchor_position(anchor) else {
                continue;
            };
            let share = TAU / satellites.len() as f32;
            for (i, &id) in satellites.iter().enumerate() {
                let angle = share * i as f32;
                placed.push((id, [ax + radius * angle.cos(), ay + radius * angle.sin()]));
            }
        }
        placed
    }
}
