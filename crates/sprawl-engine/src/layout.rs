//! The layout coordinator.
//!
//! [`LayoutEngine`] owns the partitions, the aggregator slots and the
//! propagator. Each layout iteration is one flooding run (a sequence of
//! supersteps separated by barriers) followed by a displacement phase
//! that moves every vertex along its accumulated force.
//!
//! # Barrier contract
//!
//! Nothing a vertex sends or contributes in superstep `N` is observable
//! before `N + 1`: workers write into private outboxes and partials, and
//! only the coordinator, with every worker joined, routes messages into
//! inboxes and freezes slots.

use std::time::Instant;

use indexmap::{IndexMap, IndexSet};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sprawl_aggregate::{
    BooleanOr, Constant, IdSetUnion, IntSum, MapAggregator, MergePolicy, Persistence, Slot,
};
use sprawl_core::{SuperstepId, Vec2, VertexId, WorkerId};
use sprawl_propagator::{GlobalScalars, LayoutVertexState, Propagator, Target};
use sprawl_protocol::{decode_frames, LayoutMessage};
use tracing::{debug, debug_span, info, info_span};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::graph::{LayoutGraph, Satellites};
use crate::metrics::SuperstepMetrics;
use crate::worker::{fan_out, Partition, SuperstepReport, VertexCell};

// Compile-time assertion: the engine can be moved to another thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<LayoutEngine>();
    }
};

// ── BoundingBox ─────────────────────────────────────────────────

/// Axis-aligned bounds of a drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Lower-left corner.
    pub min: Vec2,
    /// Upper-right corner.
    pub max: Vec2,
}

impl BoundingBox {
    /// The degenerate box around a single point.
    pub fn point(p: Vec2) -> Self {
        Self { min: p, max: p }
    }

    /// Fold per-worker extrema into one box. `None` if both maps are
    /// empty.
    pub fn from_extrema(
        lower: &IndexMap<WorkerId, Vec2>,
        upper: &IndexMap<WorkerId, Vec2>,
    ) -> Option<Self> {
        let mut bbox: Option<Self> = None;
        for p in lower.values().chain(upper.values()) {
            match bbox.as_mut() {
                Some(b) => b.include(*p),
                None => bbox = Some(Self::point(*p)),
            }
        }
        bbox
    }

    /// Grow the box to contain `p`.
    pub fn include(&mut self, p: Vec2) {
        self.min = [self.min[0].min(p[0]), self.min[1].min(p[1])];
        self.max = [self.max[0].max(p[0]), self.max[1].max(p[1])];
    }

    /// Whether `p` lies inside or on the boundary.
    pub fn contains(&self, p: Vec2) -> bool {
        p[0] >= self.min[0] && p[0] <= self.max[0] && p[1] >= self.min[1] && p[1] <= self.max[1]
    }

    /// Horizontal extent.
    pub fn width(&self) -> f32 {
        self.max[0] - self.min[0]
    }

    /// Vertical extent.
    pub fn height(&self) -> f32 {
        self.max[1] - self.min[1]
    }
}

// ── Reports ─────────────────────────────────────────────────────

/// Outcome of one layout iteration.
#[derive(Clone, Debug, PartialEq)]
pub struct IterationReport {
    /// Zero-based iteration index.
    pub iteration: u32,
    /// Supersteps executed by the flooding run, seeding included.
    pub supersteps: u64,
    /// Whether the run stopped because no vertex was active, rather than
    /// at the superstep limit.
    pub converged: bool,
    /// Number of vertices that moved during displacement.
    pub moved: i64,
    /// Ids of the vertices that moved.
    pub moved_vertices: IndexSet<VertexId>,
    /// Bounds of the working graph after displacement.
    pub bbox: Option<BoundingBox>,
    /// Temperature used for this iteration's displacement.
    pub temperature: f32,
}

/// Final drawing and run statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult {
    /// Position of every input vertex, satellites included, in input
    /// order.
    pub positions: IndexMap<VertexId, Vec2>,
    /// Bounds of the whole drawing. `None` for an empty graph.
    pub bbox: Option<BoundingBox>,
    /// Layout iterations completed.
    pub iterations: u32,
    /// Supersteps executed across all iterations.
    pub supersteps: u64,
    /// Iterations whose flooding run converged.
    pub converged_runs: u32,
    /// Metrics of every superstep, in execution order.
    pub metrics: Vec<SuperstepMetrics>,
}

// ── LayoutEngine ────────────────────────────────────────────────

/// In-process bulk-synchronous layout driver.
///
/// # Example
///
/// ```
/// use sprawl_engine::{EngineConfig, LayoutEngine, LayoutGraph};
///
/// let graph = LayoutGraph::from_edges([(0, 1), (1, 2), (2, 0)]);
/// let mut engine = LayoutEngine::new(graph, EngineConfig::default()).unwrap();
/// let result = engine.run().unwrap();
/// assert_eq!(result.positions.len(), 3);
/// ```
#[derive(Debug)]
pub struct LayoutEngine {
    config: EngineConfig,
    input_order: Vec<VertexId>,
    graph: LayoutGraph,
    satellites: Satellites,
    placement: IndexMap<VertexId, (usize, usize)>,
    partitions: Vec<Partition>,
    propagator: Propagator,

    activity: Slot<BooleanOr>,
    consumed: Slot<IntSum>,
    ideal_length: Slot<Constant<f32>>,
    walshaw: Slot<Constant<f32>>,
    moved: Slot<MapAggregator<WorkerId, i64>>,
    lower: Slot<MapAggregator<WorkerId, Vec2>>,
    upper: Slot<MapAggregator<WorkerId, Vec2>>,
    moved_ids: Slot<IdSetUnion>,

    temperature: f32,
    iteration: u32,
    supersteps: u64,
    converged_runs: u32,
    bbox: Option<BoundingBox>,
    metrics: Vec<SuperstepMetrics>,
}

impl LayoutEngine {
    /// Validate `config`, prune satellites, partition the graph and
    /// place every vertex at a seeded random position.
    pub fn new(graph: LayoutGraph, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let input_order: Vec<VertexId> = graph.vertices().collect();
        let (graph, satellites) = if config.prune_satellites {
            graph.prune_satellites()
        } else {
            (graph, Satellites::default())
        };

        let ideal_length = Slot::new("k", Constant::new(config.k), Persistence::Persistent);
        let walshaw = Slot::new(
            "walshawConstant",
            Constant::new(config.walshaw_constant),
            Persistence::Persistent,
        );
        let scalars = GlobalScalars {
            k: *ideal_length.value(),
            walshaw_constant: *walshaw.value(),
        };
        let propagator = Propagator::new(&config.propagator, &scalars);

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let side = config.k * (input_order.len().max(1) as f32).sqrt();
        let worker_count = config.worker_count as usize;
        let mut partitions: Vec<Partition> = (0..config.worker_count)
            .map(|w| Partition::new(WorkerId(w)))
            .collect();
        let mut placement = IndexMap::with_capacity(graph.vertex_count());

        for (index, id) in graph.vertices().enumerate() {
            let position = [rng.random_range(0.0..side), rng.random_range(0.0..side)];
            let mut state = LayoutVertexState::new(position);
            for _ in 0..satellites.count(id) {
                state.add_satellite();
            }
            state.mark_reset_done();

            let worker = index % worker_count;
            let local = partitions[worker].push(VertexCell {
                id,
                index,
                edge_count: graph.degree(id),
                state,
                inbox: Vec::new(),
            });
            placement.insert(id, (worker, local));
        }

        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            satellites = satellites.len(),
            workers = worker_count,
            "layout initialized"
        );

        Ok(Self {
            temperature: config.initial_temperature,
            config,
            input_order,
            graph,
            satellites,
            placement,
            partitions,
            propagator,
            activity: Slot::new("activity", BooleanOr, Persistence::PerSuperstep),
            consumed: Slot::new("messagesConsumed", IntSum, Persistence::PerSuperstep),
            ideal_length,
            walshaw,
            moved: Slot::new(
                "moved",
                MapAggregator::new(MergePolicy::Sum),
                Persistence::PerSuperstep,
            ),
            lower: Slot::new(
                "xyMin",
                MapAggregator::new(MergePolicy::Min),
                Persistence::PerSuperstep,
            ),
            upper: Slot::new(
                "xyMax",
                MapAggregator::new(MergePolicy::Max),
                Persistence::PerSuperstep,
            ),
            moved_ids: Slot::new("movedVertices", IdSetUnion, Persistence::PerSuperstep),
            iteration: 0,
            supersteps: 0,
            converged_runs: 0,
            bbox: None,
            metrics: Vec::new(),
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The working graph, satellites removed.
    pub fn graph(&self) -> &LayoutGraph {
        &self.graph
    }

    /// The pruned degree-one vertices.
    pub fn satellites(&self) -> &Satellites {
        &self.satellites
    }

    /// Iterations completed so far.
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Displacement cap of the next iteration.
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Current positions of the working-graph vertices.
    pub fn positions(&self) -> IndexMap<VertexId, Vec2> {
        let mut out = IndexMap::with_capacity(self.placement.len());
        for id in self.graph.vertices() {
            if let Some(p) = self.position_of(id) {
                out.insert(id, p);
            }
        }
        out
    }

    fn position_of(&self, id: VertexId) -> Option<Vec2> {
        let &(worker, local) = self.placement.get(&id)?;
        self.partitions
            .get(worker)?
            .cells()
            .get(local)
            .map(|cell| cell.state.position())
    }

    fn scalars(&self) -> GlobalScalars {
        GlobalScalars {
            k: *self.ideal_length.value(),
            walshaw_constant: *self.walshaw.value(),
        }
    }

    /// Run all remaining iterations and return the drawing.
    pub fn run(&mut self) -> Result<LayoutResult, EngineError> {
        let span = info_span!(
            "layout_run",
            vertices = self.input_order.len(),
            workers = self.config.worker_count,
            law = %self.config.propagator.force_law
        );
        let _guard = span.enter();

        while self.iteration < self.config.iterations {
            self.step_iteration()?;
        }
        info!(
            iterations = self.iteration,
            supersteps = self.supersteps,
            converged_runs = self.converged_runs,
            "layout finished"
        );
        Ok(self.result())
    }

    /// Execute one iteration: a flooding run, then displacement and
    /// cooling.
    pub fn step_iteration(&mut self) -> Result<IterationReport, EngineError> {
        let (supersteps, converged) = self.flood()?;
        let temperature = self.temperature;

        let reports = fan_out(&mut self.partitions, |p| p.displace(temperature))?;
        for report in reports {
            self.moved.absorb(report.moved);
            self.lower.absorb(report.lower);
            self.upper.absorb(report.upper);
            self.moved_ids.absorb(report.moved_ids);
        }
        let moved: i64 = self.moved.barrier().values().sum();
        let moved_vertices = self.moved_ids.barrier().clone();
        self.lower.barrier();
        self.upper.barrier();
        self.bbox = BoundingBox::from_extrema(self.lower.value(), self.upper.value());

        let report = IterationReport {
            iteration: self.iteration,
            supersteps,
            converged,
            moved,
            moved_vertices,
            bbox: self.bbox,
            temperature,
        };
        debug!(
            iteration = self.iteration,
            supersteps,
            converged,
            moved,
            temperature,
            "iteration complete"
        );

        self.iteration += 1;
        if converged {
            self.converged_runs += 1;
        }
        self.temperature *= self.config.cooling_factor;
        Ok(report)
    }

    /// One flooding run. Returns the number of supersteps executed and
    /// whether the run converged.
    fn flood(&mut self) -> Result<(u64, bool), EngineError> {
        for p in &mut self.partitions {
            p.clear_inboxes();
        }
        let ttl = self.config.ttl;
        let limit = self.config.max_supersteps;
        let mut superstep = SuperstepId::default();

        loop {
            let span = debug_span!("superstep", iteration = self.iteration, superstep = superstep.0);
            let _guard = span.enter();
            let start = Instant::now();

            let reports = if superstep.is_first() {
                fan_out(&mut self.partitions, |p| p.seed(ttl))?
            } else {
                let propagator = &self.propagator;
                let scalars = self.scalars();
                fan_out(&mut self.partitions, |p| {
                    p.compute(propagator, superstep, scalars)
                })?
            };
            let delivered = self.barrier(reports)?;
            let active = *self.activity.value();
            let consumed = *self.consumed.value();

            self.metrics.push(SuperstepMetrics {
                iteration: self.iteration,
                superstep,
                messages_delivered: delivered,
                messages_consumed: u64::try_from(consumed).unwrap_or(0),
                active,
                elapsed_us: start.elapsed().as_micros() as u64,
            });
            self.supersteps += 1;
            debug!(consumed, delivered, active, "barrier");

            let executed = superstep.0 + 1;
            if !active {
                info!(iteration = self.iteration, supersteps = executed, "flooding converged");
                return Ok((executed, true));
            }
            if executed >= limit {
                info!(
                    iteration = self.iteration,
                    supersteps = executed,
                    "superstep limit reached"
                );
                return Ok((executed, false));
            }
            superstep = superstep.next();
        }
    }

    /// Close a superstep: fold partials into the slots, then route every
    /// outbound frame into next-superstep inboxes.
    ///
    /// Routing order is by sender position in the working graph, then by
    /// send order, so inbox contents do not depend on the worker count.
    fn barrier(&mut self, reports: Vec<SuperstepReport>) -> Result<u64, EngineError> {
        let mut outbound: Vec<(usize, VertexId, Target, LayoutMessage)> = Vec::new();
        for report in reports {
            self.activity.absorb(report.activity);
            self.consumed
                .absorb(i64::try_from(report.consumed).unwrap_or(i64::MAX));
            let messages = decode_frames(&report.frames)?;
            outbound.extend(
                report
                    .routes
                    .into_iter()
                    .zip(messages)
                    .map(|(route, msg)| (route.sender_index, route.sender, route.target, msg)),
            );
        }
        self.activity.barrier();
        self.consumed.barrier();
        self.ideal_length.barrier();
        self.walshaw.barrier();

        outbound.sort_by_key(|(index, ..)| *index);
        let mut delivered = 0u64;
        for (_, sender, target, message) in outbound {
            match target {
                Target::Neighbors => {
                    for &neighbor in self.graph.neighbors(sender) {
                        deliver(&self.placement, &mut self.partitions, neighbor, message)?;
                        delivered += 1;
                    }
                }
                Target::Vertex(id) => {
                    deliver(&self.placement, &mut self.partitions, id, message)?;
                    delivered += 1;
                }
            }
        }
        Ok(delivered)
    }

    /// The drawing as of the last completed iteration.
    pub fn result(&self) -> LayoutResult {
        let working = self.positions();
        let placed: IndexMap<VertexId, Vec2> = self
            .satellites
            .place(self.config.k, |anchor| working.get(&anchor).copied())
            .into_iter()
            .collect();

        let mut bbox = self.bbox;
        let mut positions = IndexMap::with_capacity(self.input_order.len());
        for &id in &self.input_order {
            let Some(p) = working.get(&id).or_else(|| placed.get(&id)).copied() else {
                continue;
            };
            match bbox.as_mut() {
                Some(b) => b.include(p),
                None => bbox = Some(BoundingBox::point(p)),
            }
            positions.insert(id, p);
        }

        LayoutResult {
            positions,
            bbox,
            iterations: self.iteration,
            supersteps: self.supersteps,
            converged_runs: self.converged_runs,
            metrics: self.metrics.clone(),
        }
    }
}

fn deliver(
    placement: &IndexMap<VertexId, (usize, usize)>,
    partitions: &mut [Partition],
    to: VertexId,
    message: LayoutMessage,
) -> Result<(), EngineError> {
    let cell = placement
        .get(&to)
        .and_then(|&(worker, local)| partitions.get_mut(worker)?.cell_mut(local))
        .ok_or(EngineError::UnknownVertex { id: to })?;
    cell.inbox.push(message);
    Ok(())
}
