//! Worker partitions and the per-superstep fan-out.
//!
//! Vertices are split round-robin across [`Partition`]s. Each superstep
//! the coordinator hands every partition to its own scoped thread; the
//! thread computes its vertices and reports back over a crossbeam
//! channel. Outbound messages leave a worker as encoded frames, exactly
//! as they would cross a process boundary.

use indexmap::{IndexMap, IndexSet};
use sprawl_aggregate::{Aggregator, BooleanOr};
use sprawl_core::geometry::{add, norm, scale};
use sprawl_core::{SuperstepId, Vec2, VertexId, WorkerId};
use sprawl_propagator::{GlobalScalars, LayoutVertexState, Propagator, RoundContext, Target};
use sprawl_protocol::{encode_frame, LayoutMessage};

use crate::error::EngineError;

/// One vertex as its worker sees it.
#[derive(Debug)]
pub(crate) struct VertexCell {
    pub id: VertexId,
    /// Position in the working graph's insertion order.
    pub index: usize,
    pub edge_count: u32,
    pub state: LayoutVertexState,
    pub inbox: Vec<LayoutMessage>,
}

/// Routing header for one encoded frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Route {
    pub sender_index: usize,
    pub sender: VertexId,
    pub target: Target,
}

/// What a worker sends back after one superstep.
#[derive(Debug, Default)]
pub(crate) struct SuperstepReport {
    /// One route per frame, in the same order.
    pub routes: Vec<Route>,
    /// Back-to-back encoded frames.
    pub frames: Vec<u8>,
    /// Worker-local partial of the activity aggregator.
    pub activity: bool,
    /// Inbox messages consumed this superstep.
    pub consumed: u64,
}

/// What a worker sends back after displacement.
#[derive(Debug, Default)]
pub(crate) struct DisplacementReport {
    pub moved: IndexMap<WorkerId, i64>,
    pub moved_ids: IndexSet<VertexId>,
    pub lower: IndexMap<WorkerId, Vec2>,
    pub upper: IndexMap<WorkerId, Vec2>,
}

/// The vertices owned by one worker.
#[derive(Debug)]
pub(crate) struct Partition {
    worker: WorkerId,
    cells: Vec<VertexCell>,
}

impl Partition {
    pub fn new(worker: WorkerId) -> Self {
        Self {
            worker,
            cells: Vec::new(),
        }
    }

    pub fn worker(&self) -> WorkerId {
        self.worker
    }

    /// Add a vertex; returns its local index.
    pub fn push(&mut self, cell: VertexCell) -> usize {
        self.cells.push(cell);
        self.cells.len() - 1
    }

    pub fn cells(&self) -> &[VertexCell] {
        &self.cells
    }

    pub fn cell_mut(&mut self, local: usize) -> Option<&mut VertexCell> {
        self.cells.get_mut(local)
    }

    pub fn clear_inboxes(&mut self) {
        for cell in &mut self.cells {
            cell.inbox.clear();
        }
    }

    fn emit(report: &mut SuperstepReport, cell: &VertexCell, target: Target, message: &LayoutMessage) {
        report.routes.push(Route {
            sender_index: cell.index,
            sender: cell.id,
            target,
        });
        encode_frame(message, &mut report.frames);
    }

    /// Superstep zero: every connected vertex announces its position.
    pub fn seed(&mut self, ttl: i32) -> SuperstepReport {
        let mut report = SuperstepReport::default();
        for cell in &self.cells {
            if cell.edge_count == 0 {
                continue;
            }
            let degree = cell.state.effective_degree(cell.edge_count);
            let message = LayoutMessage::fresh(cell.id, cell.state.position(), degree, ttl);
            Self::emit(&mut report, cell, Target::Neighbors, &message);
            BooleanOr.aggregate(&mut report.activity, true);
        }
        report
    }

    /// A regular superstep: run the propagator over every vertex.
    pub fn compute(
        &mut self,
        propagator: &Propagator,
        superstep: SuperstepId,
        scalars: GlobalScalars,
    ) -> SuperstepReport {
        let mut report = SuperstepReport {
            activity: BooleanOr.identity(),
            ..Default::default()
        };
        let mut outbox = Vec::new();
        for cell in &mut self.cells {
            let inbox = std::mem::take(&mut cell.inbox);
            report.consumed += inbox.len() as u64;
            {
                let mut ctx = RoundContext::new(
                    cell.id,
                    cell.edge_count,
                    superstep,
                    scalars,
                    &mut outbox,
                    &mut report.activity,
                );
                propagator.compute(&mut ctx, &mut cell.state, inbox);
            }
            for out in outbox.drain(..) {
                Self::emit(&mut report, cell, out.target, &out.message);
            }
        }
        report
    }

    /// Move every vertex along its accumulated force, capped at
    /// `temperature`, then open a new iteration.
    pub fn displace(&mut self, temperature: f32) -> DisplacementReport {
        let mut report = DisplacementReport::default();
        let mut moved = 0i64;
        let mut lower: Option<Vec2> = None;
        let mut upper: Option<Vec2> = None;

        for cell in &mut self.cells {
            let force = cell.state.take_force();
            if cell.state.is_moving() {
                let length = norm(force);
                if length.is_finite() && length > 0.0 {
                    let step = scale(force, length.min(temperature) / length);
                    cell.state.set_position(add(cell.state.position(), step));
                    moved += 1;
                    report.moved_ids.insert(cell.id);
                }
            }
            cell.state.begin_iteration();

            let [x, y] = cell.state.position();
            lower = Some(lower.map_or([x, y], |[lx, ly]| [lx.min(x), ly.min(y)]));
            upper = Some(upper.map_or([x, y], |[ux, uy]| [ux.max(x), uy.max(y)]));
        }

        report.moved.insert(self.worker, moved);
        if let (Some(lo), Some(hi)) = (lower, upper) {
            report.lower.insert(self.worker, lo);
            report.upper.insert(self.worker, hi);
        }
        report
    }
}

/// Run `task` on every partition, each on its own scoped thread.
///
/// Results come back over a crossbeam channel and are returned in
/// worker order. A panicking worker is reported as
/// [`EngineError::WorkerFailed`].
pub(crate) fn fan_out<T, F>(partitions: &mut [Partition], task: F) -> Result<Vec<T>, EngineError>
where
    T: Send,
    F: Fn(&mut Partition) -> T + Sync,
{
    let (tx, rx) = crossbeam_channel::bounded(partitions.len().max(1));
    let task = &task;
    let failed = std::thread::scope(|scope| {
        let handles: Vec<_> = partitions
            .iter_mut()
            .map(|partition| {
                let tx = tx.clone();
                let worker = partition.worker();
                let handle = scope.spawn(move || {
                    let out = task(partition);
                    // The receiver outlives the scope; a send cannot fail.
                    let _ = tx.send((worker, out));
                });
                (worker, handle)
            })
            .collect();

        let mut failed = None;
        for (worker, handle) in handles {
            if handle.join().is_err() && failed.is_none() {
                failed = Some(worker);
            }
        }
        failed
    });
    drop(tx);

    if let Some(worker) = failed {
        return Err(EngineError::WorkerFailed { worker });
    }
    let mut results: Vec<(WorkerId, T)> = rx.try_iter().collect();
    results.sort_by_key(|(worker, _)| *worker);
    Ok(results.into_iter().map(|(_, out)| out).collect())
}
