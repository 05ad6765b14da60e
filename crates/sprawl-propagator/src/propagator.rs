//! The per-superstep vertex transition.

use std::f32::consts::{PI, TAU};

use sprawl_core::geometry::{add, scale, sub};
use sprawl_core::{Separation, Vec2, VertexId};
use sprawl_force::ForceLaw;
use sprawl_protocol::LayoutMessage;
use tracing::trace;

use crate::config::PropagatorConfig;
use crate::context::{GlobalScalars, RoundContext};
use crate::state::LayoutVertexState;

/// Counters describing one `compute` call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RoundReport {
    /// Messages whose origin contributed force this round.
    pub folded: u32,
    /// Messages skipped because they came from self or an analyzed origin.
    pub skipped: u32,
    /// Successors sent or queued for live messages.
    pub forwarded: u32,
    /// Messages drained from the local queue and broadcast.
    pub drained: u32,
    /// Net force added to the vertex this round.
    pub net_force: Vec2,
}

/// Folds an inbox into a vertex's force and keeps the flood moving.
///
/// Immutable once built, so one instance can be shared by every worker.
/// The run-level scalars are read from the [`RoundContext`] on every
/// call; the law instance built for the initial `k` is reused while `k`
/// stays put.
///
/// # Algorithm
///
/// For each message, in arrival order:
///
/// 1. Skip it if it comes from this vertex or from an origin already
///    analyzed this iteration.
/// 2. Accumulate attraction (only once the coordinate reset is done) and
///    repulsion from the message's position and degree.
/// 3. Mark the origin analyzed.
/// 4. If the message is live, report activity and forward its successor,
///    either straight to the neighbors or through the local queue.
///
/// Then subtract the Walshaw-scaled repulsion from the attraction, add
/// the result to the vertex force and flag the vertex as moving. With
/// queueing on, finally drain at most `ceil(ratio * edge_count)` queued
/// messages to the neighbors.
#[derive(Debug)]
pub struct Propagator {
    config: PropagatorConfig,
    law: Box<dyn ForceLaw>,
}

impl Propagator {
    /// Build a propagator, caching a law instance for `scalars.k`.
    pub fn new(config: &PropagatorConfig, scalars: &GlobalScalars) -> Self {
        Self {
            config: config.clone(),
            law: config.force_law.instantiate(scalars.k),
        }
    }

    /// The configuration this propagator was built with.
    pub fn config(&self) -> &PropagatorConfig {
        &self.config
    }

    /// The force law in use.
    pub fn law(&self) -> &dyn ForceLaw {
        self.law.as_ref()
    }

    /// Per-component weights for a separation: the direction cosine and
    /// sine when angle weighting is on, otherwise `[1, 1]`.
    fn weights(&self, sep: Separation) -> Vec2 {
        if !self.config.use_angle_weighting {
            return [1.0, 1.0];
        }
        let (distance, _) = sep.clamped();
        [sep.dx / distance, sep.dy / distance]
    }

    /// Run one superstep for one vertex.
    pub fn compute<I>(
        &self,
        ctx: &mut RoundContext<'_>,
        state: &mut LayoutVertexState,
        inbox: I,
    ) -> RoundReport
    where
        I: IntoIterator<Item = LayoutMessage>,
    {
        let mut report = RoundReport::default();
        let own = ctx.vertex();
        let deg_self = state.effective_degree(ctx.edge_count());
        let scalars = ctx.scalars();
        let rebuilt;
        let law: &dyn ForceLaw = if scalars.k == self.law.ideal_length() {
            self.law.as_ref()
        } else {
            rebuilt = self.config.force_law.instantiate(scalars.k);
            rebuilt.as_ref()
        };

        let mut attraction: Vec2 = [0.0, 0.0];
        let mut repulsion: Vec2 = [0.0, 0.0];

        for message in inbox {
            let origin = message.origin();
            if origin == own || state.is_analyzed(origin) {
                trace!(vertex = %own, origin = %origin, "skipping seen origin");
                report.skipped += 1;
                continue;
            }

            let sep = Separation::between(state.position(), message.position())
                .or_towards(tiebreak_angle(own, origin));
            let deg_peer = message.degree();
            let [wx, wy] = self.weights(sep);

            if state.is_reset_done() {
                let f = law.attractive(sep, deg_self, deg_peer);
                attraction = add(attraction, [f[0] * wx, f[1] * wy]);
            }
            let f = law.repulsive(sep, deg_self, deg_peer);
            repulsion = add(repulsion, [f[0] * wx, f[1] * wy]);

            state.analyze(origin);
            report.folded += 1;

            if let Some(successor) = message.propagate() {
                ctx.report_activity();
                if self.config.use_message_queues {
                    state.enqueue(successor);
                } else {
                    ctx.send_to_neighbors(successor);
                }
                report.forwarded += 1;
            }
        }

        let net = sub(attraction, scale(repulsion, scalars.walshaw_constant));
        state.add_force(net);
        state.set_moving();
        report.net_force = net;

        if !self.config.use_message_queues {
            return report;
        }

        let budget = self.config.drain_budget(ctx.edge_count());
        let drained: Vec<LayoutMessage> = state.dequeue(budget).collect();
        for message in drained {
            ctx.report_activity();
            ctx.send_to_neighbors(message);
            report.drained += 1;
        }
        if report.drained > 0 {
            trace!(
                vertex = %own,
                drained = report.drained,
                remaining = state.queued(),
                "drained local queue"
            );
        }
        report
    }
}

/// Direction from `own` towards `origin` when the two coincide.
///
/// Both endpoints derive the same axis from the unordered id pair and
/// face opposite ways along it, so the pair separates symmetrically.
fn tiebreak_angle(own: VertexId, origin: VertexId) -> f32 {
    let (lo, hi) = if own < origin { (own, origin) } else { (origin, own) };
    let mixed = (lo.0 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (hi.0 as u64).rotate_left(29).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    let angle = (mixed >> 40) as f32 / (1u64 << 24) as f32 * TAU;
    if own < origin {
        angle
    } else {
        angle + PI
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Outgoing, Target};
    use sprawl_core::{SuperstepId, VertexId};
    use sprawl_force::ForceLawKind;
    use sprawl_test_utils::{approx_eq, live_message, zombie_message};

    struct Harness {
        outbox: Vec<Outgoing>,
        active: bool,
        scalars: GlobalScalars,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                outbox: Vec::new(),
                active: false,
                scalars: GlobalScalars::default(),
            }
        }

        fn run(
            &mut self,
            prop: &Propagator,
            vertex: i64,
            edge_count: u32,
            state: &mut LayoutVertexState,
            inbox: Vec<LayoutMessage>,
        ) -> RoundReport {
            let mut ctx = RoundContext::new(
                VertexId(vertex),
                edge_count,
                SuperstepId(1),
                self.scalars,
                &mut self.outbox,
                &mut self.active,
            );
            prop.compute(&mut ctx, state, inbox)
        }
    }

    fn reset_state(position: Vec2) -> LayoutVertexState {
        let mut s = LayoutVertexState::new(position);
        s.mark_reset_done();
        s
    }

    fn default_propagator() -> Propagator {
        Propagator::new(&PropagatorConfig::default(), &GlobalScalars::default())
    }

    #[test]
    fn three_four_five_net_force() {
        let prop = default_propagator();
        let mut h = Harness::new();
        let mut state = reset_state([0.0, 0.0]);
        let report = h.run(&prop, 1, 2, &mut state, vec![live_message(2, [3.0, 4.0], 2, 3)]);

        assert!(approx_eq(state.force(), [7.38, 9.84], 1e-4));
        assert!(state.is_moving());
        assert!(state.is_analyzed(VertexId(2)));
        assert_eq!(report.folded, 1);
        assert_eq!(report.forwarded, 1);
        assert!(h.active);
        assert_eq!(h.outbox.len(), 1);
        assert_eq!(h.outbox[0].target, Target::Neighbors);
        assert_eq!(h.outbox[0].message.ttl(), 2);
        assert_eq!(h.outbox[0].message.origin(), VertexId(2));
    }

    #[test]
    fn repulsion_only_before_reset() {
        let prop = default_propagator();
        let mut h = Harness::new();
        let mut state = LayoutVertexState::new([0.0, 0.0]);
        h.run(&prop, 1, 2, &mut state, vec![live_message(2, [3.0, 4.0], 2, 3)]);
        assert!(approx_eq(state.force(), [-0.12, -0.16], 1e-5));
    }

    #[test]
    fn walshaw_is_read_from_the_round_context() {
        let prop = default_propagator();
        let mut h = Harness::new();
        h.scalars.walshaw_constant = 2.0;
        let mut state = LayoutVertexState::new([0.0, 0.0]);
        h.run(&prop, 1, 2, &mut state, vec![live_message(2, [3.0, 4.0], 2, 3)]);
        assert!(approx_eq(state.force(), [-0.24, -0.32], 1e-5));
    }

    #[test]
    fn ideal_length_is_read_from_the_round_context() {
        let prop = default_propagator();
        let mut h = Harness::new();
        h.scalars.k = 2.0;
        let mut state = LayoutVertexState::new([0.0, 0.0]);
        h.run(&prop, 1, 2, &mut state, vec![live_message(2, [3.0, 4.0], 2, 3)]);
        // k^2 / d = 4 / 5 along [0.6, 0.8]
        assert!(approx_eq(state.force(), [-0.48, -0.64], 1e-5));

        // Back to the k the law was built with.
        h.scalars.k = 1.0;
        let mut state = LayoutVertexState::new([0.0, 0.0]);
        h.run(&prop, 1, 2, &mut state, vec![live_message(2, [3.0, 4.0], 2, 3)]);
        assert!(approx_eq(state.force(), [-0.12, -0.16], 1e-5));
    }

    #[test]
    fn stacked_vertices_push_apart() {
        let prop = default_propagator();
        let mut h = Harness::new();
        let mut a = LayoutVertexState::new([2.0, 2.0]);
        let mut b = LayoutVertexState::new([2.0, 2.0]);
        h.run(&prop, 1, 1, &mut a, vec![live_message(2, [2.0, 2.0], 1, 0)]);
        h.run(&prop, 2, 1, &mut b, vec![live_message(1, [2.0, 2.0], 1, 0)]);
        let (fa, fb) = (a.force(), b.force());
        assert!(fa[0].is_finite() && fa[1].is_finite());
        assert!(fa[0].hypot(fa[1]) > 1.0);
        // Equal and opposite.
        let scale = fa[0].hypot(fa[1]);
        assert!((fa[0] + fb[0]).abs() / scale < 1e-4);
        assert!((fa[1] + fb[1]).abs() / scale < 1e-4);
    }

    #[test]
    fn stacked_direction_is_deterministic() {
        let prop = default_propagator();
        let mut h = Harness::new();
        let mut a = LayoutVertexState::new([0.0, 0.0]);
        let mut b = LayoutVertexState::new([0.0, 0.0]);
        h.run(&prop, 5, 1, &mut a, vec![live_message(9, [0.0, 0.0], 1, 0)]);
        h.run(&prop, 5, 1, &mut b, vec![live_message(9, [0.0, 0.0], 1, 0)]);
        assert_eq!(a.force(), b.force());
    }

    #[test]
    fn own_and_repeated_origins_are_skipped() {
        let prop = default_propagator();
        let mut h = Harness::new();
        let mut state = reset_state([0.0, 0.0]);
        let inbox = vec![
            live_message(1, [5.0, 5.0], 1, 3),
            live_message(2, [3.0, 4.0], 2, 3),
            live_message(2, [9.0, 9.0], 2, 2),
        ];
        let report = h.run(&prop, 1, 2, &mut state, inbox);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.folded, 1);
        assert!(approx_eq(state.force(), [7.38, 9.84], 1e-4));
        assert!(!state.is_analyzed(VertexId(1)));
    }

    #[test]
    fn second_delivery_is_idempotent() {
        let prop = default_propagator();
        let mut h = Harness::new();
        let mut state = reset_state([0.0, 0.0]);
        let m = live_message(2, [3.0, 4.0], 2, 3);
        h.run(&prop, 1, 2, &mut state, vec![m]);
        let after_first = state.force();
        let sent = h.outbox.len();

        let report = h.run(&prop, 1, 2, &mut state, vec![m]);
        assert_eq!(state.force(), after_first);
        assert_eq!(report.net_force, [0.0, 0.0]);
        assert_eq!(h.outbox.len(), sent);
    }

    #[test]
    fn zombie_folds_but_does_not_forward() {
        let prop = default_propagator();
        let mut h = Harness::new();
        let mut state = reset_state([0.0, 0.0]);
        let report = h.run(
            &prop,
            1,
            2,
            &mut state,
            vec![zombie_message(2, [3.0, 4.0], 2), live_message(3, [0.0, 1.0], 1, 0)],
        );
        assert_eq!(report.folded, 2);
        assert_eq!(report.forwarded, 0);
        assert!(h.outbox.is_empty());
        assert!(!h.active);
        assert!(state.is_analyzed(VertexId(2)));
        assert!(state.is_analyzed(VertexId(3)));
    }

    #[test]
    fn empty_inbox_still_marks_moving() {
        let prop = default_propagator();
        let mut h = Harness::new();
        let mut state = reset_state([0.0, 0.0]);
        let report = h.run(&prop, 1, 0, &mut state, Vec::new());
        assert_eq!(report, RoundReport::default());
        assert!(state.is_moving());
        assert!(!h.active);
    }

    #[test]
    fn queueing_defers_and_drains_by_ratio() {
        let config = PropagatorConfig {
            use_message_queues: true,
            queue_flush_ratio: 0.5,
            ..Default::default()
        };
        let prop = Propagator::new(&config, &GlobalScalars::default());
        let mut h = Harness::new();
        let mut state = reset_state([0.0, 0.0]);
        let inbox: Vec<_> = (10..15)
            .map(|id| live_message(id, [id as f32, 1.0], 1, 3))
            .collect();

        // edge_count 2 -> budget ceil(0.5 * 2) = 1
        let report = h.run(&prop, 1, 2, &mut state, inbox);
        assert_eq!(report.forwarded, 5);
        assert_eq!(report.drained, 1);
        assert_eq!(h.outbox.len(), 1);
        assert_eq!(h.outbox[0].message.origin(), VertexId(10));
        assert_eq!(state.queued(), 4);

        let report = h.run(&prop, 1, 2, &mut state, Vec::new());
        assert_eq!(report.drained, 1);
        assert_eq!(h.outbox[1].message.origin(), VertexId(11));
        assert!(h.active);
    }

    #[test]
    fn zero_edge_vertex_never_drains() {
        let config = PropagatorConfig {
            use_message_queues: true,
            ..Default::default()
        };
        let prop = Propagator::new(&config, &GlobalScalars::default());
        let mut h = Harness::new();
        let mut state = reset_state([0.0, 0.0]);
        let report = h.run(&prop, 1, 0, &mut state, vec![live_message(2, [1.0, 1.0], 1, 2)]);
        assert_eq!(report.drained, 0);
        assert_eq!(state.queued(), 1);
        assert!(h.outbox.is_empty());
    }

    #[test]
    fn angle_weighting_scales_components() {
        let config = PropagatorConfig {
            use_angle_weighting: true,
            ..Default::default()
        };
        let prop = Propagator::new(&config, &GlobalScalars::default());
        let mut h = Harness::new();
        let mut state = reset_state([0.0, 0.0]);
        h.run(&prop, 1, 2, &mut state, vec![live_message(2, [3.0, 4.0], 2, 3)]);
        // [7.38 * 0.6, 9.84 * 0.8]
        assert!(approx_eq(state.force(), [4.428, 7.872], 1e-4));
    }

    #[test]
    fn angle_weighting_survives_coincident_points() {
        let config = PropagatorConfig {
            use_angle_weighting: true,
            ..Default::default()
        };
        let prop = Propagator::new(&config, &GlobalScalars::default());
        let mut h = Harness::new();
        let mut state = reset_state([2.0, 2.0]);
        h.run(&prop, 1, 1, &mut state, vec![live_message(2, [2.0, 2.0], 1, 1)]);
        let f = state.force();
        assert!(f[0].is_finite() && f[1].is_finite());
    }

    #[test]
    fn every_law_produces_finite_forces() {
        for kind in ForceLawKind::ALL {
            let config = PropagatorConfig {
                force_law: kind,
                ..Default::default()
            };
            let prop = Propagator::new(&config, &GlobalScalars::default());
            assert_eq!(prop.law().name(), kind.name());
            let mut h = Harness::new();
            let mut state = reset_state([0.0, 0.0]);
            let inbox = vec![
                live_message(2, [0.0, 0.0], 3, 1),
                live_message(3, [1e3, -1e3], 1, 1),
            ];
            h.run(&prop, 1, 4, &mut state, inbox);
            let f = state.force();
            assert!(f[0].is_finite() && f[1].is_finite(), "{kind}");
        }
    }

    proptest::proptest! {
        #[test]
        fn drain_never_exceeds_budget(
            ratio in 0.01f32..=1.0,
            edge_count in 0u32..64,
            inbox_len in 0i64..40,
        ) {
            let config = PropagatorConfig {
                use_message_queues: true,
                queue_flush_ratio: ratio,
                ..Default::default()
            };
            let prop = Propagator::new(&config, &GlobalScalars::default());
            let mut h = Harness::new();
            let mut state = reset_state([0.0, 0.0]);
            let inbox: Vec<_> = (0..inbox_len)
                .map(|i| live_message(100 + i, [i as f32, 0.5], 1, 2))
                .collect();
            let report = h.run(&prop, 1, edge_count, &mut state, inbox);
            proptest::prop_assert!(report.drained as usize <= config.drain_budget(edge_count));
            proptest::prop_assert_eq!(
                report.drained as usize + state.queued(),
                inbox_len as usize
            );
        }

        #[test]
        fn redelivery_never_changes_force(
            x in -100f32..100.0,
            y in -100f32..100.0,
            degree in 0u32..16,
        ) {
            let prop = default_propagator();
            let mut h = Harness::new();
            let mut state = reset_state([0.0, 0.0]);
            let m = live_message(7, [x, y], degree, 3);
            h.run(&prop, 1, 3, &mut state, vec![m]);
            let once = state.force();
            h.run(&prop, 1, 3, &mut state, vec![m, m]);
            proptest::prop_assert_eq!(state.force(), once);
        }
    }
}
