//! Integration test: complete layout runs through the public API.
//!
//! Exercises the engine end to end over the standard fixtures:
//! determinism for a fixed seed, independence from the worker count,
//! satellite reintegration, and every force law and propagation mode
//! producing a finite drawing.

use sprawl_core::VertexId;
use sprawl_engine::{EngineConfig, LayoutEngine, LayoutGraph, LayoutResult};
use sprawl_force::ForceLawKind;
use sprawl_propagator::PropagatorConfig;
use sprawl_test_utils::{cycle, grid, is_finite, path, star, two_clusters, EdgeList};

fn run(edges: EdgeList, config: EngineConfig) -> LayoutResult {
    let mut engine = LayoutEngine::new(LayoutGraph::from_edges(edges), config).unwrap();
    engine.run().unwrap()
}

fn base() -> EngineConfig {
    EngineConfig {
        iterations: 8,
        seed: 7,
        ..Default::default()
    }
}

fn assert_finite(result: &LayoutResult) {
    for (id, p) in &result.positions {
        assert!(is_finite(*p), "vertex {id} at {p:?}");
    }
}

// ── Determinism ─────────────────────────────────────────────────────

#[test]
fn same_seed_same_drawing() {
    let a = run(grid(4, 4), base());
    let b = run(grid(4, 4), base());
    assert_eq!(a.positions, b.positions);
    assert_eq!(a.supersteps, b.supersteps);
}

#[test]
fn different_seed_different_drawing() {
    let a = run(grid(4, 4), base());
    let b = run(
        grid(4, 4),
        EngineConfig {
            seed: 8,
            ..base()
        },
    );
    assert_ne!(a.positions, b.positions);
}

#[test]
fn worker_count_does_not_change_drawing() {
    let single = run(two_clusters(5), base());
    for workers in [2, 3, 7, 16] {
        let multi = run(
            two_clusters(5),
            EngineConfig {
                worker_count: workers,
                ..base()
            },
        );
        assert_eq!(single.positions, multi.positions, "{workers} workers");
        assert_eq!(single.supersteps, multi.supersteps, "{workers} workers");
    }
}

// ── Drawing shape ───────────────────────────────────────────────────

#[test]
fn every_input_vertex_is_placed() {
    let edges = two_clusters(4);
    let expected = LayoutGraph::from_edges(edges.clone()).vertex_count();
    let result = run(edges, base());
    assert_eq!(result.positions.len(), expected);
    assert_finite(&result);
}

#[test]
fn bounding_box_contains_every_vertex() {
    let result = run(cycle(10), base());
    let bbox = result.bbox.unwrap();
    for p in result.positions.values() {
        assert!(bbox.contains(*p), "{p:?} outside {bbox:?}");
    }
}

#[test]
fn satellites_orbit_their_anchor_at_k() {
    let config = EngineConfig {
        k: 2.0,
        ..base()
    };
    // Hub 0 with six whiskers; the whiskers never enter the working graph.
    let result = run(star(6), config);
    assert_eq!(result.positions.len(), 7);
    let hub = result.positions[&VertexId(0)];
    for leaf in 1..=6 {
        let p = result.positions[&VertexId(leaf)];
        let d = ((p[0] - hub[0]).powi(2) + (p[1] - hub[1]).powi(2)).sqrt();
        assert!((d - 2.0).abs() < 1e-4, "leaf {leaf} at distance {d}");
    }
}

#[test]
fn positions_follow_input_order() {
    let result = run(path(5), base());
    let order: Vec<i64> = result.positions.keys().map(|v| v.0).collect();
    assert_eq!(order, vec![0, 1, 2, 3, 4]);
}

#[test]
fn pruning_can_be_disabled() {
    let config = EngineConfig {
        prune_satellites: false,
        ..base()
    };
    let mut engine = LayoutEngine::new(LayoutGraph::from_edges(star(4)), config).unwrap();
    assert_eq!(engine.graph().vertex_count(), 5);
    assert!(engine.satellites().is_empty());
    assert_finite(&engine.run().unwrap());
}

// ── Laws and modes ──────────────────────────────────────────────────

#[test]
fn every_force_law_produces_a_finite_drawing() {
    for law in ForceLawKind::ALL {
        let config = EngineConfig {
            propagator: PropagatorConfig {
                force_law: law,
                ..Default::default()
            },
            ..base()
        };
        assert_finite(&run(grid(3, 3), config));
    }
}

#[test]
fn angle_weighting_produces_a_finite_drawing() {
    let config = EngineConfig {
        propagator: PropagatorConfig {
            use_angle_weighting: true,
            ..Default::default()
        },
        ..base()
    };
    assert_finite(&run(two_clusters(4), config));
}

#[test]
fn queued_propagation_still_converges() {
    let config = EngineConfig {
        propagator: PropagatorConfig {
            use_message_queues: true,
            queue_flush_ratio: 1.0,
            ..Default::default()
        },
        iterations: 3,
        ..base()
    };
    let result = run(cycle(8), config);
    assert_eq!(result.converged_runs, 3);
    assert_finite(&result);
}

// ── Metrics and configuration ───────────────────────────────────────

#[test]
fn metrics_cover_every_superstep() {
    let result = run(cycle(6), base());
    assert_eq!(result.metrics.len() as u64, result.supersteps);
    let starts = result
        .metrics
        .iter()
        .filter(|m| m.superstep.is_first())
        .count();
    assert_eq!(starts as u32, result.iterations);
    // Every run ends on a quiet barrier or at the limit.
    let last = result.metrics.last().unwrap();
    assert!(!last.active || last.superstep.0 + 1 == base().max_supersteps);
}

#[test]
fn json_configured_run() {
    let config = EngineConfig::from_json(
        r#"{
            "iterations": 4,
            "workerCount": 2,
            "ttl": 2,
            "propagator": { "forceLaw": "linlog", "queueFlushRatio": 0.5 }
        }"#,
    )
    .unwrap();
    let result = run(grid(3, 2), config);
    assert_eq!(result.iterations, 4);
    assert_finite(&result);
}

#[test]
fn unknown_law_falls_back_to_default() {
    let config = EngineConfig::from_json(r#"{ "propagator": { "forceLaw": "nope" } }"#).unwrap();
    assert_eq!(config.propagator.force_law, ForceLawKind::FruchtermanReingold);
}
