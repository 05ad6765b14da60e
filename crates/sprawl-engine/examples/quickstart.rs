//! Sprawl quickstart: lay out a small graph end to end.
//!
//! Demonstrates:
//!   1. Building a graph from an edge list
//!   2. Loading an EngineConfig from JSON
//!   3. Stepping iterations by hand and reading per-iteration reports
//!   4. Collecting the final drawing, satellites included
//!
//! Run with:
//!   cargo run --example quickstart

use sprawl_engine::{EngineConfig, LayoutEngine, LayoutGraph};

// ─── Graph: two triangles joined by a bridge, plus whiskers ─────

const EDGES: &[(i64, i64)] = &[
    (0, 1),
    (1, 2),
    (2, 0),
    (3, 4),
    (4, 5),
    (5, 3),
    (2, 3),
    // Degree-one whiskers, folded into their anchors during layout.
    (0, 10),
    (0, 11),
    (5, 12),
];

const CONFIG: &str = r#"{
    "ttl": 3,
    "k": 1.5,
    "iterations": 30,
    "workerCount": 2,
    "seed": 42,
    "initialTemperature": 2.0,
    "coolingFactor": 0.9,
    "propagator": { "forceLaw": "fruchterman-reingold" }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build the graph.
    let graph = LayoutGraph::from_edges(EDGES.iter().copied());
    println!(
        "Graph: {} vertices, {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );

    // 2. Load the configuration.
    let config = EngineConfig::from_json(CONFIG)?;
    println!(
        "Config: law={}, ttl={}, workers={}",
        config.propagator.force_law, config.ttl, config.worker_count
    );

    // 3. Create the engine and step the first few iterations by hand.
    let mut engine = LayoutEngine::new(graph, config)?;
    println!(
        "Working graph: {} vertices ({} satellites pruned)\n",
        engine.graph().vertex_count(),
        engine.satellites().len()
    );
    for _ in 0..5 {
        let report = engine.step_iteration()?;
        println!(
            "  iteration {:>2}: supersteps={}, converged={}, moved={}, temperature={:.3}",
            report.iteration, report.supersteps, report.converged, report.moved, report.temperature,
        );
    }

    // 4. Run the rest and print the drawing.
    let result = engine.run()?;
    println!(
        "\nFinished: {} iterations, {} supersteps, {} converged runs",
        result.iterations, result.supersteps, result.converged_runs
    );
    for (id, [x, y]) in &result.positions {
        println!("  vertex {id:>3}: ({x:>7.3}, {y:>7.3})");
    }
    if let Some(bbox) = result.bbox {
        println!("Bounding box: {:.3} x {:.3}", bbox.width(), bbox.height());
    }
    Ok(())
}
