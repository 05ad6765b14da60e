//! Benchmark profiles and utilities for the Sprawl layout framework.
//!
//! Provides pre-built graph and configuration profiles:
//!
//! - [`reference_profile`]: 20x20 grid (400 vertices), default law, 4 workers
//! - [`sparse_profile`]: seeded random sparse graph with whiskers
//! - [`random_edges`]: deterministic random edge list via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sprawl_engine::{EngineConfig, LayoutGraph};
use sprawl_test_utils::{grid, EdgeList};

/// Reference profile: 20x20 grid, ttl 3, 5 iterations, 4 workers.
pub fn reference_profile(seed: u64) -> (LayoutGraph, EngineConfig) {
    let config = EngineConfig {
        iterations: 5,
        worker_count: 4,
        seed,
        ..Default::default()
    };
    (LayoutGraph::from_edges(grid(20, 20)), config)
}

/// Sparse profile: `n` vertices joined by a random spanning chain plus
/// `extra` random chords, so roughly a fifth of the vertices end up as
/// degree-one whiskers.
pub fn sparse_profile(n: i64, extra: usize, seed: u64) -> (LayoutGraph, EngineConfig) {
    let config = EngineConfig {
        iterations: 5,
        worker_count: 4,
        seed,
        ..Default::default()
    };
    (LayoutGraph::from_edges(random_edges(n, extra, seed)), config)
}

/// Deterministic random edge list over ids `0..n`.
///
/// Every vertex `i > 0` attaches to a random earlier vertex, which keeps
/// the graph connected; `extra` further random edges follow. Self-loops
/// and duplicates may appear and are dropped by the graph loader.
pub fn random_edges(n: i64, extra: usize, seed: u64) -> EdgeList {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut edges: EdgeList = (1..n).map(|i| (rng.random_range(0..i), i)).collect();
    if n > 1 {
        for _ in 0..extra {
            edges.push((rng.random_range(0..n), rng.random_range(0..n)));
        }
    }
    edges
}
