//! Standard graph shapes for engine and propagator tests.
//!
//! Every fixture is a plain undirected edge list over vertex ids
//! `0..n`. Each edge appears once; loaders are expected to symmetrize.
//!
//! - [`path`]: `0 - 1 - ... - (n-1)`.
//! - [`cycle`]: a path closed back to `0`.
//! - [`star`]: hub `0` with `leaves` degree-one spokes.
//! - [`grid`]: `w x h` lattice, row-major ids.
//! - [`two_clusters`]: two cliques joined by one bridge edge.

/// Undirected edges as `(a, b)` pairs of raw vertex ids.
pub type EdgeList = Vec<(i64, i64)>;

pub fn path(n: i64) -> EdgeList {
    (1..n).map(|i| (i - 1, i)).collect()
}

pub fn cycle(n: i64) -> EdgeList {
    let mut edges = path(n);
    if n > 2 {
        edges.push((n - 1, 0));
    }
    edges
}

pub fn star(leaves: i64) -> EdgeList {
    (1..=leaves).map(|leaf| (0, leaf)).collect()
}

pub fn grid(w: i64, h: i64) -> EdgeList {
    let mut edges = Vec::new();
    for y in 0..h {
        for x in 0..w {
            let id = y * w + x;
            if x + 1 < w {
                edges.push((id, id + 1));
            }
            if y + 1 < h {
                edges.push((id, id + w));
            }
        }
    }
    edges
}

/// Two cliques of `size` vertices (`0..size` and `size..2*size`) joined
/// by the edge `(size - 1, size)`.
pub fn two_clusters(size: i64) -> EdgeList {
    let mut edges = Vec::new();
    for offset in [0, size] {
        for a in 0..size {
            for b in (a + 1)..size {
                edges.push((offset + a, offset + b));
            }
        }
    }
    if size > 0 {
        edges.push((size - 1, size));
    }
    edges
}
