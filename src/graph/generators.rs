use crate::graph::{Graph, MutableGraph, UndirectedGraph};
use ordered_float::OrderedFloat;
use rand::prelude::*;

/// Generates a `width * height` grid with unit weights and 4-connectivity
///
/// Node `y * width + x` sits at column `x`, row `y`.
///
/// # Panics
///
/// If `width * height` overflows `usize`.
pub fn generate_grid(width: usize, height: usize) -> UndirectedGraph<usize, OrderedFloat<f64>> {
    let node_count = width.checked_mul(height);
    assert!(node_count.is_some(), "{}x{} grid has too many nodes", width, height);
    let mut graph = UndirectedGraph::with_capacity(node_count.unwrap_or_default());

    for y in 0..height {
        for x in 0..width {
            let current = y * width + x;
            graph.add_node(current);

            if x + 1 < width {
                graph.add_edge(current, current + 1, OrderedFloat(1.0));
            }
            if y + 1 < height {
                graph.add_edge(current, current + width, OrderedFloat(1.0));
            }
        }
    }

    graph
}

/// Generates a connected random graph on nodes `0..n`
///
/// A random spanning tree guarantees connectivity; `extra_edges` further
/// random edges are then attempted (self-loops and duplicates are skipped, so
/// fewer may be added). Weights are drawn uniformly from `[1, max_weight)`.
pub fn generate_random_connected<R: Rng>(
    n: usize,
    extra_edges: usize,
    max_weight: f64,
    rng: &mut R,
) -> UndirectedGraph<usize, OrderedFloat<f64>> {
    assert!(max_weight > 1.0, "max_weight must be greater than 1");

    let mut graph = UndirectedGraph::with_capacity(n);
    if n == 0 {
        return graph;
    }
    graph.add_node(0);

    // Attach every new node to a random earlier one
    for v in 1..n {
        let u = rng.gen_range(0..v);
        graph.add_edge(u, v, OrderedFloat(rng.gen_range(1.0..max_weight)));
    }

    for _ in 0..extra_edges {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u != v && !graph.has_edge(u, v) {
            graph.add_edge(u, v, OrderedFloat(rng.gen_range(1.0..max_weight)));
        }
    }

    graph
}

/// Generates a random graph on nodes `0..n` where each pair is joined with probability `p`
///
/// Unlike [`generate_random_connected`] the result may be disconnected.
pub fn generate_gnp<R: Rng>(
    n: usize,
    p: f64,
    max_weight: f64,
    rng: &mut R,
) -> UndirectedGraph<usize, OrderedFloat<f64>> {
    let mut graph = UndirectedGraph::with_capacity(n);

    for u in 0..n {
        graph.add_node(u);
        for v in (u + 1)..n {
            if rng.gen_bool(p) {
                graph.add_edge(u, v, OrderedFloat(rng.gen_range(1.0..max_weight)));
            }
        }
    }

    graph
}
