use emergency_paths::data_structures::DistanceQueue;
use emergency_paths::graph::generators::{generate_grid, generate_random_connected};
use emergency_paths::graph::{Graph, MutableGraph, UndirectedGraph, WithoutEdge};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn square() -> UndirectedGraph<u32, OrderedFloat<f64>> {
    UndirectedGraph::from_edges([
        (1, 2, OrderedFloat(1.0)),
        (2, 3, OrderedFloat(1.0)),
        (3, 4, OrderedFloat(1.0)),
        (4, 1, OrderedFloat(1.0)),
    ])
}

#[test]
fn test_edges_are_symmetric() {
    let graph = square();

    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 4);
    assert!(graph.has_edge(1, 4));
    assert!(graph.has_edge(4, 1));
    assert!(!graph.has_edge(1, 3));

    let mut neighbors: Vec<u32> = graph.neighbors(1).map(|(n, _)| n).collect();
    neighbors.sort();
    assert_eq!(neighbors, vec![2, 4]);
    assert_eq!(graph.edges().count(), 4);
}

#[test]
fn test_remove_edge_keeps_nodes() {
    let mut graph = square();

    assert!(graph.remove_edge(2, 1));
    assert!(!graph.remove_edge(1, 2));
    assert_eq!(graph.edge_count(), 3);
    assert!(graph.has_node(1));
    assert!(graph.has_node(2));
    assert_eq!(graph.neighbors(1).count(), 1);
}

#[test]
fn test_rejects_negative_and_nan_weights() {
    let mut graph = square();

    assert!(!graph.add_edge(1, 3, OrderedFloat(-0.5)));
    assert!(!graph.add_edge(1, 3, OrderedFloat(f64::NAN)));
    assert!(!graph.has_edge(1, 3));
    assert!(graph.validate_non_negative());
}

#[test]
fn test_without_edge_hides_both_directions() {
    let graph = square();
    let view = WithoutEdge::new(&graph, (2, 1));

    assert_eq!(view.removed_edge(), (2, 1));
    assert!(!view.has_edge(1, 2));
    assert!(!view.has_edge(2, 1));
    assert_eq!(view.edge_weight(1, 2), None);
    assert_eq!(view.edge_count(), 3);
    assert_eq!(view.node_count(), 4);
    assert_eq!(view.neighbors(1).map(|(n, _)| n).collect::<Vec<_>>(), vec![4]);

    // The underlying graph still has the edge
    assert!(graph.has_edge(1, 2));
}

#[test]
fn test_without_missing_edge_changes_nothing() {
    let graph = square();
    let view = WithoutEdge::new(&graph, (1, 3));

    assert_eq!(view.edge_count(), graph.edge_count());
    for node in graph.nodes() {
        assert_eq!(view.neighbors(node).count(), graph.neighbors(node).count());
    }
}

#[test]
fn test_grid_shape() {
    let graph = generate_grid(4, 3);

    assert_eq!(graph.node_count(), 12);
    assert_eq!(graph.edge_count(), 3 * 3 + 4 * 2);
    assert!(graph.has_edge(0, 1));
    assert!(graph.has_edge(0, 4));
    assert!(!graph.has_edge(3, 4));
}

#[test]
#[should_panic(expected = "too many nodes")]
fn test_overflowing_grid_panics_up_front() {
    generate_grid(usize::MAX, 2);
}

#[test]
fn test_random_connected_graph_spans_all_nodes() {
    let mut rng = StdRng::seed_from_u64(1);
    let graph = generate_random_connected(30, 20, 5.0, &mut rng);

    assert_eq!(graph.node_count(), 30);
    assert!(graph.edge_count() >= 29);
    assert!(graph.validate_non_negative());
}

#[test]
fn test_distance_queue_pops_smallest_first() {
    let mut queue = DistanceQueue::new();
    queue.push(3u32, OrderedFloat(5.0));
    queue.push(1u32, OrderedFloat(2.0));
    queue.push(2u32, OrderedFloat(2.0));

    let settled = HashSet::new();
    assert_eq!(queue.len(), 3);
    assert_eq!(queue.pop_unsettled(&settled), Some((1, OrderedFloat(2.0))));
    assert_eq!(queue.pop_unsettled(&settled), Some((2, OrderedFloat(2.0))));
    assert_eq!(queue.pop_unsettled(&settled), Some((3, OrderedFloat(5.0))));
    assert!(queue.is_empty());
    assert_eq!(queue.pop_unsettled(&settled), None);
    assert_eq!(queue.stale_pops(), 0);
}

#[test]
fn test_distance_queue_skips_settled_entries() {
    let mut queue = DistanceQueue::new();
    queue.push(7u32, OrderedFloat(9.0));
    queue.push(7u32, OrderedFloat(4.0));
    queue.push(8u32, OrderedFloat(6.0));

    let mut settled = HashSet::new();
    assert_eq!(queue.pop_unsettled(&settled), Some((7, OrderedFloat(4.0))));
    settled.insert(7u32);

    // The older entry for 7 is dropped once 7 is settled
    assert_eq!(queue.pop_unsettled(&settled), Some((8, OrderedFloat(6.0))));
    settled.insert(8u32);
    assert_eq!(queue.pop_unsettled(&settled), None);
    assert_eq!(queue.stale_pops(), 1);
}
