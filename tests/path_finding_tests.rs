use emergency_paths::algorithm::dijkstra::Dijkstra;
use emergency_paths::algorithm::{Path, ShortestPathFinder};
use emergency_paths::graph::generators::{generate_gnp, generate_grid};
use emergency_paths::graph::{Graph, MutableGraph, UndirectedGraph};
use emergency_paths::Error;
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::time::Duration;

type Weight = OrderedFloat<f64>;

fn shortest<G: Graph<usize, Weight>>(graph: &G, start: usize, finish: usize) -> Option<Path<usize>> {
    <Dijkstra as ShortestPathFinder<usize, Weight>>::find_path(&Dijkstra::new(), graph, start, finish)
        .unwrap()
}

fn path_weight<G: Graph<usize, Weight>>(graph: &G, path: &Path<usize>) -> f64 {
    path.edges()
        .map(|(a, b)| graph.edge_weight(a, b).expect("path uses a missing edge").into_inner())
        .sum()
}

// Reference distances by repeated relaxation of every edge
fn bellman_ford(graph: &UndirectedGraph<usize, Weight>, start: usize) -> HashMap<usize, f64> {
    let mut dist = HashMap::new();
    dist.insert(start, 0.0);

    for _ in 0..graph.node_count() {
        let mut changed = false;
        for (a, b, weight) in graph.edges() {
            for (from, to) in [(a, b), (b, a)] {
                if let Some(&d) = dist.get(&from) {
                    let candidate = d + weight.into_inner();
                    if dist.get(&to).map_or(true, |&known| candidate < known) {
                        dist.insert(to, candidate);
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }

    dist
}

fn triangle() -> UndirectedGraph<usize, Weight> {
    UndirectedGraph::from_edges([
        (1, 2, OrderedFloat(2.0)),
        (2, 3, OrderedFloat(1.0)),
        (1, 3, OrderedFloat(6.0)),
    ])
}

#[test]
fn test_prefers_lighter_detour() {
    let graph = triangle();

    let path = shortest(&graph, 1, 3).expect("3 is reachable");
    assert_eq!(path.nodes(), &[1, 2, 3]);
    assert_eq!(path_weight(&graph, &path), 3.0);
    assert_eq!(path.to_string(), "1->2->3");
}

#[test]
fn test_start_equals_finish_is_single_node_path() {
    let graph = triangle();

    for node in 1..=3 {
        let path = shortest(&graph, node, node).expect("trivial path");
        assert_eq!(path.nodes(), &[node]);
        assert_eq!(path.hop_count(), 0);
        assert_eq!(path_weight(&graph, &path), 0.0);
    }
}

#[test]
fn test_missing_start_is_an_error() {
    let graph = triangle();

    let result = <Dijkstra as ShortestPathFinder<usize, Weight>>::find_path(&Dijkstra::new(), &graph, 42, 1);
    assert!(matches!(result, Err(Error::StartNotFound(node)) if node == "42"));
}

#[test]
fn test_missing_finish_is_not_found() {
    let graph = triangle();
    assert!(shortest(&graph, 1, 42).is_none());
}

#[test]
fn test_disconnected_component_is_not_found() {
    let mut graph = triangle();
    graph.add_edge(10, 11, OrderedFloat(1.0));
    graph.add_node(12);

    assert!(shortest(&graph, 1, 10).is_none());
    assert!(shortest(&graph, 11, 3).is_none());
    assert!(shortest(&graph, 1, 12).is_none());
    assert!(shortest(&graph, 10, 11).is_some());
}

#[test]
fn test_zero_weight_edges() {
    let graph = UndirectedGraph::from_edges([
        (0, 1, OrderedFloat(0.0)),
        (1, 2, OrderedFloat(0.0)),
        (0, 2, OrderedFloat(0.5)),
    ]);

    let path = shortest(&graph, 0, 2).unwrap();
    assert_eq!(path.nodes(), &[0, 1, 2]);
    assert_eq!(path_weight(&graph, &path), 0.0);
}

#[test]
fn test_grid_distance_is_manhattan() {
    let graph = generate_grid(10, 10);

    let path = shortest(&graph, 0, 99).unwrap();
    assert_eq!(path.start(), 0);
    assert_eq!(path.finish(), 99);
    assert_eq!(path.hop_count(), 18);
    assert_eq!(path_weight(&graph, &path), 18.0);
}

#[test]
fn test_matches_bellman_ford_on_random_graphs() {
    let mut rng = StdRng::seed_from_u64(7);

    for round in 0..40 {
        let graph = generate_gnp(12, 0.25, 20.0, &mut rng);
        let reference = bellman_ford(&graph, 0);

        for finish in 0..12 {
            match (shortest(&graph, 0, finish), reference.get(&finish)) {
                (Some(path), Some(&expected)) => {
                    assert_eq!(path.start(), 0);
                    assert_eq!(path.finish(), finish);
                    let found = path_weight(&graph, &path);
                    assert!(
                        (found - expected).abs() < 1e-9,
                        "round {}: distance to {} is {} but should be {}",
                        round, finish, found, expected
                    );
                }
                (None, None) => {}
                (found, expected) => panic!(
                    "round {}: reachability of {} disagrees: {:?} vs {:?}",
                    round, finish, found, expected
                ),
            }
        }
    }
}

#[test]
fn test_deadline_aborts_search() {
    let graph = generate_grid(100, 100);
    let finder = Dijkstra::new().with_deadline(Duration::from_nanos(1));

    let result = <Dijkstra as ShortestPathFinder<usize, Weight>>::find_path(&finder, &graph, 0, 9999);
    assert!(matches!(result, Err(Error::SearchTimedOut(_))));

    // The trivial path never enters the search loop
    let trivial = <Dijkstra as ShortestPathFinder<usize, Weight>>::find_path(&finder, &graph, 5, 5);
    assert_eq!(trivial.unwrap().unwrap().nodes(), &[5]);
}
