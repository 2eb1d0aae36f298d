use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use emergency_paths::graph::generators::{generate_grid, generate_random_connected};
use emergency_paths::EmergencyRouter;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_original_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("original_path");

    for &side in &[10usize, 50, 100] {
        let graph = generate_grid(side, side);
        let finish = side * side - 1;
        group.bench_with_input(BenchmarkId::new("grid", side * side), &graph, |b, graph| {
            b.iter(|| EmergencyRouter::new(black_box(graph.clone()), 0, finish).unwrap())
        });
    }

    group.finish();
}

fn bench_path_failures(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_failures");
    let mut rng = StdRng::seed_from_u64(42);

    for &n in &[1_000usize, 10_000] {
        let graph = generate_random_connected(n, 2 * n, 100.0, &mut rng);
        let router = EmergencyRouter::new(graph, 0, n - 1).unwrap();
        let edges = router.original_path_edges();

        group.bench_with_input(BenchmarkId::new("parallel", n), &edges, |b, edges| {
            b.iter(|| router.emergency_reports(black_box(edges)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("sequential", n), &edges, |b, edges| {
            b.iter(|| {
                edges
                    .iter()
                    .map(|&edge| router.find_emergency_path(edge).unwrap())
                    .collect::<Vec<_>>()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_original_path, bench_path_failures);
criterion_main!(benches);
