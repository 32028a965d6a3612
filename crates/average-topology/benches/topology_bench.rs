//! Benchmarks for average consensus topologies
//!
//! Measures performance of:
//! - single G(n, M) draws
//! - connected generation (rejection sampling included)
//! - connectivity checks

use average_topology::{Graph, TopologyGenerator};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Edge count at average degree 3, the same density as the 10-node default.
fn edges_for(nodes: usize) -> usize {
    nodes * 3 / 2
}

/// Benchmark one raw draw (may be disconnected)
fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("gnm_sample");

    for &nodes in &[10usize, 50, 100, 500] {
        let gen = TopologyGenerator::new(nodes, edges_for(nodes)).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        group.throughput(Throughput::Elements(edges_for(nodes) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &gen, |b, gen| {
            b.iter(|| gen.sample(black_box(&mut rng)))
        });
    }
    group.finish();
}

/// Benchmark connected generation at a density where rejection is rare
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_connected");

    for &nodes in &[10usize, 50, 100] {
        // log(n) average degree keeps the retry rate low
        let edges = (nodes as f64 * (nodes as f64).ln()).ceil() as usize;
        let gen = TopologyGenerator::new(nodes, edges).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &gen, |b, gen| {
            b.iter(|| gen.generate(black_box(&mut rng)))
        });
    }
    group.finish();
}

/// Benchmark BFS connectivity on rings
fn bench_is_connected(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_connected");

    for &nodes in &[10usize, 100, 1000, 10_000] {
        let ring = Graph::cycle(nodes).unwrap();
        group.throughput(Throughput::Elements(nodes as u64));
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &ring, |b, g| {
            b.iter(|| black_box(g).is_connected())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sample, bench_generate, bench_is_connected);
criterion_main!(benches);
