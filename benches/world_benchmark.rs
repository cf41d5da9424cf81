/*
 * Firefly Simulation Benchmark
 *
 * This file contains benchmarks for the firefly simulation. It measures the
 * full update loop, the pairwise neighbor scan used by flash coupling, and
 * the synchrony metric, at several population sizes.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use fireflies::{SimulationParams, World};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn make_world(population: usize) -> World {
    let params = SimulationParams {
        population,
        seed: Some(0xF1F1),
        ..SimulationParams::default()
    };
    World::new(params, 1280.0, 800.0).expect("benchmark parameters are valid")
}

// Benchmark the overall update loop
fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for population in [100, 500, 1000, 2000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(population), population, |b, &n| {
            let mut world = make_world(n);
            b.iter(|| {
                world.tick(black_box(FRAME_MS));
            });
        });
    }

    group.finish();
}

// Benchmark a single neighbor query (one firing event)
fn bench_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbors");

    for population in [100, 500, 1000, 2000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(population), population, |b, &n| {
            let world = make_world(n);
            b.iter(|| black_box(world.neighbors(black_box(0))));
        });
    }

    group.finish();
}

// Benchmark the synchrony metric
fn bench_flash_deviation(c: &mut Criterion) {
    let mut group = c.benchmark_group("flash_deviation");

    for population in [100, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(population), population, |b, &n| {
            let world = make_world(n);
            b.iter(|| black_box(world.flash_deviation()));
        });
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_tick, bench_neighbors, bench_flash_deviation
}

criterion_main!(benches);
