//! Benchmarks for line-graph routing
//!
//! Run with: cargo bench -p lgr-route

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lgr_ir::{Circuit, QubitId};
use lgr_route::{CouplingGraph, RootGraph, route};

/// Circuit whose interactions are the line graph of the complete graph `K_n`.
#[allow(clippy::cast_possible_truncation)]
fn complete_root_circuit(n: usize) -> Circuit {
    let edges: Vec<(usize, usize)> = (0..n)
        .flat_map(|a| ((a + 1)..n).map(move |b| (a, b)))
        .collect();

    let mut circuit = Circuit::with_size("line_kn", edges.len() as u32);
    for (i, &(a, b)) in edges.iter().enumerate() {
        for (j, &(c, d)) in edges.iter().enumerate().skip(i + 1) {
            if a == c || a == d || b == c || b == d {
                circuit.cx(QubitId(i as u32), QubitId(j as u32)).unwrap();
            }
        }
    }
    circuit
}

/// Benchmark the full pipeline on chains
fn bench_route_ghz(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_ghz");

    for n in &[5u32, 20, 50, 100] {
        let circuit = Circuit::ghz(*n).unwrap();
        group.bench_with_input(BenchmarkId::new("ghz", n), &circuit, |b, circuit| {
            b.iter(|| route(black_box(circuit)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the full pipeline on all-to-all interactions
fn bench_route_qft(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_qft");

    for n in &[4u32, 8, 16] {
        let circuit = Circuit::qft(*n).unwrap();
        group.bench_with_input(BenchmarkId::new("qft", n), &circuit, |b, circuit| {
            b.iter(|| route(black_box(circuit)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark root-graph reconstruction alone
fn bench_inversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("inversion");

    for n in &[4usize, 6, 8, 10] {
        let circuit = complete_root_circuit(*n);
        let coupling = CouplingGraph::from_circuit(&circuit).unwrap();
        group.bench_with_input(BenchmarkId::new("line_kn", n), &coupling, |b, coupling| {
            b.iter(|| RootGraph::invert(black_box(coupling)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_route_ghz, bench_route_qft, bench_inversion);
criterion_main!(benches);
