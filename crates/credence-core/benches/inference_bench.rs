//! # Inference Benchmarks
//!
//! Performance benchmarks for the credence-core inference engine.
//!
//! Run with: `cargo bench -p credence-core`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use credence_core::{
    Caller, ConceptBase, ConceptId, Fraction, InferenceQuery, Metadata, PrincipalId, Timestamp,
    primitives::IS_A,
};
use std::hint::black_box;

fn caller() -> Caller {
    Caller::new(PrincipalId::new("bench"), Timestamp(0))
}

/// A chain `N0 IS-A N1 IS-A ... IS-A N(size-1)` with decaying probability.
fn create_chain(size: usize) -> (ConceptBase, ConceptId) {
    let mut base = ConceptBase::new();
    base.bootstrap().expect("bootstrap");
    let who = caller();
    let ids: Vec<ConceptId> = (0..size)
        .map(|i| {
            base.create_concept(&who, format!("N{i}"), None, Metadata::new())
                .expect("concept")
        })
        .collect();
    for pair in ids.windows(2) {
        base.assert_relationship(&who, pair[0], pair[1], IS_A, (99, 100), (1, 1), Metadata::new())
            .expect("assert");
    }
    (base, ids[0])
}

/// A hub with `size - 1` spokes, each spoke chaining one further hop.
fn create_fanout(size: usize) -> (ConceptBase, ConceptId) {
    let mut base = ConceptBase::new();
    base.bootstrap().expect("bootstrap");
    let who = caller();
    let hub = base
        .create_concept(&who, "hub".to_string(), None, Metadata::new())
        .expect("concept");
    for i in 1..size {
        let spoke = base
            .create_concept(&who, format!("S{i}"), None, Metadata::new())
            .expect("concept");
        let leaf = base
            .create_concept(&who, format!("L{i}"), None, Metadata::new())
            .expect("concept");
        base.assert_relationship(&who, hub, spoke, IS_A, (9, 10), (1, 1), Metadata::new())
            .expect("assert");
        base.assert_relationship(&who, spoke, leaf, IS_A, (9, 10), (1, 1), Metadata::new())
            .expect("assert");
    }
    (base, hub)
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_chain_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_inference");

    for size in [10, 50, 100].iter() {
        let (base, start) = create_chain(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let results = base
                    .infer_relationships(&InferenceQuery::from_concept(start))
                    .expect("infer");
                black_box(results)
            });
        });
    }

    group.finish();
}

fn bench_fanout_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("fanout_inference");

    for size in [10, 100, 500].iter() {
        let (base, hub) = create_fanout(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let results = base
                    .infer_relationships(&InferenceQuery::from_concept(hub))
                    .expect("infer");
                black_box(results)
            });
        });
    }

    group.finish();
}

fn bench_thresholded_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("thresholded_inference");

    let (base, start) = create_chain(100);
    let query = InferenceQuery {
        start,
        relationship_type: Some(IS_A),
        max_depth: None,
        min_probability: Some(Fraction::new(1, 2).expect("fraction")),
        min_confidence: None,
    };
    group.bench_function("chain_100_min_probability", |b| {
        b.iter(|| {
            let results = base.infer_relationships(&query).expect("infer");
            black_box(results)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_chain_inference,
    bench_fanout_inference,
    bench_thresholded_inference
);
criterion_main!(benches);
