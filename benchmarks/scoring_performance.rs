use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use trust_firewall_server::firewall::{FirewallEngine, FirewallMode};
use trust_firewall_server::scoring::TrustScoreEngine;

const CLEAN_TEXT: &str = "The sky is blue and water is wet according to the reference material.";
const RISKY_TEXT: &str = "I think maybe it is probably false, could be rumored, not sure.";

/// Benchmark the full scoring pipeline on texts of increasing length
fn bench_aggregate(c: &mut Criterion) {
    let engine = TrustScoreEngine::new();

    let mut group = c.benchmark_group("aggregate");

    for word_count in [10usize, 100, 1_000, 10_000] {
        let text = CLEAN_TEXT
            .split_whitespace()
            .cycle()
            .take(word_count)
            .collect::<Vec<_>>()
            .join(" ");

        group.bench_with_input(
            BenchmarkId::new("words", word_count),
            &text,
            |b, text| {
                b.iter(|| black_box(engine.aggregate(black_box(text), "")));
            },
        );
    }

    group.finish();
}

/// Benchmark scoring with the context-overlap heuristic active
fn bench_aggregate_with_context(c: &mut Criterion) {
    let engine = TrustScoreEngine::new();

    c.bench_function("aggregate_with_context", |b| {
        b.iter(|| {
            black_box(engine.aggregate(black_box(RISKY_TEXT), black_box(CLEAN_TEXT)))
        });
    });
}

/// Benchmark the firewall decision on its own
fn bench_decide(c: &mut Criterion) {
    let firewall = FirewallEngine::new(FirewallMode::Balanced);

    c.bench_function("decide", |b| {
        b.iter(|| {
            for score in [0u32, 25, 50, 75, 100] {
                black_box(firewall.decide(black_box(RISKY_TEXT), score, FirewallMode::Strict));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_aggregate,
    bench_aggregate_with_context,
    bench_decide
);
criterion_main!(benches);
