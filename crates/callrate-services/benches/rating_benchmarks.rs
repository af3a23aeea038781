//! Benchmarks for call cost calculation
//!
//! Run with: cargo bench --package callrate-services
//!
//! These benchmarks measure the window walk for calls of growing length.

use callrate_core::models::{CallSpan, RateConfig, RateDefinition};
use callrate_services::CallCostCalculator;
use chrono::{DateTime, Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn day_rate() -> RateDefinition {
    RateDefinition::try_from(RateConfig::default()).expect("default rate is valid")
}

fn call_start() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2017-12-12T21:57:13Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

/// Benchmark a short call inside one window
fn bench_short_call(c: &mut Criterion) {
    let rate = day_rate();
    let start = call_start() - Duration::hours(6);
    let span = CallSpan::new(start, start + Duration::minutes(7)).expect("ordered span");
    let calc = CallCostCalculator::new();

    c.bench_function("short_call_cost", |b| {
        b.iter(|| calc.cost(black_box(&span), black_box(&rate)));
    });
}

/// Benchmark calls spanning an increasing number of days
fn bench_multi_day_calls(c: &mut Criterion) {
    let rate = day_rate();
    let calc = CallCostCalculator::new();

    let mut group = c.benchmark_group("multi_day_call_cost");

    for days in [1i64, 7, 30].iter() {
        let span = CallSpan::new(call_start(), call_start() + Duration::days(*days))
            .expect("ordered span");

        group.throughput(Throughput::Elements(*days as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), days, |b, _| {
            b.iter(|| calc.cost(black_box(&span), black_box(&rate)));
        });
    }

    group.finish();
}

/// Benchmark the itemized breakdown against the plain total
fn bench_breakdown(c: &mut Criterion) {
    let rate = day_rate();
    let calc = CallCostCalculator::new();
    let span = CallSpan::new(call_start(), call_start() + Duration::days(1) + Duration::minutes(13))
        .expect("ordered span");

    c.bench_function("day_plus_call_breakdown", |b| {
        b.iter(|| calc.breakdown(black_box(&span), black_box(&rate)));
    });
}

criterion_group!(
    benches,
    bench_short_call,
    bench_multi_day_calls,
    bench_breakdown
);
criterion_main!(benches);
