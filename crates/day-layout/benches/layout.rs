use std::hint::black_box;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use day_layout::{layout_day, RawEvent};

/// A busy booking day: staggered events with heavy overlap in the morning.
fn busy_day(n: usize) -> Vec<RawEvent> {
    let base = Utc.with_ymd_and_hms(2026, 3, 16, 6, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let start = base + Duration::minutes(((i * 37) % 1000) as i64);
            let end = start + Duration::minutes(30 + ((i * 13) % 150) as i64);
            RawEvent::new(format!("booking-{i}"), start, end)
        })
        .collect()
}

fn bench_layout_day(c: &mut Criterion) {
    let day = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
    let mut group = c.benchmark_group("layout_day");
    for n in [10, 50, 200] {
        let events = busy_day(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &events, |b, events| {
            b.iter(|| layout_day(black_box(events), black_box(day)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout_day);
criterion_main!(benches);
