//! Event parsing benchmarks
//!
//! Measures single-event parsing and `;`-separated batches end to end
//! (split, parse, build URLs).

use std::hint::black_box;

use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use quick_event::{EventTextParser, QuickEvent};

const SAMPLES: [&str; 4] = [
    "Gym tomorrow 2pm",
    "Lunch next Tuesday at 1 d(discuss budget) l(Cafe)",
    "Team standup every Monday 9am",
    "Dentist Nov 3rd 2027 10:30am to 11:15am",
];

fn bench_parse_single(c: &mut Criterion) {
    let parser = EventTextParser::default();
    let now = Utc.with_ymd_and_hms(2026, 10, 20, 9, 0, 0).unwrap();
    let mut group = c.benchmark_group("parse_single");

    for (i, text) in SAMPLES.iter().enumerate() {
        group.bench_with_input(BenchmarkId::from_parameter(i), text, |b, text| {
            b.iter(|| parser.parse(black_box(text), now))
        });
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let quick = QuickEvent::default();
    let now = Utc.with_ymd_and_hms(2026, 10, 20, 9, 0, 0).unwrap();
    let mut group = c.benchmark_group("create_event_urls");

    for count in [1, 10, 50] {
        let text = SAMPLES
            .iter()
            .cycle()
            .take(count)
            .copied()
            .collect::<Vec<_>>()
            .join("; ");
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{count}_events")),
            &text,
            |b, text| b.iter(|| quick.create_event_urls(black_box(text), now)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_parse_single, bench_batch);
criterion_main!(benches);
