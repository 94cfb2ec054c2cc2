//! Benchmarks the pure slot pipeline over a busy two-week calendar.

use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use slot_engine::window::PreferredHours;
use slot_engine::{rank_available_slots, EngineConfig, Event, SlotSearch, TimeInterval};
use std::hint::black_box;

fn busy_calendar(days: i64) -> Vec<Event> {
    let start = Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap();
    (0..days)
        .flat_map(|day| {
            [(9, 30), (11, 60), (14, 45), (16, 30)]
                .into_iter()
                .map(move |(hour, minutes)| {
                    let s = start + Duration::days(day) + Duration::hours(hour);
                    Event {
                        id: format!("d{}h{}", day, hour),
                        title: "Meeting".to_string(),
                        interval: TimeInterval {
                            start: s,
                            end: s + Duration::minutes(minutes),
                        },
                    }
                })
        })
        .collect()
}

fn bench_rank(c: &mut Criterion) {
    let start = Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap();
    let events = busy_calendar(14);
    let config = EngineConfig::default();
    let search = SlotSearch {
        duration_seconds: 30 * 60,
        range: TimeInterval {
            start,
            end: start + Duration::days(14),
        },
        preferred: PreferredHours::default(),
        buffer_seconds: 15 * 60,
    };

    c.bench_function("rank_two_weeks_30min", |b| {
        b.iter(|| rank_available_slots(black_box(&search), black_box(&events), &[], &config))
    });
}

criterion_group!(benches, bench_rank);
criterion_main!(benches);
