//! Tests for slot ranking and truncation.

use chrono::{DateTime, Duration, TimeZone, Utc};
use slot_engine::ranker::{rank, DEFAULT_LIMIT};
use slot_engine::{ScoredSlot, TimeInterval};

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 17, hour, min, 0).unwrap()
}

fn scored(hour: u32, min: u32, score: u8) -> ScoredSlot {
    let start = at(hour, min);
    ScoredSlot {
        interval: TimeInterval::new(start, start + Duration::minutes(30)).unwrap(),
        score,
        reason: format!("score {}", score),
    }
}

#[test]
fn sorts_by_descending_score() {
    let ranked = rank(
        vec![scored(9, 0, 60), scored(10, 0, 90), scored(11, 0, 75)],
        DEFAULT_LIMIT,
    );
    let scores: Vec<u8> = ranked.iter().map(|s| s.score).collect();
    assert_eq!(scores, vec![90, 75, 60]);
}

#[test]
fn ties_go_to_the_earliest_start() {
    let ranked = rank(
        vec![scored(15, 0, 80), scored(9, 30, 80), scored(11, 0, 80)],
        DEFAULT_LIMIT,
    );
    let starts: Vec<DateTime<Utc>> = ranked.iter().map(|s| s.interval.start).collect();
    assert_eq!(starts, vec![at(9, 30), at(11, 0), at(15, 0)]);
}

#[test]
fn truncates_to_limit() {
    let slots: Vec<ScoredSlot> = (0..20).map(|i| scored(9, 0, i as u8)).collect();
    let ranked = rank(slots, DEFAULT_LIMIT);
    assert_eq!(ranked.len(), 10);
    assert_eq!(ranked[0].score, 19);
    assert_eq!(ranked[9].score, 10);
}

#[test]
fn fewer_slots_than_limit_are_all_kept() {
    assert_eq!(rank(vec![scored(9, 0, 50), scored(10, 0, 50)], 5).len(), 2);
    assert!(rank(Vec::new(), DEFAULT_LIMIT).is_empty());
}
