//! Score a candidate slot from 0 to 100 and explain the score.
//!
//! The score is a base value plus three additive bonuses, clamped at the end:
//!
//! | Signal | Condition (UTC) | Default bonus |
//! |--------|-----------------|---------------|
//! | time of day | start hour in `[9, 12)` | +30 |
//! | | start hour in `[13, 15)` | +20 |
//! | | start hour in `[15, 17)` | +10 |
//! | spacing | nearest owner event more than 1 h away | +20 |
//! | | nearest owner event more than 30 min away | +10 |
//! | weekday | Tuesday to Thursday | +10 |
//! | | Friday | +5 |
//!
//! Scoring only looks at the owner's events; participant busy data acts purely
//! as a filter.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::types::{Event, TimeInterval};
use crate::window::{utc_hour, utc_weekday};

const MORNING_REASON: &str = "optimal morning time";
const AFTERNOON_REASON: &str = "good afternoon slot";
const MIDWEEK_REASON: &str = "mid-week";
const NO_REASON: &str = "outside preferred hours";

const WIDE_GAP_SECONDS: i64 = 3_600;
const NARROW_GAP_SECONDS: i64 = 1_800;

/// Weights for each scoring signal. Defaults reproduce the production heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub base: i32,
    /// Start hour in `[9, 12)`.
    pub morning: i32,
    /// Start hour in `[13, 15)`.
    pub early_afternoon: i32,
    /// Start hour in `[15, 17)`.
    pub late_afternoon: i32,
    /// Nearest event more than an hour away.
    pub wide_gap: i32,
    /// Nearest event more than half an hour away.
    pub narrow_gap: i32,
    /// Tuesday, Wednesday, Thursday.
    pub midweek: i32,
    pub friday: i32,
}

impl ScoringWeights {
    /// Each weight as `(name, value)`, for validation and diagnostics.
    pub fn entries(&self) -> [(&'static str, i32); 8] {
        [
            ("base", self.base),
            ("morning", self.morning),
            ("early_afternoon", self.early_afternoon),
            ("late_afternoon", self.late_afternoon),
            ("wide_gap", self.wide_gap),
            ("narrow_gap", self.narrow_gap),
            ("midweek", self.midweek),
            ("friday", self.friday),
        ]
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: 50,
            morning: 30,
            early_afternoon: 20,
            late_afternoon: 10,
            wide_gap: 20,
            narrow_gap: 10,
            midweek: 10,
            friday: 5,
        }
    }
}

/// Smallest gap in seconds between `interval` and any owner event that does
/// not overlap it, or `None` when no such event exists.
///
/// Events ending at or before the slot contribute `slot.start - event.end`;
/// events starting at or after the slot contribute `event.start - slot.end`.
pub fn min_gap_seconds(interval: &TimeInterval, events: &[Event]) -> Option<i64> {
    let slot_start = interval.start.timestamp();
    let slot_end = interval.end.timestamp();

    let before = events
        .iter()
        .map(|e| e.interval.end.timestamp())
        .filter(|&end| end <= slot_start)
        .map(|end| slot_start - end)
        .min();
    let after = events
        .iter()
        .map(|e| e.interval.start.timestamp())
        .filter(|&start| start >= slot_end)
        .map(|start| start - slot_end)
        .min();

    match (before, after) {
        (Some(b), Some(a)) => Some(b.min(a)),
        (gap, None) | (None, gap) => gap,
    }
}

/// Score `interval` against the owner's `events`.
///
/// Returns the clamped score and a reason such as
/// `"Excellent slot: optimal morning time, mid-week"`.
pub fn score(interval: &TimeInterval, events: &[Event], weights: &ScoringWeights) -> (u8, String) {
    let mut total = weights.base;
    let mut reasons: Vec<&str> = Vec::new();

    match utc_hour(interval.start) {
        9..=11 => {
            total = total.saturating_add(weights.morning);
            reasons.push(MORNING_REASON);
        }
        13..=14 => {
            total = total.saturating_add(weights.early_afternoon);
            reasons.push(AFTERNOON_REASON);
        }
        15..=16 => total = total.saturating_add(weights.late_afternoon),
        _ => {}
    }

    // A missing side counts as infinitely far away.
    match min_gap_seconds(interval, events) {
        None => total = total.saturating_add(weights.wide_gap),
        Some(gap) if gap > WIDE_GAP_SECONDS => total = total.saturating_add(weights.wide_gap),
        Some(gap) if gap > NARROW_GAP_SECONDS => total = total.saturating_add(weights.narrow_gap),
        Some(_) => {}
    }

    match utc_weekday(interval.start) {
        Weekday::Tue | Weekday::Wed | Weekday::Thu => {
            total = total.saturating_add(weights.midweek);
            reasons.push(MIDWEEK_REASON);
        }
        Weekday::Fri => total = total.saturating_add(weights.friday),
        _ => {}
    }

    let score = total.clamp(0, 100) as u8;
    let prefix = match score {
        80..=u8::MAX => "Excellent slot:",
        60..=79 => "Good slot:",
        _ => "Available:",
    };
    let detail = if reasons.is_empty() {
        NO_REASON.to_string()
    } else {
        reasons.join(", ")
    };

    (score, format!("{} {}", prefix, detail))
}
