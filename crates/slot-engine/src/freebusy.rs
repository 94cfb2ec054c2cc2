//! Merge participant free/busy responses into a single exclusion list.
//!
//! Only intervals marked busy are kept. They are sorted by start time and
//! overlapping or adjacent periods are merged, giving a sorted, non-overlapping
//! list that excludes exactly the same slots as the raw input.

use std::collections::HashMap;

use crate::types::{BusyInterval, BusyStatus, TimeInterval};

/// Merge busy intervals from every participant.
///
/// Intervals with `status == free` are dropped. Empty or inverted intervals
/// (which cannot block anything) are dropped as well.
pub fn merge_busy_intervals(by_participant: &HashMap<String, Vec<BusyInterval>>) -> Vec<TimeInterval> {
    let mut intervals: Vec<TimeInterval> = by_participant
        .values()
        .flatten()
        .filter(|b| b.status == BusyStatus::Busy && b.interval.end > b.interval.start)
        .map(|b| b.interval)
        .collect();

    if intervals.is_empty() {
        return Vec::new();
    }

    // Sort by start time (then by end time for stability).
    intervals.sort_by_key(|i| (i.start, i.end));

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                // Overlapping or adjacent — extend the current interval.
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}
