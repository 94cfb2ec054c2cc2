//! Detect owner events that overlap a proposed meeting.
//!
//! Uses the raw event intervals (no buffer). Adjacent events (where one ends
//! exactly when the proposal starts, or vice versa) are NOT conflicts.

use crate::types::{Event, TimeInterval};
use crate::window::overlaps;

/// Return every event whose interval overlaps `proposed`, in input order.
pub fn conflicting_events(proposed: &TimeInterval, events: &[Event]) -> Vec<Event> {
    events
        .iter()
        .filter(|event| {
            overlaps(
                proposed.start.timestamp(),
                proposed.end.timestamp(),
                event.interval.start.timestamp(),
                event.interval.end.timestamp(),
            )
        })
        .cloned()
        .collect()
}

/// Length in minutes of the overlap between two intervals (0 when disjoint).
pub fn overlap_minutes(a: &TimeInterval, b: &TimeInterval) -> i64 {
    let overlap_start = a.start.max(b.start);
    let overlap_end = a.end.min(b.end);
    if overlap_end <= overlap_start {
        return 0;
    }
    (overlap_end - overlap_start).num_minutes()
}
