//! Reject intervals that collide with owner events or participant busy time.
//!
//! Owner events are widened by a symmetric buffer before the overlap test;
//! participant busy intervals are used as-is. Adjacent intervals (one ends
//! exactly where the other starts) never collide.

use crate::types::{Event, TimeInterval};
use crate::window::overlaps;

/// Whether `interval` collides with `event` once the event is widened by
/// `buffer_seconds` on both sides.
pub fn is_blocked_by_event(interval: &TimeInterval, event: &Event, buffer_seconds: i64) -> bool {
    overlaps(
        interval.start.timestamp(),
        interval.end.timestamp(),
        event.interval.start.timestamp().saturating_sub(buffer_seconds),
        event.interval.end.timestamp().saturating_add(buffer_seconds),
    )
}

/// Whether `interval` collides with a participant busy interval (no buffer).
pub fn is_blocked_by_busy(interval: &TimeInterval, busy: &TimeInterval) -> bool {
    overlaps(
        interval.start.timestamp(),
        interval.end.timestamp(),
        busy.start.timestamp(),
        busy.end.timestamp(),
    )
}

/// True only when `interval` is blocked by neither an owner event nor a busy interval.
pub fn is_free(
    interval: &TimeInterval,
    events: &[Event],
    buffer_seconds: i64,
    busy: &[TimeInterval],
) -> bool {
    !events
        .iter()
        .any(|event| is_blocked_by_event(interval, event, buffer_seconds))
        && !busy.iter().any(|b| is_blocked_by_busy(interval, b))
}
