//! Enumerate fixed-step candidate slots across a multi-day range.

use crate::types::{Candidate, TimeInterval};
use crate::window::{day_floor, from_timestamp, PreferredHours, SECONDS_PER_DAY};

/// Default distance between consecutive candidate starts.
pub const DEFAULT_STEP_SECONDS: i64 = 1_800;

/// Generate candidates of `duration_seconds` inside the preferred daily window
/// of every UTC day touched by `[range_start, range_end]`.
///
/// Both range ends are truncated to their day boundary, and every day from the
/// first to the last (inclusive) is walked. Within a day, starts step from the
/// preferred start by `step_seconds` while the slot still ends by the preferred
/// end. A day whose window is shorter than the duration yields nothing.
///
/// Slots whose bounds fall outside chrono's representable range are skipped.
///
/// Candidates come back ordered by start time. They can fall outside the exact
/// range on the first and last day; callers that need the range honoured
/// filter afterwards.
pub fn generate(
    duration_seconds: i64,
    range: &TimeInterval,
    preferred: &PreferredHours,
    step_seconds: i64,
) -> Vec<Candidate> {
    if duration_seconds <= 0 || step_seconds <= 0 {
        return Vec::new();
    }

    let first_day = day_floor(range.start.timestamp());
    let last_day = day_floor(range.end.timestamp());
    let window_start = preferred.start.offset_seconds();
    let window_end = preferred.end.offset_seconds();

    let mut candidates = Vec::new();
    let mut day = first_day;
    while day <= last_day {
        let day_start = day + window_start;
        let day_end = day + window_end;

        let mut slot_start = day_start;
        while let Some(slot_end) = slot_start.checked_add(duration_seconds) {
            if slot_end > day_end {
                break;
            }
            if let (Some(start), Some(end)) = (from_timestamp(slot_start), from_timestamp(slot_end)) {
                candidates.push(Candidate {
                    interval: TimeInterval { start, end },
                });
            }
            match slot_start.checked_add(step_seconds) {
                Some(next) => slot_start = next,
                None => break,
            }
        }

        day += SECONDS_PER_DAY;
    }

    candidates
}
