//! Order scored slots and keep the best few.

use crate::types::ScoredSlot;

/// Default number of slots returned to callers.
pub const DEFAULT_LIMIT: usize = 10;

/// Sort by score (highest first) and truncate to `limit`.
///
/// Equal scores are ordered by earliest start, then earliest end, so the
/// output is fully deterministic for a given input set.
pub fn rank(mut slots: Vec<ScoredSlot>, limit: usize) -> Vec<ScoredSlot> {
    slots.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.interval.start.cmp(&b.interval.start))
            .then_with(|| a.interval.end.cmp(&b.interval.end))
    });
    slots.truncate(limit);
    slots
}
