//! The pure slot-finding pipeline: generate → filter → score → rank.
//!
//! Works entirely on data already fetched from collaborators, so it is
//! deterministic and can be embedded or benchmarked without any I/O.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::filter::is_free;
use crate::generator::generate;
use crate::ranker::rank;
use crate::scorer::score;
use crate::types::{Event, ScoredSlot, TimeInterval};
use crate::window::PreferredHours;

/// A validated slot search, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSearch {
    pub duration_seconds: i64,
    pub range: TimeInterval,
    pub preferred: PreferredHours,
    pub buffer_seconds: i64,
}

/// Run the full pipeline over `events` (owner) and `busy` (merged participant
/// busy intervals).
///
/// Only candidates lying entirely inside `search.range` are considered, so
/// every returned slot starts and ends within the requested range.
pub fn rank_available_slots(
    search: &SlotSearch,
    events: &[Event],
    busy: &[TimeInterval],
    config: &EngineConfig,
) -> Vec<ScoredSlot> {
    let scored: Vec<ScoredSlot> = generate(
        search.duration_seconds,
        &search.range,
        &search.preferred,
        config.step_seconds(),
    )
    .into_iter()
    .filter(|c| c.interval.is_within(&search.range))
    .filter(|c| is_free(&c.interval, events, search.buffer_seconds, busy))
    .map(|c| {
        let (score, reason) = score(&c.interval, events, &config.scoring);
        ScoredSlot {
            interval: c.interval,
            score,
            reason,
        }
    })
    .collect();

    rank(scored, config.result_limit)
}
