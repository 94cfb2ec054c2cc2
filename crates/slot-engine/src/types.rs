//! Records exchanged between the engine, its collaborators, and callers.
//!
//! Every record is created fresh per request and discarded afterwards; the
//! engine never mutates or persists them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// A half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    /// Build an interval, rejecting empty or inverted ranges.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end <= start {
            return Err(EngineError::invalid(format!(
                "interval end {} must be after start {}",
                end.to_rfc3339(),
                start.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    pub fn duration_seconds(&self) -> i64 {
        self.end.timestamp() - self.start.timestamp()
    }

    /// Whether `self` lies entirely inside `outer` (boundaries inclusive).
    pub fn is_within(&self, outer: &TimeInterval) -> bool {
        self.start >= outer.start && self.end <= outer.end
    }
}

/// An existing event on the owner's calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub interval: TimeInterval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusyStatus {
    #[default]
    Busy,
    Free,
}

/// One participant interval reported by the free/busy provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub owner_email: String,
    pub interval: TimeInterval,
    #[serde(default)]
    pub status: BusyStatus,
}

/// A provisional, unscored slot of exactly the requested duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub interval: TimeInterval,
}

/// A candidate that passed the conflict filter and received a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredSlot {
    pub interval: TimeInterval,
    /// Quality score in `[0, 100]`.
    pub score: u8,
    pub reason: String,
}

/// Outcome of checking one proposed interval against the owner's calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictResult {
    pub has_conflict: bool,
    pub conflicting_events: Vec<Event>,
    /// Ranked alternatives; `Some` exactly when `has_conflict` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<ScoredSlot>>,
}

impl ConflictResult {
    pub fn clear() -> Self {
        Self {
            has_conflict: false,
            conflicting_events: Vec::new(),
            alternatives: None,
        }
    }
}
