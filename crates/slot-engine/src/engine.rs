//! Orchestrating entry points: fetch from collaborators, then run the pure pipeline.
//!
//! Each call validates its input before any I/O, issues the owner-events and
//! free/busy fetches concurrently under a timeout, and fails as a whole if
//! either fetch fails. No state survives a call.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::availability::{rank_available_slots, SlotSearch};
use crate::config::EngineConfig;
use crate::conflict::{conflicting_events, overlap_minutes};
use crate::error::{EngineError, FetchError, Result};
use crate::freebusy::merge_busy_intervals;
use crate::source::{CalendarEventSource, FreeBusyProvider};
use crate::types::{BusyInterval, ConflictResult, Event, ScoredSlot, TimeInterval};
use crate::window::{PreferredHours, MINUTES_PER_DAY, SECONDS_PER_MINUTE};

const EVENTS_COLLABORATOR: &str = "calendar events";
const FREE_BUSY_COLLABORATOR: &str = "free/busy";

fn default_preferred_start() -> String {
    "09:00".to_string()
}

fn default_preferred_end() -> String {
    "17:00".to_string()
}

/// Parameters of [`SchedulingEngine::find_available_slots`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRequest {
    pub duration_minutes: i64,
    pub date_range_start: DateTime<Utc>,
    pub date_range_end: DateTime<Utc>,
    #[serde(default = "default_preferred_start")]
    pub preferred_time_start: String,
    #[serde(default = "default_preferred_end")]
    pub preferred_time_end: String,
    #[serde(default)]
    pub participants: Vec<String>,
    /// Falls back to `EngineConfig::default_buffer_minutes` (15) when absent.
    #[serde(default)]
    pub buffer_minutes: Option<i64>,
}

impl SlotRequest {
    pub fn new(
        duration_minutes: i64,
        date_range_start: DateTime<Utc>,
        date_range_end: DateTime<Utc>,
    ) -> Self {
        Self {
            duration_minutes,
            date_range_start,
            date_range_end,
            preferred_time_start: default_preferred_start(),
            preferred_time_end: default_preferred_end(),
            participants: Vec::new(),
            buffer_minutes: None,
        }
    }

    pub fn with_preferred_hours(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.preferred_time_start = start.into();
        self.preferred_time_end = end.into();
        self
    }

    pub fn with_participants(mut self, participants: Vec<String>) -> Self {
        self.participants = participants;
        self
    }

    pub fn with_buffer_minutes(mut self, buffer_minutes: i64) -> Self {
        self.buffer_minutes = Some(buffer_minutes);
        self
    }

    /// Check the request and convert it into a [`SlotSearch`].
    pub fn validate(&self, config: &EngineConfig) -> Result<SlotSearch> {
        if self.duration_minutes <= 0 {
            return Err(EngineError::invalid(format!(
                "duration_minutes must be positive, got {}",
                self.duration_minutes
            )));
        }
        if self.duration_minutes > MINUTES_PER_DAY {
            return Err(EngineError::invalid(format!(
                "duration_minutes must not exceed {} (one day), got {}",
                MINUTES_PER_DAY, self.duration_minutes
            )));
        }
        if self.date_range_end <= self.date_range_start {
            return Err(EngineError::invalid(format!(
                "date_range_end {} must be after date_range_start {}",
                self.date_range_end.to_rfc3339(),
                self.date_range_start.to_rfc3339()
            )));
        }
        let range_seconds = self.date_range_end.timestamp() - self.date_range_start.timestamp();
        if range_seconds > config.max_range_seconds() {
            return Err(EngineError::invalid(format!(
                "date range must not exceed {} days",
                config.max_range_days
            )));
        }
        let buffer_minutes = self.buffer_minutes.unwrap_or(config.default_buffer_minutes);
        if buffer_minutes < 0 {
            return Err(EngineError::invalid(format!(
                "buffer_minutes must not be negative, got {}",
                buffer_minutes
            )));
        }
        if buffer_minutes > MINUTES_PER_DAY {
            return Err(EngineError::invalid(format!(
                "buffer_minutes must not exceed {} (one day), got {}",
                MINUTES_PER_DAY, buffer_minutes
            )));
        }
        let preferred = PreferredHours::parse(&self.preferred_time_start, &self.preferred_time_end)?;

        Ok(SlotSearch {
            duration_seconds: self.duration_minutes * SECONDS_PER_MINUTE,
            range: TimeInterval::new(self.date_range_start, self.date_range_end)?,
            preferred,
            buffer_seconds: buffer_minutes * SECONDS_PER_MINUTE,
        })
    }
}

/// Parameters of [`SchedulingEngine::check_conflicts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictCheck {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl ConflictCheck {
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time,
            participants: Vec::new(),
        }
    }

    pub fn with_participants(mut self, participants: Vec<String>) -> Self {
        self.participants = participants;
        self
    }
}

/// The availability and conflict-resolution engine.
///
/// Parameterized only by its two collaborators; cheap to clone and safe to
/// share across tasks.
#[derive(Clone)]
pub struct SchedulingEngine {
    events: Arc<dyn CalendarEventSource>,
    free_busy: Arc<dyn FreeBusyProvider>,
    config: EngineConfig,
}

impl SchedulingEngine {
    pub fn new(
        events: Arc<dyn CalendarEventSource>,
        free_busy: Arc<dyn FreeBusyProvider>,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            events,
            free_busy,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Find up to `result_limit` free slots, best first.
    ///
    /// # Errors
    /// `InvalidInput` before any fetch for bad durations, ranges, buffers or
    /// `HH:MM` strings; `UpstreamFetch` if either collaborator fails.
    pub async fn find_available_slots(
        &self,
        owner_ref: &str,
        request: &SlotRequest,
    ) -> Result<Vec<ScoredSlot>> {
        let search = request.validate(&self.config)?;
        debug!(
            owner = owner_ref,
            duration_minutes = request.duration_minutes,
            participants = request.participants.len(),
            "searching for available slots"
        );
        self.search(owner_ref, &search, &request.participants).await
    }

    /// Check a proposed meeting against the owner's calendar.
    ///
    /// On conflict, alternatives are searched over the following
    /// `alternative_horizon_days` with default preferred hours and buffer.
    pub async fn check_conflicts(
        &self,
        owner_ref: &str,
        check: &ConflictCheck,
    ) -> Result<ConflictResult> {
        let proposed = TimeInterval::new(check.start_time, check.end_time)?;
        let context = Duration::seconds(self.config.conflict_context_seconds());

        let fetch_start = proposed
            .start
            .checked_sub_signed(context)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let fetch_end = proposed
            .end
            .checked_add_signed(context)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let events = self.fetch_events(owner_ref, fetch_start, fetch_end).await?;
        let conflicting = conflicting_events(&proposed, &events);

        if conflicting.is_empty() {
            debug!(owner = owner_ref, fetched = events.len(), "proposed time is clear");
            return Ok(ConflictResult::clear());
        }

        for event in &conflicting {
            debug!(
                owner = owner_ref,
                event_id = %event.id,
                overlap_minutes = overlap_minutes(&proposed, &event.interval),
                "proposed time overlaps existing event"
            );
        }

        let search = SlotSearch {
            duration_seconds: proposed.duration_seconds(),
            range: TimeInterval {
                start: proposed.start,
                end: proposed
                    .start
                    .checked_add_signed(Duration::seconds(self.config.horizon_seconds()))
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
            },
            preferred: PreferredHours::default(),
            buffer_seconds: self.config.default_buffer_minutes * SECONDS_PER_MINUTE,
        };
        let alternatives = self.search(owner_ref, &search, &check.participants).await?;

        info!(
            owner = owner_ref,
            conflicts = conflicting.len(),
            alternatives = alternatives.len(),
            "proposed time conflicts"
        );

        Ok(ConflictResult {
            has_conflict: true,
            conflicting_events: conflicting,
            alternatives: Some(alternatives),
        })
    }

    async fn search(
        &self,
        owner_ref: &str,
        search: &SlotSearch,
        participants: &[String],
    ) -> Result<Vec<ScoredSlot>> {
        let (events, free_busy) = tokio::try_join!(
            self.fetch_events(owner_ref, search.range.start, search.range.end),
            self.fetch_free_busy(participants, search.range.start, search.range.end),
        )?;
        let busy = merge_busy_intervals(&free_busy);

        let slots = rank_available_slots(search, &events, &busy, &self.config);
        debug!(
            owner = owner_ref,
            events = events.len(),
            busy_blocks = busy.len(),
            slots = slots.len(),
            "ranked available slots"
        );
        Ok(slots)
    }

    async fn fetch_events(
        &self,
        owner_ref: &str,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Result<Vec<Event>> {
        self.with_timeout(
            EVENTS_COLLABORATOR,
            self.events
                .get_events(owner_ref, range_start, range_end, self.config.event_fetch_limit),
        )
        .await
    }

    async fn fetch_free_busy(
        &self,
        participants: &[String],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Result<HashMap<String, Vec<BusyInterval>>> {
        if participants.is_empty() {
            return Ok(HashMap::new());
        }
        self.with_timeout(
            FREE_BUSY_COLLABORATOR,
            self.free_busy
                .get_free_busy(participants, range_start, range_end),
        )
        .await
    }

    async fn with_timeout<T>(
        &self,
        collaborator: &'static str,
        fetch: impl Future<Output = std::result::Result<T, FetchError>>,
    ) -> Result<T> {
        let limit = self.config.fetch_timeout();
        let outcome = match tokio::time::timeout(limit, fetch).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(limit)),
        };
        outcome.map_err(|source| {
            warn!(collaborator, error = %source, "upstream fetch failed");
            EngineError::UpstreamFetch {
                collaborator,
                source,
            }
        })
    }
}
