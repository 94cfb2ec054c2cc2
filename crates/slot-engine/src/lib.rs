//! # slot-engine
//!
//! Meeting slot ranking and conflict resolution for AI calendar agents.
//!
//! Given a calendar owner's events and, optionally, other participants'
//! free/busy data, the engine proposes ranked meeting slots inside a date range
//! and checks whether a proposed meeting collides with existing commitments,
//! suggesting alternatives when it does.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chrono::{TimeZone, Utc};
//! use slot_engine::{CalendarSnapshot, EngineConfig, SchedulingEngine, SlotRequest};
//!
//! # async fn run() -> slot_engine::error::Result<()> {
//! let snapshot = Arc::new(CalendarSnapshot::default());
//! let engine = SchedulingEngine::new(snapshot.clone(), snapshot, EngineConfig::default())?;
//!
//! let request = SlotRequest::new(
//!     30,
//!     Utc.with_ymd_and_hms(2026, 3, 17, 0, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2026, 3, 18, 0, 0, 0).unwrap(),
//! );
//! let slots = engine.find_available_slots("owner-1", &request).await?;
//! assert!(slots.len() <= 10);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`window`] — day/hour decomposition, `HH:MM` parsing, overlap tests
//! - [`filter`] — reject intervals blocked by events (with buffer) or busy time
//! - [`freebusy`] — merge participant busy intervals
//! - [`scorer`] — 0–100 slot score with a readable reason
//! - [`generator`] — fixed-step candidates inside daily preferred hours
//! - [`ranker`] — sort and truncate scored slots
//! - [`availability`] — the pure generate → filter → score → rank pipeline
//! - [`conflict`] — overlap detection for a proposed meeting
//! - [`engine`] — async entry points over the collaborators
//! - [`source`] — collaborator traits and the in-memory snapshot
//! - [`recurrence`] — RRULE expansion of recurring owner events
//! - [`config`] — engine configuration and scoring weights
//! - [`error`] — Error types

pub mod availability;
pub mod config;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod filter;
pub mod freebusy;
pub mod generator;
pub mod ranker;
pub mod recurrence;
pub mod scorer;
pub mod source;
pub mod types;
pub mod window;

pub use availability::{rank_available_slots, SlotSearch};
pub use config::EngineConfig;
pub use conflict::conflicting_events;
pub use engine::{ConflictCheck, SchedulingEngine, SlotRequest};
pub use error::{EngineError, FetchError};
pub use filter::is_free;
pub use generator::generate;
pub use ranker::rank;
pub use recurrence::RecurringEvent;
pub use scorer::{score, ScoringWeights};
pub use source::{CalendarEventSource, CalendarSnapshot, FreeBusyProvider};
pub use types::{
    BusyInterval, BusyStatus, Candidate, ConflictResult, Event, ScoredSlot, TimeInterval,
};
pub use window::{PreferredHours, TimeOfDay};
