//! Collaborator ports: where events and free/busy data come from.
//!
//! Production deployments implement these traits over their provider REST
//! clients. [`CalendarSnapshot`] implements both over in-memory data and backs
//! the CLI and the tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::recurrence::RecurringEvent;
use crate::types::{BusyInterval, Event, TimeInterval};

/// Supplies the calendar owner's existing events.
#[async_trait]
pub trait CalendarEventSource: Send + Sync {
    /// Fetch at most `limit` events overlapping `[range_start, range_end]`.
    async fn get_events(
        &self,
        owner_ref: &str,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Event>, FetchError>;
}

/// Supplies participants' busy/free intervals.
#[async_trait]
pub trait FreeBusyProvider: Send + Sync {
    async fn get_free_busy(
        &self,
        emails: &[String],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Result<HashMap<String, Vec<BusyInterval>>, FetchError>;
}

/// A static, JSON-loadable view of several calendars.
///
/// ```json
/// {
///   "events":    { "owner-1": [ { "id": "e1", "title": "Standup", "interval": { ... } } ] },
///   "recurring": { "owner-1": [ { "id": "r1", "rrule": "FREQ=DAILY", ... } ] },
///   "free_busy": { "bob@example.com": [ { "owner_email": "bob@example.com", ... } ] }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSnapshot {
    pub events: HashMap<String, Vec<Event>>,
    pub recurring: HashMap<String, Vec<RecurringEvent>>,
    pub free_busy: HashMap<String, Vec<BusyInterval>>,
}

impl CalendarSnapshot {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn with_events(mut self, owner_ref: &str, events: Vec<Event>) -> Self {
        self.events.entry(owner_ref.to_string()).or_default().extend(events);
        self
    }

    pub fn with_recurring(mut self, owner_ref: &str, recurring: Vec<RecurringEvent>) -> Self {
        self.recurring
            .entry(owner_ref.to_string())
            .or_default()
            .extend(recurring);
        self
    }

    pub fn with_busy(mut self, busy: Vec<BusyInterval>) -> Self {
        for interval in busy {
            self.free_busy
                .entry(interval.owner_email.clone())
                .or_default()
                .push(interval);
        }
        self
    }
}

fn touches(interval: &TimeInterval, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    interval.start < end && interval.end > start
}

#[async_trait]
impl CalendarEventSource for CalendarSnapshot {
    async fn get_events(
        &self,
        owner_ref: &str,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Event>, FetchError> {
        let mut events: Vec<Event> = self
            .events
            .get(owner_ref)
            .into_iter()
            .flatten()
            .filter(|e| touches(&e.interval, range_start, range_end))
            .cloned()
            .collect();

        if let Some(recurring) = self.recurring.get(owner_ref) {
            let range = TimeInterval {
                start: range_start,
                end: range_end,
            };
            for series in recurring {
                let instances = series
                    .expand(&range)
                    .map_err(|e| FetchError::InvalidPayload(format!("{}: {}", series.id, e)))?;
                events.extend(instances);
            }
        }

        events.sort_by(|a, b| {
            a.interval
                .start
                .cmp(&b.interval.start)
                .then_with(|| a.id.cmp(&b.id))
        });
        events.truncate(limit);
        Ok(events)
    }
}

#[async_trait]
impl FreeBusyProvider for CalendarSnapshot {
    async fn get_free_busy(
        &self,
        emails: &[String],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Result<HashMap<String, Vec<BusyInterval>>, FetchError> {
        Ok(emails
            .iter()
            .map(|email| {
                let intervals = self
                    .free_busy
                    .get(email)
                    .into_iter()
                    .flatten()
                    .filter(|b| touches(&b.interval, range_start, range_end))
                    .cloned()
                    .collect();
                (email.clone(), intervals)
            })
            .collect())
    }
}
