//! Recurring owner events — expand an RRULE into concrete [`Event`]s.
//!
//! Wraps the `rrule` crate (v0.13) and `chrono-tz` so that a weekly stand-up
//! stored once in a calendar snapshot blocks every one of its instances, with
//! correct DST handling in the event's own timezone.

use chrono::{DateTime, Duration, Utc};
use rrule::RRuleSet;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::types::{Event, TimeInterval};

/// Upper bound on instances produced by one expansion window.
const MAX_INSTANCES: u16 = 500;

/// A recurring event as stored by a calendar provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringEvent {
    pub id: String,
    pub title: String,
    /// RFC 5545 RRULE value, e.g. `"FREQ=WEEKLY;BYDAY=TU,TH"`.
    pub rrule: String,
    /// Local start of the first instance, e.g. `"2026-02-17T14:00:00"`.
    pub dtstart: String,
    pub duration_minutes: u32,
    /// IANA timezone, e.g. `"America/Los_Angeles"`.
    pub timezone: String,
    /// Local datetimes (same format as `dtstart`) to exclude.
    #[serde(default)]
    pub exdates: Vec<String>,
}

impl RecurringEvent {
    /// Expand into the instances that overlap `range`.
    ///
    /// Instance ids are `"{id}@{start in RFC 3339}"` so they stay unique and
    /// stable across calls.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidRule` if the RRULE is empty or unparseable.
    /// Returns `EngineError::InvalidTimezone` if the timezone is not a valid IANA identifier.
    pub fn expand(&self, range: &TimeInterval) -> Result<Vec<Event>> {
        // Instances starting up to one duration before the range can still overlap it.
        let lookback = Duration::minutes(self.duration_minutes as i64);
        let instances = expand_instances(
            &self.rrule,
            &self.dtstart,
            self.duration_minutes,
            &self.timezone,
            range.start - lookback,
            range.end,
            &self.exdates,
        )?;

        Ok(instances
            .into_iter()
            .filter(|i| i.start < range.end && i.end > range.start)
            .map(|interval| Event {
                id: format!("{}@{}", self.id, interval.start.to_rfc3339()),
                title: self.title.clone(),
                interval,
            })
            .collect())
    }
}

/// Expand an RRULE into concrete UTC intervals starting inside `[window_start, window_end]`.
fn expand_instances(
    rrule: &str,
    dtstart: &str,
    duration_minutes: u32,
    timezone: &str,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    exdates: &[String],
) -> Result<Vec<TimeInterval>> {
    if rrule.trim().is_empty() {
        return Err(EngineError::InvalidRule("empty RRULE string".to_string()));
    }
    if duration_minutes == 0 {
        return Err(EngineError::InvalidRule(
            "recurring event duration must be positive".to_string(),
        ));
    }

    // Validate timezone by parsing it as a chrono-tz Tz.
    let _tz: chrono_tz::Tz = timezone
        .parse()
        .map_err(|_| EngineError::InvalidTimezone(timezone.to_string()))?;

    // "2026-02-17T14:00:00" → iCalendar "20260217T140000".
    let dtstart_ical = dtstart.replace(['-', ':'], "");

    let mut rrule_text = format!(
        "DTSTART;TZID={}:{}\nRRULE:{}",
        timezone, dtstart_ical, rrule
    );
    if !exdates.is_empty() {
        let exdate_icals: Vec<String> = exdates.iter().map(|d| d.replace(['-', ':'], "")).collect();
        rrule_text.push_str(&format!(
            "\nEXDATE;TZID={}:{}",
            timezone,
            exdate_icals.join(",")
        ));
    }

    let rrule_set: RRuleSet = rrule_text
        .parse()
        .map_err(|e| EngineError::InvalidRule(format!("{}", e)))?;

    // Bound the walk to the window so long-running series stay cheap.
    let rrule_set = rrule_set
        .after(window_start.with_timezone(&rrule::Tz::UTC))
        .before(window_end.with_timezone(&rrule::Tz::UTC));

    let duration = Duration::minutes(duration_minutes as i64);
    Ok(rrule_set
        .all(MAX_INSTANCES)
        .dates
        .into_iter()
        .map(|dt| {
            let start: DateTime<Utc> = dt.with_timezone(&Utc);
            TimeInterval {
                start,
                end: start + duration,
            }
        })
        .collect())
}
