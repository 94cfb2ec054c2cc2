//! Day and hour decomposition for epoch instants, plus interval overlap tests.
//!
//! All arithmetic is timezone-naive epoch math anchored at UTC: a "day" is the
//! 86 400-second span starting at a multiple of 86 400, and hour-of-day and
//! weekday are read in UTC. Callers in other zones see preference windows
//! shifted by their UTC offset.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

pub const SECONDS_PER_DAY: i64 = 86_400;
pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_MINUTE: i64 = 60;
pub const MINUTES_PER_DAY: i64 = 1_440;

/// Truncate an epoch-second timestamp down to the start of its UTC day.
pub fn day_floor(timestamp: i64) -> i64 {
    timestamp.div_euclid(SECONDS_PER_DAY) * SECONDS_PER_DAY
}

/// Convert epoch seconds back into a UTC instant, or `None` when the value is
/// outside chrono's representable range.
pub fn from_timestamp(timestamp: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(timestamp, 0).single()
}

pub fn utc_hour(instant: DateTime<Utc>) -> u32 {
    instant.hour()
}

pub fn utc_weekday(instant: DateTime<Utc>) -> Weekday {
    instant.weekday()
}

/// Overlap test for half-open ranges: `NOT (a_end <= b_start OR a_start >= b_end)`.
///
/// Ranges that merely touch (one ends where the other starts) do not overlap.
pub fn overlaps(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> bool {
    !(a_end <= b_start || a_start >= b_end)
}

/// A wall-clock time of day parsed from `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(EngineError::invalid(format!(
                "time of day {:02}:{:02} is out of range",
                hour, minute
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Seconds from midnight.
    pub fn offset_seconds(&self) -> i64 {
        self.hour as i64 * SECONDS_PER_HOUR + self.minute as i64 * SECONDS_PER_MINUTE
    }
}

impl FromStr for TimeOfDay {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || EngineError::invalid(format!("malformed time '{}', expected HH:MM", s));

        let (hour, minute) = s.trim().split_once(':').ok_or_else(malformed)?;
        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(hour) || !two_digits(minute) {
            return Err(malformed());
        }
        let hour: u32 = hour.parse().map_err(|_| malformed())?;
        let minute: u32 = minute.parse().map_err(|_| malformed())?;
        TimeOfDay::new(hour, minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The daily window inside which candidate slots may start and end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferredHours {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl PreferredHours {
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
        })
    }
}

impl Default for PreferredHours {
    /// 09:00 to 17:00.
    fn default() -> Self {
        Self {
            start: TimeOfDay { hour: 9, minute: 0 },
            end: TimeOfDay { hour: 17, minute: 0 },
        }
    }
}
