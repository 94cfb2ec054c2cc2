//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! slot_step_minutes = 30
//! result_limit = 10
//! max_range_days = 366
//! fetch_timeout_secs = 15
//!
//! [scoring]
//! morning = 30
//! friday = 5
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::generator::DEFAULT_STEP_SECONDS;
use crate::ranker::DEFAULT_LIMIT;
use crate::scorer::ScoringWeights;
use crate::window::{MINUTES_PER_DAY, SECONDS_PER_DAY, SECONDS_PER_MINUTE};

/// Upper bound for `max_range_days`.
pub const MAX_RANGE_DAYS_LIMIT: i64 = 3_660;

/// Largest magnitude accepted for a single scoring weight.
pub const MAX_WEIGHT: i32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Distance between consecutive candidate starts.
    pub slot_step_minutes: i64,
    /// Maximum number of ranked slots returned.
    pub result_limit: usize,
    /// Buffer around owner events when the request does not specify one.
    pub default_buffer_minutes: i64,
    /// Context fetched on each side of a proposal when checking conflicts.
    pub conflict_context_minutes: i64,
    /// Forward search horizon for alternatives after a conflict.
    pub alternative_horizon_days: i64,
    /// Widest date range a slot search may cover.
    pub max_range_days: i64,
    /// `limit` passed to the calendar event source.
    pub event_fetch_limit: usize,
    /// Timeout applied to each collaborator call.
    pub fetch_timeout_secs: u64,
    pub scoring: ScoringWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            slot_step_minutes: DEFAULT_STEP_SECONDS / SECONDS_PER_MINUTE,
            result_limit: DEFAULT_LIMIT,
            default_buffer_minutes: 15,
            conflict_context_minutes: 60,
            alternative_horizon_days: 7,
            max_range_days: 366,
            event_fetch_limit: 250,
            fetch_timeout_secs: 15,
            scoring: ScoringWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::invalid(format!("cannot read config {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MINUTES_PER_DAY).contains(&self.slot_step_minutes) {
            return Err(EngineError::invalid(format!(
                "slot_step_minutes must be between 1 and {}",
                MINUTES_PER_DAY
            )));
        }
        if self.result_limit == 0 {
            return Err(EngineError::invalid("result_limit must be positive"));
        }
        if !(0..=MINUTES_PER_DAY).contains(&self.default_buffer_minutes) {
            return Err(EngineError::invalid(format!(
                "default_buffer_minutes must be between 0 and {}",
                MINUTES_PER_DAY
            )));
        }
        if !(0..=MINUTES_PER_DAY).contains(&self.conflict_context_minutes) {
            return Err(EngineError::invalid(format!(
                "conflict_context_minutes must be between 0 and {}",
                MINUTES_PER_DAY
            )));
        }
        if !(1..=MAX_RANGE_DAYS_LIMIT).contains(&self.max_range_days) {
            return Err(EngineError::invalid(format!(
                "max_range_days must be between 1 and {}",
                MAX_RANGE_DAYS_LIMIT
            )));
        }
        if !(1..=self.max_range_days).contains(&self.alternative_horizon_days) {
            return Err(EngineError::invalid(
                "alternative_horizon_days must be between 1 and max_range_days",
            ));
        }
        if self.event_fetch_limit == 0 {
            return Err(EngineError::invalid("event_fetch_limit must be positive"));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(EngineError::invalid("fetch_timeout_secs must be positive"));
        }
        for (name, weight) in self.scoring.entries() {
            if !(-MAX_WEIGHT..=MAX_WEIGHT).contains(&weight) {
                return Err(EngineError::invalid(format!(
                    "scoring.{} must be between -{} and {}, got {}",
                    name, MAX_WEIGHT, MAX_WEIGHT, weight
                )));
            }
        }
        Ok(())
    }

    pub fn step_seconds(&self) -> i64 {
        self.slot_step_minutes * SECONDS_PER_MINUTE
    }

    pub fn conflict_context_seconds(&self) -> i64 {
        self.conflict_context_minutes * SECONDS_PER_MINUTE
    }

    pub fn horizon_seconds(&self) -> i64 {
        self.alternative_horizon_days * SECONDS_PER_DAY
    }

    pub fn max_range_seconds(&self) -> i64 {
        self.max_range_days * SECONDS_PER_DAY
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
