//! Engine configuration.
//!
//! Hosts typically deserialize this from their settings store; every
//! field has a default so a partial document is accepted.

use serde::{Deserialize, Serialize};

use crate::analysis::{DEFAULT_OVERLOAD_RATIO, DEFAULT_UNDERLOAD_RATIO};
use crate::error::ScheduleError;
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::models::{DEFAULT_DAR_COUNT, MAX_DAR_COUNT, MIN_DAR_COUNT};

/// Tunable parameters for an editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Number of DAR columns (3..=8).
    pub dar_count: usize,
    /// Maximum undo steps retained.
    pub history_limit: usize,
    /// Workload/average ratio above which an employee is overloaded.
    pub overload_ratio: f64,
    /// Workload/average ratio below which an employee is underloaded.
    pub underload_ratio: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dar_count: DEFAULT_DAR_COUNT,
            history_limit: DEFAULT_HISTORY_LIMIT,
            overload_ratio: DEFAULT_OVERLOAD_RATIO,
            underload_ratio: DEFAULT_UNDERLOAD_RATIO,
        }
    }
}

impl EngineConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the DAR column count.
    pub fn with_dar_count(mut self, dar_count: usize) -> Self {
        self.dar_count = dar_count;
        self
    }

    /// Sets the undo history limit.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Sets the imbalance thresholds.
    pub fn with_thresholds(mut self, overload_ratio: f64, underload_ratio: f64) -> Self {
        self.overload_ratio = overload_ratio;
        self.underload_ratio = underload_ratio;
        self
    }

    /// Checks that every value is in range.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        check_dar_count(self.dar_count)?;
        check_thresholds(self.overload_ratio, self.underload_ratio)
    }
}

pub(crate) fn check_dar_count(count: usize) -> Result<(), ScheduleError> {
    if (MIN_DAR_COUNT..=MAX_DAR_COUNT).contains(&count) {
        Ok(())
    } else {
        Err(ScheduleError::DarCountOutOfRange {
            count,
            min: MIN_DAR_COUNT,
            max: MAX_DAR_COUNT,
        })
    }
}

pub(crate) fn check_thresholds(overload: f64, underload: f64) -> Result<(), ScheduleError> {
    // Both finite, underload in [0, 1], overload at least 1.
    let valid = overload.is_finite()
        && underload.is_finite()
        && (0.0..=1.0).contains(&underload)
        && overload >= 1.0;
    if valid {
        Ok(())
    } else {
        Err(ScheduleError::InvalidThresholds {
            overload,
            underload,
        })
    }
}
