//! Error type for editor and configuration misuse.
//!
//! Analysis functions never fail; they degrade to zero or empty results.
//! Only calls that name something that cannot exist (a DAR column past
//! `dar_count`, an unknown employee) or configure impossible values
//! return a [`ScheduleError`].

use thiserror::Error;

/// Errors raised by [`crate::editor::ScheduleEditor`] and [`crate::config::EngineConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// DAR column count outside the supported range.
    #[error("DAR column count {count} is outside {min}..={max}")]
    DarCountOutOfRange {
        /// Requested count.
        count: usize,
        /// Smallest supported count.
        min: usize,
        /// Largest supported count.
        max: usize,
    },
    /// DAR column index past the configured column count.
    #[error("DAR column {index} does not exist (schedule has {dar_count} columns)")]
    DarIndexOutOfRange {
        /// Requested 0-based index.
        index: usize,
        /// Configured column count.
        dar_count: usize,
    },
    /// Employee ID not present in the roster.
    #[error("unknown employee '{0}'")]
    UnknownEmployee(String),
    /// Imbalance thresholds that cannot classify anything sensibly.
    #[error("invalid imbalance thresholds: overload {overload}, underload {underload}")]
    InvalidThresholds {
        /// Overload ratio.
        overload: f64,
        /// Underload ratio.
        underload: f64,
    },
}
