// SPDX-License-Identifier: MIT

//! Application error types.

use crate::week::WeekId;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The goals map handed to the reducer was missing a week the fold
    /// touched. This is a caller-contract violation; the aggregator reacts
    /// by resolving the week and retrying, never by skipping the activity.
    #[error("Weekly goals not found for week {0}")]
    GoalsNotFound(WeekId),

    /// A week-id string did not match the `YYYY-Www` shape. Rejected before
    /// any store access, distinct from "not found".
    #[error("Malformed week id: {0:?}")]
    MalformedWeekId(String),

    /// An endurance-run activity carried lap/minute strings that do not
    /// parse to positive numbers.
    #[error("Invalid run metrics on activity {activity_id}: laps={laps:?} minutes={minutes:?}")]
    InvalidRunMetric {
        activity_id: String,
        laps: String,
        minutes: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, AppError>;
