// SPDX-License-Identifier: MIT

//! Per-athlete achievement state.
//!
//! This is the running accumulator the reducer folds activities into. It is
//! persisted after each aggregation batch so reads resume from the last
//! processed activity instead of re-folding the full history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::week::WeekId;

/// Achievement accumulator for one athlete.
///
/// Created empty on the first activity, replaced (not mutated) by every
/// reduction step, upserted per athlete after a batch of folds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AchievementState {
    /// The week currently being accumulated; `None` before any activity.
    #[serde(default)]
    pub current_week: Option<WeekId>,
    /// Counts so far within `current_week`.
    #[serde(default)]
    pub weekly_activities: WeeklyCounts,
    #[serde(default)]
    pub streaks: Streaks,
    #[serde(default)]
    pub best_run: BestRun,
    /// Resume cursor: id of the most recently folded activity.
    #[serde(default)]
    pub last_activity_id: Option<String>,
}

/// Per-week activity counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyCounts {
    #[serde(default)]
    pub endurance_run: u32,
    #[serde(default)]
    pub personal_technique: u32,
    #[serde(default)]
    pub probability_practice: u32,
    #[serde(default)]
    pub buddy_training: u32,
}

/// The two streak families, tracked and broken independently.
///
/// Attendance covers the short-session categories; running covers endurance
/// runs. `last_*_streak_week` guards against crediting the same week twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    #[serde(default)]
    pub current_attendance_streak: u32,
    #[serde(default)]
    pub best_attendance_streak: u32,
    #[serde(default)]
    pub current_running_streak: u32,
    #[serde(default)]
    pub best_running_streak: u32,
    #[serde(default)]
    pub last_attendance_streak_week: Option<WeekId>,
    #[serde(default)]
    pub last_running_streak_week: Option<WeekId>,
}

/// Best (lowest minutes-per-lap) endurance run ever folded.
///
/// All-zero is the "none recorded yet" sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BestRun {
    #[serde(default)]
    pub laps: f64,
    #[serde(default)]
    pub minutes: f64,
    #[serde(default)]
    pub minutes_per_lap: f64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl BestRun {
    /// Whether any run has been recorded yet.
    pub fn is_recorded(&self) -> bool {
        self.minutes_per_lap != 0.0
    }
}
