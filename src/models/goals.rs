// SPDX-License-Identifier: MIT

//! Weekly goal configuration.

use serde::{Deserialize, Serialize};

/// Per-week goal thresholds, keyed in storage by the `YYYY-Www` week id.
///
/// A whole category group at 0 means "no goal for this group this week";
/// such weeks are transparent to streak logic (neither advance nor break).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyGoals {
    // Short-session (30-minute) category targets
    #[serde(default)]
    pub personal_technique: u32,
    #[serde(default)]
    pub probability_practice: u32,
    #[serde(default)]
    pub buddy_training: u32,

    /// Endurance-run target
    #[serde(default)]
    pub endurance_run: u32,

    // Normal-session targets; configuration only, not read by streak logic.
    #[serde(default)]
    pub train_with_coach: u32,
    #[serde(default)]
    pub train_newbies: u32,
}

impl WeeklyGoals {
    /// Whether any short-session category has a goal this week.
    pub fn has_attendance_goal(&self) -> bool {
        self.personal_technique > 0 || self.probability_practice > 0 || self.buddy_training > 0
    }

    /// Whether the endurance-run group has a goal this week.
    pub fn has_running_goal(&self) -> bool {
        self.endurance_run > 0
    }
}
