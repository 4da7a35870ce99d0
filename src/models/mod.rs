// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod achievement;
pub mod activity;
pub mod goals;

pub use achievement::{AchievementState, BestRun, Streaks, WeeklyCounts};
pub use activity::{ActivityKind, CompletedActivity, NormalSession, ShortSession};
pub use goals::WeeklyGoals;
