//! Storage layer: collaborator interfaces plus an in-memory implementation.
//!
//! The document store itself is external to this crate; the core only
//! depends on the three trait seams below.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{AchievementState, CompletedActivity, WeeklyGoals};
use crate::week::WeekId;

pub use memory::MemoryStore;

/// Collection names as constants.
pub mod collections {
    pub const ACTIVITIES: &str = "activities";
    /// Weekly goal records (keyed by `YYYY-Www`)
    pub const GOALS: &str = "goals";
    /// Achievement state aggregates (keyed by athlete id)
    pub const ACHIEVEMENTS: &str = "achievements";
}

/// Read access to completed-activity records.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// All activities for one athlete with `activity_timestamp` strictly
    /// after the cursor (or the full history when `after` is `None`),
    /// ordered ascending by `activity_timestamp`.
    async fn find_activities_for_athlete(
        &self,
        athlete_id: &str,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<CompletedActivity>>;

    async fn find_activity_by_id(&self, id: &str) -> Result<Option<CompletedActivity>>;

    /// Distinct athlete ids with at least one activity (leaderboard scan).
    async fn list_athlete_ids(&self) -> Result<Vec<String>>;
}

/// Weekly goal records.
#[async_trait]
pub trait GoalStore: Send + Sync {
    async fn find_goal(&self, week: WeekId) -> Result<Option<WeeklyGoals>>;

    /// Create the week's goal record seeded with `defaults` unless one
    /// already exists; returns the stored record either way. Idempotent
    /// under concurrent invocation.
    async fn insert_goal_if_absent(&self, week: WeekId, defaults: WeeklyGoals)
        -> Result<WeeklyGoals>;
}

/// Persisted per-athlete achievement aggregates.
#[async_trait]
pub trait AchievementStore: Send + Sync {
    async fn find_achievement_state(&self, athlete_id: &str) -> Result<Option<AchievementState>>;

    async fn upsert_achievement_state(
        &self,
        athlete_id: &str,
        state: &AchievementState,
    ) -> Result<()>;
}
