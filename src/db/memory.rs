// SPDX-License-Identifier: MIT

//! In-memory store backed by `DashMap`.
//!
//! Stand-in for the external document store: used by tests, benches, and
//! local development. Collections mirror the external store's layout
//! (activities by id, goals by `YYYY-Www`, achievement state by athlete).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::db::{AchievementStore, ActivityStore, GoalStore};
use crate::error::Result;
use crate::models::{AchievementState, CompletedActivity, WeeklyGoals};
use crate::week::WeekId;

/// In-memory database with the same operation surface as the external store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    activities: DashMap<String, CompletedActivity>,
    goals: DashMap<String, WeeklyGoals>,
    achievements: DashMap<String, AchievementState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an activity record (submission-side write, outside the core).
    pub fn put_activity(&self, activity: CompletedActivity) {
        self.activities.insert(activity.id.clone(), activity);
    }

    /// Remove an activity record. Used to exercise stale-cursor recovery.
    pub fn delete_activity(&self, id: &str) {
        self.activities.remove(id);
    }

    /// Seed a goal record directly (admin-side write, outside the core).
    pub fn put_goal(&self, week: WeekId, goals: WeeklyGoals) {
        self.goals.insert(week.to_string(), goals);
    }
}

#[async_trait]
impl ActivityStore for MemoryStore {
    async fn find_activities_for_athlete(
        &self,
        athlete_id: &str,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<CompletedActivity>> {
        let mut found: Vec<CompletedActivity> = self
            .activities
            .iter()
            .filter(|entry| entry.attendance_id == athlete_id)
            .filter(|entry| after.is_none_or(|cursor| entry.activity_timestamp > cursor))
            .map(|entry| entry.value().clone())
            .collect();

        // Ascending activity time; submission time then id break ties.
        found.sort_by(|a, b| {
            a.activity_timestamp
                .cmp(&b.activity_timestamp)
                .then_with(|| a.submitted_at.cmp(&b.submitted_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(found)
    }

    async fn find_activity_by_id(&self, id: &str) -> Result<Option<CompletedActivity>> {
        Ok(self.activities.get(id).map(|entry| entry.value().clone()))
    }

    async fn list_athlete_ids(&self) -> Result<Vec<String>> {
        let mut ids: Vec<String> = self
            .activities
            .iter()
            .map(|entry| entry.attendance_id.clone())
            .collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}

#[async_trait]
impl GoalStore for MemoryStore {
    async fn find_goal(&self, week: WeekId) -> Result<Option<WeeklyGoals>> {
        Ok(self.goals.get(&week.to_string()).map(|entry| *entry.value()))
    }

    async fn insert_goal_if_absent(
        &self,
        week: WeekId,
        defaults: WeeklyGoals,
    ) -> Result<WeeklyGoals> {
        Ok(*self.goals.entry(week.to_string()).or_insert(defaults))
    }
}

#[async_trait]
impl AchievementStore for MemoryStore {
    async fn find_achievement_state(&self, athlete_id: &str) -> Result<Option<AchievementState>> {
        Ok(self
            .achievements
            .get(athlete_id)
            .map(|entry| entry.value().clone()))
    }

    async fn upsert_achievement_state(
        &self,
        athlete_id: &str,
        state: &AchievementState,
    ) -> Result<()> {
        self.achievements
            .insert(athlete_id.to_string(), state.clone());
        Ok(())
    }
}
