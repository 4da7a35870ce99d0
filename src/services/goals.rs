// SPDX-License-Identifier: MIT

//! Weekly goal resolution with create-on-read semantics.
//!
//! Every week is guaranteed a goal record: reading a week that was never
//! configured seeds it with the application defaults and returns the stored
//! record. Resolution is idempotent under concurrent invocation.

use std::sync::Arc;

use crate::db::GoalStore;
use crate::error::Result;
use crate::models::WeeklyGoals;
use crate::week::WeekId;

/// Resolves the effective goal thresholds for a week.
#[derive(Clone)]
pub struct GoalResolver {
    store: Arc<dyn GoalStore>,
    defaults: WeeklyGoals,
}

impl GoalResolver {
    pub fn new(store: Arc<dyn GoalStore>, defaults: WeeklyGoals) -> Self {
        Self { store, defaults }
    }

    /// Effective goals for the week, creating the record if absent.
    pub async fn resolve(&self, week: WeekId) -> Result<WeeklyGoals> {
        if let Some(goals) = self.store.find_goal(week).await? {
            return Ok(goals);
        }

        tracing::debug!(week = %week, "No goal record for week, seeding defaults");
        self.store.insert_goal_if_absent(week, self.defaults).await
    }

    /// String-keyed entry point for callers holding the `YYYY-Www` storage
    /// form. The shape is validated before any store access; malformed keys
    /// fail with [`crate::error::AppError::MalformedWeekId`].
    pub async fn resolve_key(&self, key: &str) -> Result<WeeklyGoals> {
        let week: WeekId = key.parse()?;
        self.resolve(week).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::error::AppError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn defaults() -> WeeklyGoals {
        WeeklyGoals {
            personal_technique: 2,
            probability_practice: 1,
            buddy_training: 1,
            endurance_run: 2,
            train_with_coach: 1,
            train_newbies: 1,
        }
    }

    #[tokio::test]
    async fn test_resolve_creates_record_on_first_read() {
        let store = Arc::new(MemoryStore::new());
        let resolver = GoalResolver::new(store.clone(), defaults());
        let week = WeekId::new(2024, 10);

        let resolved = resolver.resolve(week).await.unwrap();
        assert_eq!(resolved, defaults());

        // The record now exists in the store.
        assert_eq!(store.find_goal(week).await.unwrap(), Some(defaults()));
    }

    #[tokio::test]
    async fn test_resolve_returns_configured_record_untouched() {
        let store = Arc::new(MemoryStore::new());
        let week = WeekId::new(2024, 10);
        let configured = WeeklyGoals {
            endurance_run: 5,
            ..defaults()
        };
        store.put_goal(week, configured);

        let resolver = GoalResolver::new(store, defaults());
        assert_eq!(resolver.resolve(week).await.unwrap(), configured);
    }

    /// Store that counts accesses, to prove validation happens first.
    #[derive(Default)]
    struct CountingStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GoalStore for CountingStore {
        async fn find_goal(&self, _week: WeekId) -> crate::error::Result<Option<WeeklyGoals>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }

        async fn insert_goal_if_absent(
            &self,
            _week: WeekId,
            goals: WeeklyGoals,
        ) -> crate::error::Result<WeeklyGoals> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(goals)
        }
    }

    #[tokio::test]
    async fn test_malformed_key_rejected_before_store_access() {
        let store = Arc::new(CountingStore::default());
        let resolver = GoalResolver::new(store.clone(), defaults());

        let err = resolver.resolve_key("2024-1").await.unwrap_err();
        assert!(matches!(err, AppError::MalformedWeekId(key) if key == "2024-1"));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);

        // A well-formed key goes through to the store.
        resolver.resolve_key("2024-W01").await.unwrap();
        assert!(store.calls.load(Ordering::SeqCst) > 0);
    }
}
