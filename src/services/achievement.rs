// SPDX-License-Identifier: MIT

//! Incremental achievement aggregation.
//!
//! Produces an up-to-date [`AchievementState`] for one athlete without
//! re-folding the full activity history on every read: the persisted state
//! carries a resume cursor (`last_activity_id`), and only activities after
//! that cursor are fetched and folded. A cursor that no longer resolves is
//! treated as a cache miss and triggers a full recompute from empty state.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::FixedOffset;
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::db::{AchievementStore, ActivityStore};
use crate::error::{AppError, Result};
use crate::models::{AchievementState, CompletedActivity, WeeklyGoals};
use crate::services::goals::GoalResolver;
use crate::services::reducer::reduce;
use crate::week::{week_key_of, WeekId};

/// Safety net for goal-map gaps surfaced by the fold; each retry heals one
/// missing week via the resolver.
const MAX_FOLD_RETRIES: usize = 8;

/// Per-athlete recomputation locks, shared across service instances.
///
/// Two near-simultaneous submissions for the same athlete would otherwise
/// race on the state upsert; different athletes aggregate in parallel.
pub type RecomputeLocks = Arc<DashMap<String, Arc<Mutex<()>>>>;

/// Orchestrates fetch, fold, and persist of per-athlete achievement state.
#[derive(Clone)]
pub struct AchievementService {
    activities: Arc<dyn ActivityStore>,
    achievements: Arc<dyn AchievementStore>,
    goals: GoalResolver,
    utc_offset: FixedOffset,
    recompute_locks: RecomputeLocks,
}

impl AchievementService {
    pub fn new(
        activities: Arc<dyn ActivityStore>,
        achievements: Arc<dyn AchievementStore>,
        goals: GoalResolver,
        utc_offset: FixedOffset,
        recompute_locks: RecomputeLocks,
    ) -> Self {
        Self {
            activities,
            achievements,
            goals,
            utc_offset,
            recompute_locks,
        }
    }

    /// Current achievement state for the athlete, folding in any activities
    /// submitted since the last call and persisting the result.
    pub async fn get_achievement_for_athlete(&self, athlete_id: &str) -> Result<AchievementState> {
        let lock = self
            .recompute_locks
            .entry(athlete_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        let saved = self.achievements.find_achievement_state(athlete_id).await?;

        // Resolve the resume cursor. Only a cursor that still points at an
        // existing activity lets us fold the suffix; otherwise recompute
        // the full history from empty state.
        let resume_from = match &saved {
            Some(state) => match &state.last_activity_id {
                Some(last_id) => self.activities.find_activity_by_id(last_id).await?,
                None => None,
            },
            None => None,
        };

        let (initial, mut new_activities, resumed) = match (&saved, resume_from) {
            (Some(state), Some(cursor)) => {
                let fetched = self
                    .activities
                    .find_activities_for_athlete(athlete_id, Some(cursor.activity_timestamp))
                    .await?;
                (state.clone(), fetched, true)
            }
            (Some(state), None) => {
                if state.last_activity_id.is_some() {
                    tracing::info!(
                        athlete_id,
                        cursor = state.last_activity_id.as_deref(),
                        "Resume cursor no longer resolves, recomputing from scratch"
                    );
                }
                let fetched = self
                    .activities
                    .find_activities_for_athlete(athlete_id, None)
                    .await?;
                (AchievementState::default(), fetched, false)
            }
            (None, _) => {
                let fetched = self
                    .activities
                    .find_activities_for_athlete(athlete_id, None)
                    .await?;
                (AchievementState::default(), fetched, false)
            }
        };

        // The reducer is order-sensitive: fold strictly by activity time,
        // not by insertion order. The stable sort keeps the store's
        // submission-time tie-breaking.
        new_activities.sort_by(|a, b| a.activity_timestamp.cmp(&b.activity_timestamp));

        // No-op fast path: nothing new since the saved state was computed.
        if resumed && new_activities.is_empty() {
            tracing::debug!(athlete_id, "No new activities, returning saved state");
            // resumed is only true when saved is Some
            return saved.ok_or_else(|| AppError::Storage("saved state vanished".to_string()));
        }

        let goals_by_week = self.assemble_goals(&initial, &new_activities).await?;
        let state = self
            .fold_with_retry(&initial, &new_activities, goals_by_week)
            .await?;

        self.achievements
            .upsert_achievement_state(athlete_id, &state)
            .await?;

        tracing::info!(
            athlete_id,
            folded = new_activities.len(),
            resumed,
            current_week = ?state.current_week,
            "Achievement state updated"
        );
        Ok(state)
    }

    /// Build the goals map for the fold: the carried-over current week plus
    /// every week up to the last activity's week. The contiguous range is
    /// resolved so the reducer's week-by-week transition walk never lands on
    /// a week without goals.
    async fn assemble_goals(
        &self,
        initial: &AchievementState,
        activities: &[CompletedActivity],
    ) -> Result<HashMap<WeekId, WeeklyGoals>> {
        let touched: Vec<WeekId> = initial
            .current_week
            .into_iter()
            .chain(
                activities
                    .iter()
                    .map(|a| week_key_of(a.activity_timestamp, self.utc_offset)),
            )
            .collect();

        let mut goals_by_week = HashMap::new();
        let (Some(&first), Some(&last)) = (touched.iter().min(), touched.iter().max()) else {
            return Ok(goals_by_week);
        };

        let mut week = first;
        loop {
            let goals = self.goals.resolve(week).await?;
            goals_by_week.insert(week, goals);
            if week >= last {
                break;
            }
            week = week.next();
        }
        Ok(goals_by_week)
    }

    /// Fold the suffix in ascending activity-time order. A `GoalsNotFound`
    /// from the reducer means our map was incomplete: resolve the missing
    /// week (create-on-read self-heals) and re-run the fold. Activities are
    /// never skipped.
    async fn fold_with_retry(
        &self,
        initial: &AchievementState,
        activities: &[CompletedActivity],
        mut goals_by_week: HashMap<WeekId, WeeklyGoals>,
    ) -> Result<AchievementState> {
        let mut attempts = 0;
        loop {
            let result = activities
                .iter()
                .try_fold(initial.clone(), |state, activity| {
                    reduce(&state, activity, &goals_by_week, self.utc_offset)
                });

            match result {
                Ok(state) => return Ok(state),
                Err(AppError::GoalsNotFound(week)) if attempts < MAX_FOLD_RETRIES => {
                    attempts += 1;
                    tracing::warn!(
                        week = %week,
                        attempts,
                        "Goals map was incomplete during fold, resolving and retrying"
                    );
                    let goals = self.goals.resolve(week).await?;
                    goals_by_week.insert(week, goals);
                }
                Err(err) => return Err(err),
            }
        }
    }
}
