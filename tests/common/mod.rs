// SPDX-License-Identifier: MIT

//! Shared fixtures for integration tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use dashmap::DashMap;

use training_tracker::config::Config;
use training_tracker::db::MemoryStore;
use training_tracker::models::{ActivityKind, CompletedActivity, NormalSession, ShortSession};
use training_tracker::services::{AchievementService, GoalResolver, LeaderboardService};

/// Monday 10:00 civil time (UTC+9) of ISO week `week` of 2024.
#[allow(dead_code)]
pub fn monday_of_week(week: u32) -> DateTime<Utc> {
    // 2024-01-01 is the Monday of 2024-W01.
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap();
    base + chrono::Duration::weeks(i64::from(week) - 1)
}

#[allow(dead_code)]
pub fn activity(
    id: &str,
    athlete: &str,
    ts: DateTime<Utc>,
    kind: ActivityKind,
) -> CompletedActivity {
    CompletedActivity {
        id: id.to_string(),
        attendance_id: athlete.to_string(),
        activity_timestamp: ts,
        submitted_at: ts + chrono::Duration::minutes(5),
        kind,
    }
}

#[allow(dead_code)]
pub fn personal_technique(id: &str, athlete: &str, ts: DateTime<Utc>) -> CompletedActivity {
    activity(
        id,
        athlete,
        ts,
        ActivityKind::ThirtyMinutesSession(ShortSession::PersonalTechnique {
            explanation: "footwork drills".to_string(),
        }),
    )
}

#[allow(dead_code)]
pub fn probability_practice(id: &str, athlete: &str, ts: DateTime<Utc>) -> CompletedActivity {
    activity(
        id,
        athlete,
        ts,
        ActivityKind::ThirtyMinutesSession(ShortSession::ProbabilityPractice {
            practice: "scenario-review".to_string(),
            level: 2,
            description: "drills".to_string(),
        }),
    )
}

#[allow(dead_code)]
pub fn buddy_training(id: &str, athlete: &str, ts: DateTime<Utc>) -> CompletedActivity {
    activity(
        id,
        athlete,
        ts,
        ActivityKind::ThirtyMinutesSession(ShortSession::BuddyTraining {
            explanation: "sparring".to_string(),
        }),
    )
}

#[allow(dead_code)]
pub fn endurance_run(
    id: &str,
    athlete: &str,
    ts: DateTime<Utc>,
    laps: &str,
    minutes: &str,
) -> CompletedActivity {
    activity(
        id,
        athlete,
        ts,
        ActivityKind::EnduranceRun {
            laps: laps.to_string(),
            minutes: minutes.to_string(),
        },
    )
}

#[allow(dead_code)]
pub fn normal_session(id: &str, athlete: &str, ts: DateTime<Utc>) -> CompletedActivity {
    activity(
        id,
        athlete,
        ts,
        ActivityKind::NormalLongSession(NormalSession::TrainWithCoach),
    )
}

/// A full goal-complete week of activities for one athlete under the
/// default thresholds (2 personal technique, 1 probability practice,
/// 1 buddy training, 2 endurance runs).
#[allow(dead_code)]
pub fn complete_week(athlete: &str, week: u32, id_prefix: &str) -> Vec<CompletedActivity> {
    let ts = monday_of_week(week);
    let id = |n: u32| format!("{id_prefix}-{n}");
    vec![
        personal_technique(&id(1), athlete, ts),
        personal_technique(&id(2), athlete, ts + chrono::Duration::hours(1)),
        probability_practice(&id(3), athlete, ts + chrono::Duration::hours(2)),
        buddy_training(&id(4), athlete, ts + chrono::Duration::hours(3)),
        endurance_run(&id(5), athlete, ts + chrono::Duration::hours(4), "8", "48"),
        endurance_run(&id(6), athlete, ts + chrono::Duration::hours(5), "8", "50"),
    ]
}

/// Build the achievement service over a shared in-memory store.
#[allow(dead_code)]
pub fn achievement_service(store: &Arc<MemoryStore>) -> AchievementService {
    let config = Config::default();
    let resolver = GoalResolver::new(store.clone(), config.default_goals);
    AchievementService::new(
        store.clone(),
        store.clone(),
        resolver,
        config.utc_offset,
        Arc::new(DashMap::new()),
    )
}

/// Build the leaderboard service over a shared in-memory store.
#[allow(dead_code)]
pub fn leaderboard_service(store: &Arc<MemoryStore>) -> LeaderboardService {
    let config = Config::default();
    let resolver = GoalResolver::new(store.clone(), config.default_goals);
    LeaderboardService::new(store.clone(), resolver, config.utc_offset)
}
