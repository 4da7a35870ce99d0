// SPDX-License-Identifier: MIT

//! Hall-of-fame summary across all athletes.
//!
//! A stateless batch computation, independent of the persisted per-athlete
//! achievement state: it scans raw activity history, groups by athlete and
//! week, and ranks athletes by their longest goal-complete week runs and
//! best endurance pace. Unlike the reducer path, malformed run metrics are
//! skipped here rather than treated as errors.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::FixedOffset;
use futures_util::{stream, StreamExt, TryStreamExt};
use serde::Serialize;

use crate::db::ActivityStore;
use crate::error::{AppError, Result};
use crate::models::{ActivityKind, BestRun, CompletedActivity, ShortSession, WeeklyCounts};
use crate::services::goals::GoalResolver;
use crate::services::reducer::attendance_met;
use crate::week::{week_key_of, WeekId};

const MAX_CONCURRENT_FETCHES: usize = 50;

/// Runs shorter than this many laps are too noisy to rank by pace.
const MIN_QUALIFYING_LAPS: f64 = 6.0;

/// One athlete's row in the hall of fame.
#[derive(Debug, Clone, Serialize)]
pub struct AthleteSummary {
    pub attendance_id: String,
    /// Longest run of consecutive weeks meeting all short-session goals.
    pub longest_attendance_streak: u32,
    /// Longest run of consecutive weeks meeting the endurance-run goal.
    pub longest_running_streak: u32,
    /// Best qualified run (at least [`MIN_QUALIFYING_LAPS`] laps).
    pub best_run: Option<BestRun>,
}

/// Computes the global hall-of-fame ranking.
#[derive(Clone)]
pub struct LeaderboardService {
    activities: Arc<dyn ActivityStore>,
    goals: GoalResolver,
    utc_offset: FixedOffset,
}

impl LeaderboardService {
    pub fn new(
        activities: Arc<dyn ActivityStore>,
        goals: GoalResolver,
        utc_offset: FixedOffset,
    ) -> Self {
        Self {
            activities,
            goals,
            utc_offset,
        }
    }

    /// Summaries for every athlete with activity history, best first.
    pub async fn hall_of_fame(&self) -> Result<Vec<AthleteSummary>> {
        let athlete_ids = self.activities.list_athlete_ids().await?;
        tracing::debug!(athletes = athlete_ids.len(), "Computing hall of fame");

        let histories: Vec<(String, Vec<CompletedActivity>)> =
            stream::iter(athlete_ids.into_iter().map(|id| {
                let store = Arc::clone(&self.activities);
                async move {
                    let history = store.find_activities_for_athlete(&id, None).await?;
                    Ok::<_, AppError>((id, history))
                }
            }))
            .buffer_unordered(MAX_CONCURRENT_FETCHES)
            .try_collect()
            .await?;

        let mut summaries = Vec::with_capacity(histories.len());
        for (attendance_id, history) in histories {
            summaries.push(self.summarize(attendance_id, &history).await?);
        }

        summaries.sort_by(|a, b| {
            b.longest_attendance_streak
                .cmp(&a.longest_attendance_streak)
                .then_with(|| b.longest_running_streak.cmp(&a.longest_running_streak))
                .then_with(|| {
                    best_pace(a)
                        .partial_cmp(&best_pace(b))
                        .unwrap_or(Ordering::Equal)
                })
        });
        Ok(summaries)
    }

    async fn summarize(
        &self,
        attendance_id: String,
        history: &[CompletedActivity],
    ) -> Result<AthleteSummary> {
        let mut weekly: HashMap<WeekId, WeeklyCounts> = HashMap::new();
        let mut best_run: Option<BestRun> = None;

        for activity in history {
            let week = week_key_of(activity.activity_timestamp, self.utc_offset);
            let counts = weekly.entry(week).or_default();

            match &activity.kind {
                ActivityKind::EnduranceRun { laps, minutes } => {
                    counts.endurance_run += 1;

                    // Lenient path: unparsable metrics exclude the run from
                    // pace ranking instead of failing the whole scan.
                    let Some((laps_n, minutes_n)) = parse_run_lenient(laps, minutes) else {
                        tracing::debug!(
                            activity_id = %activity.id,
                            "Skipping run with non-numeric metrics"
                        );
                        continue;
                    };
                    if laps_n < MIN_QUALIFYING_LAPS {
                        continue;
                    }
                    let minutes_per_lap = minutes_n / laps_n;
                    if best_run.is_none_or(|b| minutes_per_lap < b.minutes_per_lap) {
                        best_run = Some(BestRun {
                            laps: laps_n,
                            minutes: minutes_n,
                            minutes_per_lap,
                            timestamp: Some(activity.activity_timestamp),
                        });
                    }
                }
                ActivityKind::ThirtyMinutesSession(session) => match session {
                    ShortSession::PersonalTechnique { .. } => counts.personal_technique += 1,
                    ShortSession::ProbabilityPractice { .. } => counts.probability_practice += 1,
                    ShortSession::BuddyTraining { .. } => counts.buddy_training += 1,
                },
                ActivityKind::NormalLongSession(_) => {}
            }
        }

        let mut weeks: Vec<WeekId> = weekly.keys().copied().collect();
        weeks.sort_unstable();

        let mut attendance_weeks = Vec::new();
        let mut running_weeks = Vec::new();
        for week in weeks {
            let goals = self.goals.resolve(week).await?;
            let counts = weekly[&week];
            if goals.has_attendance_goal() && attendance_met(&counts, &goals) {
                attendance_weeks.push(week);
            }
            if goals.has_running_goal() && counts.endurance_run >= goals.endurance_run {
                running_weeks.push(week);
            }
        }

        Ok(AthleteSummary {
            attendance_id,
            longest_attendance_streak: longest_consecutive(&attendance_weeks),
            longest_running_streak: longest_consecutive(&running_weeks),
            best_run,
        })
    }
}

fn best_pace(summary: &AthleteSummary) -> f64 {
    summary
        .best_run
        .map_or(f64::INFINITY, |b| b.minutes_per_lap)
}

/// Longest run of calendar-consecutive weeks in a sorted, distinct list.
/// Week-year rollover counts as adjacent (52/53 of one year precedes week 1
/// of the next).
fn longest_consecutive(weeks: &[WeekId]) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut prev: Option<WeekId> = None;
    for &week in weeks {
        run = match prev {
            Some(p) if p.next() == week => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(week);
    }
    best
}

fn parse_run_lenient(laps: &str, minutes: &str) -> Option<(f64, f64)> {
    let laps_n: f64 = laps.trim().parse().ok()?;
    let minutes_n: f64 = minutes.trim().parse().ok()?;
    if !laps_n.is_finite() || !minutes_n.is_finite() || laps_n <= 0.0 || minutes_n <= 0.0 {
        return None;
    }
    Some((laps_n, minutes_n))
}
