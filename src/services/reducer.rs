// SPDX-License-Identifier: MIT

//! The achievement reducer: a pure fold step over completed activities.
//!
//! Each call takes a prior [`AchievementState`], one activity, and the goal
//! thresholds for every week the fold may touch, and returns the next state.
//! Streak breaks are decided only when a week is left, against that week's
//! own goals; streak advancement is decided the moment a group's thresholds
//! become met within the current week. Callers must feed activities in
//! ascending `activity_timestamp` order.

use std::collections::HashMap;

use chrono::FixedOffset;

use crate::error::{AppError, Result};
use crate::models::{
    AchievementState, ActivityKind, BestRun, CompletedActivity, ShortSession, Streaks,
    WeeklyCounts, WeeklyGoals,
};
use crate::week::{week_key_of, WeekId};

/// Fold one activity into the achievement state.
///
/// Fails with [`AppError::GoalsNotFound`] when `goals_by_week` is missing a
/// week the fold touches (a caller-contract violation the aggregator heals
/// by resolving the week and retrying), and with
/// [`AppError::InvalidRunMetric`] on non-numeric endurance-run payloads.
pub fn reduce(
    state: &AchievementState,
    activity: &CompletedActivity,
    goals_by_week: &HashMap<WeekId, WeeklyGoals>,
    offset: FixedOffset,
) -> Result<AchievementState> {
    let target = week_key_of(activity.activity_timestamp, offset);
    let mut next = state.clone();

    if next.current_week.is_none() {
        // First-ever activity: open the week and fall through to the
        // same-week accumulation below.
        next.weekly_activities = WeeklyCounts::default();
        next.current_week = Some(target);
    }

    // Week transition: close out each week being left, evaluated against
    // that week's own goals, before counting the activity under its new
    // week. Walking one week at a time makes an intervening week with goals
    // but zero activity fail its threshold check and break the streaks that
    // were active.
    while let Some(current) = next.current_week {
        if current == target {
            break;
        }
        let leaving = goals_for(goals_by_week, current)?;
        close_out_week(&mut next.streaks, &next.weekly_activities, &leaving);
        next.weekly_activities = WeeklyCounts::default();
        // Out-of-order input (target before current) is undefined behavior
        // per the aggregator's ordering contract; jump directly so the fold
        // still terminates.
        next.current_week = Some(if current < target {
            current.next()
        } else {
            target
        });
    }

    let goals = goals_for(goals_by_week, target)?;

    // Same-week accumulation plus the advancement check for the activity's
    // own category group.
    match &activity.kind {
        ActivityKind::EnduranceRun { laps, minutes } => {
            next.weekly_activities.endurance_run += 1;

            let (laps_n, minutes_n) = parse_run_metrics(activity, laps, minutes)?;
            let minutes_per_lap = minutes_n / laps_n;
            if !next.best_run.is_recorded() || minutes_per_lap < next.best_run.minutes_per_lap {
                next.best_run = BestRun {
                    laps: laps_n,
                    minutes: minutes_n,
                    minutes_per_lap,
                    timestamp: Some(activity.activity_timestamp),
                };
            }

            if goals.has_running_goal()
                && next.weekly_activities.endurance_run >= goals.endurance_run
                && next.streaks.last_running_streak_week != Some(target)
            {
                next.streaks.current_running_streak += 1;
                next.streaks.best_running_streak = next
                    .streaks
                    .best_running_streak
                    .max(next.streaks.current_running_streak);
                next.streaks.last_running_streak_week = Some(target);
            }
        }
        ActivityKind::ThirtyMinutesSession(session) => {
            match session {
                ShortSession::PersonalTechnique { .. } => {
                    next.weekly_activities.personal_technique += 1;
                }
                ShortSession::ProbabilityPractice { .. } => {
                    next.weekly_activities.probability_practice += 1;
                }
                ShortSession::BuddyTraining { .. } => {
                    next.weekly_activities.buddy_training += 1;
                }
            }

            if goals.has_attendance_goal()
                && attendance_met(&next.weekly_activities, &goals)
                && next.streaks.last_attendance_streak_week != Some(target)
            {
                next.streaks.current_attendance_streak += 1;
                next.streaks.best_attendance_streak = next
                    .streaks
                    .best_attendance_streak
                    .max(next.streaks.current_attendance_streak);
                next.streaks.last_attendance_streak_week = Some(target);
            }
        }
        // Normal long sessions feed neither streak.
        ActivityKind::NormalLongSession(_) => {}
    }

    next.last_activity_id = Some(activity.id.clone());
    Ok(next)
}

/// Whether all three short-session thresholds are met by the week's counts.
pub(crate) fn attendance_met(counts: &WeeklyCounts, goals: &WeeklyGoals) -> bool {
    counts.personal_technique >= goals.personal_technique
        && counts.probability_practice >= goals.probability_practice
        && counts.buddy_training >= goals.buddy_training
}

fn goals_for(goals_by_week: &HashMap<WeekId, WeeklyGoals>, week: WeekId) -> Result<WeeklyGoals> {
    goals_by_week
        .get(&week)
        .copied()
        .ok_or(AppError::GoalsNotFound(week))
}

/// Break whichever streaks the week being left failed to earn. Groups with
/// no goal that week are left untouched.
fn close_out_week(streaks: &mut Streaks, counts: &WeeklyCounts, goals: &WeeklyGoals) {
    if goals.has_attendance_goal() && !attendance_met(counts, goals) {
        streaks.current_attendance_streak = 0;
        streaks.last_attendance_streak_week = None;
    }
    if goals.has_running_goal() && counts.endurance_run < goals.endurance_run {
        streaks.current_running_streak = 0;
        streaks.last_running_streak_week = None;
    }
}

/// Parse the decimal-string lap/minute payload, failing fast on anything
/// that is not a finite positive number.
fn parse_run_metrics(
    activity: &CompletedActivity,
    laps: &str,
    minutes: &str,
) -> Result<(f64, f64)> {
    let invalid = || AppError::InvalidRunMetric {
        activity_id: activity.id.clone(),
        laps: laps.to_string(),
        minutes: minutes.to_string(),
    };

    let laps_n: f64 = laps.trim().parse().map_err(|_| invalid())?;
    let minutes_n: f64 = minutes.trim().parse().map_err(|_| invalid())?;
    if !laps_n.is_finite() || !minutes_n.is_finite() || laps_n <= 0.0 || minutes_n <= 0.0 {
        return Err(invalid());
    }
    Ok((laps_n, minutes_n))
}
