// SPDX-License-Identifier: MIT

//! Completed training activity model.
//!
//! Activities arrive fully validated from the submission front end; the core
//! never sees partial records. Exactly one shape applies per record, which
//! the nested enums make a compile-time invariant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed training activity as persisted by the submission front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedActivity {
    /// Unique record id (assigned in submission order upstream).
    pub id: String,
    /// Athlete identifier (owner).
    pub attendance_id: String,
    /// When the activity occurred, as chosen by the submitter. Drives week
    /// bucketing and fold ordering.
    pub activity_timestamp: DateTime<Utc>,
    /// When the record was persisted. Display and tie-breaking only; the
    /// reducer never reads it.
    pub submitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: ActivityKind,
}

/// Top-level activity kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "activity")]
pub enum ActivityKind {
    #[serde(rename = "30-minutes-session")]
    ThirtyMinutesSession(ShortSession),
    #[serde(rename = "endurance-run")]
    EnduranceRun {
        /// Lap count, decimal-string encoded by the front end.
        laps: String,
        /// Total minutes, decimal-string encoded by the front end.
        minutes: String,
    },
    #[serde(rename = "normal-long-session")]
    NormalLongSession(NormalSession),
}

/// Sub-category of a 30-minute session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum ShortSession {
    #[serde(rename = "probability-practice")]
    ProbabilityPractice {
        /// Practice sub-type as chosen on the submission form.
        practice: String,
        /// Difficulty level, 1-4.
        level: u8,
        description: String,
    },
    #[serde(rename = "personal-technique")]
    PersonalTechnique { explanation: String },
    #[serde(rename = "buddy-training")]
    BuddyTraining { explanation: String },
}

/// Sub-type of a normal long session. `Others` requires an explanation; the
/// two standard types carry no payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "session")]
pub enum NormalSession {
    #[serde(rename = "train-with-coach")]
    TrainWithCoach,
    #[serde(rename = "train-newbies")]
    TrainNewbies,
    #[serde(rename = "others")]
    Others { explanation: String },
}
