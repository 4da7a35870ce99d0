// SPDX-License-Identifier: MIT

//! Training-Tracker: weekly training achievement aggregation.
//!
//! This crate folds a time-ordered stream of completed training activities
//! into per-athlete achievement state (weekly counts, attendance and running
//! streaks, best endurance run), with incremental recomputation that resumes
//! from the last processed activity. A separate leaderboard scan ranks all
//! athletes directly from raw history. Submission UI, HTTP surface, and the
//! real document store live outside this crate.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod week;
