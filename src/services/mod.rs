// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod achievement;
pub mod goals;
pub mod leaderboard;
pub mod reducer;

pub use achievement::{AchievementService, RecomputeLocks};
pub use goals::GoalResolver;
pub use leaderboard::{AthleteSummary, LeaderboardService};
pub use reducer::reduce;
