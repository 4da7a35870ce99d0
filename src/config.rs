//! Application configuration loaded from environment variables.
//!
//! The week-bucketing time zone is fixed for the whole application; it is
//! configuration, not a per-user setting.

use std::env;

use chrono::FixedOffset;

use crate::models::WeeklyGoals;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fixed civil UTC offset used for week bucketing.
    pub utc_offset: FixedOffset,
    /// Thresholds seeded into goal records created on first read of a week.
    pub default_goals: WeeklyGoals,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            utc_offset: FixedOffset::east_opt(9 * 3600).expect("static offset is in range"),
            default_goals: WeeklyGoals {
                personal_technique: 2,
                probability_practice: 1,
                buddy_training: 1,
                endurance_run: 2,
                train_with_coach: 1,
                train_newbies: 1,
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset goal variables fall back to the application defaults; the UTC
    /// offset must parse as `+HH:MM`/`-HH:MM` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let utc_offset = match env::var("TRACKER_UTC_OFFSET") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("TRACKER_UTC_OFFSET"))?,
            Err(_) => defaults.utc_offset,
        };

        Ok(Self {
            utc_offset,
            default_goals: WeeklyGoals {
                personal_technique: env_u32(
                    "DEFAULT_GOAL_PERSONAL_TECHNIQUE",
                    defaults.default_goals.personal_technique,
                )?,
                probability_practice: env_u32(
                    "DEFAULT_GOAL_PROBABILITY_PRACTICE",
                    defaults.default_goals.probability_practice,
                )?,
                buddy_training: env_u32(
                    "DEFAULT_GOAL_BUDDY_TRAINING",
                    defaults.default_goals.buddy_training,
                )?,
                endurance_run: env_u32(
                    "DEFAULT_GOAL_ENDURANCE_RUN",
                    defaults.default_goals.endurance_run,
                )?,
                train_with_coach: env_u32(
                    "DEFAULT_GOAL_TRAIN_WITH_COACH",
                    defaults.default_goals.train_with_coach,
                )?,
                train_newbies: env_u32(
                    "DEFAULT_GOAL_TRAIN_NEWBIES",
                    defaults.default_goals.train_newbies,
                )?,
            },
        })
    }
}

fn env_u32(name: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_overrides() {
        env::set_var("TRACKER_UTC_OFFSET", "+02:00");
        env::set_var("DEFAULT_GOAL_ENDURANCE_RUN", "3");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.utc_offset, FixedOffset::east_opt(2 * 3600).unwrap());
        assert_eq!(config.default_goals.endurance_run, 3);
        // Unset variables keep defaults.
        assert_eq!(config.default_goals.personal_technique, 2);

        // Malformed offsets are rejected rather than silently defaulted.
        env::set_var("TRACKER_UTC_OFFSET", "not-an-offset");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("TRACKER_UTC_OFFSET"))
        ));

        env::remove_var("TRACKER_UTC_OFFSET");
        env::remove_var("DEFAULT_GOAL_ENDURANCE_RUN");
    }
}
