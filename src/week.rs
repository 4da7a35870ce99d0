// SPDX-License-Identifier: MIT

//! ISO week identifiers and the week key function.
//!
//! All grouping, goal lookup, and streak bucketing keys off a [`WeekId`]:
//! the ISO week-year and week-number of the instant converted into the
//! application's fixed civil time zone. The string form `YYYY-Www` doubles
//! as the persistence key for goal records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AppError;

/// Canonical week identifier: ISO week-year plus week-of-year.
///
/// The week-year may differ from the calendar year at year boundaries
/// (e.g. 2024-12-30 falls in week 1 of week-year 2025).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekId {
    pub week_year: i32,
    pub week: u32,
}

impl WeekId {
    pub fn new(week_year: i32, week: u32) -> Self {
        Self { week_year, week }
    }

    /// The week immediately following this one, rolling the week-year over
    /// after the last ISO week (52 or 53 depending on the year).
    pub fn next(self) -> Self {
        if self.week < weeks_in_iso_year(self.week_year) {
            Self::new(self.week_year, self.week + 1)
        } else {
            Self::new(self.week_year + 1, 1)
        }
    }
}

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.week_year, self.week)
    }
}

impl FromStr for WeekId {
    type Err = AppError;

    /// Parse the `YYYY-Www` storage form: four-digit year, literal `W`,
    /// one-or-two-digit week number in 1..=53.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || AppError::MalformedWeekId(s.to_string());

        let (year_part, week_part) = s.split_once('-').ok_or_else(malformed)?;
        if year_part.len() != 4 || !year_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let digits = week_part.strip_prefix('W').ok_or_else(malformed)?;
        if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }

        let week_year: i32 = year_part.parse().map_err(|_| malformed())?;
        let week: u32 = digits.parse().map_err(|_| malformed())?;
        if !(1..=53).contains(&week) {
            return Err(malformed());
        }

        Ok(Self { week_year, week })
    }
}

// Persisted as the `YYYY-Www` string so the goal-record key and the in-memory
// identifier stay losslessly interconvertible.
impl Serialize for WeekId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for WeekId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Map an instant to the week it belongs to, in the fixed civil zone.
///
/// Two instants in the same Monday-Sunday civil week produce identical keys.
pub fn week_key_of(timestamp: DateTime<Utc>, offset: FixedOffset) -> WeekId {
    let civil = timestamp.with_timezone(&offset);
    let iso = civil.iso_week();
    WeekId::new(iso.year(), iso.week())
}

/// Number of ISO weeks in a week-year (52 or 53).
///
/// 28 December always falls in the last ISO week of its week-year.
fn weeks_in_iso_year(week_year: i32) -> u32 {
    NaiveDate::from_ymd_opt(week_year, 12, 28).map_or(52, |d| d.iso_week().week())
}
