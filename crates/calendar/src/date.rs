//! Gregorian calendar day.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// A single Gregorian calendar day.
///
/// Ordering, equality, and hashing are by day only, which makes
/// `CalendarDate` the lookup key for stored days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Creates a new `CalendarDate` from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] if the triple is not a valid
    /// Gregorian date (e.g. February 29 of a common year).
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, CalendarError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(CalendarError::InvalidDate { year, month, day })
    }

    /// Wraps an existing [`NaiveDate`].
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the underlying [`NaiveDate`].
    pub fn naive(self) -> NaiveDate {
        self.0
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// Returns the day within the month (1..=31).
    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// Returns the following day.
    ///
    /// # Panics
    ///
    /// Panics at the upper end of chrono's supported range (year 262143).
    pub fn next(self) -> Self {
        Self(self.0.succ_opt().expect("date within supported range"))
    }

    /// Returns the preceding day.
    ///
    /// # Panics
    ///
    /// Panics at the lower end of chrono's supported range.
    pub fn prev(self) -> Self {
        Self(self.0.pred_opt().expect("date within supported range"))
    }

    /// Returns the date `days` days later (earlier for negative `days`).
    ///
    /// # Panics
    ///
    /// Panics if the result leaves chrono's supported range.
    pub fn shift(self, days: i64) -> Self {
        Self(
            self.0
                .checked_add_signed(TimeDelta::days(days))
                .expect("date within supported range"),
        )
    }

    /// Returns the signed number of days from `self` to `other`.
    ///
    /// Positive when `other` is later.
    pub fn days_until(self, other: Self) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| CalendarError::ParseDate {
                input: s.to_string(),
            })
    }
}
