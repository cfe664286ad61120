//! Inclusive date intervals.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::error::CalendarError;
use crate::sequence::DateIter;

/// An inclusive interval of calendar days with `start <= end`.
///
/// Ranges are immutable values; every adjusting operation returns a new
/// range. Equality compares both bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange", into = "RawRange")]
pub struct DateRange {
    start: CalendarDate,
    end: CalendarDate,
}

impl DateRange {
    /// Creates a range covering `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidRange`] if `start` is after `end`.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, CalendarError> {
        if start > end {
            return Err(CalendarError::InvalidRange {
                start: start.naive(),
                end: end.naive(),
            });
        }
        Ok(Self { start, end })
    }

    /// Creates a range containing exactly one day.
    pub fn single(date: CalendarDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Returns the first day of the range.
    pub fn start(&self) -> CalendarDate {
        self.start
    }

    /// Returns the last day of the range.
    pub fn end(&self) -> CalendarDate {
        self.end
    }

    /// Returns `true` if `date` lies within the range.
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns the number of days in the range (always at least 1).
    pub fn len_days(&self) -> u64 {
        self.start.days_until(self.end) as u64 + 1
    }

    /// Returns a new range widened by `before` days at the start and `after`
    /// days at the end.
    pub fn expand(&self, before: u32, after: u32) -> Self {
        Self {
            start: self.start.shift(-i64::from(before)),
            end: self.end.shift(i64::from(after)),
        }
    }

    /// Returns the smallest range covering both `self` and `other`.
    pub fn hull(&self, other: &Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Returns an ascending iterator over every day of the range.
    pub fn iter(&self) -> DateIter {
        DateIter::new(self.start, self.end)
    }
}

impl IntoIterator for DateRange {
    type Item = CalendarDate;
    type IntoIter = DateIter;

    fn into_iter(self) -> DateIter {
        self.iter()
    }
}

impl IntoIterator for &DateRange {
    type Item = CalendarDate;
    type IntoIter = DateIter;

    fn into_iter(self) -> DateIter {
        self.iter()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Unchecked serde shape; validated on the way in.
#[derive(Serialize, Deserialize)]
struct RawRange {
    start: CalendarDate,
    end: CalendarDate,
}

impl TryFrom<RawRange> for DateRange {
    type Error = CalendarError;

    fn try_from(raw: RawRange) -> Result<Self, CalendarError> {
        Self::new(raw.start, raw.end)
    }
}

impl From<DateRange> for RawRange {
    fn from(range: DateRange) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}
