//! Error types for the zodiac-calendar crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the zodiac-calendar crate.
///
/// This enum covers invalid Gregorian dates, inverted date ranges, and
/// unparsable date strings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when year, month, and day do not form a Gregorian date.
    #[error("invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// The year that was provided.
        year: i32,
        /// The month that was provided.
        month: u32,
        /// The day that was provided.
        day: u32,
    },

    /// Returned when a range would start after it ends.
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange {
        /// The requested first day.
        start: NaiveDate,
        /// The requested last day.
        end: NaiveDate,
    },

    /// Returned when a string is not an ISO `YYYY-MM-DD` date.
    #[error("cannot parse date {input:?} (expected YYYY-MM-DD)")]
    ParseDate {
        /// The rejected input.
        input: String,
    },
}
