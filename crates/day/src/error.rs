//! Error types for the zodiac-day crate.

use zodiac_calendar::CalendarDate;

/// Error type for all fallible operations in the zodiac-day crate.
///
/// Covers failed day computations, rejected import records, and invalid
/// observer positions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DayError {
    /// Returned by a [`DayFactory`](crate::DayFactory) that cannot compute a day.
    #[error("computation failed for {date}: {reason}")]
    ComputationFailed {
        /// The day that could not be computed.
        date: CalendarDate,
        /// Description of the failure.
        reason: String,
    },

    /// Returned when a visibility fraction is non-finite or outside 0..=1.
    #[error("invalid lunar visibility {value} for {date} (must be within 0..=1)")]
    InvalidVisibility {
        /// The day carrying the value.
        date: CalendarDate,
        /// The rejected fraction.
        value: f64,
    },

    /// Returned when latitude or longitude are out of range.
    #[error("invalid observer position: latitude {latitude}, longitude {longitude}")]
    InvalidPosition {
        /// Latitude in degrees (must be within -90..=90).
        latitude: f64,
        /// Longitude in degrees (must be within -180..=180).
        longitude: f64,
    },
}
