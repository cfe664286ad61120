//! Observer location.

use chrono::FixedOffset;

use crate::error::DayError;

/// Geographic position of the observer in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    latitude: f64,
    longitude: f64,
}

impl Position {
    /// Creates a position.
    ///
    /// # Errors
    ///
    /// Returns [`DayError::InvalidPosition`] if the latitude is outside
    /// `-90..=90`, the longitude outside `-180..=180`, or either is
    /// non-finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DayError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DayError::InvalidPosition {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude in degrees (north positive).
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in degrees (east positive).
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Source of the observer position and time zone.
///
/// Implementations are shared by all workers of a generation run and must be
/// constant for the lifetime of a calendar.
pub trait LocationProvider: Send + Sync {
    /// Position of the observer.
    fn observer_position(&self) -> Position;

    /// Time zone used for local times.
    fn time_zone(&self) -> FixedOffset;
}

/// A fixed position with a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticLocation {
    position: Position,
    time_zone: FixedOffset,
}

impl StaticLocation {
    pub fn new(position: Position, time_zone: FixedOffset) -> Self {
        Self {
            position,
            time_zone,
        }
    }
}

impl LocationProvider for StaticLocation {
    fn observer_position(&self) -> Position {
        self.position
    }

    fn time_zone(&self) -> FixedOffset {
        self.time_zone
    }
}
