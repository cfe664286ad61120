//! Day records and their import/export shape.

use serde::{Deserialize, Serialize};
use zodiac_calendar::CalendarDate;

use crate::error::DayError;
use crate::phase::LunarPhase;
use crate::planetary::{PlanetaryData, RiseSet};
use crate::zodiac::ZodiacData;

/// All computed data of one calendar day.
///
/// Records are immutable: post-processing that fills in neighbour-dependent
/// values builds a new record with [`DayRecord::with_planetary`].
///
/// `PartialEq` compares the full value. Containers that need to order or
/// look up records use [`DayRecord::key`] instead.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    date: CalendarDate,
    planetary: PlanetaryData,
    zodiac: ZodiacData,
}

impl DayRecord {
    /// Creates a record, deriving the zodiac data from the planetary data.
    pub fn new(date: CalendarDate, planetary: PlanetaryData) -> Self {
        let zodiac = ZodiacData::from_lunar_longitude(planetary.lunar_longitude());
        Self {
            date,
            planetary,
            zodiac,
        }
    }

    /// Rehydrates a record from stored data without recomputing
    /// astronomical values.
    ///
    /// # Errors
    ///
    /// Returns [`DayError::InvalidVisibility`] if the stored visibility is
    /// non-finite or outside `0..=1`.
    pub fn from_stored(stored: &StoredDay) -> Result<Self, DayError> {
        let value = stored.lunar_visibility;
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(DayError::InvalidVisibility {
                date: stored.date,
                value,
            });
        }
        let planetary = PlanetaryData::new(value, stored.lunar_longitude)
            .with_lunar_rise_set(stored.lunar_rise_set)
            .with_solar_rise_set(stored.solar_rise_set)
            .with_lunar_phase(stored.lunar_phase);
        Ok(Self::new(stored.date, planetary))
    }

    /// Returns the ordering key of the record.
    pub fn key(&self) -> CalendarDate {
        self.date
    }

    /// Returns the date of the record.
    pub fn date(&self) -> CalendarDate {
        self.date
    }

    /// Returns the planetary data.
    pub fn planetary(&self) -> &PlanetaryData {
        &self.planetary
    }

    /// Returns the zodiac data.
    pub fn zodiac(&self) -> &ZodiacData {
        &self.zodiac
    }

    /// Returns a new record for the same day with replaced planetary data.
    pub fn with_planetary(&self, planetary: PlanetaryData) -> Self {
        Self::new(self.date, planetary)
    }
}

/// Minimal, format-agnostic data needed to restore a [`DayRecord`].
///
/// Derived values (zodiac data, extreme distances) are not stored; they are
/// recomputed on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDay {
    /// The day.
    pub date: CalendarDate,
    /// Lunar phase, if it was known when stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunar_phase: Option<LunarPhase>,
    /// Illuminated fraction of the moon (0..=1).
    pub lunar_visibility: f64,
    /// Ecliptic longitude of the moon in degrees.
    #[serde(default)]
    pub lunar_longitude: f64,
    /// Lunar rise and set.
    #[serde(default)]
    pub lunar_rise_set: RiseSet,
    /// Solar rise and set.
    #[serde(default)]
    pub solar_rise_set: RiseSet,
}

impl From<&DayRecord> for StoredDay {
    fn from(day: &DayRecord) -> Self {
        let p = day.planetary();
        Self {
            date: day.date(),
            lunar_phase: p.lunar_phase(),
            lunar_visibility: p.lunar_visibility(),
            lunar_longitude: p.lunar_longitude(),
            lunar_rise_set: p.lunar_rise_set(),
            solar_rise_set: p.solar_rise_set(),
        }
    }
}
