//! Planetary day data: lunar visibility, rise/set times, and phase.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::phase::{DayCount, LunarPhase};

/// Rise and set time of a body on one day, in the observer's time zone.
///
/// Either time may be absent (circumpolar bodies, or not computed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RiseSet {
    /// Time the body rises, if it does.
    pub rise: Option<NaiveTime>,
    /// Time the body sets, if it does.
    pub set: Option<NaiveTime>,
}

impl RiseSet {
    /// Creates a rise/set pair.
    pub fn new(rise: Option<NaiveTime>, set: Option<NaiveTime>) -> Self {
        Self { rise, set }
    }
}

/// Planetary data of a single day.
///
/// The raw values (visibility, longitude, rise/set) come from a
/// [`DayFactory`](crate::DayFactory). The lunar phase and the distances to
/// the surrounding extremes depend on neighbouring days and are filled in
/// later through the consuming `with_*` methods.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetaryData {
    lunar_visibility: f64,
    lunar_longitude: f64,
    lunar_rise_set: RiseSet,
    solar_rise_set: RiseSet,
    lunar_phase: Option<LunarPhase>,
    days_since_last_extreme: DayCount,
    days_until_next_extreme: DayCount,
}

impl PlanetaryData {
    /// Creates planetary data from the illuminated fraction of the moon
    /// (0..=1) and its ecliptic longitude in degrees.
    ///
    /// Rise/set times start unknown, the phase unset and both counters
    /// `NotCalculated`.
    pub fn new(lunar_visibility: f64, lunar_longitude: f64) -> Self {
        Self {
            lunar_visibility,
            lunar_longitude: lunar_longitude.rem_euclid(360.0),
            lunar_rise_set: RiseSet::default(),
            solar_rise_set: RiseSet::default(),
            lunar_phase: None,
            days_since_last_extreme: DayCount::NotCalculated,
            days_until_next_extreme: DayCount::NotCalculated,
        }
    }

    /// Sets the lunar rise/set times.
    pub fn with_lunar_rise_set(mut self, rise_set: RiseSet) -> Self {
        self.lunar_rise_set = rise_set;
        self
    }

    /// Sets the solar rise/set times.
    pub fn with_solar_rise_set(mut self, rise_set: RiseSet) -> Self {
        self.solar_rise_set = rise_set;
        self
    }

    /// Sets the lunar phase.
    pub fn with_lunar_phase(mut self, phase: Option<LunarPhase>) -> Self {
        self.lunar_phase = phase;
        self
    }

    /// Sets the distances to the previous and next lunar extreme.
    pub fn with_extreme_distances(mut self, since_last: DayCount, until_next: DayCount) -> Self {
        self.days_since_last_extreme = since_last;
        self.days_until_next_extreme = until_next;
        self
    }

    /// Returns the illuminated fraction of the moon (0..=1).
    pub fn lunar_visibility(&self) -> f64 {
        self.lunar_visibility
    }

    /// Returns the ecliptic longitude of the moon in degrees (0..360).
    pub fn lunar_longitude(&self) -> f64 {
        self.lunar_longitude
    }

    /// Returns the lunar rise/set times.
    pub fn lunar_rise_set(&self) -> RiseSet {
        self.lunar_rise_set
    }

    /// Returns the solar rise/set times.
    pub fn solar_rise_set(&self) -> RiseSet {
        self.solar_rise_set
    }

    /// Returns the lunar phase, or `None` if a neighbouring day is missing.
    pub fn lunar_phase(&self) -> Option<LunarPhase> {
        self.lunar_phase
    }

    /// Returns `true` if the phase is known and is a full or new moon.
    pub fn is_lunar_extreme(&self) -> bool {
        self.lunar_phase.is_some_and(LunarPhase::is_lunar_extreme)
    }

    /// Returns the number of days since the last full or new moon.
    pub fn days_since_last_extreme(&self) -> DayCount {
        self.days_since_last_extreme
    }

    /// Returns the number of days until the next full or new moon.
    pub fn days_until_next_extreme(&self) -> DayCount {
        self.days_until_next_extreme
    }
}
