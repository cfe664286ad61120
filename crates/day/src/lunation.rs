//! Mean-lunation reference factory.

use std::f64::consts::TAU;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use tracing::trace;
use zodiac_calendar::CalendarDate;

use crate::error::DayError;
use crate::factory::DayFactory;
use crate::location::LocationProvider;
use crate::planetary::PlanetaryData;
use crate::record::DayRecord;

/// Mean length of the synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_853;

/// Mean lunar longitude at J2000.0 in degrees.
const MEAN_LONGITUDE_J2000: f64 = 218.316;
/// Mean daily motion of the moon in longitude, degrees per day.
const MEAN_DAILY_MOTION: f64 = 13.176_396;

/// Day factory based on the mean synodic month.
///
/// The moon's age is measured from the new moon of 2000-01-06 18:14 UTC at
/// local noon of each day, giving an illuminated fraction of
/// `(1 - cos(2π·age/P)) / 2`. The longitude uses the mean lunar motion.
/// Accuracy is within a day or so of the true phases, which is sufficient
/// for the reference CLI. Rise and set times are not computed.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanLunation;

impl MeanLunation {
    pub fn new() -> Self {
        Self
    }

    /// Days from the reference new moon to local noon of `date`.
    fn age_days(date: CalendarDate, location: &dyn LocationProvider) -> Result<f64, DayError> {
        let noon = date
            .naive()
            .and_hms_opt(12, 0, 0)
            .ok_or_else(|| DayError::ComputationFailed {
                date,
                reason: "no local noon".into(),
            })?;
        let offset = i64::from(location.time_zone().local_minus_utc());
        let noon_utc = noon - TimeDelta::seconds(offset);
        let seconds = (noon_utc - reference_new_moon()).num_seconds();
        Ok(seconds as f64 / 86_400.0)
    }
}

fn reference_new_moon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 6)
        .and_then(|d| d.and_hms_opt(18, 14, 0))
        .expect("reference epoch is a valid date")
}

/// Illuminated fraction for a moon age in days.
pub fn mean_visibility(age_days: f64) -> f64 {
    (1.0 - (TAU * age_days / SYNODIC_MONTH_DAYS).cos()) / 2.0
}

impl DayFactory for MeanLunation {
    fn compute(
        &self,
        date: CalendarDate,
        location: &dyn LocationProvider,
    ) -> Result<DayRecord, DayError> {
        let age = Self::age_days(date, location)?;
        let visibility = mean_visibility(age).clamp(0.0, 1.0);
        // J2000.0 is 2000-01-01 12:00 TT, 5.26 days before the reference new moon.
        let days_since_j2000 = age + 5.259_722;
        let longitude = MEAN_LONGITUDE_J2000 + MEAN_DAILY_MOTION * days_since_j2000;
        trace!(%date, visibility, longitude, "computed mean lunation");
        Ok(DayRecord::new(date, PlanetaryData::new(visibility, longitude)))
    }
}
