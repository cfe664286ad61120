//! # zodiac-day
//!
//! Per-day records of a lunar calendar and the seams through which they are
//! produced.
//!
//! A [`DayRecord`] bundles the [`PlanetaryData`] of a date (lunar
//! visibility, longitude, rise/set times, phase, distances to the
//! surrounding full/new moons) with the [`ZodiacData`] derived from it.
//! Records are created by a [`DayFactory`], either by computing a date for a
//! [`LocationProvider`] or by importing a [`StoredDay`].
//!
//! ```text
//! CalendarDate ──DayFactory::compute(date, location)──▶ DayRecord
//! StoredDay    ──DayFactory::import_from(stored)──────▶ DayRecord
//! DayRecord    ──StoredDay::from(&record)─────────────▶ StoredDay
//! ```
//!
//! The lunar phase of a day depends on its neighbours, so factories leave it
//! unset; [`LunarPhase::from_visibility`] classifies a day once both
//! neighbours are known.
//!
//! # Quick start
//!
//! ```
//! use chrono::FixedOffset;
//! use zodiac_calendar::CalendarDate;
//! use zodiac_day::{DayFactory, MeanLunation, Position, StaticLocation};
//!
//! let location = StaticLocation::new(
//!     Position::new(48.137, 11.575).unwrap(),
//!     FixedOffset::east_opt(3600).unwrap(),
//! );
//! let date = CalendarDate::new(2017, 1, 12).unwrap();
//! let day = MeanLunation.compute(date, &location).unwrap();
//! assert!(day.planetary().lunar_visibility() > 0.9);
//! ```

mod error;
mod factory;
mod location;
mod lunation;
mod phase;
mod planetary;
mod record;
mod zodiac;

pub use error::DayError;
pub use factory::DayFactory;
pub use location::{LocationProvider, Position, StaticLocation};
pub use lunation::{MeanLunation, SYNODIC_MONTH_DAYS, mean_visibility};
pub use phase::{DayCount, LunarPhase};
pub use planetary::{PlanetaryData, RiseSet};
pub use record::{DayRecord, StoredDay};
pub use zodiac::{Element, PlantPart, ZodiacData, ZodiacSign};
