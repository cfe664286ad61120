//! Deterministic day factories and helpers shared by the integration tests.
//!
//! Visibility follows a 28-day triangle wave starting at a full moon on
//! 2000-01-01 (offset 0), so extremes fall exactly on offsets divisible by
//! 14: full moons on multiples of 28, new moons halfway between.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::FixedOffset;
use parking_lot::{Condvar, Mutex};
use zodiac_calendar::{CalendarDate, DateRange};
use zodiac_day::{
    DayError, DayFactory, DayRecord, LocationProvider, LunarPhase, PlanetaryData, Position,
    RiseSet, StaticLocation, StoredDay,
};

/// Offset of the sample date inside the cycle `[LAST_EXTREME, NEXT_EXTREME]`.
pub const SOME_DATE: i64 = 5;
pub const LAST_EXTREME: i64 = 0;
pub const NEXT_EXTREME: i64 = 14;

pub fn epoch() -> CalendarDate {
    CalendarDate::new(2000, 1, 1).unwrap()
}

pub fn day(offset: i64) -> CalendarDate {
    epoch().shift(offset)
}

pub fn offset(date: CalendarDate) -> i64 {
    epoch().days_until(date)
}

pub fn range(from: i64, to: i64) -> DateRange {
    DateRange::new(day(from), day(to)).unwrap()
}

pub fn offsets(days: &[DayRecord]) -> Vec<i64> {
    days.iter().map(|d| offset(d.date())).collect()
}

pub fn span(from: i64, to: i64) -> Vec<i64> {
    (from..=to).collect()
}

pub fn visibility(date: CalendarDate) -> f64 {
    let m = offset(date).rem_euclid(28);
    (m - 14).abs() as f64 / 14.0
}

pub fn true_phase(date: CalendarDate) -> LunarPhase {
    LunarPhase::from_visibility(
        visibility(date.prev()),
        visibility(date),
        visibility(date.next()),
    )
}

/// Stored days of `from..=to` with their true phases.
pub fn stored_days(from: i64, to: i64) -> Vec<StoredDay> {
    range(from, to)
        .iter()
        .map(|date| StoredDay {
            date,
            lunar_phase: Some(true_phase(date)),
            lunar_visibility: visibility(date),
            lunar_longitude: 0.0,
            lunar_rise_set: RiseSet::default(),
            solar_rise_set: RiseSet::default(),
        })
        .collect()
}

pub fn location() -> Arc<dyn LocationProvider> {
    Arc::new(StaticLocation::new(
        Position::new(48.137, 11.575).unwrap(),
        FixedOffset::east_opt(3600).unwrap(),
    ))
}

fn triangle_day(date: CalendarDate) -> DayRecord {
    let longitude = offset(date) as f64 * 13.0;
    DayRecord::new(date, PlanetaryData::new(visibility(date), longitude))
}

/// Triangle-wave factory that counts its computations.
#[derive(Debug, Default)]
pub struct TriangleFactory {
    pub computed: AtomicUsize,
}

impl TriangleFactory {
    pub fn computed(&self) -> usize {
        self.computed.load(Ordering::SeqCst)
    }
}

impl DayFactory for TriangleFactory {
    fn compute(
        &self,
        date: CalendarDate,
        _location: &dyn LocationProvider,
    ) -> Result<DayRecord, DayError> {
        self.computed.fetch_add(1, Ordering::SeqCst);
        Ok(triangle_day(date))
    }
}

/// Fails on one date.
#[derive(Debug)]
pub struct FaultyFactory {
    pub fail_at: CalendarDate,
}

impl DayFactory for FaultyFactory {
    fn compute(
        &self,
        date: CalendarDate,
        _location: &dyn LocationProvider,
    ) -> Result<DayRecord, DayError> {
        if date == self.fail_at {
            return Err(DayError::ComputationFailed {
                date,
                reason: "ephemeris unavailable".into(),
            });
        }
        Ok(triangle_day(date))
    }
}

/// Panics on every date.
#[derive(Debug)]
pub struct PanickingFactory;

impl DayFactory for PanickingFactory {
    fn compute(
        &self,
        date: CalendarDate,
        _location: &dyn LocationProvider,
    ) -> Result<DayRecord, DayError> {
        panic!("no data for {date}");
    }
}

/// Blocks every computation until the gate is opened.
#[derive(Debug, Default)]
pub struct Gate {
    open: Mutex<bool>,
    opened: Condvar,
}

impl Gate {
    pub fn open(&self) {
        *self.open.lock() = true;
        self.opened.notify_all();
    }

    fn pass(&self) {
        let mut open = self.open.lock();
        while !*open {
            self.opened.wait(&mut open);
        }
    }
}

#[derive(Debug, Default)]
pub struct GatedFactory {
    pub gate: Arc<Gate>,
}

impl DayFactory for GatedFactory {
    fn compute(
        &self,
        date: CalendarDate,
        _location: &dyn LocationProvider,
    ) -> Result<DayRecord, DayError> {
        self.gate.pass();
        Ok(triangle_day(date))
    }
}
