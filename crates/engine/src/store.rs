//! Ordered, date-keyed day storage with gap queries.

use std::collections::BTreeMap;

use zodiac_calendar::{CalendarDate, DateRange};
use zodiac_day::DayRecord;

use crate::extreme::Direction;

/// Day records keyed and ordered by date, at most one per day.
///
/// The store is *complete* when no two consecutive stored dates are more
/// than one day apart.
#[derive(Debug, Clone, Default)]
pub struct CalendarStore {
    days: BTreeMap<CalendarDate, DayRecord>,
}

impl CalendarStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Inserts a record, returning the record it replaced.
    pub fn insert(&mut self, record: DayRecord) -> Option<DayRecord> {
        self.days.insert(record.key(), record)
    }

    /// Swaps in an updated version of a stored record.
    ///
    /// Same as [`insert`](Self::insert); used where the day is known to be
    /// present.
    pub fn replace(&mut self, record: DayRecord) {
        let previous = self.days.insert(record.key(), record);
        debug_assert!(previous.is_some(), "replace of a day that was not stored");
    }

    pub fn get(&self, date: CalendarDate) -> Option<&DayRecord> {
        self.days.get(&date)
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.days.contains_key(&date)
    }

    pub fn remove(&mut self, date: CalendarDate) -> Option<DayRecord> {
        self.days.remove(&date)
    }

    /// Iterates all records in ascending date order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &DayRecord> + '_ {
        self.days.values()
    }

    /// Clones all records in ascending date order.
    pub fn to_vec(&self) -> Vec<DayRecord> {
        self.days.values().cloned().collect()
    }

    /// Range from the first to the last stored date, `None` when empty.
    pub fn span(&self) -> Option<DateRange> {
        let first = *self.days.keys().next()?;
        let last = *self.days.keys().next_back()?;
        DateRange::new(first, last).ok()
    }

    /// Dates of `range` without a record, ascending.
    pub fn missing_dates(&self, range: &DateRange) -> Vec<CalendarDate> {
        range.iter().filter(|d| !self.days.contains_key(d)).collect()
    }

    /// `true` if consecutive stored dates never skip a day.
    pub fn is_complete(&self) -> bool {
        self.days
            .keys()
            .zip(self.days.keys().skip(1))
            .all(|(a, b)| a.next() == *b)
    }

    /// `true` if the store is complete and covers every day of `range`.
    pub fn is_complete_for(&self, range: &DateRange) -> bool {
        let covered = self
            .span()
            .is_some_and(|span| span.start() <= range.start() && range.end() <= span.end());
        covered && self.is_complete() && self.missing_dates(range).is_empty()
    }

    /// Removes and returns every record strictly before `date`, ascending.
    pub fn remove_before(&mut self, date: CalendarDate) -> Vec<DayRecord> {
        let kept = self.days.split_off(&date);
        std::mem::replace(&mut self.days, kept).into_values().collect()
    }

    /// Removes and returns every record at or after `date`, ascending.
    pub fn remove_at_or_after(&mut self, date: CalendarDate) -> Vec<DayRecord> {
        self.days.split_off(&date).into_values().collect()
    }

    /// Clones the records of `from..=to`; empty if `from > to`.
    pub fn slice(&self, from: CalendarDate, to: CalendarDate) -> Vec<DayRecord> {
        if from > to {
            return Vec::new();
        }
        self.days.range(from..=to).map(|(_, d)| d.clone()).collect()
    }

    /// Nearest record at or before `date`.
    pub fn floor(&self, date: CalendarDate) -> Option<&DayRecord> {
        self.days.range(..=date).next_back().map(|(_, d)| d)
    }

    /// Nearest record at or after `date`.
    pub fn ceiling(&self, date: CalendarDate) -> Option<&DayRecord> {
        self.days.range(date..).next().map(|(_, d)| d)
    }

    /// Records from `from` (inclusive) outward in `direction`.
    pub fn walk(
        &self,
        from: CalendarDate,
        direction: Direction,
    ) -> Box<dyn Iterator<Item = &DayRecord> + '_> {
        match direction {
            Direction::Past => Box::new(self.days.range(..=from).rev().map(|(_, d)| d)),
            Direction::Future => Box::new(self.days.range(from..).map(|(_, d)| d)),
        }
    }
}

impl FromIterator<DayRecord> for CalendarStore {
    fn from_iter<I: IntoIterator<Item = DayRecord>>(iter: I) -> Self {
        let mut store = Self::new();
        for record in iter {
            store.insert(record);
        }
        store
    }
}
