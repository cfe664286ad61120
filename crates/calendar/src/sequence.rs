//! Ascending date sequences.

use std::iter::FusedIterator;

use crate::date::CalendarDate;

/// Generates a contiguous sequence of dates.
///
/// Starting from `start`, produces exactly `n_days` consecutive dates by
/// repeatedly advancing to the next day. Month, year, and leap-day
/// boundaries are handled by the Gregorian calendar.
///
/// # Example
///
/// ```
/// use zodiac_calendar::{CalendarDate, date_sequence};
///
/// let start = CalendarDate::new(2000, 12, 30).unwrap();
/// let dates = date_sequence(start, 4);
/// assert_eq!(dates.len(), 4);
/// assert_eq!(dates[2], CalendarDate::new(2001, 1, 1).unwrap());
/// ```
pub fn date_sequence(start: CalendarDate, n_days: usize) -> Vec<CalendarDate> {
    let mut dates = Vec::with_capacity(n_days);
    if n_days == 0 {
        return dates;
    }
    dates.push(start);
    let mut current = start;
    for _ in 1..n_days {
        current = current.next();
        dates.push(current);
    }
    dates
}

/// Iterator over the days of a [`DateRange`](crate::DateRange), both ends
/// inclusive.
///
/// Created by [`DateRange::iter`](crate::DateRange::iter). Restartable in
/// the sense that every call to `iter()` yields a fresh iterator over the
/// same days.
#[derive(Debug, Clone)]
pub struct DateIter {
    front: CalendarDate,
    back: CalendarDate,
    done: bool,
}

impl DateIter {
    pub(crate) fn new(start: CalendarDate, end: CalendarDate) -> Self {
        Self {
            front: start,
            back: end,
            done: start > end,
        }
    }
}

impl Iterator for DateIter {
    type Item = CalendarDate;

    fn next(&mut self) -> Option<CalendarDate> {
        if self.done {
            return None;
        }
        let current = self.front;
        if current == self.back {
            self.done = true;
        } else {
            self.front = current.next();
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = if self.done {
            0
        } else {
            (self.front.days_until(self.back) + 1) as usize
        };
        (n, Some(n))
    }
}

impl DoubleEndedIterator for DateIter {
    fn next_back(&mut self) -> Option<CalendarDate> {
        if self.done {
            return None;
        }
        let current = self.back;
        if current == self.front {
            self.done = true;
        } else {
            self.back = current.prev();
        }
        Some(current)
    }
}

impl ExactSizeIterator for DateIter {}

impl FusedIterator for DateIter {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn empty() {
        assert!(date_sequence(date(2000, 1, 1), 0).is_empty());
    }

    #[test]
    fn single() {
        let start = date(2000, 6, 15);
        assert_eq!(date_sequence(start, 1), vec![start]);
    }

    #[test]
    fn leap_year_has_366_days() {
        let dates = date_sequence(date(2024, 1, 1), 366);
        assert_eq!(*dates.last().unwrap(), date(2024, 12, 31));
    }

    #[test]
    fn year_transition() {
        let dates = date_sequence(date(2000, 12, 30), 4);
        assert_eq!(
            dates,
            vec![
                date(2000, 12, 30),
                date(2000, 12, 31),
                date(2001, 1, 1),
                date(2001, 1, 2),
            ]
        );
    }

    #[test]
    fn iter_both_ends() {
        let mut it = DateIter::new(date(2020, 2, 27), date(2020, 3, 1));
        assert_eq!(it.len(), 4);
        assert_eq!(it.next(), Some(date(2020, 2, 27)));
        assert_eq!(it.next_back(), Some(date(2020, 3, 1)));
        assert_eq!(it.len(), 2);
        assert_eq!(it.next(), Some(date(2020, 2, 28)));
        assert_eq!(it.next_back(), Some(date(2020, 2, 29)));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn iter_single_day() {
        let d = date(2021, 7, 4);
        let days: Vec<_> = DateIter::new(d, d).collect();
        assert_eq!(days, vec![d]);
    }

    #[test]
    fn iter_inverted_is_empty() {
        let it = DateIter::new(date(2021, 7, 5), date(2021, 7, 4));
        assert_eq!(it.len(), 0);
    }
}
