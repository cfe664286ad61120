//! Search for the lunar extremes bounding a range.

use std::fmt;

use zodiac_calendar::CalendarDate;

use crate::store::CalendarStore;

/// Side of a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Past,
    Future,
}

impl Direction {
    /// `-1` for the past, `+1` for the future.
    pub fn step(self) -> i64 {
        match self {
            Self::Past => -1,
            Self::Future => 1,
        }
    }

    /// Moves `date` by `days` away from the range in this direction.
    pub fn outward(self, date: CalendarDate, days: i64) -> CalendarDate {
        date.shift(self.step() * days)
    }

    /// `true` if `date` lies strictly beyond `reference` in this direction.
    pub fn is_beyond(self, date: CalendarDate, reference: CalendarDate) -> bool {
        match self {
            Self::Past => date < reference,
            Self::Future => date > reference,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Past => "past",
            Self::Future => "future",
        })
    }
}

/// Outcome of a boundary search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// The start date itself is not stored.
    Unknown(CalendarDate),
    /// Known data ends here (end of data, a gap, or a day without a phase)
    /// before any extreme was seen.
    Open(CalendarDate),
    /// One day beyond the nearest extreme.
    Extreme(CalendarDate),
}

impl Boundary {
    pub fn date(self) -> CalendarDate {
        match self {
            Self::Unknown(d) | Self::Open(d) | Self::Extreme(d) => d,
        }
    }

    /// `true` once the extreme has been found.
    pub fn is_resolved(self) -> bool {
        matches!(self, Self::Extreme(_))
    }
}

/// Walks outward from `from` through stored days until a lunar extreme is
/// found.
///
/// The walk only starts if `from` itself is stored; stored data further out
/// is never reached across a gap. An extreme on `from` counts. The walk
/// stops without a result at the first day whose phase is unknown, at a gap
/// in stored days, or where stored data ends.
pub fn find_boundary(store: &CalendarStore, from: CalendarDate, direction: Direction) -> Boundary {
    if !store.contains(from) {
        return Boundary::Unknown(from);
    }
    let mut last: Option<CalendarDate> = None;
    for day in store.walk(from, direction) {
        let date = day.date();
        if let Some(prev) = last {
            if direction.outward(prev, 1) != date {
                return Boundary::Open(prev);
            }
        }
        match day.planetary().lunar_phase() {
            None => return Boundary::Open(date),
            Some(phase) if phase.is_lunar_extreme() => {
                return Boundary::Extreme(direction.outward(date, 1));
            }
            Some(_) => last = Some(date),
        }
    }
    match last {
        Some(date) => Boundary::Open(date),
        None => Boundary::Unknown(from),
    }
}
