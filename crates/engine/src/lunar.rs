//! Neighbour-dependent post-processing: lunar phases and extreme distances.

use zodiac_calendar::CalendarDate;
use zodiac_day::{DayCount, DayRecord, LunarPhase};

use crate::store::CalendarStore;

/// Fills in the lunar phase of every stored day that has none yet but whose
/// previous and next day are both stored.
///
/// Days that already carry a phase are left alone. Returns the number of
/// updated days.
pub fn derive_lunar_phases(store: &mut CalendarStore) -> usize {
    let updates: Vec<DayRecord> = {
        let days: Vec<&DayRecord> = store.iter().collect();
        days.windows(3)
            .filter_map(|w| {
                let (prev, day, next) = (w[0], w[1], w[2]);
                let date = day.date();
                if day.planetary().lunar_phase().is_some()
                    || prev.date() != date.prev()
                    || next.date() != date.next()
                {
                    return None;
                }
                let phase = LunarPhase::from_visibility(
                    prev.planetary().lunar_visibility(),
                    day.planetary().lunar_visibility(),
                    next.planetary().lunar_visibility(),
                );
                Some(day.with_planetary(day.planetary().clone().with_lunar_phase(Some(phase))))
            })
            .collect()
    };
    let updated = updates.len();
    for record in updates {
        store.replace(record);
    }
    updated
}

/// Recomputes "days since last extreme" and "days until next extreme" for
/// the whole store.
///
/// Counts are 0 on an extreme and grow by one per day away from it. A gap
/// between stored days or a day without phase resets the count to
/// `NotCalculated`. Only days whose counts change are replaced; their number
/// is returned.
pub fn count_extreme_distances(store: &mut CalendarStore) -> usize {
    let updates: Vec<DayRecord> = {
        let days: Vec<&DayRecord> = store.iter().collect();
        let since = running_counts(days.iter().copied());
        let mut until = running_counts(days.iter().rev().copied());
        until.reverse();

        days.iter()
            .zip(since.into_iter().zip(until))
            .filter(|(day, (s, u))| {
                day.planetary().days_since_last_extreme() != *s
                    || day.planetary().days_until_next_extreme() != *u
            })
            .map(|(day, (s, u))| {
                day.with_planetary(day.planetary().clone().with_extreme_distances(s, u))
            })
            .collect()
    };
    let updated = updates.len();
    for record in updates {
        store.replace(record);
    }
    updated
}

/// Distance to the most recent extreme seen in iteration order.
fn running_counts<'a>(days: impl Iterator<Item = &'a DayRecord>) -> Vec<DayCount> {
    let mut counts = Vec::new();
    let mut running = DayCount::NotCalculated;
    let mut previous: Option<CalendarDate> = None;
    for day in days {
        let date = day.date();
        if previous.is_some_and(|p| p.days_until(date).abs() != 1) {
            running = DayCount::NotCalculated;
        }
        running = match day.planetary().lunar_phase() {
            None => DayCount::NotCalculated,
            Some(phase) if phase.is_lunar_extreme() => DayCount::Days(0),
            Some(_) => match running {
                DayCount::Days(n) => DayCount::Days(n + 1),
                DayCount::NotCalculated => DayCount::NotCalculated,
            },
        };
        counts.push(running);
        previous = Some(date);
    }
    counts
}
