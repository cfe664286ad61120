mod support;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use zodiac_engine::{Calendar, EngineError, ProgressListener, ProgressState, Scope};

use support::*;

fn calendar(expected: (i64, i64), scope: Scope) -> Calendar<TriangleFactory> {
    Calendar::new(
        range(expected.0, expected.1),
        scope,
        location(),
        TriangleFactory::default(),
    )
    .unwrap()
}

fn is_busy<T: std::fmt::Debug>(result: Result<T, EngineError>) -> bool {
    matches!(
        result,
        Err(EngineError::ConcurrentAccess {
            state: ProgressState::Generating
        })
    )
}

#[test]
fn readers_fail_fast_while_generating() {
    let factory = GatedFactory::default();
    let gate = Arc::clone(&factory.gate);
    let cal = Calendar::new(range(0, 3), Scope::Day, location(), factory).unwrap();

    cal.start_generation().unwrap();
    assert_eq!(cal.state(), ProgressState::Generating);

    assert!(is_busy(cal.get(day(0))));
    assert!(is_busy(cal.all_days()));
    assert!(is_busy(cal.valid_days()));
    assert!(is_busy(cal.is_complete()));
    assert!(is_busy(cal.newly_generated()));
    assert!(is_busy(cal.remove_overhead(true)));
    assert!(is_busy(cal.fix_range_expected_to_include_existing_days()));
    assert!(matches!(
        cal.start_extending(true),
        Err(EngineError::SessionActive { .. })
    ));

    // Not gated
    assert_eq!(cal.scope(), Scope::Day);
    assert_eq!(cal.range_expected(), range(0, 3));

    gate.open();
    cal.wait().unwrap();
    assert_eq!(cal.state(), ProgressState::Finished);
    assert_eq!(cal.all_days().unwrap().len(), 4);
}

#[test]
fn session_keeps_the_range_it_started_with() {
    let factory = GatedFactory::default();
    let gate = Arc::clone(&factory.gate);
    let cal = Calendar::new(range(0, 2), Scope::Day, location(), factory).unwrap();

    cal.start_generation().unwrap();
    cal.set_range_expected(range(20, 22));
    gate.open();
    cal.wait().unwrap();

    assert_eq!(offsets(&cal.newly_generated().unwrap()), span(0, 2));
    assert_eq!(cal.range_expected(), range(20, 22));
    assert!(!cal.is_complete().unwrap());
}

#[test]
fn finished_listener_can_read() {
    let cal = Arc::new(calendar((0, 2), Scope::Day));
    let seen = Arc::new(AtomicUsize::new(0));

    let (c, s) = (Arc::downgrade(&cal), Arc::clone(&seen));
    let listener: Arc<dyn ProgressListener> =
        Arc::new(move |_: ProgressState, new: ProgressState| {
            if new == ProgressState::Finished {
                if let Some(cal) = c.upgrade() {
                    let days = cal.all_days().unwrap();
                    s.store(days.len(), Ordering::SeqCst);
                }
            }
        });
    cal.add_progress_listener(listener);

    cal.start_generation().unwrap();
    cal.wait().unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), 3);
}

#[test]
fn removed_listener_is_not_called() {
    let cal = calendar((0, 0), Scope::Day);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let listener: Arc<dyn ProgressListener> =
        Arc::new(move |_: ProgressState, _: ProgressState| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

    cal.add_progress_listener(Arc::clone(&listener));
    cal.remove_progress_listener(&listener);
    cal.start_generation().unwrap();
    cal.wait().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn wait_without_session_is_ok() {
    let cal = calendar((0, 0), Scope::Day);
    assert!(cal.wait().is_ok());
    assert_eq!(cal.state(), ProgressState::None);
}

#[test]
fn panicking_factory_fails_only_the_session() {
    let cal = Calendar::new(range(0, 3), Scope::Day, location(), PanickingFactory).unwrap();
    cal.import_days(&stored_days(0, 1)).unwrap();

    cal.start_generation().unwrap();
    assert!(matches!(cal.wait(), Err(EngineError::SessionPanicked)));
    assert_eq!(cal.state(), ProgressState::Finished);
    assert!(matches!(cal.last_error(), Some(EngineError::SessionPanicked)));

    // Still usable
    assert_eq!(offsets(&cal.all_days().unwrap()), span(0, 1));
    assert!(cal.newly_generated().unwrap().is_empty());
    assert_eq!(cal.import_days(&stored_days(2, 3)).unwrap(), 2);
    assert!(cal.is_complete().unwrap());

    cal.start_generation().unwrap();
    cal.wait().unwrap();
    assert_eq!(cal.state(), ProgressState::Finished);
}

#[test]
fn valid_days_by_scope() {
    let empty = calendar((0, 4), Scope::Phase);
    assert_eq!(empty.valid_days().unwrap(), Some(Vec::new()));

    let daily = calendar((0, 4), Scope::Day);
    daily.import_days(&stored_days(0, 4)).unwrap();
    assert_eq!(offsets(&daily.valid_days().unwrap().unwrap()), span(0, 4));

    let phase = calendar((0, 4), Scope::Phase);
    phase.import_days(&stored_days(0, 4)).unwrap();
    assert_eq!(offsets(&phase.valid_days().unwrap().unwrap()), span(1, 3));

    let short = calendar((0, 1), Scope::Cycle);
    short.import_days(&stored_days(0, 1)).unwrap();
    assert_eq!(short.valid_days().unwrap(), Some(Vec::new()));

    let gappy = calendar((0, 4), Scope::Day);
    gappy.import_days(&stored_days(0, 1)).unwrap();
    gappy.import_days(&stored_days(3, 4)).unwrap();
    assert_eq!(gappy.valid_days().unwrap(), None);
}

#[test]
fn is_complete_checks_the_expected_range() {
    let cal = calendar((2, 6), Scope::Day);
    cal.import_days(&stored_days(0, 5)).unwrap();
    assert!(!cal.is_complete().unwrap());

    cal.set_range_expected(range(1, 5));
    assert!(cal.is_complete().unwrap());
}

#[test]
fn fix_range_expected_includes_stored_days() {
    let cal = calendar((3, 5), Scope::Day);
    assert_eq!(
        cal.fix_range_expected_to_include_existing_days().unwrap(),
        range(3, 5)
    );

    cal.import_days(&stored_days(0, 10)).unwrap();
    let fixed = cal.fix_range_expected_to_include_existing_days().unwrap();
    assert_eq!(fixed, range(0, 10));
    assert_eq!(cal.range_expected(), range(0, 10));

    // Never narrows
    cal.set_range_expected(range(-5, 20));
    assert_eq!(
        cal.fix_range_expected_to_include_existing_days().unwrap(),
        range(-5, 20)
    );
}

#[test]
fn remove_overhead_day_and_phase() {
    let daily = calendar((4, 6), Scope::Day);
    daily.import_days(&stored_days(0, 10)).unwrap();
    let removed = daily.remove_overhead(true).unwrap();
    assert_eq!(offsets(&removed), vec![0, 1, 2, 3, 7, 8, 9, 10]);
    assert_eq!(offsets(&daily.all_days().unwrap()), span(4, 6));

    let phase = calendar((4, 6), Scope::Phase);
    phase.import_days(&stored_days(0, 10)).unwrap();
    let removed = phase.remove_overhead(false).unwrap();
    assert_eq!(offsets(&removed), span(0, 2));
    assert_eq!(offsets(&phase.all_days().unwrap()), span(3, 10));
}

#[test]
fn remove_overhead_cycle_keeps_the_extremes() {
    let cal = calendar((SOME_DATE, SOME_DATE + 2), Scope::Cycle);
    cal.import_days(&stored_days(-10, 30)).unwrap();

    let removed = cal.remove_overhead(false).unwrap();
    assert_eq!(offsets(&removed), span(-10, LAST_EXTREME - 2));
    assert_eq!(offsets(&cal.all_days().unwrap()), span(LAST_EXTREME - 1, 30));

    let removed = cal.remove_overhead(true).unwrap();
    assert_eq!(offsets(&removed), span(NEXT_EXTREME + 2, 30));
    assert_eq!(
        offsets(&cal.all_days().unwrap()),
        span(LAST_EXTREME - 1, NEXT_EXTREME + 1)
    );
    assert_eq!(
        offsets(&cal.valid_days().unwrap().unwrap()),
        span(LAST_EXTREME, NEXT_EXTREME)
    );
}

#[test]
fn remove_overhead_cycle_drops_distant_days() {
    let cal = calendar((SOME_DATE, SOME_DATE + 2), Scope::Cycle);
    cal.import_days(&stored_days(-400, -380)).unwrap();
    cal.import_days(&stored_days(40, 45)).unwrap();

    let removed = cal.remove_overhead(true).unwrap();
    let mut expected = span(-400, -380);
    expected.extend(span(40, 45));
    assert_eq!(offsets(&removed), expected);
    assert!(cal.all_days().unwrap().is_empty());
}

#[test]
fn remove_overhead_on_empty_calendar() {
    let cal = calendar((0, 3), Scope::Cycle);
    assert!(cal.remove_overhead(true).unwrap().is_empty());
}

#[test]
fn removed_days_leave_newly_generated() {
    let cal = calendar((0, 4), Scope::Day);
    cal.start_generation().unwrap();
    cal.wait().unwrap();

    cal.set_range_expected(range(1, 3));
    let removed = cal.remove_overhead(true).unwrap();
    assert_eq!(offsets(&removed), vec![0, 4]);
    assert_eq!(offsets(&cal.newly_generated().unwrap()), span(1, 3));
}

#[test]
fn trimming_recounts_distances() {
    let cal = calendar((SOME_DATE, SOME_DATE), Scope::Phase);
    cal.import_days(&stored_days(LAST_EXTREME, NEXT_EXTREME)).unwrap();
    let before = cal.get(day(SOME_DATE)).unwrap().unwrap();
    assert!(before.planetary().days_since_last_extreme().is_calculated());

    cal.remove_overhead(true).unwrap();
    let after = cal.get(day(SOME_DATE)).unwrap().unwrap();
    assert!(!after.planetary().days_since_last_extreme().is_calculated());
    assert!(!after.planetary().days_until_next_extreme().is_calculated());
}
