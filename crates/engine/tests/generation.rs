mod support;

use std::sync::Arc;

use parking_lot::Mutex;
use zodiac_day::{DayCount, DayError, DayFactory};
use zodiac_engine::{
    Calendar, Direction, EngineError, GeneratorConfig, ProgressListener, ProgressState, Scope,
};

use support::*;

fn calendar(expected: (i64, i64), scope: Scope, workers: usize) -> Calendar<TriangleFactory> {
    let config = GeneratorConfig::new().with_max_workers(workers);
    Calendar::with_config(
        range(expected.0, expected.1),
        scope,
        location(),
        TriangleFactory::default(),
        config,
    )
    .unwrap()
}

fn record_states<F: DayFactory + 'static>(calendar: &Calendar<F>) -> Arc<Mutex<Vec<ProgressState>>> {
    let states: Arc<Mutex<Vec<ProgressState>>> = Arc::default();
    let sink = Arc::clone(&states);
    let listener: Arc<dyn ProgressListener> =
        Arc::new(move |_: ProgressState, new: ProgressState| sink.lock().push(new));
    calendar.add_progress_listener(listener);
    states
}

#[test]
fn day_scope_generates_exactly_the_expected_days() {
    let cal = calendar((SOME_DATE, SOME_DATE + 2), Scope::Day, 4);
    cal.start_generation().unwrap();
    cal.wait().unwrap();

    let newly = cal.newly_generated().unwrap();
    assert_eq!(offsets(&newly), span(SOME_DATE, SOME_DATE + 2));
    assert_eq!(cal.all_days().unwrap(), newly);
    assert_eq!(cal.factory().computed(), 3);
    assert!(cal.is_complete().unwrap());
    assert_eq!(cal.valid_days().unwrap(), Some(newly));
}

#[test]
fn phase_scope_adds_one_day_each_side() {
    let cal = calendar((SOME_DATE, SOME_DATE), Scope::Phase, 4);
    cal.start_generation().unwrap();
    cal.wait().unwrap();

    let newly = cal.newly_generated().unwrap();
    assert_eq!(offsets(&newly), span(SOME_DATE - 1, SOME_DATE + 1));

    let valid = cal.valid_days().unwrap().unwrap();
    assert_eq!(offsets(&valid), vec![SOME_DATE]);
    assert_eq!(valid[0].planetary().lunar_phase(), Some(true_phase(day(SOME_DATE))));
}

#[test]
fn cycle_scope_reaches_one_day_beyond_both_extremes() {
    let cal = calendar((SOME_DATE, SOME_DATE + 2), Scope::Cycle, 4);
    cal.start_generation().unwrap();
    cal.wait().unwrap();

    let days = cal.all_days().unwrap();
    assert_eq!(offsets(&days), span(LAST_EXTREME - 1, NEXT_EXTREME + 1));
    assert_eq!(cal.newly_generated().unwrap(), days);

    let valid = cal.valid_days().unwrap().unwrap();
    assert_eq!(offsets(&valid), span(LAST_EXTREME, NEXT_EXTREME));
    for day in &valid {
        assert_eq!(day.planetary().lunar_phase(), Some(true_phase(day.date())));
    }
}

#[test]
fn cycle_result_does_not_depend_on_worker_count() {
    let expected = span(LAST_EXTREME - 1, NEXT_EXTREME + 1);
    for workers in [1, 2, 3, 8, 16] {
        let cal = calendar((SOME_DATE, SOME_DATE + 2), Scope::Cycle, workers);
        cal.start_generation().unwrap();
        cal.wait().unwrap();
        assert_eq!(
            offsets(&cal.newly_generated().unwrap()),
            expected,
            "{workers} workers"
        );
    }
}

#[test]
fn distant_imported_days_do_not_widen_the_cycle() {
    let fresh = calendar((SOME_DATE, SOME_DATE + 2), Scope::Cycle, 4);
    fresh.start_generation().unwrap();
    fresh.wait().unwrap();

    let cal = calendar((SOME_DATE, SOME_DATE + 2), Scope::Cycle, 4);
    cal.import_days(&stored_days(-400, -380)).unwrap();
    cal.start_generation().unwrap();
    cal.wait().unwrap();

    assert_eq!(
        offsets(&cal.newly_generated().unwrap()),
        span(LAST_EXTREME - 1, NEXT_EXTREME + 1)
    );
    assert_eq!(cal.factory().computed(), fresh.factory().computed());
    assert_eq!(cal.all_days().unwrap().len(), 21 + 17);
}

#[test]
fn distances_reset_on_extremes() {
    let cal = calendar((SOME_DATE, SOME_DATE), Scope::Cycle, 4);
    cal.start_generation().unwrap();
    cal.wait().unwrap();

    let counts = |o: i64| {
        let record = cal.get(day(o)).unwrap().unwrap();
        let p = record.planetary().clone();
        (p.days_since_last_extreme(), p.days_until_next_extreme())
    };

    // Edge days have no phase, so nothing is counted there
    assert_eq!(counts(LAST_EXTREME - 1), (DayCount::NotCalculated, DayCount::NotCalculated));
    assert_eq!(counts(NEXT_EXTREME + 1), (DayCount::NotCalculated, DayCount::NotCalculated));

    assert_eq!(counts(LAST_EXTREME), (DayCount::Days(0), DayCount::Days(0)));
    assert_eq!(counts(NEXT_EXTREME), (DayCount::Days(0), DayCount::Days(0)));
    for o in LAST_EXTREME + 1..NEXT_EXTREME {
        let since = (o - LAST_EXTREME) as u32;
        let until = (NEXT_EXTREME - o) as u32;
        assert_eq!(counts(o), (DayCount::Days(since), DayCount::Days(until)), "offset {o}");
    }
}

#[test]
fn imported_full_cycle_needs_no_generation() {
    let cal = calendar((LAST_EXTREME, NEXT_EXTREME), Scope::Cycle, 4);
    cal.import_days(&stored_days(LAST_EXTREME - 1, NEXT_EXTREME + 1)).unwrap();
    let states = record_states(&cal);

    cal.start_generation().unwrap();
    cal.wait().unwrap();

    assert!(cal.newly_generated().unwrap().is_empty());
    assert_eq!(cal.factory().computed(), 0);
    assert_eq!(
        *states.lock(),
        vec![
            ProgressState::Generating,
            ProgressState::ExtendingPast,
            ProgressState::ExtendingFuture,
            ProgressState::Finished,
        ]
    );
}

#[test]
fn cycle_generation_reports_every_state() {
    let cal = calendar((SOME_DATE, SOME_DATE), Scope::Cycle, 4);
    let states = record_states(&cal);

    cal.start_generation().unwrap();
    cal.wait().unwrap();

    assert_eq!(
        *states.lock(),
        vec![
            ProgressState::Generating,
            ProgressState::ExtendingPast,
            ProgressState::ExtendingFuture,
            ProgressState::Counting,
            ProgressState::Finished,
        ]
    );
    assert_eq!(cal.state(), ProgressState::Finished);
}

#[test]
fn day_generation_skips_extension_states() {
    let cal = calendar((SOME_DATE, SOME_DATE), Scope::Day, 4);
    let states = record_states(&cal);

    cal.start_generation().unwrap();
    cal.wait().unwrap();

    assert_eq!(
        *states.lock(),
        vec![
            ProgressState::Generating,
            ProgressState::Counting,
            ProgressState::Finished
        ]
    );
}

#[test]
fn generation_fills_gaps_between_imported_days() {
    let cal = calendar((0, 9), Scope::Day, 4);
    cal.import_days(&stored_days(0, 2)).unwrap();
    cal.import_days(&stored_days(6, 9)).unwrap();
    assert!(!cal.is_complete().unwrap());
    assert_eq!(cal.valid_days().unwrap(), None);

    cal.start_generation().unwrap();
    cal.wait().unwrap();

    assert_eq!(offsets(&cal.newly_generated().unwrap()), span(3, 5));
    assert!(cal.is_complete().unwrap());
}

#[test]
fn worker_fault_rolls_back_the_session() {
    let cal = Calendar::new(
        range(0, 9),
        Scope::Day,
        location(),
        FaultyFactory { fail_at: day(6) },
    )
    .unwrap();
    cal.import_days(&stored_days(0, 2)).unwrap();

    cal.start_generation().unwrap();
    let err = cal.wait().unwrap_err();

    assert!(matches!(
        err,
        EngineError::Day(DayError::ComputationFailed { date, .. }) if date == day(6)
    ));
    assert_eq!(cal.state(), ProgressState::Finished);
    assert!(cal.last_error().is_some());
    assert!(cal.newly_generated().unwrap().is_empty());
    assert_eq!(offsets(&cal.all_days().unwrap()), span(0, 2));
}

#[test]
fn roll_back_clears_phases_borrowed_from_the_session() {
    let config = GeneratorConfig::new().with_max_workers(4);
    let cal = Calendar::with_config(
        range(3, 5),
        Scope::Cycle,
        location(),
        FaultyFactory { fail_at: day(12) },
        config,
    )
    .unwrap();
    let mut stored = stored_days(0, 2);
    stored[2].lunar_phase = None;
    cal.import_days(&stored).unwrap();
    let before = cal.all_days().unwrap();
    assert_eq!(before[2].planetary().lunar_phase(), None);

    cal.start_generation().unwrap();
    assert!(cal.wait().is_err());

    assert_eq!(cal.all_days().unwrap(), before);
}

#[test]
fn next_session_clears_the_last_error() {
    let cal = Calendar::new(
        range(0, 2),
        Scope::Day,
        location(),
        FaultyFactory { fail_at: day(6) },
    )
    .unwrap();
    cal.set_range_expected(range(5, 7));
    cal.start_generation().unwrap();
    assert!(cal.wait().is_err());

    cal.set_range_expected(range(0, 2));
    cal.start_generation().unwrap();
    cal.wait().unwrap();
    assert!(cal.last_error().is_none());
    assert_eq!(offsets(&cal.newly_generated().unwrap()), span(0, 2));
}

#[test]
fn extreme_search_is_bounded() {
    let config = GeneratorConfig::new()
        .with_max_workers(4)
        .with_max_extension_days(3);
    let cal = Calendar::with_config(
        range(SOME_DATE, SOME_DATE),
        Scope::Cycle,
        location(),
        TriangleFactory::default(),
        config,
    )
    .unwrap();

    cal.start_generation().unwrap();
    let err = cal.wait().unwrap_err();
    assert!(matches!(
        err,
        EngineError::ExtremeNotFound {
            direction: Direction::Past,
            ..
        }
    ));
    assert!(cal.all_days().unwrap().is_empty());
}

#[test]
fn invalid_config_is_rejected() {
    let result = Calendar::with_config(
        range(0, 1),
        Scope::Day,
        location(),
        TriangleFactory::default(),
        GeneratorConfig::new().with_max_workers(0),
    );
    assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
}
