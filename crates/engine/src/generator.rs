//! The generation coordinator.
//!
//! Everything here runs on the thread that owns the current session; only
//! [`Generator::compute_days`] fans out to the worker pool. The store is
//! changed under one write lock per merge, so readers never see half a
//! batch.

use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::RwLock;
use rayon::prelude::*;
use tracing::{debug, error, info, info_span, warn};
use zodiac_calendar::{CalendarDate, DateRange};
use zodiac_day::{DayError, DayFactory, DayRecord, LocationProvider, StoredDay};

use crate::config::GeneratorConfig;
use crate::error::EngineError;
use crate::extreme::{Boundary, Direction, find_boundary};
use crate::lunar::{count_extreme_distances, derive_lunar_phases};
use crate::progress::{ProgressManager, ProgressState};
use crate::scope::Scope;
use crate::store::CalendarStore;

/// Mutable calendar state, guarded by one lock.
#[derive(Debug)]
pub(crate) struct CalendarData {
    pub(crate) store: CalendarStore,
    pub(crate) expected: DateRange,
    /// Days stored by the current (or last) session.
    pub(crate) newly_generated: BTreeSet<CalendarDate>,
    /// Older days that got their phase from a neighbour of this session.
    pub(crate) borrowed_phases: BTreeSet<CalendarDate>,
    pub(crate) last_error: Option<EngineError>,
}

/// Shared core of a [`Calendar`](crate::Calendar), owned jointly by the
/// facade and the running session thread.
pub(crate) struct Generator<F> {
    pub(crate) scope: Scope,
    pub(crate) config: GeneratorConfig,
    pub(crate) factory: F,
    pub(crate) location: Arc<dyn LocationProvider>,
    pub(crate) progress: ProgressManager,
    pub(crate) data: RwLock<CalendarData>,
    pool: rayon::ThreadPool,
}

impl<F: DayFactory> Generator<F> {
    pub(crate) fn new(
        expected: DateRange,
        scope: Scope,
        location: Arc<dyn LocationProvider>,
        factory: F,
        config: GeneratorConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.max_workers())
            .thread_name(|i| format!("zodiac-worker-{i}"))
            .build()
            .map_err(|e| EngineError::WorkerPool {
                reason: e.to_string(),
            })?;
        Ok(Self {
            scope,
            config,
            factory,
            location,
            progress: ProgressManager::new(),
            data: RwLock::new(CalendarData {
                store: CalendarStore::new(),
                expected,
                newly_generated: BTreeSet::new(),
                borrowed_phases: BTreeSet::new(),
                last_error: None,
            }),
            pool,
        })
    }

    /// Runs one session to completion and moves to `FINISHED`.
    ///
    /// A failed session is rolled back entirely: every day it stored is
    /// removed again and the error is kept for [`Calendar::wait`]. A panic
    /// in the factory fails the session the same way, as
    /// [`EngineError::SessionPanicked`].
    ///
    /// [`Calendar::wait`]: crate::Calendar::wait
    pub(crate) fn run_session<S>(&self, expected: DateRange, session: S)
    where
        S: FnOnce(&Self, DateRange) -> Result<(), EngineError>,
    {
        let _session = info_span!("session", %expected, scope = %self.scope).entered();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| session(self, expected)))
            .unwrap_or(Err(EngineError::SessionPanicked));
        if let Err(e) = outcome {
            error!(error = %e, "session failed");
            self.roll_back(e);
        }
        self.progress.set_state(ProgressState::Finished);
    }

    /// Generation session: fills the needed range, resolves the cycle edges
    /// for [`Scope::Cycle`], then counts extreme distances.
    pub(crate) fn generate(&self, expected: DateRange) -> Result<(), EngineError> {
        let needed = self.needed_range(&expected);
        info!(%expected, %needed, scope = %self.scope, "generating calendar");
        self.fill(needed)?;

        if self.scope.tracks_extremes() {
            self.progress.set_state(ProgressState::ExtendingPast);
            self.resolve_cycle_edge(expected.start(), Direction::Past)?;
            self.progress.set_state(ProgressState::ExtendingFuture);
            self.resolve_cycle_edge(expected.end(), Direction::Future)?;
        }
        self.count();
        Ok(())
    }

    /// Extension session: grows the stored data at the edges of the expected
    /// range, the past side only if `expand_past` is set.
    pub(crate) fn extend(&self, expected: DateRange, expand_past: bool) -> Result<(), EngineError> {
        info!(%expected, expand_past, scope = %self.scope, "extending calendar");
        if expand_past {
            self.extend_side(&expected, Direction::Past)?;
            self.progress.set_state(ProgressState::ExtendingFuture);
        }
        self.extend_side(&expected, Direction::Future)?;
        self.count();
        Ok(())
    }

    /// Range that must be stored for `expected` given what is stored now.
    ///
    /// For [`Scope::Cycle`] this reaches out to the extremes already present
    /// in the store; finding extremes beyond stored data is left to
    /// [`resolve_cycle_edge`](Self::resolve_cycle_edge).
    pub(crate) fn needed_range(&self, expected: &DateRange) -> DateRange {
        let base = self.scope.base_range(expected);
        match self.scope {
            Scope::Day | Scope::Phase => base,
            Scope::Cycle => {
                let data = self.data.read();
                let past = find_boundary(&data.store, expected.start(), Direction::Past);
                let future = find_boundary(&data.store, expected.end(), Direction::Future);
                base.hull(&between(past.date(), future.date()))
            }
        }
    }

    /// Loads stored days through the factory's import path.
    ///
    /// All days are rehydrated before any is inserted, so a bad record
    /// leaves the store untouched. A day that is already stored is replaced.
    pub(crate) fn import(&self, days: &[StoredDay]) -> Result<usize, EngineError> {
        self.progress.try_begin(ProgressState::Importing)?;

        let records = match days
            .iter()
            .map(|d| self.factory.import_from(d))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(records) => records,
            Err(e) => {
                self.progress.set_state(ProgressState::ImportFinished);
                return Err(e.into());
            }
        };

        let count = records.len();
        {
            let mut data = self.data.write();
            for record in records {
                let date = record.date();
                if data.store.insert(record).is_some() {
                    warn!(%date, "imported day replaces a stored day");
                }
            }
            derive_lunar_phases(&mut data.store);
            count_extreme_distances(&mut data.store);
        }
        info!(count, "imported days");
        self.progress.set_state(ProgressState::ImportFinished);
        Ok(count)
    }

    /// Removes stored days the scope does not need around the expected
    /// range and returns them in ascending order.
    pub(crate) fn remove_overhead(
        &self,
        data: &mut CalendarData,
        also_delete_future: bool,
    ) -> Vec<DayRecord> {
        let keep = self.range_to_keep(&data.store, &data.expected, also_delete_future);

        let mut removed = data.store.remove_before(keep.start());
        if also_delete_future {
            removed.extend(data.store.remove_at_or_after(keep.end().next()));
        }
        for day in &removed {
            data.newly_generated.remove(&day.date());
        }
        if !removed.is_empty() {
            count_extreme_distances(&mut data.store);
        }
        info!(%keep, removed = removed.len(), "removed overhead");
        removed
    }

    fn range_to_keep(
        &self,
        store: &CalendarStore,
        expected: &DateRange,
        check_future: bool,
    ) -> DateRange {
        match self.scope {
            Scope::Day | Scope::Phase => self.scope.base_range(expected),
            Scope::Cycle if store.is_empty() => *expected,
            Scope::Cycle => {
                let start = find_boundary(store, expected.start(), Direction::Past).date();
                let end = if check_future {
                    find_boundary(store, expected.end(), Direction::Future).date()
                } else {
                    expected.end().next()
                };
                between(start, end)
            }
        }
    }

    /// Fills the days between the stored data and the scope's base range on
    /// one side, then resolves the cycle edge for [`Scope::Cycle`].
    fn extend_side(&self, expected: &DateRange, direction: Direction) -> Result<(), EngineError> {
        let base = self.scope.base_range(expected);
        let span = self.data.read().store.span();
        let delta = match direction {
            Direction::Past => {
                let stored = span.map_or(base.end(), |s| s.start());
                between(base.start(), stored.clamp(base.start(), base.end()))
            }
            Direction::Future => {
                let stored = span.map_or(base.start(), |s| s.end());
                between(stored.clamp(base.start(), base.end()), base.end())
            }
        };
        self.fill(delta)?;

        if self.scope.tracks_extremes() {
            let edge = match direction {
                Direction::Past => expected.start(),
                Direction::Future => expected.end(),
            };
            self.resolve_cycle_edge(edge, direction)?;
        }
        Ok(())
    }

    /// Stores everything from `edge` out to one day beyond the nearest lunar
    /// extreme in `direction`.
    ///
    /// Days are computed in batches of `max_workers` directly beyond known
    /// data until the extreme shows up. Days of this session that end up
    /// beyond the boundary are dropped again, so the result does not depend
    /// on the batch size.
    fn resolve_cycle_edge(&self, edge: CalendarDate, direction: Direction) -> Result<(), EngineError> {
        self.fill(DateRange::single(edge).expand(1, 1))?;
        let batch_len = self.config.max_workers() as i64;

        loop {
            let boundary = find_boundary(&self.data.read().store, edge, direction);
            let (open, batch) = match boundary {
                Boundary::Extreme(target) => {
                    self.fill(between(edge, target))?;
                    self.drop_overshoot(target, direction);
                    debug!(%direction, %target, "cycle boundary resolved");
                    return Ok(());
                }
                Boundary::Unknown(at) => (at, between(at, direction.outward(at, batch_len - 1))),
                Boundary::Open(last) => (
                    last,
                    between(
                        direction.outward(last, 1),
                        direction.outward(last, batch_len),
                    ),
                ),
            };

            let searched_days = edge.days_until(open).abs();
            if searched_days > i64::from(self.config.max_extension_days()) || self.fill(batch)? == 0 {
                return Err(EngineError::ExtremeNotFound {
                    direction,
                    searched_days,
                });
            }
            debug!(%direction, %open, %batch, "searching lunar extreme");
        }
    }

    /// Removes days stored by this session beyond `target`.
    fn drop_overshoot(&self, target: CalendarDate, direction: Direction) {
        let mut guard = self.data.write();
        let data = &mut *guard;
        let beyond: Vec<CalendarDate> = data
            .newly_generated
            .iter()
            .copied()
            .filter(|&d| direction.is_beyond(d, target))
            .collect();
        if beyond.is_empty() {
            return;
        }
        for date in &beyond {
            data.store.remove(*date);
            data.newly_generated.remove(date);
        }

        // The boundary day's phase was derived from a neighbour that is gone.
        let neighbour = direction.outward(target, 1);
        if data.newly_generated.contains(&target) && !data.store.contains(neighbour) {
            strip_phase(&mut data.store, target);
        }
        debug!(%direction, dropped = beyond.len(), "dropped days beyond cycle boundary");
    }

    /// Computes and merges every missing day of `range`; returns how many
    /// days were stored.
    fn fill(&self, range: DateRange) -> Result<usize, EngineError> {
        let missing = self.data.read().store.missing_dates(&range);
        if missing.is_empty() {
            return Ok(0);
        }
        let computed = self.compute_days(&missing)?;
        let count = computed.len();

        let mut guard = self.data.write();
        let data = &mut *guard;
        for record in computed {
            let date = record.date();
            for neighbour in [date.prev(), date.next()] {
                let phaseless = data
                    .store
                    .get(neighbour)
                    .is_some_and(|d| d.planetary().lunar_phase().is_none());
                if phaseless && !data.newly_generated.contains(&neighbour) {
                    data.borrowed_phases.insert(neighbour);
                }
            }
            data.newly_generated.insert(date);
            data.store.insert(record);
        }
        let derived = derive_lunar_phases(&mut data.store);
        debug!(%range, count, derived, "merged computed days");
        Ok(count)
    }

    /// Computes `dates` on the worker pool, one contiguous chunk per worker.
    ///
    /// Returns when every chunk is done; the first failing day fails the
    /// whole batch.
    fn compute_days(&self, dates: &[CalendarDate]) -> Result<Vec<DayRecord>, DayError> {
        let chunks = partition(dates, self.config.max_workers());
        let location = self.location.as_ref();
        debug!(days = dates.len(), chunks = chunks.len(), "computing days");

        let computed = self.pool.install(|| {
            chunks
                .par_iter()
                .map(|chunk| {
                    chunk
                        .iter()
                        .map(|&date| self.factory.compute(date, location))
                        .collect::<Result<Vec<_>, _>>()
                })
                .collect::<Result<Vec<_>, DayError>>()
        })?;
        Ok(computed.into_iter().flatten().collect())
    }

    fn count(&self) {
        if self.data.read().newly_generated.is_empty() {
            return;
        }
        self.progress.set_state(ProgressState::Counting);
        let updated = count_extreme_distances(&mut self.data.write().store);
        debug!(updated, "counted extreme distances");
    }

    fn roll_back(&self, error: EngineError) {
        let mut guard = self.data.write();
        let data = &mut *guard;
        let dates = std::mem::take(&mut data.newly_generated);
        for date in &dates {
            data.store.remove(*date);
        }
        for date in std::mem::take(&mut data.borrowed_phases) {
            strip_phase(&mut data.store, date);
        }
        count_extreme_distances(&mut data.store);
        data.last_error = Some(error);
        warn!(removed = dates.len(), "rolled back session");
    }
}

/// Clears the derived lunar phase of the day stored on `date`.
fn strip_phase(store: &mut CalendarStore, date: CalendarDate) {
    if let Some(day) = store.get(date) {
        let stripped = day.with_planetary(day.planetary().clone().with_lunar_phase(None));
        store.replace(stripped);
    }
}

/// Smallest range containing both dates.
fn between(a: CalendarDate, b: CalendarDate) -> DateRange {
    DateRange::single(a).hull(&DateRange::single(b))
}

/// Splits ascending `dates` into at most `max_chunks` contiguous chunks of
/// equal size (the last one may be shorter).
pub(crate) fn partition(dates: &[CalendarDate], max_chunks: usize) -> Vec<&[CalendarDate]> {
    if dates.is_empty() {
        return Vec::new();
    }
    let size = dates.len().div_ceil(max_chunks.max(1));
    dates.chunks(size).collect()
}
