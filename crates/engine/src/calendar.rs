//! The calendar facade.

use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Mutex, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;
use zodiac_calendar::{CalendarDate, DateRange};
use zodiac_day::{DayFactory, DayRecord, LocationProvider, StoredDay};

use crate::config::GeneratorConfig;
use crate::error::EngineError;
use crate::generator::{CalendarData, Generator};
use crate::progress::{ProgressListener, ProgressState};
use crate::scope::Scope;

/// A gap-free window of day records around an expected date range.
///
/// Generation and extension run as *sessions* on a background thread and
/// return immediately; progress is reported to registered
/// [`ProgressListener`]s and [`wait`](Self::wait) blocks until the session
/// is over. While a session or an import is active every reader fails with
/// [`EngineError::ConcurrentAccess`] instead of blocking.
pub struct Calendar<F: DayFactory + 'static> {
    generator: Arc<Generator<F>>,
    session: Mutex<Option<JoinHandle<()>>>,
}

impl<F: DayFactory + 'static> Calendar<F> {
    /// Creates an empty calendar with the default [`GeneratorConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::WorkerPool`] if the worker pool cannot be
    /// built.
    pub fn new(
        expected: DateRange,
        scope: Scope,
        location: Arc<dyn LocationProvider>,
        factory: F,
    ) -> Result<Self, EngineError> {
        Self::with_config(expected, scope, location, factory, GeneratorConfig::default())
    }

    /// Creates an empty calendar.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] for an invalid configuration
    /// and [`EngineError::WorkerPool`] if the worker pool cannot be built.
    pub fn with_config(
        expected: DateRange,
        scope: Scope,
        location: Arc<dyn LocationProvider>,
        factory: F,
        config: GeneratorConfig,
    ) -> Result<Self, EngineError> {
        let generator = Generator::new(expected, scope, location, factory, config)?;
        Ok(Self {
            generator: Arc::new(generator),
            session: Mutex::new(None),
        })
    }

    /// Loads previously stored days, synchronously.
    ///
    /// Phases and extreme distances are derived for the loaded data. Nothing
    /// is generated. A day that is already stored is replaced.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::SessionActive`] while a session runs, and
    /// with [`EngineError::Day`] if any record is rejected by the factory,
    /// in which case nothing is imported.
    pub fn import_days(&self, days: &[StoredDay]) -> Result<usize, EngineError> {
        self.generator.import(days)
    }

    /// Starts computing every day the scope needs for the expected range.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::SessionActive`] if a session is running and
    /// with [`EngineError::SessionSpawn`] if no session thread can be
    /// started.
    pub fn start_generation(&self) -> Result<(), EngineError> {
        self.spawn_session(ProgressState::Generating, |generator, expected| {
            generator.generate(expected)
        })
    }

    /// Starts growing the stored data at the edges of the expected range.
    ///
    /// Only the future side is extended unless `expand_past` is set. With
    /// nothing to do the session finishes without storing any day.
    ///
    /// # Errors
    ///
    /// Same as [`start_generation`](Self::start_generation).
    pub fn start_extending(&self, expand_past: bool) -> Result<(), EngineError> {
        let first = if expand_past {
            ProgressState::ExtendingPast
        } else {
            ProgressState::ExtendingFuture
        };
        self.spawn_session(first, move |generator, expected| {
            generator.extend(expected, expand_past)
        })
    }

    fn spawn_session<S>(&self, first: ProgressState, session: S) -> Result<(), EngineError>
    where
        S: FnOnce(&Generator<F>, DateRange) -> Result<(), EngineError> + Send + 'static,
    {
        self.generator.progress.try_begin(first)?;
        let expected = {
            let mut data = self.generator.data.write();
            data.newly_generated.clear();
            data.borrowed_phases.clear();
            data.last_error = None;
            data.expected
        };

        let generator = Arc::clone(&self.generator);
        let spawned = thread::Builder::new()
            .name("zodiac-session".into())
            .spawn(move || generator.run_session(expected, session));
        match spawned {
            Ok(handle) => {
                debug!(state = %first, %expected, "session started");
                *self.session.lock() = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.generator.progress.set_state(ProgressState::Finished);
                Err(EngineError::SessionSpawn {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Blocks until the running session (if any) is over and returns its
    /// outcome.
    ///
    /// # Errors
    ///
    /// Returns the error that failed the session, or
    /// [`EngineError::SessionPanicked`] if the session panicked.
    pub fn wait(&self) -> Result<(), EngineError> {
        let handle = self.session.lock().take();
        if let Some(handle) = handle {
            handle.join().map_err(|_| EngineError::SessionPanicked)?;
        }
        match self.last_error() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Error of the last session, if it failed.
    pub fn last_error(&self) -> Option<EngineError> {
        self.generator.data.read().last_error.clone()
    }

    pub fn add_progress_listener(&self, listener: Arc<dyn ProgressListener>) {
        self.generator.progress.add_listener(listener);
    }

    pub fn remove_progress_listener(&self, listener: &Arc<dyn ProgressListener>) {
        self.generator.progress.remove_listener(listener);
    }

    /// Current progress state.
    pub fn state(&self) -> ProgressState {
        self.generator.progress.state()
    }

    /// Widens the expected range to cover every stored day and returns the
    /// new range.
    pub fn fix_range_expected_to_include_existing_days(&self) -> Result<DateRange, EngineError> {
        let mut data = self.idle_write()?;
        if let Some(span) = data.store.span() {
            let fixed = data.expected.hull(&span);
            if fixed != data.expected {
                debug!(from = %data.expected, to = %fixed, "fixing expected range");
                data.expected = fixed;
            }
        }
        Ok(data.expected)
    }

    /// Removes stored days outside what the scope needs around the expected
    /// range and returns them, ascending.
    ///
    /// | Scope | Kept |
    /// |-------|------|
    /// | `Day` | the expected range |
    /// | `Phase` | the expected range plus one day each side |
    /// | `Cycle` | out to one day beyond the surrounding extremes |
    ///
    /// Days after the expected range are only removed with
    /// `also_delete_future`.
    pub fn remove_overhead(&self, also_delete_future: bool) -> Result<Vec<DayRecord>, EngineError> {
        let mut data = self.idle_write()?;
        Ok(self.generator.remove_overhead(&mut data, also_delete_future))
    }

    pub fn range_expected(&self) -> DateRange {
        self.generator.data.read().expected
    }

    /// Replaces the expected range. A running session keeps working on the
    /// range it started with.
    pub fn set_range_expected(&self, range: DateRange) {
        self.generator.data.write().expected = range;
    }

    /// The stored day for `date`, if any.
    pub fn get(&self, date: CalendarDate) -> Result<Option<DayRecord>, EngineError> {
        Ok(self.idle_read()?.store.get(date).cloned())
    }

    /// Every stored day, ascending. Gaps are possible.
    pub fn all_days(&self) -> Result<Vec<DayRecord>, EngineError> {
        Ok(self.idle_read()?.store.to_vec())
    }

    /// Stored days whose neighbour-dependent values are reliable.
    ///
    /// `None` if the stored days have gaps. For [`Scope::Day`] every day is
    /// valid; otherwise the first and last stored day are left out.
    pub fn valid_days(&self) -> Result<Option<Vec<DayRecord>>, EngineError> {
        let data = self.idle_read()?;
        let Some(span) = data.store.span() else {
            return Ok(Some(Vec::new()));
        };
        if !data.store.is_complete() {
            return Ok(None);
        }
        let days = match self.generator.scope {
            Scope::Day => data.store.to_vec(),
            Scope::Phase | Scope::Cycle => data.store.slice(span.start().next(), span.end().prev()),
        };
        Ok(Some(days))
    }

    /// `true` if every day of the expected range is stored without gaps.
    pub fn is_complete(&self) -> Result<bool, EngineError> {
        let data = self.idle_read()?;
        Ok(data.store.is_complete_for(&data.expected))
    }

    /// Days stored by the last session, ascending.
    pub fn newly_generated(&self) -> Result<Vec<DayRecord>, EngineError> {
        let data = self.idle_read()?;
        Ok(data
            .newly_generated
            .iter()
            .filter_map(|&d| data.store.get(d).cloned())
            .collect())
    }

    pub fn scope(&self) -> Scope {
        self.generator.scope
    }

    pub fn location(&self) -> &dyn LocationProvider {
        self.generator.location.as_ref()
    }

    pub fn factory(&self) -> &F {
        &self.generator.factory
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.generator.config
    }

    fn ensure_idle(&self) -> Result<(), EngineError> {
        let state = self.state();
        if state.is_active() {
            return Err(EngineError::ConcurrentAccess { state });
        }
        Ok(())
    }

    // The state is checked under the data lock: a session claims its state
    // before it first takes the lock, so it cannot slip in between.
    fn idle_read(&self) -> Result<RwLockReadGuard<'_, CalendarData>, EngineError> {
        let data = self.generator.data.read();
        self.ensure_idle()?;
        Ok(data)
    }

    fn idle_write(&self) -> Result<RwLockWriteGuard<'_, CalendarData>, EngineError> {
        let data = self.generator.data.write();
        self.ensure_idle()?;
        Ok(data)
    }
}

impl<F: DayFactory + 'static> fmt::Debug for Calendar<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.generator.data.read();
        f.debug_struct("Calendar")
            .field("scope", &self.generator.scope)
            .field("expected", &data.expected)
            .field("stored", &data.store.len())
            .field("state", &self.state())
            .finish()
    }
}
