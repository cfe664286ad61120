//! Session progress states and listener notification.

use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex};
use tracing::debug;

use crate::error::EngineError;

/// State of the calendar's current (or last) session.
///
/// `None` is the initial state. `Finished` ends a generation or extension
/// session, `ImportFinished` ends an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProgressState {
    #[default]
    None,
    Importing,
    ImportFinished,
    Counting,
    Generating,
    ExtendingPast,
    ExtendingFuture,
    Finished,
}

impl ProgressState {
    /// Returns `true` while the store may be changing.
    ///
    /// Readers of the calendar are rejected in these states.
    pub fn is_active(self) -> bool {
        match self {
            Self::Importing
            | Self::Counting
            | Self::Generating
            | Self::ExtendingPast
            | Self::ExtendingFuture => true,
            Self::None | Self::ImportFinished | Self::Finished => false,
        }
    }
}

impl fmt::Display for ProgressState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "NONE",
            Self::Importing => "IMPORTING",
            Self::ImportFinished => "IMPORT_FINISHED",
            Self::Counting => "COUNTING",
            Self::Generating => "GENERATING",
            Self::ExtendingPast => "EXTENDING_PAST",
            Self::ExtendingFuture => "EXTENDING_FUTURE",
            Self::Finished => "FINISHED",
        };
        f.write_str(name)
    }
}

/// Receives every state transition of a calendar.
///
/// Called synchronously on the thread performing the transition, after the
/// new state is visible through [`ProgressManager::state`]. Implemented for
/// plain closures.
pub trait ProgressListener: Send + Sync {
    fn on_state_changed(&self, old: ProgressState, new: ProgressState);
}

impl<T> ProgressListener for T
where
    T: Fn(ProgressState, ProgressState) + Send + Sync,
{
    fn on_state_changed(&self, old: ProgressState, new: ProgressState) {
        self(old, new)
    }
}

/// Current state plus the listener registry.
///
/// Transitions are serialized: a transition records its state and notifies
/// every listener before the next one starts, so listeners see transitions
/// in the order they were recorded. [`state`](Self::state) never waits for
/// listeners.
#[derive(Default)]
pub struct ProgressManager {
    state: Mutex<ProgressState>,
    listeners: Mutex<Vec<Arc<dyn ProgressListener>>>,
    // Reentrant so a listener may itself start a transition.
    transition: ReentrantMutex<()>,
}

impl ProgressManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last recorded state.
    pub fn state(&self) -> ProgressState {
        *self.state.lock()
    }

    /// Registers a listener. Registering the same listener twice notifies it
    /// twice.
    pub fn add_listener(&self, listener: Arc<dyn ProgressListener>) {
        self.listeners.lock().push(listener);
    }

    /// Removes one registration of `listener`, compared by pointer identity.
    /// Unknown listeners are ignored.
    pub fn remove_listener(&self, listener: &Arc<dyn ProgressListener>) {
        let mut listeners = self.listeners.lock();
        if let Some(pos) = listeners.iter().position(|l| Arc::ptr_eq(l, listener)) {
            listeners.remove(pos);
        }
    }

    /// Records `new` and notifies every listener.
    pub fn set_state(&self, new: ProgressState) {
        let _transition = self.transition.lock();
        let old = std::mem::replace(&mut *self.state.lock(), new);
        self.notify(old, new);
    }

    /// Moves to the active state `new` unless a session is already running.
    ///
    /// The check and the transition happen under one lock, so of two racing
    /// callers exactly one succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SessionActive`] if the current state is active.
    pub fn try_begin(&self, new: ProgressState) -> Result<(), EngineError> {
        let _transition = self.transition.lock();
        let old = {
            let mut state = self.state.lock();
            if state.is_active() {
                return Err(EngineError::SessionActive { state: *state });
            }
            std::mem::replace(&mut *state, new)
        };
        self.notify(old, new);
        Ok(())
    }

    fn notify(&self, old: ProgressState, new: ProgressState) {
        debug!(%old, %new, "progress");
        // Snapshot so listeners may (de)register without deadlocking.
        let listeners = self.listeners.lock().clone();
        for listener in listeners {
            listener.on_state_changed(old, new);
        }
    }
}

impl fmt::Debug for ProgressManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressManager")
            .field("state", &self.state())
            .field("listeners", &self.listeners.lock().len())
            .finish()
    }
}
