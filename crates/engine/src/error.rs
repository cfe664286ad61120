//! Error types for the zodiac-engine crate.

use zodiac_calendar::CalendarError;
use zodiac_day::DayError;

use crate::extreme::Direction;
use crate::progress::ProgressState;

/// Error type for all fallible operations in the zodiac-engine crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    /// Returned by readers while a session is changing the store.
    #[error("calendar is busy (state {state}), wait for the session to finish")]
    ConcurrentAccess {
        /// The active state at the time of the call.
        state: ProgressState,
    },

    /// Returned when a session is started while another one is running.
    #[error("a session is already running (state {state})")]
    SessionActive {
        /// The active state at the time of the call.
        state: ProgressState,
    },

    /// A date or range was invalid.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// The day factory failed.
    #[error(transparent)]
    Day(#[from] DayError),

    /// Returned when a [`GeneratorConfig`](crate::GeneratorConfig) is invalid.
    #[error("invalid generator config: {reason}")]
    InvalidConfig {
        /// What is wrong.
        reason: String,
    },

    /// Returned when no lunar extreme was found within the search limit.
    #[error("no lunar extreme found in the {direction} within {searched_days} days")]
    ExtremeNotFound {
        /// Side of the expected range that was searched.
        direction: Direction,
        /// Distance from the expected edge that was covered.
        searched_days: i64,
    },

    /// Returned when the worker pool cannot be built.
    #[error("failed to build worker pool: {reason}")]
    WorkerPool {
        /// Message of the underlying error.
        reason: String,
    },

    /// Returned when the session thread cannot be spawned.
    #[error("failed to spawn session thread: {reason}")]
    SessionSpawn {
        /// Message of the underlying error.
        reason: String,
    },

    /// The session panicked, usually inside the day factory. It was rolled
    /// back like any other failed session.
    #[error("session panicked")]
    SessionPanicked,
}
