//! The day factory seam.

use zodiac_calendar::CalendarDate;

use crate::error::DayError;
use crate::location::LocationProvider;
use crate::record::{DayRecord, StoredDay};

/// Computes day records.
///
/// A factory is called concurrently from several worker threads, so
/// `compute` must be deterministic and free of shared mutable state. The
/// lunar phase and extreme distances are neighbour-dependent and are filled
/// in by the caller afterwards; a factory normally leaves them unset.
pub trait DayFactory: Send + Sync {
    /// Computes the record of `date` as seen from `location`.
    fn compute(
        &self,
        date: CalendarDate,
        location: &dyn LocationProvider,
    ) -> Result<DayRecord, DayError>;

    /// Restores a record from stored data without recomputing raw
    /// astronomical values.
    fn import_from(&self, stored: &StoredDay) -> Result<DayRecord, DayError> {
        DayRecord::from_stored(stored)
    }
}
