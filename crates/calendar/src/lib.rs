//! # zodiac-calendar
//!
//! Day-granularity Gregorian date arithmetic and inclusive date ranges.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["CalendarDate"] -->|".next() / .prev() / .shift()"| A
//!     A -->|"DateRange::new()"| B["DateRange"]
//!     B -->|".expand() / .hull()"| B
//!     B -->|".iter()"| C["DateIter (ascending)"]
//!     A -->|"date_sequence()"| D["Vec of CalendarDate"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use zodiac_calendar::{CalendarDate, DateRange, date_sequence};
//!
//! let start = CalendarDate::new(2017, 1, 1).unwrap();
//! let end = CalendarDate::new(2017, 1, 3).unwrap();
//!
//! let range = DateRange::new(start, end).unwrap();
//! assert_eq!(range.len_days(), 3);
//!
//! // One day of context on each side
//! let wide = range.expand(1, 1);
//! assert_eq!(wide.start(), CalendarDate::new(2016, 12, 31).unwrap());
//!
//! let days: Vec<_> = range.iter().collect();
//! assert_eq!(days, date_sequence(start, 3));
//!
//! // Inverted bounds are rejected
//! assert!(DateRange::new(end, start).is_err());
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `date` | Gregorian day newtype over `chrono::NaiveDate` |
//! | `range` | Inclusive, validated date interval |
//! | `sequence` | Ascending date iteration and sequence generation |
//! | `error` | Error types |

mod date;
mod error;
mod range;
mod sequence;

pub use date::CalendarDate;
pub use error::CalendarError;
pub use range::DateRange;
pub use sequence::{DateIter, date_sequence};
