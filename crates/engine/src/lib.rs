//! # zodiac-engine
//!
//! Keeps a gap-free, date-ordered window of lunar day records around an
//! expected date range and computes missing days in parallel.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["Calendar"] -->|"start_generation()"| B["session thread"]
//!     B -->|"needed range"| C["CalendarStore::missing_dates"]
//!     C -->|"partition"| D["rayon workers → DayFactory::compute"]
//!     D -->|"merge"| E["CalendarStore"]
//!     E -->|"derive phases / count distances"| E
//!     B -->|"ProgressState"| F["ProgressListener"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use chrono::FixedOffset;
//! use zodiac_calendar::{CalendarDate, DateRange};
//! use zodiac_day::{MeanLunation, Position, StaticLocation};
//! use zodiac_engine::{Calendar, ProgressState, Scope};
//!
//! let location = StaticLocation::new(
//!     Position::new(48.137, 11.575).unwrap(),
//!     FixedOffset::east_opt(3600).unwrap(),
//! );
//! let expected = DateRange::new(
//!     CalendarDate::new(2017, 1, 10).unwrap(),
//!     CalendarDate::new(2017, 1, 12).unwrap(),
//! )
//! .unwrap();
//!
//! let calendar = Calendar::new(expected, Scope::Phase, Arc::new(location), MeanLunation).unwrap();
//! calendar.start_generation().unwrap();
//! calendar.wait().unwrap();
//!
//! assert_eq!(calendar.state(), ProgressState::Finished);
//! assert_eq!(calendar.all_days().unwrap().len(), 5);
//! assert_eq!(calendar.valid_days().unwrap().unwrap().len(), 3);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `calendar` | The [`Calendar`] facade |
//! | `generator` | Needed ranges, parallel computation, extension, import, trimming |
//! | `store` | Ordered day storage with gap queries |
//! | `extreme` | Lunar extreme boundary search |
//! | `lunar` | Phase derivation and extreme-distance counting |
//! | `progress` | Session states and listeners |
//! | `scope` | Context buffer policy |
//! | `config` | Worker and search limits |
//! | `error` | Error types |

mod calendar;
mod config;
mod error;
mod extreme;
mod generator;
mod lunar;
mod progress;
mod scope;
mod store;

pub use calendar::Calendar;
pub use config::GeneratorConfig;
pub use error::EngineError;
pub use extreme::{Boundary, Direction, find_boundary};
pub use lunar::{count_extreme_distances, derive_lunar_phases};
pub use progress::{ProgressListener, ProgressManager, ProgressState};
pub use scope::Scope;
pub use store::CalendarStore;
