//! Context buffer policy around the expected range.

use std::fmt;

use serde::{Deserialize, Serialize};
use zodiac_calendar::DateRange;

/// How much context around the expected range a calendar keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Exactly the expected days.
    Day,
    /// One extra day on each side, so every expected day has a lunar phase.
    Phase,
    /// Everything up to and including one day beyond the surrounding lunar
    /// extremes, so every expected day has extreme distances.
    Cycle,
}

impl Scope {
    /// Number of days added on each side before any extreme search.
    pub fn buffer_days(self) -> u32 {
        match self {
            Self::Day => 0,
            Self::Phase | Self::Cycle => 1,
        }
    }

    /// Returns `true` if the needed range depends on lunar extremes.
    pub fn tracks_extremes(self) -> bool {
        match self {
            Self::Day | Self::Phase => false,
            Self::Cycle => true,
        }
    }

    /// The expected range widened by the scope's buffer.
    pub fn base_range(self, expected: &DateRange) -> DateRange {
        let buffer = self.buffer_days();
        expected.expand(buffer, buffer)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Day => "day",
            Self::Phase => "phase",
            Self::Cycle => "cycle",
        })
    }
}
