//! Lunar phase classification and extreme-distance counters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Phase of the moon on a given day, relative to its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LunarPhase {
    /// Local minimum of the illuminated fraction.
    NewMoon,
    /// Illuminated fraction increasing.
    Waxing,
    /// Local maximum of the illuminated fraction.
    FullMoon,
    /// Illuminated fraction decreasing.
    Waning,
}

impl LunarPhase {
    /// Classifies a day from the visibility of the previous, current, and
    /// next day.
    ///
    /// | Neighbours | Phase |
    /// |------------|-------|
    /// | both lower | `FullMoon` |
    /// | both higher | `NewMoon` |
    /// | `prev < current` | `Waxing` |
    /// | otherwise | `Waning` |
    pub fn from_visibility(prev: f64, current: f64, next: f64) -> Self {
        if prev < current && next < current {
            Self::FullMoon
        } else if prev > current && next > current {
            Self::NewMoon
        } else if prev < current {
            Self::Waxing
        } else {
            Self::Waning
        }
    }

    /// Returns `true` for full and new moon.
    pub fn is_lunar_extreme(self) -> bool {
        matches!(self, Self::NewMoon | Self::FullMoon)
    }
}

impl fmt::Display for LunarPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NewMoon => "new moon",
            Self::Waxing => "waxing",
            Self::FullMoon => "full moon",
            Self::Waning => "waning",
        };
        f.write_str(name)
    }
}

/// Distance in days to a lunar extreme.
///
/// `NotCalculated` is expected near the edges of known data, where the
/// neighbouring extreme has not been computed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayCount {
    /// No extreme is known in the counting direction.
    #[default]
    NotCalculated,
    /// Number of days to the extreme (0 on the extreme itself).
    Days(u32),
}

impl DayCount {
    /// Returns the count, or `None` if not calculated.
    pub fn get(self) -> Option<u32> {
        match self {
            Self::NotCalculated => None,
            Self::Days(n) => Some(n),
        }
    }

    /// Returns `true` if a count is available.
    pub fn is_calculated(self) -> bool {
        matches!(self, Self::Days(_))
    }
}

impl fmt::Display for DayCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotCalculated => f.write_str("-"),
            Self::Days(n) => write!(f, "{n}"),
        }
    }
}
