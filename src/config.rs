use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Zodiac configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ZodiacConfig {
    /// Observer location.
    #[serde(default)]
    pub location: LocationToml,

    /// Expected range and scope.
    #[serde(default)]
    pub calendar: CalendarToml,

    /// Worker and search limits.
    #[serde(default)]
    pub generator: GeneratorToml,

    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocationToml {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: f64,
}

impl Default for LocationToml {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

// Munich
fn default_latitude() -> f64 {
    48.137
}
fn default_longitude() -> f64 {
    11.575
}
fn default_utc_offset_hours() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarToml {
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default)]
    pub trim: bool,
}

impl Default for CalendarToml {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            scope: default_scope(),
            trim: false,
        }
    }
}

fn default_scope() -> String {
    "cycle".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorToml {
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
    #[serde(default = "default_max_extension_days")]
    pub max_extension_days: u32,
}

impl Default for GeneratorToml {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
            max_extension_days: default_max_extension_days(),
        }
    }
}

fn default_max_workers() -> usize {
    4
}
fn default_max_extension_days() -> u32 {
    60
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub import: Option<PathBuf>,
    pub output: Option<PathBuf>,
}
