//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, anyhow, bail};
use chrono::FixedOffset;

use crate::config::*;

use zodiac_calendar::{CalendarDate, DateRange};
use zodiac_day::{Position, StaticLocation};
use zodiac_engine::{GeneratorConfig, Scope};

/// Parses a scope name string into the corresponding enum variant.
pub fn parse_scope(s: &str) -> Result<Scope> {
    match s.to_lowercase().as_str() {
        "day" => Ok(Scope::Day),
        "phase" => Ok(Scope::Phase),
        "cycle" => Ok(Scope::Cycle),
        other => bail!("unknown scope: {other:?}"),
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<CalendarDate> {
    s.parse::<CalendarDate>()
        .with_context(|| format!("invalid date {s:?}"))
}

/// Builds the expected [`DateRange`] from the `[calendar]` section.
///
/// A missing end defaults to the start date.
pub fn build_expected_range(calendar: &CalendarToml) -> Result<DateRange> {
    let start = calendar
        .start
        .as_deref()
        .ok_or_else(|| anyhow!("no start date: set [calendar].start in config or use --from"))?;
    let start = parse_date(start)?;
    let end = match calendar.end.as_deref() {
        Some(end) => parse_date(end)?,
        None => start,
    };
    DateRange::new(start, end).context("invalid expected range")
}

/// Builds a [`GeneratorConfig`] from the TOML generator configuration.
pub fn build_generator_config(generator: &GeneratorToml) -> Result<GeneratorConfig> {
    let config = GeneratorConfig::new()
        .with_max_workers(generator.max_workers)
        .with_max_extension_days(generator.max_extension_days);
    config.validate()?;
    Ok(config)
}

/// Builds a [`StaticLocation`] from the TOML location configuration.
pub fn build_location(location: &LocationToml) -> Result<StaticLocation> {
    let position = Position::new(location.latitude, location.longitude)?;
    let hours = location.utc_offset_hours;
    if !hours.is_finite() {
        bail!("utc_offset_hours must be finite, got {hours}");
    }
    let seconds = (hours * 3600.0).round() as i32;
    let offset = FixedOffset::east_opt(seconds)
        .ok_or_else(|| anyhow!("utc_offset_hours out of range: {hours}"))?;
    Ok(StaticLocation::new(position, offset))
}
