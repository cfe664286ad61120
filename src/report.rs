//! Plain-text report of the valid days of a calendar.

use std::fmt::Write;

use anyhow::Result;

use zodiac_day::{DayFactory, DayRecord};
use zodiac_engine::Calendar;

/// Renders one line per valid day.
///
/// A calendar with gaps has no valid days; the report says so instead of
/// listing anything.
pub fn render<F: DayFactory + 'static>(calendar: &Calendar<F>) -> Result<String> {
    let mut out = String::new();
    writeln!(
        out,
        "# {} days of {} (scope {})",
        calendar.all_days()?.len(),
        calendar.range_expected(),
        calendar.scope()
    )?;

    let Some(days) = calendar.valid_days()? else {
        writeln!(out, "# stored days have gaps, nothing is valid")?;
        return Ok(out);
    };

    writeln!(
        out,
        "{:<10}  {:>6}  {:<9}  {:<11}  {:<5}  {:>5}  {:>5}",
        "date", "light", "phase", "sign", "elem", "since", "until"
    )?;
    for day in &days {
        write_day(&mut out, day)?;
    }
    Ok(out)
}

// Display impls of the day types ignore width, so cells are padded as strings.
fn write_day(out: &mut String, day: &DayRecord) -> Result<()> {
    let p = day.planetary();
    let phase = p
        .lunar_phase()
        .map_or_else(|| "-".to_string(), |phase| phase.to_string());
    writeln!(
        out,
        "{:<10}  {:>5.1}%  {:<9}  {:<11}  {:<5}  {:>5}  {:>5}",
        day.date(),
        p.lunar_visibility() * 100.0,
        phase,
        day.zodiac().sign().to_string(),
        day.zodiac().element().to_string(),
        p.days_since_last_extreme().to_string(),
        p.days_until_next_extreme().to_string(),
    )?;
    Ok(())
}
