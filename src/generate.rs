use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use zodiac_day::{MeanLunation, StoredDay};
use zodiac_engine::{Calendar, ProgressListener, ProgressState};

use crate::cli::CalendarArgs;
use crate::config::ZodiacConfig;
use crate::convert;
use crate::report;

/// Which session a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    Generate,
    Extend { past: bool },
}

/// Run a generation session.
pub fn run(args: CalendarArgs) -> Result<()> {
    let _cmd = info_span!("generate").entered();
    let report = execute(&args, Session::Generate)?;
    print!("{report}");
    Ok(())
}

/// Loads the configuration, runs `session` and writes the results.
///
/// Returns the text report of the valid days.
pub fn execute(args: &CalendarArgs, session: Session) -> Result<String> {
    // 1. Load config and apply CLI overrides
    let config = load_config(args)?;
    let expected = convert::build_expected_range(&config.calendar)?;
    let scope = convert::parse_scope(&config.calendar.scope)?;
    let generator_cfg = convert::build_generator_config(&config.generator)?;
    let location = convert::build_location(&config.location)?;

    // 2. Build the calendar
    let calendar = Calendar::with_config(
        expected,
        scope,
        Arc::new(location),
        MeanLunation::new(),
        generator_cfg,
    )?;
    let listener: Arc<dyn ProgressListener> =
        Arc::new(|old: ProgressState, new: ProgressState| info!(%old, %new, "progress"));
    calendar.add_progress_listener(listener);

    // 3. Import stored days
    if let Some(path) = &config.io.import {
        let stored = read_days(path)?;
        let count = calendar
            .import_days(&stored)
            .with_context(|| format!("failed to import {}", path.display()))?;
        info!(path = %path.display(), count, "imported stored days");
    }

    // 4. Run the session
    info!(%expected, %scope, ?session, "starting session");
    match session {
        Session::Generate => calendar.start_generation()?,
        Session::Extend { past } => calendar.start_extending(past)?,
    }
    calendar.wait().context("calendar session failed")?;
    info!(
        generated = calendar.newly_generated()?.len(),
        "session finished"
    );

    // 5. Trim
    if config.calendar.trim {
        let removed = calendar.remove_overhead(true)?;
        info!(removed = removed.len(), "removed overhead");
    }

    // 6. Write output
    if let Some(path) = &config.io.output {
        let stored: Vec<StoredDay> = calendar.all_days()?.iter().map(StoredDay::from).collect();
        write_days(path, &stored)?;
        info!(path = %path.display(), days = stored.len(), "wrote stored days");
    }

    report::render(&calendar)
}

fn load_config(args: &CalendarArgs) -> Result<ZodiacConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let toml_str = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file: {}", path.display()))?;
            toml::from_str(&toml_str).context("failed to parse TOML config")?
        }
        None => ZodiacConfig::default(),
    };

    if let Some(from) = &args.from {
        config.calendar.start = Some(from.clone());
    }
    if let Some(to) = &args.to {
        config.calendar.end = Some(to.clone());
    }
    if let Some(scope) = &args.scope {
        config.calendar.scope = scope.clone();
    }
    if let Some(workers) = args.workers {
        config.generator.max_workers = workers;
    }
    if let Some(import) = &args.import {
        config.io.import = Some(import.clone());
    }
    if let Some(output) = &args.output {
        config.io.output = Some(output.clone());
    }
    config.calendar.trim |= args.trim;
    Ok(config)
}

fn read_days(path: &Path) -> Result<Vec<StoredDay>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read stored days: {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("failed to parse stored days: {}", path.display()))
}

fn write_days(path: &Path, days: &[StoredDay]) -> Result<()> {
    let json = serde_json::to_string_pretty(days).context("failed to serialise stored days")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
