use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Zodiac lunar calendar generator.
#[derive(Parser)]
#[command(name = "zodiac", version, about = "Gap-free lunar calendar generator")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compute every day the scope needs for the expected range.
    Generate(CalendarArgs),
    /// Grow previously stored days out to the edges of the expected range.
    Extend(ExtendArgs),
}

/// Arguments shared by all calendar subcommands.
///
/// Every option overrides the matching value of the TOML file.
#[derive(clap::Args)]
pub struct CalendarArgs {
    /// Path to TOML configuration file (optional if all values are given).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// First expected day (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<String>,

    /// Last expected day (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<String>,

    /// Context kept around the expected range: day, phase or cycle.
    #[arg(short, long)]
    pub scope: Option<String>,

    /// Maximum number of worker threads.
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// JSON file of previously stored days to load first.
    #[arg(short, long)]
    pub import: Option<PathBuf>,

    /// JSON file to write all stored days to.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Remove stored days the scope does not need.
    #[arg(long)]
    pub trim: bool,
}

/// Arguments for the `extend` subcommand.
#[derive(clap::Args)]
pub struct ExtendArgs {
    #[command(flatten)]
    pub calendar: CalendarArgs,

    /// Also extend towards the past.
    #[arg(long)]
    pub past: bool,
}
