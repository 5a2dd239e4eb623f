mod analyze;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use self::analyze::analyze;
use crate::{input::Reading, quantity::rate::KilowattHourRate};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Crunch the monthly consumption: statistics, chart, and the next month forecast.
    #[clap(name = "analyze", alias = "sniff")]
    Analyze(Box<AnalyzeArgs>),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Monthly reading as `PERIOD=KWH`, for example: `Jan/2024=150.5`.
    ///
    /// May be repeated, in chronological order. Appended after the file readings, if any.
    #[clap(long = "reading", short = 'r', value_name = "PERIOD=KWH")]
    pub readings: Vec<Reading>,

    /// TOML file with the readings and, optionally, the rate.
    #[clap(long, env = "READINGS_FILE")]
    pub readings_file: Option<PathBuf>,

    /// Energy price per kilowatt-hour, takes precedence over the readings file.
    #[clap(long = "rate-per-kwh", env = "RATE_PER_KWH")]
    pub rate: Option<KilowattHourRate>,

    /// Confirm the rate: nothing is computed otherwise.
    #[clap(long, env = "CONFIRM_RATE")]
    pub confirm_rate: bool,

    /// Print the results as JSON instead of tables.
    #[clap(long)]
    pub json: bool,
}
