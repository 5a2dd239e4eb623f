use std::{fs, path::Path, str::FromStr};

use serde::Deserialize;

use crate::{
    core::{ConsumptionRecord, ConsumptionSeries, Period, analyzer::MIN_RECORDS},
    prelude::*,
    quantity::{energy::KilowattHours, rate::KilowattHourRate},
};

/// Maximal number of months one may enter.
pub const MAX_RECORDS: usize = 12;

/// Command-line reading in the `PERIOD=KWH` form, for example `Jan/2024=150.5`.
#[derive(Clone, Debug)]
pub struct Reading(pub ConsumptionRecord);

impl FromStr for Reading {
    type Err = Error;

    fn from_str(reading: &str) -> Result<Self> {
        let (period, value) =
            reading.rsplit_once('=').with_context(|| format!("expected `PERIOD=KWH`: `{reading}`"))?;
        let value = value
            .trim()
            .parse::<KilowattHours>()
            .with_context(|| format!("invalid consumption: `{value}`"))?;
        ensure!(value.is_non_negative(), "consumption must be a non-negative number: `{value:?}`");
        Ok(Self(ConsumptionRecord::builder().period(period.parse()?).value(value).build()))
    }
}

/// Readings file contents.
#[must_use]
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadingsFile {
    pub rate_per_kwh: Option<KilowattHourRate>,

    #[serde(default)]
    pub readings: Vec<ReadingEntry>,
}

/// Either a ready label, or a month name with a year.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadingEntry {
    #[serde(default)]
    period: Option<Period>,

    #[serde(default)]
    month: Option<String>,

    #[serde(default)]
    year: Option<u16>,

    consumption_kwh: KilowattHours,
}

impl ReadingsFile {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let this = Self::from_str(&contents)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;
        info!(n_readings = this.readings.len(), "loaded the readings");
        Ok(this)
    }
}

impl FromStr for ReadingsFile {
    type Err = Error;

    fn from_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

impl TryFrom<ReadingEntry> for ConsumptionRecord {
    type Error = Error;

    fn try_from(entry: ReadingEntry) -> Result<Self> {
        let period = match (entry.period, entry.month, entry.year) {
            (Some(period), None, None) => period,
            (None, Some(month), Some(year)) => Period::try_from_month_year(&month, year)?,
            _ => bail!("specify either `period`, or both `month` and `year`"),
        };
        ensure!(
            entry.consumption_kwh.is_non_negative(),
            "consumption for `{period}` must be a non-negative number",
        );
        Ok(Self::builder().period(period).value(entry.consumption_kwh).build())
    }
}

/// Assemble the series from the file readings followed by the command-line readings.
pub fn collect_series(
    file: Option<ReadingsFile>,
    readings: impl IntoIterator<Item = Reading>,
) -> Result<(ConsumptionSeries, Option<KilowattHourRate>)> {
    let (file_rate, file_readings) =
        file.map_or_else(|| (None, Vec::new()), |file| (file.rate_per_kwh, file.readings));
    let series = file_readings
        .into_iter()
        .map(ConsumptionRecord::try_from)
        .chain(readings.into_iter().map(|reading| Ok(reading.0)))
        .collect::<Result<ConsumptionSeries>>()?;
    ensure!(
        series.len() >= MIN_RECORDS,
        "at least {MIN_RECORDS} months are required, got {}",
        series.len(),
    );
    ensure!(
        series.len() <= MAX_RECORDS,
        "at most {MAX_RECORDS} months are allowed, got {}",
        series.len(),
    );
    Ok((series, file_rate))
}
