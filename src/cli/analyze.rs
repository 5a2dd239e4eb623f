use serde::Serialize;

use crate::{
    cli::AnalyzeArgs,
    core::{AnalysisResult, ConsumptionSeries, analyze as analyze_series},
    input::{ReadingsFile, collect_series},
    prelude::*,
    quantity::rate::KilowattHourRate,
    tables::{build_chart_table, build_forecast_table, build_metrics_table},
};

#[must_use]
#[derive(Serialize)]
struct Report {
    rate_per_kwh: KilowattHourRate,
    series: ConsumptionSeries,
    analysis: AnalysisResult,
}

impl Report {
    /// Collect the readings, check the rate, and crunch the numbers.
    fn try_from_args(args: &AnalyzeArgs) -> Result<Self> {
        let file = args.readings_file.as_deref().map(ReadingsFile::read_from).transpose()?;
        let (series, file_rate) = collect_series(file, args.readings.iter().cloned())?;
        info!(n_records = series.len(), "collected the readings");

        let rate = args
            .rate
            .or(file_rate)
            .context("the rate is not set, use `--rate-per-kwh` or the readings file")?;
        ensure!(rate.is_non_negative(), "the rate must be a non-negative number: `{rate:?}`");
        if !args.confirm_rate {
            bail!("confirm the rate of {rate} with `--confirm-rate`");
        }

        let analysis = analyze_series(&series, rate)?;
        info!(forecast = %analysis.forecast_next_period, cost = %analysis.estimated_cost, "crunched");
        Ok(Self { rate_per_kwh: rate, series, analysis })
    }
}

#[instrument(skip_all)]
pub fn analyze(args: &AnalyzeArgs) -> Result {
    let report = Report::try_from_args(args)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", build_metrics_table(&report.analysis));
        println!("{}", build_chart_table(&report.series, report.analysis.mean));
        println!("{}", build_forecast_table(&report.analysis, report.rate_per_kwh));
    }
    Ok(())
}
