use itertools::{Itertools, MinMaxResult};
use serde::Serialize;

use crate::{
    core::{aggregate::Aggregate, series::ConsumptionSeries},
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
};

/// Minimal number of records to analyse.
pub const MIN_RECORDS: usize = 3;

/// Number of the most recent records averaged into the forecast.
pub const FORECAST_WINDOW: usize = 3;

/// Calendar is not taken into account.
pub const DAYS_PER_MONTH: f64 = 30.0;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("at least {MIN_RECORDS} records are required, got {n_records}")]
    InsufficientData { n_records: usize },

    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Full-precision statistics, rounding is up to the caller.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub mean: KilowattHours,
    pub median: KilowattHours,
    pub max: KilowattHours,
    pub min: KilowattHours,
    pub standard_deviation: KilowattHours,

    /// Difference between [`Self::max`] and [`Self::min`].
    pub range: KilowattHours,

    /// Mean consumption per day, assuming [`DAYS_PER_MONTH`].
    pub daily_average: KilowattHours,

    /// Simple moving average of the last [`FORECAST_WINDOW`] periods.
    pub forecast_next_period: KilowattHours,

    /// Forecast consumption at the tariff.
    pub estimated_cost: Cost,
}

impl AnalysisResult {
    fn is_finite(&self) -> bool {
        [
            self.mean,
            self.median,
            self.max,
            self.min,
            self.standard_deviation,
            self.range,
            self.daily_average,
            self.forecast_next_period,
        ]
        .iter()
        .all(|quantity| quantity.0.is_finite())
            && self.estimated_cost.0.is_finite()
    }
}

/// Crunch the consumption series.
#[instrument(skip_all, fields(n_records = series.len()))]
pub fn analyze(
    series: &ConsumptionSeries,
    tariff: KilowattHourRate,
) -> Result<AnalysisResult, AnalysisError> {
    let n_records = series.len();
    if n_records < MIN_RECORDS {
        return Err(AnalysisError::InsufficientData { n_records });
    }
    if let Some(record) = series.iter().find(|record| !record.value.is_non_negative()) {
        return Err(AnalysisError::InvalidValue(format!(
            "consumption of {:?} for `{}`",
            record.value, record.period,
        )));
    }
    if !tariff.is_non_negative() {
        return Err(AnalysisError::InvalidValue(format!("tariff of {tariff:?}")));
    }

    let insufficient_data = || AnalysisError::InsufficientData { n_records };
    let mean: KilowattHours = series.values().mean().ok_or_else(insufficient_data)?;
    let median = series.values().median().ok_or_else(insufficient_data)?;
    let (min, max) = match series.values().minmax() {
        MinMaxResult::MinMax(min, max) => (min, max),
        MinMaxResult::OneElement(value) => (value, value),
        MinMaxResult::NoElements => return Err(insufficient_data()),
    };
    let standard_deviation =
        series.values().sample_standard_deviation().ok_or_else(insufficient_data)?;
    let forecast_next_period: KilowattHours =
        series.values().trailing_mean(FORECAST_WINDOW).ok_or_else(insufficient_data)?;

    let result = AnalysisResult {
        mean,
        median,
        max,
        min,
        standard_deviation,
        range: max - min,
        daily_average: mean / DAYS_PER_MONTH,
        forecast_next_period,
        estimated_cost: forecast_next_period * tariff,
    };
    if !result.is_finite() {
        return Err(AnalysisError::InvalidValue(format!(
            "the values are too large to analyse: {result:?}",
        )));
    }
    debug!(
        mean = ?result.mean,
        forecast = ?result.forecast_next_period,
        cost = ?result.estimated_cost,
        "analysed",
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::{period::Period, series::ConsumptionRecord};

    fn series(values: &[f64]) -> ConsumptionSeries {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                ConsumptionRecord::builder()
                    .period(Period::try_from_month_year(&format!("M{}", index + 1), 2024).unwrap())
                    .value(KilowattHours::from(*value))
                    .build()
            })
            .collect()
    }

    #[test]
    fn test_reference_series() {
        let result =
            analyze(&series(&[100.0, 150.0, 120.0, 180.0, 200.0]), KilowattHourRate::from(0.8))
                .unwrap();
        assert_abs_diff_eq!(result.mean.0, 150.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.median.0, 150.0);
        assert_abs_diff_eq!(result.max.0, 200.0);
        assert_abs_diff_eq!(result.min.0, 100.0);
        assert_abs_diff_eq!(result.range.0, 100.0);
        assert_abs_diff_eq!(result.daily_average.0, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.forecast_next_period.0, 500.0 / 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.estimated_cost.0, 400.0 / 3.0, epsilon = 1e-9);
        assert_eq!(result.estimated_cost.to_string(), "133.33");

        // Squared deviations sum up to 6 800:
        assert_abs_diff_eq!(result.standard_deviation.0, (6800.0_f64 / 4.0).sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_constant_series() {
        let result = analyze(&series(&[50.0, 50.0, 50.0]), KilowattHourRate::from(1.0)).unwrap();
        assert_abs_diff_eq!(result.mean.0, 50.0);
        assert_abs_diff_eq!(result.median.0, 50.0);
        assert_abs_diff_eq!(result.forecast_next_period.0, 50.0);
        assert_abs_diff_eq!(result.standard_deviation.0, 0.0);
        assert_abs_diff_eq!(result.range.0, 0.0);
        assert_eq!(result.estimated_cost.to_string(), "50.00");
    }

    #[test]
    fn test_three_records_forecast_equals_mean() {
        let result = analyze(&series(&[12.5, 300.0, 71.25]), KilowattHourRate::from(0.3)).unwrap();
        assert_eq!(result.forecast_next_period, result.mean);
    }

    #[test]
    fn test_forecast_uses_most_recent_records() {
        // The largest values come first and must not affect the forecast:
        let result =
            analyze(&series(&[900.0, 800.0, 10.0, 20.0, 30.0]), KilowattHourRate::ZERO).unwrap();
        assert_abs_diff_eq!(result.forecast_next_period.0, 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.estimated_cost.0, 0.0);
    }

    #[test]
    fn test_even_count_median() {
        let result =
            analyze(&series(&[10.0, 40.0, 20.0, 30.0]), KilowattHourRate::from(1.0)).unwrap();
        assert_abs_diff_eq!(result.median.0, 25.0);
    }

    #[test]
    fn test_bounds() {
        let result =
            analyze(&series(&[3.0, 7.5, 1.25, 9.0, 4.0, 4.0]), KilowattHourRate::from(0.25))
                .unwrap();
        assert!(result.min <= result.mean && result.mean <= result.max);
        assert!(result.min <= result.median && result.median <= result.max);
        assert!(result.range >= KilowattHours::ZERO);
        assert_abs_diff_eq!(result.range.0, (result.max - result.min).0);
    }

    #[test]
    fn test_cost_is_linear_in_tariff() {
        let series = series(&[120.0, 80.0, 95.0, 110.0]);
        let single = analyze(&series, KilowattHourRate::from(0.5)).unwrap();
        let double = analyze(&series, KilowattHourRate::from(1.0)).unwrap();
        assert_abs_diff_eq!(double.estimated_cost.0, 2.0 * single.estimated_cost.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            single.estimated_cost.0,
            single.forecast_next_period.0 * 0.5,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_idempotent() {
        let series = series(&[1.0, 2.0, 3.0, 5.0, 8.0]);
        let tariff = KilowattHourRate::from(0.42);
        assert_eq!(analyze(&series, tariff).unwrap(), analyze(&series, tariff).unwrap());
    }

    #[test]
    fn test_duplicate_periods_are_independent() {
        let record = ConsumptionRecord::builder()
            .period("Jan/2024".parse().unwrap())
            .value(KilowattHours::from(10.0))
            .build();
        let series: ConsumptionSeries =
            vec![record.clone(), record.clone(), record].into_iter().collect();
        let result = analyze(&series, KilowattHourRate::from(1.0)).unwrap();
        assert_abs_diff_eq!(result.mean.0, 10.0);
    }

    #[test]
    fn test_insufficient_data() {
        let error = analyze(&series(&[1.0, 2.0]), KilowattHourRate::from(1.0)).unwrap_err();
        assert!(matches!(error, AnalysisError::InsufficientData { n_records: 2 }));
        assert!(matches!(
            analyze(&ConsumptionSeries::default(), KilowattHourRate::from(1.0)),
            Err(AnalysisError::InsufficientData { n_records: 0 }),
        ));
    }

    #[test]
    fn test_negative_consumption() {
        let error = analyze(&series(&[50.0, -10.0, 60.0]), KilowattHourRate::from(1.0)).unwrap_err();
        assert!(matches!(error, AnalysisError::InvalidValue(_)));
    }

    #[test]
    fn test_non_finite_consumption() {
        let error =
            analyze(&series(&[50.0, f64::NAN, 60.0]), KilowattHourRate::from(1.0)).unwrap_err();
        assert!(matches!(error, AnalysisError::InvalidValue(_)));
    }

    #[test]
    fn test_overflowing_values() {
        let error =
            analyze(&series(&[0.0, 1e308, 1e308]), KilowattHourRate::from(10.0)).unwrap_err();
        assert!(matches!(error, AnalysisError::InvalidValue(_)));
    }

    #[test]
    fn test_negative_tariff() {
        let error = analyze(&series(&[50.0, 10.0, 60.0]), KilowattHourRate::from(-0.1)).unwrap_err();
        assert!(matches!(error, AnalysisError::InvalidValue(_)));
    }
}
