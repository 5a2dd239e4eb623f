use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{AnalysisResult, ConsumptionSeries, analyzer::FORECAST_WINDOW},
    quantity::{energy::KilowattHours, rate::KilowattHourRate},
};

/// Bar chart width in characters.
const BAR_WIDTH: usize = 40;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

#[must_use]
pub fn build_metrics_table(result: &AnalysisResult) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Mean").add_attribute(Attribute::Bold),
        Cell::new("Median"),
        Cell::new("Max"),
        Cell::new("Min"),
        Cell::new("Std. deviation"),
        Cell::new("Range"),
        Cell::new("Daily"),
    ]);
    table.add_row(vec![
        Cell::new(result.mean).add_attribute(Attribute::Bold),
        Cell::new(result.median),
        Cell::new(result.max).fg(Color::Red),
        Cell::new(result.min).fg(Color::Green),
        Cell::new(result.standard_deviation),
        Cell::new(result.range),
        Cell::new(result.daily_average),
    ]);
    table
}

/// Consumption history as a horizontal bar chart with the mean marked by `│`.
#[must_use]
pub fn build_chart_table(series: &ConsumptionSeries, mean: KilowattHours) -> Table {
    let scale = series.values().max().unwrap_or(KilowattHours::ZERO);

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Period"),
        Cell::new("Consumption"),
        Cell::new(format!("Mean = {mean}")).add_attribute(Attribute::Dim),
    ]);
    for record in series.iter() {
        table.add_row(vec![
            Cell::new(record.period.as_str()),
            Cell::new(record.value).set_alignment(CellAlignment::Right),
            Cell::new(render_bar(record.value, mean, scale)).fg(if record.value > mean {
                Color::Red
            } else {
                Color::Green
            }),
        ]);
    }
    table
}

#[must_use]
pub fn build_forecast_table(result: &AnalysisResult, rate: KilowattHourRate) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Next period").add_attribute(Attribute::Bold),
        Cell::new("Rate"),
        Cell::new("Estimated cost").add_attribute(Attribute::Bold),
        Cell::new("Method"),
    ]);
    table.add_row(vec![
        Cell::new(result.forecast_next_period).add_attribute(Attribute::Bold),
        Cell::new(rate),
        Cell::new(result.estimated_cost).add_attribute(Attribute::Bold),
        Cell::new(format!("{FORECAST_WINDOW}-period simple moving average"))
            .add_attribute(Attribute::Dim),
    ]);
    table
}

#[expect(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
fn render_bar(value: KilowattHours, mean: KilowattHours, scale: KilowattHours) -> String {
    let to_cells = |quantity: KilowattHours| {
        if scale > KilowattHours::ZERO {
            ((quantity.0 / scale.0) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        }
    };
    let filled = to_cells(value).min(BAR_WIDTH);
    let marker = to_cells(mean).min(BAR_WIDTH - 1);
    (0..BAR_WIDTH)
        .map(|index| {
            if index == marker {
                '│'
            } else if index < filled {
                '█'
            } else {
                ' '
            }
        })
        .collect()
}
