use std::collections::BTreeMap;

use plotters::prelude::*;
use thiserror::Error;

use crate::domain::prediction::SimulationResult;

#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("failed to render histogram: {0}")]
    Render(String),
}

/// Draws how many trials arrived at each completion time, in days.
pub fn write_histogram_png(
    output_path: &str,
    simulation: &SimulationResult,
    interval_length_days: u64,
) -> Result<(), HistogramError> {
    if simulation.is_empty() {
        return Ok(());
    }

    let mut counts: BTreeMap<u64, usize> = BTreeMap::new();
    for intervals in simulation.trials() {
        *counts.entry(*intervals).or_insert(0usize) += 1;
    }
    let max_count = counts.values().copied().max().unwrap_or(1);
    let min_intervals = counts.keys().next().copied().unwrap_or(0);
    let max_intervals = counts.keys().next_back().copied().unwrap_or(0);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Simulation Results", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(min_intervals..max_intervals + 1, 0..(max_count + 1))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Duration in days")
        .y_desc("Simulations")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_label_formatter(&|intervals| format!("{}", intervals * interval_length_days))
        .draw()
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let bar_color = RGBColor(30, 122, 204);
    let bar_style = ShapeStyle::from(&bar_color).filled();
    chart
        .draw_series(counts.iter().map(|(intervals, count)| {
            Rectangle::new([(*intervals, 0), (*intervals + 1, *count)], bar_style)
        }))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| HistogramError::Render(e.to_string()))?;
    Ok(())
}
