use crate::domain::throughput::ResolvedInterval;
use crate::services::throughput_yaml::{ThroughputYamlError, load_throughput_from_yaml_file};
use plotters::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThroughputPlotError {
    #[error(transparent)]
    Throughput(#[from] ThroughputYamlError),
    #[error("throughput data is empty")]
    EmptyThroughput,
    #[error("failed to render throughput plot: {0}")]
    Plot(String),
}

pub fn plot_throughput_from_yaml_file(
    input_path: &str,
    output_path: &str,
) -> Result<(), ThroughputPlotError> {
    let throughput = load_throughput_from_yaml_file(input_path)?;
    if throughput.is_empty() {
        return Err(ThroughputPlotError::EmptyThroughput);
    }
    render_plot_png(output_path, &throughput)
}

// Oldest interval on the left, most recent on the right.
fn render_plot_png(
    output_path: &str,
    throughput: &[ResolvedInterval],
) -> Result<(), ThroughputPlotError> {
    let mut chronological = throughput.to_vec();
    chronological.sort_by(|a, b| b.interval.cmp(&a.interval));

    let max_resolved = chronological
        .iter()
        .map(|item| item.resolved)
        .max()
        .unwrap_or(0);
    let max_y = max_resolved.saturating_add(1).max(1);
    let max_x = chronological.len().max(1);

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ThroughputPlotError::Plot(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Resolved Tickets Per Interval", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(0..max_x, 0..max_y)
        .map_err(|e| ThroughputPlotError::Plot(e.to_string()))?;

    let label_count = chronological.len().clamp(1, 10);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Interval (1 = most recent)")
        .y_desc("Resolved tickets")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_labels(label_count)
        .x_label_formatter(&|index| {
            chronological
                .get(*index)
                .map(|item| item.interval.to_string())
                .unwrap_or_default()
        })
        .draw()
        .map_err(|e| ThroughputPlotError::Plot(e.to_string()))?;

    let bar_color = RGBColor(30, 122, 204);
    let bar_style = ShapeStyle::from(&bar_color).filled().stroke_width(1);
    chart
        .draw_series(chronological.iter().enumerate().map(|(idx, item)| {
            Rectangle::new([(idx, 0), (idx + 1, item.resolved)], bar_style)
        }))
        .map_err(|e| ThroughputPlotError::Plot(e.to_string()))?;

    root.present()
        .map_err(|e| ThroughputPlotError::Plot(e.to_string()))?;
    Ok(())
}
