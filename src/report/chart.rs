use std::path::Path;

use plotters::prelude::*;

use crate::bench::ResultsStore;
use crate::error::{AppError, AppResult, ReportError};
use crate::plan::is_main_case;

pub const CHART_SIZE: (u32, u32) = (1200, 800);

/// Names and average latencies of the tests that belong on the chart, in run order.
#[must_use]
pub fn chart_entries(results: &ResultsStore) -> Vec<(String, f64)> {
    results
        .iter()
        .filter(|(name, _)| is_main_case(name))
        .map(|(name, result)| (name.to_owned(), result.avg_time))
        .collect()
}

/// Renders a bar chart of average latency per main test case.
///
/// Returns `Ok(false)` without touching the filesystem when no test qualifies.
///
/// # Errors
///
/// Returns an error when the image cannot be drawn or saved.
pub fn render_chart(results: &ResultsStore, path: &Path) -> AppResult<bool> {
    let entries = chart_entries(results);
    if entries.is_empty() {
        return Ok(false);
    }
    draw_bars(&entries, path).map_err(|err| {
        AppError::report(ReportError::RenderChart {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    })?;
    Ok(true)
}

fn draw_bars(entries: &[(String, f64)], path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let y_max = entries
        .iter()
        .map(|(_, avg)| *avg)
        .fold(0.0_f64, f64::max)
        .max(1.0)
        * 1.1;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("API Performance Test Results", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(220)
        .y_label_area_size(70)
        .build_cartesian_2d((0..entries.len()).into_segmented(), 0.0..y_max)?;

    let label_for = |value: &SegmentValue<usize>| match value {
        SegmentValue::CenterOf(index) | SegmentValue::Exact(index) => entries
            .get(*index)
            .map(|(name, _)| name.clone())
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Test Case")
        .y_desc("Average Response Time (ms)")
        .x_labels(entries.len())
        .x_label_formatter(&label_for)
        .x_label_style(("sans-serif", 12).into_font().transform(FontTransform::Rotate90))
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.mix(0.7).filled())
            .margin(10)
            .data(entries.iter().enumerate().map(|(index, (_, avg))| (index, *avg))),
    )?;

    root.present()?;
    Ok(())
}
