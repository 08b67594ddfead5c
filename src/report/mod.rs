//! Console table, JSON dump and bar chart for a finished (or cut short) run.
mod chart;
mod json;
mod naming;
mod table;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::bench::ResultsStore;
use crate::error::{AppError, ReportError};

pub use chart::{CHART_SIZE, chart_entries, render_chart};
pub use json::write_json;
pub use naming::{ReportPaths, report_paths};
pub use table::{NO_RESULTS_MESSAGE, print_table, render_table};

/// Files actually written by [`write_reports`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportArtifacts {
    pub json: Option<PathBuf>,
    pub chart: Option<PathBuf>,
}

/// Prints the table and writes the JSON and chart files into `output_dir`.
///
/// Each report is attempted on its own; failures are logged and leave the corresponding
/// artifact unset.
pub async fn write_reports(
    results: &ResultsStore,
    output_dir: &Path,
    chart: bool,
) -> ReportArtifacts {
    let mut artifacts = ReportArtifacts::default();

    print_table(results);
    if results.is_empty() {
        return artifacts;
    }

    if let Err(err) = tokio::fs::create_dir_all(output_dir).await {
        let err = AppError::report(ReportError::CreateOutputDir {
            path: output_dir.to_path_buf(),
            source: err,
        });
        tracing::error!("{}", err);
        return artifacts;
    }

    let paths = report_paths(output_dir, Local::now());

    match write_json(results, &paths.json).await {
        Ok(()) => {
            tracing::info!("Results saved to {}", paths.json.display());
            artifacts.json = Some(paths.json);
        }
        Err(err) => tracing::error!("Failed to save results: {}", err),
    }

    if !chart {
        tracing::debug!("Chart rendering disabled");
        return artifacts;
    }
    match render_chart(results, &paths.chart) {
        Ok(true) => {
            tracing::info!("Chart saved to {}", paths.chart.display());
            artifacts.chart = Some(paths.chart);
        }
        Ok(false) => tracing::info!("No main test cases to chart"),
        Err(err) => tracing::error!("Failed to render chart: {}", err),
    }

    artifacts
}
