use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};

use crate::bench::{ResultsStore, TestResult};

pub const NO_RESULTS_MESSAGE: &str = "No test results to display";

const BANNER: &str = "=== Performance Test Results ===";
const BYTES_PER_KB: f64 = 1024.0;

pub fn print_table(results: &ResultsStore) {
    println!("{}", render_table(results));
}

#[must_use]
pub fn render_table(results: &ResultsStore) -> String {
    if results.is_empty() {
        return NO_RESULTS_MESSAGE.to_owned();
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS);
    table.set_header(vec![
        "Test",
        "Avg (ms)",
        "Median (ms)",
        "Min (ms)",
        "Max (ms)",
        "Success Rate",
        "Avg Size",
    ]);

    for (name, result) in results.iter() {
        table.add_row(row(name, result));
    }

    format!("\n{}\n{}", BANNER, table)
}

fn row(name: &str, result: &TestResult) -> Vec<Cell> {
    vec![
        Cell::new(name),
        number_cell(format!("{:.2}", result.avg_time)),
        number_cell(format!("{:.2}", result.median_time)),
        number_cell(format!("{:.2}", result.min_time)),
        number_cell(format!("{:.2}", result.max_time)),
        number_cell(format!("{:.2}%", result.success_rate)),
        number_cell(format_size(result.avg_size)),
    ]
}

fn number_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Average size in KiB, or `N/A` when nothing was measured.
pub(super) fn format_size(avg_bytes: f64) -> String {
    if avg_bytes > 0.0 {
        format!("{:.2} KB", avg_bytes / BYTES_PER_KB)
    } else {
        "N/A".to_owned()
    }
}
