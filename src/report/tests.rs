use chrono::{TimeZone, Utc};
use tempfile::tempdir;

use super::table::format_size;
use super::*;
use crate::bench::{ResultsStore, TestResult};
use crate::error::{AppError, AppResult};
use crate::test_support::run_async_test;

fn result(avg_time: f64, success_rate: f64, avg_size: f64) -> TestResult {
    TestResult {
        avg_time,
        min_time: avg_time,
        max_time: avg_time,
        median_time: avg_time,
        success_rate,
        avg_size,
        times: vec![avg_time],
    }
}

fn sample_store() -> ResultsStore {
    let mut store = ResultsStore::new();
    store.insert("List All Nodes".to_owned(), result(12.5, 100.0, 2048.0));
    store.insert("Get Node 7".to_owned(), result(3.0, 50.0, 0.0));
    store.insert("Search Nodes 'team'".to_owned(), result(8.25, 100.0, 512.0));
    store
}

#[test]
fn format_size_uses_kib_or_na() -> AppResult<()> {
    let checks = [
        (format_size(2048.0), "2.00 KB"),
        (format_size(1000.0), "0.98 KB"),
        (format_size(0.0), "N/A"),
    ];
    for (actual, expected) in checks {
        if actual != expected {
            return Err(AppError::report(format!(
                "expected {}, got {}",
                expected, actual
            )));
        }
    }
    Ok(())
}

#[test]
fn render_table_lists_every_result() -> AppResult<()> {
    let rendered = render_table(&sample_store());
    for needle in [
        "=== Performance Test Results ===",
        "List All Nodes",
        "Get Node 7",
        "12.50",
        "50.00%",
        "2.00 KB",
        "N/A",
    ] {
        if !rendered.contains(needle) {
            return Err(AppError::report(format!(
                "Missing '{}' in table:\n{}",
                needle, rendered
            )));
        }
    }
    let first = rendered.find("List All Nodes");
    let last = rendered.find("Search Nodes 'team'");
    if first >= last {
        return Err(AppError::report("Rows out of insertion order"));
    }
    Ok(())
}

#[test]
fn render_table_empty_prints_notice() -> AppResult<()> {
    let rendered = render_table(&ResultsStore::new());
    if rendered != NO_RESULTS_MESSAGE {
        return Err(AppError::report(format!("Unexpected output {}", rendered)));
    }
    Ok(())
}

#[test]
fn report_paths_share_timestamp() -> AppResult<()> {
    let now = Utc
        .with_ymd_and_hms(2026, 3, 4, 5, 6, 7)
        .single()
        .ok_or_else(|| AppError::report("Invalid test timestamp"))?;
    let paths = report_paths(std::path::Path::new("out"), now);
    let expected = ReportPaths {
        json: "out/hierarchy_performance_20260304_050607.json".into(),
        chart: "out/hierarchy_performance_20260304_050607.png".into(),
    };
    if paths != expected {
        return Err(AppError::report(format!("Unexpected paths {:?}", paths)));
    }
    Ok(())
}

#[test]
fn chart_entries_keep_main_cases_only() -> AppResult<()> {
    let entries = chart_entries(&sample_store());
    let names: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
    if names != ["List All Nodes", "Search Nodes 'team'"] {
        return Err(AppError::report(format!("Unexpected entries {:?}", names)));
    }
    Ok(())
}

#[test]
fn render_chart_skips_when_nothing_qualifies() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("chart.png");
    let mut store = ResultsStore::new();
    store.insert("Get Node 1".to_owned(), result(1.0, 100.0, 1.0));
    store.insert("Check Access User 1 to Node 1".to_owned(), result(1.0, 100.0, 1.0));

    if render_chart(&store, &path)? {
        return Err(AppError::report("Chart should have been skipped"));
    }
    if path.exists() {
        return Err(AppError::report("Skipped chart must not create a file"));
    }
    Ok(())
}

#[test]
fn write_json_keeps_insertion_order() -> AppResult<()> {
    run_async_test(async {
        let dir = tempdir()?;
        let path = dir.path().join("results.json");
        write_json(&sample_store(), &path).await?;

        let written = tokio::fs::read_to_string(&path).await?;
        let parsed: serde_json::Value = serde_json::from_str(&written)?;
        let times = parsed
            .get("Get Node 7")
            .and_then(|entry| entry.get("times"))
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| AppError::report("Missing raw times"))?;
        if times.len() != 1 {
            return Err(AppError::report(format!("Unexpected times {:?}", times)));
        }
        let first = written.find("List All Nodes");
        let second = written.find("Get Node 7");
        if first >= second || !written.contains('\n') {
            return Err(AppError::report(format!(
                "Expected pretty, ordered JSON:\n{}",
                written
            )));
        }
        Ok(())
    })
}

#[test]
fn write_reports_creates_output_dir() -> AppResult<()> {
    run_async_test(async {
        let dir = tempdir()?;
        let output = dir.path().join("nested").join("reports");
        let artifacts = write_reports(&sample_store(), &output, false).await;

        let json = artifacts
            .json
            .ok_or_else(|| AppError::report("JSON report was not written"))?;
        if !json.exists() || json.parent() != Some(output.as_path()) {
            return Err(AppError::report(format!(
                "Unexpected JSON location {}",
                json.display()
            )));
        }
        let file_name = json
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        if !file_name.starts_with("hierarchy_performance_") || !file_name.ends_with(".json") {
            return Err(AppError::report(format!("Unexpected file name {}", file_name)));
        }
        if artifacts.chart.is_some() {
            return Err(AppError::report("Chart was disabled"));
        }
        Ok(())
    })
}

#[test]
fn write_reports_with_no_results_writes_nothing() -> AppResult<()> {
    run_async_test(async {
        let dir = tempdir()?;
        let output = dir.path().join("empty");
        let artifacts = write_reports(&ResultsStore::new(), &output, true).await;

        if artifacts != ReportArtifacts::default() || output.exists() {
            return Err(AppError::report("Nothing should be written without results"));
        }
        Ok(())
    })
}

#[test]
fn render_chart_writes_png_for_main_cases() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("chart.png");

    if !render_chart(&sample_store(), &path)? {
        return Err(AppError::report("Chart should have been rendered"));
    }
    let written = std::fs::read(&path)?;
    if !written.starts_with(b"\x89PNG") {
        return Err(AppError::report(format!(
            "Expected a PNG at {}, got {} bytes",
            path.display(),
            written.len()
        )));
    }
    Ok(())
}
