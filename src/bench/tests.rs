use std::time::Duration;

use super::*;
use crate::args::PositiveUsize;
use crate::error::{AppError, AppResult};
use crate::http::{ApiRequest, RawResponse, Sample};
use crate::plan::TestCase;
use crate::test_support::{ScriptedTransport, ok_response, run_async_test, status_response};

fn sample(elapsed_ms: f64, status: u16, size_bytes: u64) -> Sample {
    Sample {
        elapsed_ms,
        status,
        size_bytes,
    }
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

fn check(label: &'static str, actual: f64, expected: f64) -> AppResult<()> {
    if close(actual, expected) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "{}: expected {}, got {}",
            label, expected, actual
        )))
    }
}

fn result_with_avg(avg_time: f64) -> TestResult {
    TestResult {
        avg_time,
        min_time: avg_time,
        max_time: avg_time,
        median_time: avg_time,
        success_rate: 100.0,
        avg_size: 0.0,
        times: vec![avg_time],
    }
}

#[test]
fn summarize_empty_is_none() -> AppResult<()> {
    if summarize(&[]).is_some() {
        return Err(AppError::validation("Expected no result for empty samples"));
    }
    Ok(())
}

#[test]
fn summarize_reports_latency_statistics() -> AppResult<()> {
    let samples = [
        sample(40.0, 200, 10),
        sample(10.0, 200, 10),
        sample(30.0, 200, 10),
        sample(20.0, 200, 10),
    ];
    let result = summarize(&samples)
        .ok_or_else(|| AppError::validation("Expected a result for four samples"))?;

    check("avg", result.avg_time, 25.0)?;
    check("median", result.median_time, 25.0)?;
    check("min", result.min_time, 10.0)?;
    check("max", result.max_time, 40.0)?;
    if result.times != vec![40.0, 10.0, 30.0, 20.0] {
        return Err(AppError::validation(format!(
            "Raw times should keep run order, got {:?}",
            result.times
        )));
    }
    Ok(())
}

#[test]
fn summarize_median_odd_count_takes_middle() -> AppResult<()> {
    let samples = [
        sample(5.0, 200, 0),
        sample(100.0, 200, 0),
        sample(7.0, 200, 0),
    ];
    let result = summarize(&samples)
        .ok_or_else(|| AppError::validation("Expected a result for three samples"))?;
    check("median", result.median_time, 7.0)
}

#[test]
fn summarize_counts_only_ok_status_as_success() -> AppResult<()> {
    let samples = [
        sample(1.0, 200, 0),
        sample(1.0, 404, 0),
        sample(1.0, 201, 0),
        sample(1.0, 200, 0),
    ];
    let result = summarize(&samples)
        .ok_or_else(|| AppError::validation("Expected a result for four samples"))?;
    check("success_rate", result.success_rate, 50.0)
}

#[test]
fn summarize_includes_unmeasured_sizes_in_average() -> AppResult<()> {
    let samples = [sample(1.0, 200, 300), sample(1.0, 200, 0)];
    let result = summarize(&samples)
        .ok_or_else(|| AppError::validation("Expected a result for two samples"))?;
    check("avg_size", result.avg_size, 150.0)
}

#[test]
fn results_store_overwrites_in_place() -> AppResult<()> {
    let mut store = ResultsStore::new();
    store.insert("first".to_owned(), result_with_avg(1.0));
    store.insert("second".to_owned(), result_with_avg(2.0));
    let replaced = store.insert("first".to_owned(), result_with_avg(3.0));

    if replaced.is_none() {
        return Err(AppError::validation("Expected the earlier result back"));
    }
    if store.len() != 2 {
        return Err(AppError::validation(format!(
            "Expected 2 entries, got {}",
            store.len()
        )));
    }
    let names: Vec<&str> = store.iter().map(|(name, _)| name).collect();
    if names != ["first", "second"] {
        return Err(AppError::validation(format!(
            "Unexpected order {:?}",
            names
        )));
    }
    let first = store
        .get("first")
        .ok_or_else(|| AppError::validation("Missing 'first'"))?;
    check("overwritten avg", first.avg_time, 3.0)
}

#[test]
fn results_store_serializes_in_insertion_order() -> AppResult<()> {
    let mut store = ResultsStore::new();
    store.insert("zeta".to_owned(), result_with_avg(1.0));
    store.insert("alpha".to_owned(), result_with_avg(2.0));

    let rendered = serde_json::to_string(&store)?;
    let zeta = rendered
        .find("\"zeta\"")
        .ok_or_else(|| AppError::validation("Missing zeta key"))?;
    let alpha = rendered
        .find("\"alpha\"")
        .ok_or_else(|| AppError::validation("Missing alpha key"))?;
    if zeta > alpha {
        return Err(AppError::validation(format!(
            "Keys out of order: {}",
            rendered
        )));
    }
    for key in [
        "avg_time",
        "min_time",
        "max_time",
        "median_time",
        "success_rate",
        "avg_size",
        "times",
    ] {
        if !rendered.contains(&format!("\"{}\"", key)) {
            return Err(AppError::validation(format!("Missing field {}", key)));
        }
    }
    Ok(())
}

#[test]
fn runner_aggregates_repeated_runs() -> AppResult<()> {
    run_async_test(async {
        let transport = ScriptedTransport::new(RawResponse {
            status: 200,
            content_length: Some("1000".to_owned()),
            body: Vec::new(),
        })
        .with_latency(Duration::from_millis(50));
        let runs = PositiveUsize::try_from(3)?;
        let mut runner = BenchmarkRunner::new(&transport, runs, Duration::ZERO);

        let case = TestCase::new("List All Nodes", ApiRequest::get("/hierarchy/nodes"));
        runner.run_case(&case).await?;

        let result = runner
            .results()
            .get("List All Nodes")
            .ok_or_else(|| AppError::validation("Missing result for List All Nodes"))?;
        if result.times.len() != 3 {
            return Err(AppError::validation(format!(
                "Expected 3 times, got {}",
                result.times.len()
            )));
        }
        if result.times.iter().any(|time| *time < 50.0) {
            return Err(AppError::validation(format!(
                "Latency below scripted delay: {:?}",
                result.times
            )));
        }
        if !(result.min_time <= result.avg_time && result.avg_time <= result.max_time) {
            return Err(AppError::validation(format!(
                "Expected min <= avg <= max, got {} / {} / {}",
                result.min_time, result.avg_time, result.max_time
            )));
        }
        check("success_rate", result.success_rate, 100.0)?;
        check("avg_size", result.avg_size, 1000.0)?;
        if transport.seen().len() != 3 {
            return Err(AppError::validation(format!(
                "Expected 3 requests, got {}",
                transport.seen().len()
            )));
        }
        Ok(())
    })
}

#[test]
fn runner_reuses_name_and_keeps_last_result() -> AppResult<()> {
    run_async_test(async {
        let transport = ScriptedTransport::new(ok_response(b"ok"))
            .respond("/first", status_response(500));
        let runs = PositiveUsize::try_from(1)?;
        let mut runner = BenchmarkRunner::new(&transport, runs, Duration::from_millis(1));

        runner
            .run_case(&TestCase::new("Same", ApiRequest::get("/first")))
            .await?;
        runner
            .run_case(&TestCase::new("Same", ApiRequest::get("/second")))
            .await?;

        let results = runner.into_results();
        if results.len() != 1 {
            return Err(AppError::validation(format!(
                "Expected one entry, got {}",
                results.len()
            )));
        }
        let result = results
            .get("Same")
            .ok_or_else(|| AppError::validation("Missing result for 'Same'"))?;
        check("success_rate", result.success_rate, 100.0)
    })
}

#[test]
fn runner_propagates_transport_failure() -> AppResult<()> {
    run_async_test(async {
        let transport = ScriptedTransport::new(ok_response(b"")).fail_on("/broken");
        let runs = PositiveUsize::try_from(2)?;
        let mut runner = BenchmarkRunner::new(&transport, runs, Duration::ZERO);

        let outcome = runner
            .run_case(&TestCase::new("Broken", ApiRequest::get("/broken")))
            .await;
        if outcome.is_ok() {
            return Err(AppError::validation("Expected the transport failure"));
        }
        if !runner.results().is_empty() {
            return Err(AppError::validation("Failed case must not be stored"));
        }
        Ok(())
    })
}
