use serde::{Deserialize, Serialize};

use crate::http::Sample;

/// Only this status counts towards the success rate.
pub const SUCCESS_STATUS: u16 = 200;

/// Aggregate for one named test case. Times are milliseconds, sizes bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub avg_time: f64,
    pub min_time: f64,
    pub max_time: f64,
    pub median_time: f64,
    pub success_rate: f64,
    pub avg_size: f64,
    pub times: Vec<f64>,
}

/// Reduces the samples of one test case. Returns `None` for an empty slice.
///
/// Every sample contributes its latency and size regardless of status; sizes that could not
/// be measured are already zero and pull the average down.
#[must_use]
pub fn summarize(samples: &[Sample]) -> Option<TestResult> {
    if samples.is_empty() {
        return None;
    }

    let times: Vec<f64> = samples.iter().map(|sample| sample.elapsed_ms).collect();
    let sizes: Vec<f64> = samples.iter().map(|sample| sample.size_bytes as f64).collect();
    let successes = samples
        .iter()
        .filter(|sample| sample.status == SUCCESS_STATUS)
        .count();

    let count = samples.len() as f64;
    let min_time = times.iter().copied().fold(f64::INFINITY, f64::min);
    let max_time = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(TestResult {
        avg_time: mean(&times),
        min_time,
        max_time,
        median_time: median(&times),
        success_rate: successes as f64 / count * 100.0,
        avg_size: mean(&sizes),
        times,
    })
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        return sorted.get(mid).copied().unwrap_or(0.0);
    }
    match (sorted.get(mid.wrapping_sub(1)), sorted.get(mid)) {
        (Some(low), Some(high)) => (low + high) / 2.0,
        _ => 0.0,
    }
}
