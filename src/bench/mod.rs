//! Repeated timed execution of test cases and reduction into summary statistics.
mod results;
mod runner;
mod stats;

#[cfg(test)]
mod tests;

pub use results::ResultsStore;
pub use runner::BenchmarkRunner;
pub use stats::{SUCCESS_STATUS, TestResult, summarize};
