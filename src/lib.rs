//! Core library for the `hierperf` CLI.
//!
//! `hierperf` benchmarks the read and permission endpoints of a hierarchy API: it samples
//! live node and user ids, builds a fixed test plan from them, times every case a number of
//! times, and reports the results as a console table, a JSON file and a PNG bar chart.
pub mod app;
pub mod args;
pub mod bench;
pub mod config;
pub mod entry;
pub mod error;
pub mod http;
pub mod logger;
pub mod plan;
pub mod report;
pub mod shutdown;

#[cfg(test)]
mod test_support;
