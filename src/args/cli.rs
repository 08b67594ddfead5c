use clap::Parser;
use std::time::Duration;

use super::parsers::{
    parse_bool_env, parse_delay_arg, parse_duration_arg, parse_positive_usize, parse_search_term,
};
use super::types::PositiveUsize;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Measure latency and response size of a hierarchy API: node listings, children, descendants, search, and access checks."
)]
pub struct BenchArgs {
    /// Base API URL
    #[arg(long, short, default_value = "http://localhost:4000/api")]
    pub url: String,

    /// Bearer token sent with every request
    #[arg(long, env = "HIERPERF_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Number of timed requests per test case
    #[arg(
        long,
        short,
        default_value = "5",
        value_parser = parse_positive_usize
    )]
    pub runs: PositiveUsize,

    /// Number of node and user ids to sample from the listings
    #[arg(
        long = "sample",
        short = 's',
        default_value = "50",
        value_parser = parse_positive_usize
    )]
    pub sample_size: PositiveUsize,

    /// Output directory for the JSON report and chart (created if absent)
    #[arg(long, short, default_value = ".")]
    pub output: String,

    /// Pause after every timed request (supports ms/s/m/h, 0 disables)
    #[arg(long = "delay", default_value = "100ms", value_parser = parse_delay_arg)]
    pub delay: Duration,

    /// Request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = "30s", value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        default_value = "5s",
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,

    /// Search term for the node search cases (repeatable, replaces the defaults)
    #[arg(long = "search-term", value_parser = parse_search_term)]
    pub search_terms: Vec<String>,

    /// Seed for the id sampling RNG
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip rendering the bar chart
    #[arg(long = "no-chart")]
    pub no_chart: bool,

    /// Path to config file (TOML or JSON)
    #[arg(long, short)]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by HIERPERF_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
