use std::path::PathBuf;
use std::time::Duration;

use crate::args::{
    DEFAULT_ACCESS_NODES, DEFAULT_ACCESS_USERS, DEFAULT_ACCESSIBLE_USERS, DEFAULT_NODE_CASES,
    DEFAULT_SEARCH_TERMS, PositiveUsize,
};
use crate::plan::TestCase;

/// Fully resolved, immutable configuration for one benchmark run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Base API URL without a trailing slash.
    pub base_url: String,
    pub token: String,
    pub runs: PositiveUsize,
    pub sample_size: PositiveUsize,
    pub output_dir: PathBuf,
    pub delay: Duration,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub seed: Option<u64>,
    pub chart: bool,
    pub plan: PlanSettings,
}

#[derive(Debug, Clone)]
pub struct PlanSettings {
    pub search_terms: Vec<String>,
    pub node_cases: usize,
    pub access_users: usize,
    pub access_nodes: usize,
    pub accessible_users: usize,
    pub extra_cases: Vec<TestCase>,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            search_terms: DEFAULT_SEARCH_TERMS
                .iter()
                .map(|term| (*term).to_owned())
                .collect(),
            node_cases: DEFAULT_NODE_CASES,
            access_users: DEFAULT_ACCESS_USERS,
            access_nodes: DEFAULT_ACCESS_NODES,
            accessible_users: DEFAULT_ACCESSIBLE_USERS,
            extra_cases: Vec::new(),
        }
    }
}
