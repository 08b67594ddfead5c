use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::args::HttpMethod;
use crate::args::parsers::parse_duration_value;
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub token: Option<String>,
    pub runs: Option<usize>,
    pub sample: Option<usize>,
    pub output: Option<String>,
    pub delay: Option<DurationValue>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub search_terms: Option<Vec<String>>,
    pub seed: Option<u64>,
    pub no_chart: Option<bool>,
    pub plan: Option<PlanConfig>,
    pub extra_cases: Option<Vec<ExtraCaseConfig>>,
}

/// Upper bounds on how many sampled ids feed each parameterized step.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanConfig {
    pub node_cases: Option<usize>,
    pub access_users: Option<usize>,
    pub access_nodes: Option<usize>,
    pub accessible_users: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtraCaseConfig {
    pub name: String,
    pub method: Option<HttpMethod>,
    pub path: String,
    pub query: Option<BTreeMap<String, String>>,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_value(text),
        }
    }
}
