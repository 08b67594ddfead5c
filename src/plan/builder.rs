use rand::Rng;
use serde_json::{Map, Value};
use url::Url;

use crate::config::PlanSettings;
use crate::http::ApiRequest;

use super::case::{EntityId, TestCase};
use super::collector::{NODES_PATH, SampleSet};
use super::sampling::sample_ids;

/// Only used to borrow `url`'s path-segment encoding.
const SEGMENT_BASE: &str = "http://localhost/";
const ROOTS_PATH: &str = "/hierarchy/nodes/roots";
const CHECK_ACCESS_PATH: &str = "/hierarchy/check-access";

const GET_NODE_PREFIX: &str = "Get Node ";
const CHILDREN_PREFIX: &str = "Get Children of Node ";
const DESCENDANTS_PREFIX: &str = "Get Descendants of Node ";
const CHECK_ACCESS_PREFIX: &str = "Check Access User ";

const DETAIL_PREFIXES: [&str; 4] = [
    GET_NODE_PREFIX,
    CHILDREN_PREFIX,
    DESCENDANTS_PREFIX,
    CHECK_ACCESS_PREFIX,
];

/// Whether a test belongs on the summary chart. Per-node and per-pair cases do not.
#[must_use]
pub fn is_main_case(name: &str) -> bool {
    !DETAIL_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Builds the ordered list of test cases for one run.
///
/// Every random subset is drawn from `rng` independently, so a seeded generator yields the
/// same plan for the same samples.
pub fn build_plan<R>(samples: &SampleSet, settings: &PlanSettings, rng: &mut R) -> Vec<TestCase>
where
    R: Rng + ?Sized,
{
    let mut plan = vec![
        TestCase::new("List All Nodes", ApiRequest::get(NODES_PATH)),
        TestCase::new("List Root Nodes", ApiRequest::get(ROOTS_PATH)),
    ];

    for node in sample_ids(&samples.node_ids, settings.node_cases, rng) {
        let path = node_path(&node);
        plan.push(TestCase::new(
            format!("{}{}", GET_NODE_PREFIX, node),
            ApiRequest::get(path.as_str()),
        ));
        plan.push(TestCase::new(
            format!("{}{}", CHILDREN_PREFIX, node),
            ApiRequest::get(format!("{}/children", path)),
        ));
        plan.push(TestCase::new(
            format!("{}{}", DESCENDANTS_PREFIX, node),
            ApiRequest::get(format!("{}/descendants", path)),
        ));
    }

    for term in &settings.search_terms {
        plan.push(TestCase::new(
            format!("Search Nodes '{}'", term),
            ApiRequest::get(NODES_PATH).with_query("search", term.as_str()),
        ));
    }

    if !samples.node_ids.is_empty() && !samples.user_ids.is_empty() {
        for user in sample_ids(&samples.user_ids, settings.access_users, rng) {
            for node in sample_ids(&samples.node_ids, settings.access_nodes, rng) {
                plan.push(TestCase::new(
                    format!("{}{} to Node {}", CHECK_ACCESS_PREFIX, user, node),
                    ApiRequest::post(CHECK_ACCESS_PATH, access_body(&user, &node)),
                ));
            }
        }
    }

    for user in sample_ids(&samples.user_ids, settings.accessible_users, rng) {
        plan.push(TestCase::new(
            format!("List Accessible Nodes for User {}", user),
            ApiRequest::get(NODES_PATH).with_query("accessible_by", user.to_string()),
        ));
    }

    plan.extend(settings.extra_cases.iter().cloned());
    plan
}

/// `/hierarchy/nodes/{id}` with the id percent-encoded as a single path segment.
pub(super) fn node_path(node: &EntityId) -> String {
    let id = node.to_string();
    let Ok(mut url) = Url::parse(SEGMENT_BASE) else {
        return format!("{}/{}", NODES_PATH, id);
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments
            .pop_if_empty()
            .extend(NODES_PATH.split('/').filter(|part| !part.is_empty()))
            .push(&id);
    }
    url.path().to_owned()
}

fn access_body(user: &EntityId, node: &EntityId) -> Value {
    let mut body = Map::new();
    body.insert("user_id".to_owned(), Value::from(user));
    body.insert("node_id".to_owned(), Value::from(node));
    Value::Object(body)
}
