use rand::Rng;
use serde_json::Value;

use crate::args::PositiveUsize;
use crate::bench::SUCCESS_STATUS;
use crate::error::{AppError, AppResult, HttpError};
use crate::http::{ApiRequest, Transport};

use super::case::EntityId;
use super::sampling::sample_ids;

pub const NODES_PATH: &str = "/hierarchy/nodes";
pub const USERS_PATH: &str = "/users";

/// Node and user ids the plan is built from. Either side may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleSet {
    pub node_ids: Vec<EntityId>,
    pub user_ids: Vec<EntityId>,
}

/// Lists nodes and users once each and keeps a random subset of at most `sample_size` ids
/// of each.
///
/// # Errors
///
/// Returns an error when a listing request fails at the transport level or when a
/// successful listing is not JSON.
pub async fn collect_samples<T, R>(
    transport: &T,
    sample_size: PositiveUsize,
    rng: &mut R,
) -> AppResult<SampleSet>
where
    T: Transport + Sync + ?Sized,
    R: Rng + ?Sized,
{
    tracing::info!("Collecting sample data...");

    let all_nodes = fetch_ids(transport, NODES_PATH, "nodes").await?;
    let node_ids = sample_ids(&all_nodes, sample_size.get(), rng);
    if !all_nodes.is_empty() {
        tracing::info!(
            "Found {} nodes, using {} for testing",
            all_nodes.len(),
            node_ids.len()
        );
    }

    let all_users = fetch_ids(transport, USERS_PATH, "users").await?;
    let user_ids = sample_ids(&all_users, sample_size.get(), rng);
    if !all_users.is_empty() {
        tracing::info!(
            "Found {} users, using {} for testing",
            all_users.len(),
            user_ids.len()
        );
    }

    Ok(SampleSet { node_ids, user_ids })
}

async fn fetch_ids<T>(transport: &T, path: &str, label: &str) -> AppResult<Vec<EntityId>>
where
    T: Transport + Sync + ?Sized,
{
    let response = transport.send(&ApiRequest::get(path)).await?;
    if response.status != SUCCESS_STATUS {
        tracing::warn!("Failed to get {}: status {}", label, response.status);
        return Ok(Vec::new());
    }

    let listing: Value = serde_json::from_slice(&response.body).map_err(|err| {
        AppError::http(HttpError::InvalidListing {
            path: path.to_owned(),
            source: err,
        })
    })?;
    Ok(extract_ids(&listing, label))
}

/// Ids from either `{"data": [...]}` or a bare array of entities.
pub(super) fn extract_ids(listing: &Value, label: &str) -> Vec<EntityId> {
    let entities = match listing {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => map
            .get("data")
            .and_then(Value::as_array)
            .map_or(&[][..], Vec::as_slice),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            tracing::debug!("Listing of {} is neither an object nor an array", label);
            &[]
        }
    };

    entities
        .iter()
        .filter_map(|entity| {
            let id = entity.get("id").and_then(EntityId::from_json);
            if id.is_none() {
                tracing::debug!("Skipping {} entry without a usable id", label);
            }
            id
        })
        .collect()
}
