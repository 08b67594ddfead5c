use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::ApiRequest;

/// A named API call to benchmark.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub name: String,
    pub request: ApiRequest,
}

impl TestCase {
    #[must_use]
    pub fn new(name: impl Into<String>, request: ApiRequest) -> Self {
        Self {
            name: name.into(),
            request,
        }
    }
}

/// Identifier of a node or user as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Text(String),
}

impl EntityId {
    /// Reads an id from a JSON value. Floats, booleans and containers are not ids.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_i64().map(EntityId::Int),
            Value::String(text) => Some(EntityId::Text(text.clone())),
            Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Int(id) => write!(f, "{}", id),
            EntityId::Text(id) => f.write_str(id),
        }
    }
}

impl From<&EntityId> for Value {
    fn from(id: &EntityId) -> Self {
        match id {
            EntityId::Int(id) => Value::from(*id),
            EntityId::Text(id) => Value::from(id.as_str()),
        }
    }
}
