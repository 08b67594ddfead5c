use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::stats::TestResult;

/// Test results keyed by test name, iterated in first-insertion order.
///
/// Inserting an existing name replaces its result in place.
#[derive(Debug, Default, Clone)]
pub struct ResultsStore {
    entries: Vec<(String, TestResult)>,
    index: HashMap<String, usize>,
}

impl ResultsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `result` under `name`, returning the result it replaced, if any.
    pub fn insert(&mut self, name: String, result: TestResult) -> Option<TestResult> {
        if let Some(slot) = self
            .index
            .get(&name)
            .and_then(|position| self.entries.get_mut(*position))
        {
            return Some(std::mem::replace(&mut slot.1, result));
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, result));
        None
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TestResult> {
        self.index
            .get(name)
            .and_then(|position| self.entries.get(*position))
            .map(|(_, result)| result)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TestResult)> {
        self.entries
            .iter()
            .map(|(name, result)| (name.as_str(), result))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ResultsStore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, result) in &self.entries {
            map.serialize_entry(name, result)?;
        }
        map.end()
    }
}
