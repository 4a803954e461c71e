use std::collections::{BTreeMap, BTreeSet};

use super::Query;
use crate::error::QueryError;
use crate::model::{ModelId, ModelStore};

/// Matches per model: element ids keyed by model handle. Models with no
/// matches are absent.
pub type GroupResult = BTreeMap<ModelId, BTreeSet<u64>>;

/// An ordered collection of queries whose matches are unioned.
///
/// Evaluation is a pure scan over the store; the result is recomputed
/// from scratch on every call, so an unchanged group over an unchanged
/// store always yields the same result.
#[derive(Debug, Clone, Default)]
pub struct QueryGroup {
    queries: Vec<Query>,
}

impl QueryGroup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_query(&mut self, query: Query) {
        self.queries.push(query);
    }

    #[must_use]
    pub fn with_query(mut self, query: Query) -> Self {
        self.add_query(query);
        self
    }

    pub fn clear(&mut self) {
        self.queries.clear();
    }

    #[must_use]
    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    pub fn queries_mut(&mut self) -> &mut Vec<Query> {
        &mut self.queries
    }

    /// Evaluate the group against every model in the store.
    #[must_use]
    pub fn update(&self, store: &ModelStore) -> GroupResult {
        let mut result = GroupResult::new();

        for (model_id, model) in store.iter() {
            let matches: BTreeSet<u64> = model
                .elements
                .values()
                .filter(|e| self.queries.iter().any(|q| q.matches(e)))
                .map(|e| e.id)
                .collect();

            if !matches.is_empty() {
                result.insert(model_id, matches);
            }
        }

        result
    }

    /// Evaluate the group against a single model, surfacing
    /// [`QueryError::UnknownModel`] for stale handles.
    pub fn update_model(
        &self,
        store: &ModelStore,
        model_id: ModelId,
    ) -> Result<BTreeSet<u64>, QueryError> {
        let model = store.get(model_id)?;

        Ok(model
            .elements
            .values()
            .filter(|e| self.queries.iter().any(|q| q.matches(e)))
            .map(|e| e.id)
            .collect())
    }
}
