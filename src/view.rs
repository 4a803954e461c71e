//! Visibility control, kept separate from query evaluation.
//!
//! The evaluator only produces element-id sets; this type owns the
//! hidden/visible state the UI renders from. Callers decide whether a
//! result is worth applying (the UI refuses empty results).

use std::collections::{HashMap, HashSet};

use crate::model::{ModelId, ModelStore};
use crate::queries::GroupResult;

#[derive(Debug, Default)]
pub struct Visibility {
    hidden: HashMap<ModelId, HashSet<u64>>,
}

impl Visibility {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide every element not present in the result. Models absent from
    /// the result have all their elements hidden.
    pub fn isolate(&mut self, store: &ModelStore, result: &GroupResult) {
        self.hidden.clear();

        for (model_id, model) in store.iter() {
            let hidden: HashSet<u64> = match result.get(&model_id) {
                Some(matched) => model
                    .elements
                    .keys()
                    .copied()
                    .filter(|id| !matched.contains(id))
                    .collect(),
                None => model.elements.keys().copied().collect(),
            };
            self.hidden.insert(model_id, hidden);
        }
    }

    /// Show everything again.
    pub fn reset(&mut self) {
        self.hidden.clear();
    }

    #[must_use]
    pub fn is_visible(&self, model_id: ModelId, element_id: u64) -> bool {
        !self
            .hidden
            .get(&model_id)
            .is_some_and(|h| h.contains(&element_id))
    }

    /// True when nothing is hidden anywhere.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.hidden.values().all(HashSet::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Element, IfcModel};
    use std::collections::{BTreeMap, BTreeSet, HashMap};

    fn store_with_elements(ids: &[u64]) -> ModelStore {
        let mut model = IfcModel::new("M".into(), "IFC4".into(), "m.ifc".into());
        for &id in ids {
            model.elements.insert(
                id,
                Element {
                    id,
                    global_id: String::new(),
                    name: String::new(),
                    category: "IFCWALL".to_string(),
                    storey_id: None,
                    properties: HashMap::new(),
                },
            );
        }
        let mut store = ModelStore::new();
        store.insert(model);
        store
    }

    #[test]
    fn isolate_hides_everything_but_the_matches() {
        let store = store_with_elements(&[1, 2, 3]);
        let result: GroupResult = BTreeMap::from([(0, BTreeSet::from([2]))]);

        let mut vis = Visibility::new();
        vis.isolate(&store, &result);

        assert!(!vis.is_visible(0, 1));
        assert!(vis.is_visible(0, 2));
        assert!(!vis.is_visible(0, 3));
    }

    #[test]
    fn reset_restores_full_visibility() {
        let store = store_with_elements(&[1, 2]);
        let mut vis = Visibility::new();
        vis.isolate(&store, &GroupResult::new());
        assert!(!vis.is_visible(0, 1));

        vis.reset();
        assert!(vis.is_visible(0, 1));
        assert!(vis.is_unfiltered());
    }
}
