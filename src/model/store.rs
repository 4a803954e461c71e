use std::collections::BTreeMap;

use super::IfcModel;
use crate::error::QueryError;

/// Handle to a model held by a [`ModelStore`].
pub type ModelId = u32;

/// Owns the loaded models and hands out stable integer handles.
///
/// Queries refer to models by handle; a stale handle surfaces as
/// [`QueryError::UnknownModel`] instead of silently matching nothing.
#[derive(Debug, Default)]
pub struct ModelStore {
    models: BTreeMap<ModelId, IfcModel>,
    next_id: ModelId,
}

impl ModelStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, model: IfcModel) -> ModelId {
        let id = self.next_id;
        self.next_id += 1;
        self.models.insert(id, model);
        id
    }

    pub fn remove(&mut self, id: ModelId) -> Option<IfcModel> {
        self.models.remove(&id)
    }

    pub fn get(&self, id: ModelId) -> Result<&IfcModel, QueryError> {
        self.models.get(&id).ok_or(QueryError::UnknownModel(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModelId, &IfcModel)> {
        self.models.iter().map(|(id, m)| (*id, m))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;

    #[test]
    fn handles_stay_stable_after_removal() {
        let mut store = ModelStore::new();
        let a = store.insert(IfcModel::new("A".into(), "IFC4".into(), "a.ifc".into()));
        let b = store.insert(IfcModel::new("B".into(), "IFC4".into(), "b.ifc".into()));

        store.remove(a);
        assert!(matches!(store.get(a), Err(QueryError::UnknownModel(id)) if id == a));
        assert_eq!(store.get(b).unwrap().name, "B");

        let c = store.insert(IfcModel::new("C".into(), "IFC4".into(), "c.ifc".into()));
        assert_ne!(c, b);
    }
}
