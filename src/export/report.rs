use serde::Serialize;

use crate::model::ModelStore;
use crate::queries::GroupResult;

/// One matched element, flattened for export.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRow {
    pub model: String,
    pub element_id: u64,
    pub global_id: String,
    pub category: String,
    pub name: String,
    pub storey: String,
}

/// Flatten a group result into export rows, ordered by model then
/// element id.
#[must_use]
pub fn build_report(store: &ModelStore, result: &GroupResult) -> Vec<MatchRow> {
    let mut rows = Vec::new();

    for (model_id, element_ids) in result {
        let model = match store.get(*model_id) {
            Ok(m) => m,
            Err(_) => continue,
        };

        for &element_id in element_ids {
            let element = match model.elements.get(&element_id) {
                Some(e) => e,
                None => continue,
            };

            rows.push(MatchRow {
                model: model.name.clone(),
                element_id,
                global_id: element.global_id.clone(),
                category: element.category.clone(),
                name: element.name.clone(),
                storey: model.storey_name(element_id),
            });
        }
    }

    rows
}
