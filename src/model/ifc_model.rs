use super::Element;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub struct Storey {
    pub id: u64,
    pub name: String,
    pub elevation: f64,
}

/// A loaded IFC model, flattened to the element table the query
/// evaluator scans.
#[derive(Debug, Serialize)]
pub struct IfcModel {
    pub name: String,
    pub schema: String,
    pub source: String,
    pub elements: HashMap<u64, Element>,
    pub storeys: Vec<Storey>,
}

impl IfcModel {
    #[must_use]
    pub fn new(name: String, schema: String, source: String) -> Self {
        Self {
            name,
            schema,
            source,
            elements: HashMap::new(),
            storeys: Vec::new(),
        }
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Storey name for an element, "-" when unplaced.
    #[must_use]
    pub fn storey_name(&self, element_id: u64) -> String {
        self.elements
            .get(&element_id)
            .and_then(|e| e.storey_id)
            .and_then(|sid| self.storeys.iter().find(|s| s.id == sid))
            .map_or_else(|| "-".to_string(), |s| s.name.clone())
    }
}
