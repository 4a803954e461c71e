use serde::Serialize;
use std::collections::HashMap;

/// A single product instance extracted from an IFC file.
///
/// `category` is the raw STEP entity type name (e.g. `IFCWALLSTANDARDCASE`);
/// `properties` is the merged view of the element's own property sets and
/// the ones inherited from its type object.
#[derive(Debug, Clone, Serialize)]
pub struct Element {
    pub id: u64,
    pub global_id: String,
    pub name: String,
    pub category: String,
    pub storey_id: Option<u64>,
    pub properties: HashMap<String, String>,
}

impl Element {
    /// Look up a property value by exact name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }
}
