use crate::error::ParseError;
use crate::model::{Element, IfcModel, Storey};
use crate::parser::step::{StepFile, StepValue};
use std::collections::{HashMap, HashSet};
use std::path::Path;

// Product entities picked up even when no spatial containment relation
// mentions them (IFC4 names, IFC2X3-compatible).
const PRODUCT_ENTITIES: &[&str] = &[
    "IFCWALL",
    "IFCWALLSTANDARDCASE",
    "IFCDOOR",
    "IFCWINDOW",
    "IFCSLAB",
    "IFCCOLUMN",
    "IFCBEAM",
    "IFCSTAIR",
    "IFCSTAIRFLIGHT",
    "IFCRAILING",
    "IFCROOF",
    "IFCCOVERING",
    "IFCCURTAINWALL",
    "IFCPLATE",
    "IFCMEMBER",
    "IFCFOOTING",
    "IFCPILE",
    "IFCSPACE",
    "IFCFURNISHINGELEMENT",
    "IFCSANITARYTERMINAL",
    "IFCFLOWTERMINAL",
    "IFCFLOWFIXTURE",
    "IFCBUILDINGELEMENTPROXY",
];

/// Parses an IFC file into the flat element model queries run against.
///
/// Supports both IFC2x3 and IFC4 schemas. Extracts:
/// - Model metadata (project name, schema version)
/// - One element per product instance, with category, name and GlobalId
/// - Property sets, merged with the ones inherited from type objects
/// - Building storeys and element containment
///
/// # Errors
///
/// Returns [`ParseError::FileRead`] if the file cannot be read.
/// Returns [`ParseError::InvalidStep`] if the STEP format is malformed.
///
/// # Example
///
/// ```no_run
/// use ifc_finder::parser::parse_ifc_model;
///
/// let model = parse_ifc_model("model.ifc")?;
/// println!("{}: {} elements", model.name, model.element_count());
/// # Ok::<(), ifc_finder::error::ParseError>(())
/// ```
pub fn parse_ifc_model<P: AsRef<Path>>(path: P) -> Result<IfcModel, ParseError> {
    let content = std::fs::read_to_string(&path).map_err(|source| ParseError::FileRead {
        path: path.as_ref().to_path_buf(),
        source,
    })?;

    parse_ifc_source(&path.as_ref().to_string_lossy(), &content)
}

/// Parses in-memory IFC text, e.g. a body fetched over HTTP.
/// `source` names the origin (path or URL) for display purposes.
pub fn parse_ifc_source(source: &str, content: &str) -> Result<IfcModel, ParseError> {
    let step_file = StepFile::parse(content)?;

    let project_name = step_file
        .entities_of_type("IFCPROJECT")
        .next()
        .and_then(|e| e.name())
        .unwrap_or("Unknown Project")
        .to_string();

    let mut model = IfcModel::new(project_name, step_file.schema.clone(), source.to_string());

    model.storeys = extract_storeys(&step_file);
    let element_to_storey = extract_spatial_containment(&step_file);
    let direct_properties = extract_property_sets(&step_file);
    let element_to_type = extract_type_relationships(&step_file);

    for id in collect_element_ids(&step_file, &element_to_storey) {
        let entity = match step_file.entity(id) {
            Some(e) => e,
            None => continue,
        };

        // Own property sets win over the type object's.
        let mut properties = element_to_type
            .get(&id)
            .and_then(|type_id| direct_properties.get(type_id))
            .cloned()
            .unwrap_or_default();
        if let Some(own) = direct_properties.get(&id) {
            properties.extend(own.clone());
        }

        model.elements.insert(
            id,
            Element {
                id,
                global_id: entity.global_id().unwrap_or_default().to_string(),
                name: entity.name().unwrap_or_default().to_string(),
                category: entity.entity_type.clone(),
                storey_id: element_to_storey.get(&id).copied(),
                properties,
            },
        );
    }

    Ok(model)
}

// Union of spatially contained entities and known product types. Storeys
// and other spatial structure entities are not elements.
fn collect_element_ids(
    step_file: &StepFile,
    element_to_storey: &HashMap<u64, u64>,
) -> Vec<u64> {
    let mut ids: HashSet<u64> = element_to_storey.keys().copied().collect();

    for entity_type in PRODUCT_ENTITIES {
        for entity in step_file.entities_of_type(entity_type) {
            ids.insert(entity.id);
        }
    }

    let mut ids: Vec<u64> = ids.into_iter().collect();
    ids.sort_unstable();
    ids
}

fn extract_storeys(step_file: &StepFile) -> Vec<Storey> {
    let mut storeys: Vec<Storey> = step_file
        .entities_of_type("IFCBUILDINGSTOREY")
        .map(|e| {
            let elevation = e
                .values
                .get(9)
                .and_then(|v| match v {
                    StepValue::Real(f) => Some(*f),
                    StepValue::Integer(i) => Some(*i as f64),
                    _ => None,
                })
                .unwrap_or(0.0);

            Storey {
                id: e.id,
                name: e
                    .name()
                    .map_or_else(|| format!("Storey #{}", e.id), ToString::to_string),
                elevation,
            }
        })
        .collect();

    storeys.sort_by(|a, b| {
        a.elevation
            .partial_cmp(&b.elevation)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    storeys
}

/// Element → storey map from IFCRELCONTAINEDINSPATIALSTRUCTURE.
fn extract_spatial_containment(step_file: &StepFile) -> HashMap<u64, u64> {
    let mut element_to_storey = HashMap::new();

    for rel in step_file.entities_of_type("IFCRELCONTAINEDINSPATIALSTRUCTURE") {
        // Index 4 = RelatedElements, index 5 = RelatingStructure
        let elements = rel
            .values
            .get(4)
            .map(StepValue::reference_list)
            .unwrap_or_default();
        let structure = rel.values.get(5).and_then(StepValue::as_reference);

        if let Some(sid) = structure {
            for elem_id in elements {
                element_to_storey.insert(elem_id, sid);
            }
        }
    }

    element_to_storey
}

/// Instance → type object map from IFCRELDEFINESBYTYPE.
fn extract_type_relationships(step_file: &StepFile) -> HashMap<u64, u64> {
    let mut element_to_type = HashMap::new();

    for rel in step_file.entities_of_type("IFCRELDEFINESBYTYPE") {
        // Index 4 = RelatedObjects, index 5 = RelatingType
        let instances = rel
            .values
            .get(4)
            .map(StepValue::reference_list)
            .unwrap_or_default();
        let type_id = rel.values.get(5).and_then(StepValue::as_reference);

        if let Some(tid) = type_id {
            for instance in instances {
                element_to_type.insert(instance, tid);
            }
        }
    }

    element_to_type
}

/// Resolve IFCPROPERTYSET contents and attach them to the objects named
/// by IFCRELDEFINESBYPROPERTIES (elements and type objects alike).
fn extract_property_sets(step_file: &StepFile) -> HashMap<u64, HashMap<String, String>> {
    let mut pset_props: HashMap<u64, HashMap<String, String>> = HashMap::new();

    for pset in step_file.entities_of_type("IFCPROPERTYSET") {
        let mut props = HashMap::new();

        // Index 4 = HasProperties
        let prop_refs = pset
            .values
            .get(4)
            .map(StepValue::reference_list)
            .unwrap_or_default();

        for prop_id in prop_refs {
            let prop = match step_file.entity(prop_id) {
                Some(p) if p.entity_type == "IFCPROPERTYSINGLEVALUE" => p,
                _ => continue,
            };

            let name = prop
                .values
                .first()
                .and_then(StepValue::as_string)
                .unwrap_or_default();
            if name.is_empty() {
                continue;
            }

            // Index 2 = NominalValue
            let value = prop.values.get(2).map(StepValue::display).unwrap_or_default();
            props.insert(name.to_string(), value);
        }

        pset_props.insert(pset.id, props);
    }

    let mut object_properties: HashMap<u64, HashMap<String, String>> = HashMap::new();

    for rel in step_file.entities_of_type("IFCRELDEFINESBYPROPERTIES") {
        // Index 4 = RelatedObjects, index 5 = RelatingPropertyDefinition
        let objects = rel
            .values
            .get(4)
            .map(StepValue::reference_list)
            .unwrap_or_default();
        let pset_id = rel.values.get(5).and_then(StepValue::as_reference);

        if let Some(props) = pset_id.and_then(|pid| pset_props.get(&pid)) {
            for object_id in objects {
                object_properties
                    .entry(object_id)
                    .or_default()
                    .extend(props.clone());
            }
        }
    }

    object_properties
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = include_str!("../../tests/data/duplex.ifc");

    #[test]
    fn builds_flat_element_model() {
        let model = parse_ifc_source("duplex.ifc", SAMPLE).unwrap();

        assert_eq!(model.name, "Duplex");
        assert_eq!(model.schema, "IFC4");
        assert_eq!(model.element_count(), 5);

        let wall = &model.elements[&10];
        assert_eq!(wall.category, "IFCWALLSTANDARDCASE");
        assert_eq!(wall.name, "Wall A");
        assert_eq!(wall.global_id, "0aaaaaaaaaaaaaaaaaaaa1");
    }

    #[test]
    fn merges_type_and_instance_properties() {
        let model = parse_ifc_source("duplex.ifc", SAMPLE).unwrap();

        // Wall A carries its own FireRating and the type's LoadBearing
        let wall = &model.elements[&10];
        assert_eq!(wall.property("FireRating"), Some("F60"));
        assert_eq!(wall.property("LoadBearing"), Some("Yes"));

        // Wall B only inherits from the type
        let wall_b = &model.elements[&11];
        assert_eq!(wall_b.property("FireRating"), None);
        assert_eq!(wall_b.property("LoadBearing"), Some("Yes"));
    }

    #[test]
    fn resolves_storey_containment() {
        let model = parse_ifc_source("duplex.ifc", SAMPLE).unwrap();

        assert_eq!(model.storeys.len(), 2);
        assert_eq!(model.storeys[0].name, "Ground Floor");
        assert_eq!(model.storey_name(10), "Ground Floor");
        assert_eq!(model.storey_name(21), "Level 1");
    }
}
