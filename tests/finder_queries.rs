//! End-to-end query evaluation over a small two-storey model.

use std::collections::BTreeSet;

use pretty_assertions::assert_eq;

use ifc_finder::export::build_report;
use ifc_finder::model::ModelStore;
use ifc_finder::parser::parse_ifc_source;
use ifc_finder::queries::{Query, QueryGroup, Rule};
use ifc_finder::view::Visibility;

const DUPLEX: &str = include_str!("data/duplex.ifc");

fn duplex_store() -> ModelStore {
    let mut store = ModelStore::new();
    store.insert(parse_ifc_source("duplex.ifc", DUPLEX).unwrap());
    store
}

#[test]
fn category_query_finds_exactly_the_walls() {
    let store = duplex_store();
    let group = QueryGroup::new().with_query(
        Query::new("walls", true).with_rule(Rule::category("WallStandardCase").unwrap()),
    );

    let result = group.update(&store);
    assert_eq!(result[&0], BTreeSet::from([10, 11, 12]));
}

#[test]
fn property_value_query_finds_the_plastered_door() {
    let store = duplex_store();
    let group = QueryGroup::new().with_query(
        Query::new("plastered", true).with_rule(Rule::property_value("plaster").unwrap()),
    );

    let result = group.update(&store);
    assert_eq!(result[&0], BTreeSet::from([20]));
}

#[test]
fn inherited_type_properties_are_queryable() {
    let store = duplex_store();
    let group = QueryGroup::new().with_query(
        Query::new("load bearing", true)
            .with_rule(Rule::property("LoadBearing", "Yes").unwrap()),
    );

    // All three walls inherit LoadBearing from their wall type
    let result = group.update(&store);
    assert_eq!(result[&0], BTreeSet::from([10, 11, 12]));
}

#[test]
fn group_unions_category_and_property_queries() {
    let store = duplex_store();
    let group = QueryGroup::new()
        .with_query(
            Query::new("fire rated", true).with_rule(Rule::property("FireRating", "F60").unwrap()),
        )
        .with_query(Query::new("doors", true).with_rule(Rule::category("^IFCDOOR$").unwrap()));

    let result = group.update(&store);
    assert_eq!(result[&0], BTreeSet::from([10, 20, 21]));
}

#[test]
fn zero_matches_leaves_visibility_untouched() {
    let store = duplex_store();
    let group = QueryGroup::new()
        .with_query(Query::new("roofs", true).with_rule(Rule::category("roof").unwrap()));

    let result = group.update(&store);
    assert!(result.is_empty());

    // The caller checks for emptiness before isolating; applying an
    // untouched Visibility keeps everything visible.
    let vis = Visibility::new();
    for id in [10, 11, 12, 20, 21] {
        assert!(vis.is_visible(0, id));
    }
}

#[test]
fn isolation_hides_everything_but_the_matches() {
    let store = duplex_store();
    let group = QueryGroup::new().with_query(
        Query::new("walls", true).with_rule(Rule::category("WallStandardCase").unwrap()),
    );

    let result = group.update(&store);
    let mut vis = Visibility::new();
    vis.isolate(&store, &result);

    for id in [10, 11, 12] {
        assert!(vis.is_visible(0, id));
    }
    for id in [20, 21] {
        assert!(!vis.is_visible(0, id));
    }
}

#[test]
fn report_rows_carry_model_and_storey_context() {
    let store = duplex_store();
    let group = QueryGroup::new()
        .with_query(Query::new("doors", true).with_rule(Rule::category("^IFCDOOR$").unwrap()));

    let result = group.update(&store);
    let report = build_report(&store, &result);

    assert_eq!(report.len(), 2);
    assert_eq!(report[0].model, "Duplex");
    assert_eq!(report[0].element_id, 20);
    assert_eq!(report[0].storey, "Ground Floor");
    assert_eq!(report[1].element_id, 21);
    assert_eq!(report[1].storey, "Level 1");
}
