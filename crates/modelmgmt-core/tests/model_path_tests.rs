//! Model path tests
//!
//! ## Scenarios Covered
//!
//! 1. String form parses and re-serializes unchanged
//! 2. Paths built from linked nodes resolve back to the same node
//! 3. Model-derived paths survive a trip through their string form

mod common;

use modelmgmt_core::model::{ModelKind, NodeData};
use modelmgmt_core::path::{
    build_path_from_encoded_string, build_path_from_model, build_path_from_string,
    build_string_from_path, PathSegment,
};
use modelmgmt_core::{ModelGraph, ModelPath};
use proptest::prelude::*;

#[test]
fn test_string_path_parses_to_segments() {
    // GIVEN a path string with a definition and an attribute
    let input = "definition=PR0001/attribute=abstract";

    // WHEN it is parsed
    let path = build_path_from_string(input).unwrap();

    // THEN it has two segments in order and re-serializes identically
    assert_eq!(
        path.segments(),
        &[
            PathSegment::new("definition", "PR0001"),
            PathSegment::new("attribute", "abstract"),
        ]
    );
    assert_eq!(build_string_from_path(&path), input);
}

#[test]
fn test_base_node_path_has_one_segment() {
    let loaded = common::load_media();
    let media = loaded.hierarchy.definition("media").unwrap();

    let path = build_path_from_model(&loaded.graph, media).unwrap();

    assert_eq!(path.len(), 1);
    assert_eq!(path.to_string(), "definition=media");
}

#[test]
fn test_inherited_node_path_names_its_owner() {
    // GIVEN media inherits emailAddress from entity
    let loaded = common::load_media();
    let media = loaded.hierarchy.definition("media").unwrap();
    let email = loaded
        .graph
        .child(media, ModelKind::Field, "emailAddress")
        .unwrap();

    // WHEN building its path
    let path = build_path_from_model(&loaded.graph, email).unwrap();

    // THEN the path is rooted at the owning definition
    assert_eq!(path.to_string(), "definition=entity/field=emailAddress");
}

#[test]
fn test_resolve_path_on_linked_model() {
    let loaded = common::load_media();
    let media = loaded.hierarchy.definition("media").unwrap();
    let title = loaded.graph.child(media, ModelKind::Field, "title").unwrap();
    let label = loaded.graph.attribute(title, "label").unwrap();

    let path: ModelPath = "definition=media/field=title/attribute=label".parse().unwrap();

    assert_eq!(loaded.graph.resolve_path(&path), Some(label));
    assert!(loaded
        .graph
        .resolve_path(&build_path_from_string("definition=media/field=missing").unwrap())
        .is_none());
    assert!(loaded
        .graph
        .require_path(&build_path_from_string("class=unknown").unwrap())
        .is_err());
}

#[test]
fn test_unknown_segment_type_does_not_resolve() {
    let loaded = common::load_media();
    let path = build_path_from_string("definition=media/widget=title").unwrap();
    assert!(loaded.graph.resolve_path(&path).is_none());
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 :/#=%?&._-]{1,12}"
}

proptest! {
    #[test]
    fn prop_model_path_round_trips_through_string(
        definition in value_strategy(),
        field in value_strategy(),
        attribute in value_strategy(),
    ) {
        let mut graph = ModelGraph::new();
        let def = graph.add_base_node(definition, NodeData::empty(ModelKind::Definition));
        let fld = graph.add_node(field, NodeData::empty(ModelKind::Field));
        let attr = graph.add_node(attribute, NodeData::empty(ModelKind::Attribute));
        graph.set_parent(fld, Some(def)).unwrap();
        graph.set_parent(attr, Some(fld)).unwrap();

        let path = build_path_from_model(&graph, attr).unwrap();
        let reparsed = build_path_from_encoded_string(&build_string_from_path(&path)).unwrap();

        prop_assert_eq!(reparsed, path);
    }
}
