//! Model linking tests against the media/entity sample
//!
//! ## Scenarios Covered
//!
//! 1. Owned vs inherited entries after linking a descendant model
//! 2. Overridden entries reference their ancestor counterpart
//! 3. Attribute ordering follows meta-data
//! 4. Label attributes drive descriptions in the user language
//! 5. Validity follows mandatory meta-data of owned attributes
//! 6. Label edits and rollbacks show up in the node's descriptions

mod common;

use modelmgmt_core::model::ModelKind;
use modelmgmt_core::payload::RawNode;
use modelmgmt_core::InheritanceState;
use serde_json::json;

fn attribute_names(model: &common::LoadedModel, owner: modelmgmt_core::NodeId) -> Vec<String> {
    model
        .graph
        .children(owner, ModelKind::Attribute)
        .into_iter()
        .map(|a| model.graph.node(a).unwrap().id().to_string())
        .collect()
}

#[test]
fn test_definition_attributes_owned_and_inherited() {
    // GIVEN media linked against entity
    let model = common::load_media();
    let graph = &model.graph;
    let media = model.hierarchy.definition("media").unwrap();
    let entity = model.hierarchy.definition("entity").unwrap();

    // THEN media owns abstract and label
    let abstract_attr = graph.attribute(media, "abstract").unwrap();
    let label = graph.attribute(media, "label").unwrap();
    assert!(graph.is_owned_by(abstract_attr, media));
    assert!(graph.is_owned_by(label, media));
    assert_eq!(
        graph.reference(abstract_attr),
        graph.attribute(entity, "abstract")
    );

    // AND identifier is entity's own node, listed under media
    let identifier = graph.attribute(media, "identifier").unwrap();
    assert_eq!(Some(identifier), graph.attribute(entity, "identifier"));
    assert_eq!(graph.parent(identifier), Some(entity));
    assert!(graph.is_inherited_in(identifier, media));
}

#[test]
fn test_overridden_field_references_ancestor() {
    let model = common::load_media();
    let graph = &model.graph;
    let media = model.hierarchy.definition("media").unwrap();
    let entity = model.hierarchy.definition("entity").unwrap();

    let description = graph.child(media, ModelKind::Field, "description").unwrap();
    let ancestor = graph.child(entity, ModelKind::Field, "description").unwrap();

    assert_ne!(description, ancestor);
    assert_eq!(graph.reference(description), Some(ancestor));
    assert_eq!(graph.inheritance_state(description), InheritanceState::Overridden);
    assert!(!graph.is_inherited_in(description, media));

    // label is local, the rest of the attributes come from entity
    let label = graph.attribute(description, "label").unwrap();
    assert!(graph.is_owned_by(label, description));
    let field_type = graph.attribute(description, "type").unwrap();
    assert!(graph.is_owned_by(field_type, ancestor));

    // the RICHTEXT control exists only on media
    let control = graph.child(description, ModelKind::Control, "RICHTEXT").unwrap();
    assert_eq!(graph.inheritance_state(control), InheritanceState::Owned);
}

#[test]
fn test_ancestor_only_entries_are_shared() {
    let model = common::load_media();
    let graph = &model.graph;
    let media = model.hierarchy.definition("media").unwrap();
    let entity = model.hierarchy.definition("entity").unwrap();

    let email = graph.child(media, ModelKind::Field, "emailAddress").unwrap();
    assert_eq!(graph.child(entity, ModelKind::Field, "emailAddress"), Some(email));
    assert!(graph.is_inherited_in(email, media));
    assert_eq!(graph.node(email).unwrap().region_id(), Some("specificDetails"));

    let specific = graph.child(media, ModelKind::Region, "specificDetails").unwrap();
    assert!(graph.is_owned_by(specific, entity));

    let general = graph.child(media, ModelKind::Region, "generalDetails").unwrap();
    assert!(graph.is_owned_by(general, media));
    assert_eq!(
        graph.reference(general),
        graph.child(entity, ModelKind::Region, "generalDetails")
    );

    // own fields first, inherited ones appended
    let fields: Vec<String> = graph
        .children(media, ModelKind::Field)
        .into_iter()
        .map(|f| graph.node(f).unwrap().id().to_string())
        .collect();
    assert_eq!(fields, vec!["title", "description", "emailAddress"]);
}

#[test]
fn test_field_attributes_follow_meta_order() {
    let model = common::load_media();
    let media = model.hierarchy.definition("media").unwrap();
    let title = model.graph.child(media, ModelKind::Field, "title").unwrap();

    assert_eq!(
        attribute_names(&model, title),
        vec!["type", "label", "displayType", "mandatory", "uri"]
    );

    let uri = model.graph.attribute(title, "uri").unwrap();
    let data = model.graph.attribute_data(uri).unwrap();
    assert!(!data.meta.as_ref().unwrap().is_visible());
}

#[test]
fn test_label_attribute_resolves_user_language() {
    let model = common::load_media();
    let graph = &model.graph;
    let media = model.hierarchy.definition("media").unwrap();

    assert_eq!(graph.node(media).unwrap().descriptions.text(), "Медиа");

    let title = graph.child(media, ModelKind::Field, "title").unwrap();
    let descriptions = &graph.node(title).unwrap().descriptions;
    assert_eq!(descriptions.text(), "Наименование");
    assert_eq!(descriptions.get("en").unwrap().value, "Title");

    // no bg label: falls back to the default language
    let general = graph.child(media, ModelKind::Region, "generalDetails").unwrap();
    assert_eq!(graph.node(general).unwrap().descriptions.text(), "Base details");
}

#[test]
fn test_label_edit_updates_descriptions() {
    // GIVEN the media title field labelled "Наименование" in the user language
    let mut model = common::load_media();
    let media = model.hierarchy.definition("media").unwrap();
    let title = model.graph.child(media, ModelKind::Field, "title").unwrap();
    let label = model.graph.attribute(title, "label").unwrap();

    // WHEN the user-language label is edited
    model
        .graph
        .set_attribute_language_value(label, "bg", json!("Заглавие"))
        .unwrap();

    // THEN the applicable description follows the edit
    assert_eq!(model.graph.node(title).unwrap().descriptions.text(), "Заглавие");

    // WHEN the user-language label is cleared
    model.graph.set_attribute_language_value(label, "bg", json!("")).unwrap();

    // THEN resolution falls back to the default language
    assert_eq!(model.graph.node(title).unwrap().descriptions.text(), "Title");
    model.graph.set_attribute_language_value(label, "en", json!("Heading")).unwrap();
    assert_eq!(model.graph.node(title).unwrap().descriptions.text(), "Heading");

    // WHEN the edits are rolled back
    model.graph.rollback(title).unwrap();

    // THEN the delivered label is back
    let descriptions = &model.graph.node(title).unwrap().descriptions;
    assert_eq!(descriptions.text(), "Наименование");
    assert_eq!(descriptions.get("en").unwrap().value, "Title");
}

#[test]
fn test_class_attribute_matched_by_uri() {
    let model = common::load_media();
    let class = model.hierarchy.class("emf:Entity").unwrap();
    let attribute = model
        .graph
        .attribute(class, "http://purl.org/dc/terms/title")
        .unwrap();

    let data = model.graph.attribute_data(attribute).unwrap();
    assert_eq!(data.meta.as_ref().unwrap().id, "title");
    assert!(data.value.is_multi());
    assert!(model.graph.node(class).unwrap().is_loaded());
}

#[test]
fn test_mandatory_empty_attribute_invalidates_owner() {
    let mut model = common::load_media();
    let media = model.hierarchy.definition("media").unwrap();
    let title = model.graph.child(media, ModelKind::Field, "title").unwrap();
    assert!(model.graph.is_valid(media));

    let field_type = model.graph.attribute(title, "type").unwrap();
    model.graph.set_attribute_value(field_type, json!("")).unwrap();

    assert!(!model.graph.is_attribute_valid(field_type));
    assert!(!model.graph.is_valid(title));
    assert!(!model.graph.is_valid(media));
    assert!(model.graph.is_dirty(media));
}

#[test]
fn test_detached_properties_have_no_owner() {
    let mut model = common::load_media();
    let raw = vec![RawNode {
        id: "emf:status".to_string(),
        labels: Some(json!({"en": "Status"})),
        ..RawNode::default()
    }];

    let properties = model
        .linker
        .link_detached_properties(&mut model.graph, &raw, &model.meta)
        .unwrap();

    let property = properties[0];
    assert_eq!(model.graph.parent(property), None);
    assert_eq!(model.graph.kind(property).unwrap(), ModelKind::Property);
    assert_eq!(model.graph.node(property).unwrap().descriptions.text(), "Status");
}
