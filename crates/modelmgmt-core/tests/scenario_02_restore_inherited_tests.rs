//! Scenario 02: restoring inherited entries over local overrides
//!
//! ## Scenarios Covered
//!
//! 1. An overridden field is replaced by the ancestor's field and back
//! 2. Restoring a region unlinks the context's fields from it, undo relinks
//! 3. Attribute restore reports owned and inherited values
//! 4. Entries without an ancestor cannot be restored
//! 5. Every restore kind leaves the graph unchanged after execute + restore

mod common;

use modelmgmt_core::actions::RestoreInheritedAction;
use modelmgmt_core::model::ModelKind;
use modelmgmt_core::{ChangeValue, ModelAction, ModelError, ModelOperation, NodeId};
use serde_json::json;

fn restore_field(model: &common::LoadedModel, context: NodeId, field: NodeId) -> ModelAction {
    ModelAction::RestoreInheritedField(RestoreInheritedAction::capture(&model.graph, context, field).unwrap())
}

#[test]
fn test_restore_overridden_field() {
    // GIVEN media's own description field overriding entity's
    let mut model = common::load_media();
    let media = model.hierarchy.definition("media").unwrap();
    let entity = model.hierarchy.definition("entity").unwrap();
    let owned = model.graph.child(media, ModelKind::Field, "description").unwrap();
    let inherited = model.graph.child(entity, ModelKind::Field, "description").unwrap();
    let action = restore_field(&model, media, owned);

    // WHEN restored
    action.execute(&mut model.graph).unwrap();

    // THEN media lists entity's field in the same slot
    assert_eq!(model.graph.child(media, ModelKind::Field, "description"), Some(inherited));
    assert!(model.graph.is_inherited_in(inherited, media));
    let fields = model.graph.children(media, ModelKind::Field);
    assert_eq!(fields[1], inherited);

    // AND the change set addresses the field under media
    let change_sets = action.changeset(&model.graph).unwrap();
    assert_eq!(change_sets.len(), 1);
    assert_eq!(change_sets[0].selector, "definition=media/field=description");
    assert_eq!(change_sets[0].operation, ModelOperation::Restore);

    // WHEN undone THEN the override is back
    action.restore(&mut model.graph).unwrap();
    assert_eq!(model.graph.child(media, ModelKind::Field, "description"), Some(owned));
}

#[test]
fn test_restore_region_unlinks_fields() {
    let mut model = common::load_media();
    let media = model.hierarchy.definition("media").unwrap();
    let region = model.graph.child(media, ModelKind::Region, "generalDetails").unwrap();
    let title = model.graph.child(media, ModelKind::Field, "title").unwrap();
    let action = ModelAction::RestoreInheritedRegion(
        RestoreInheritedAction::capture(&model.graph, media, region).unwrap(),
    );

    action.execute(&mut model.graph).unwrap();
    assert_eq!(model.graph.node(title).unwrap().region_id(), None);

    action.restore(&mut model.graph).unwrap();
    assert_eq!(model.graph.node(title).unwrap().region_id(), Some("generalDetails"));
    assert_eq!(model.graph.child(media, ModelKind::Region, "generalDetails"), Some(region));
}

#[test]
fn test_restore_attribute_reports_values() {
    let mut model = common::load_media();
    let media = model.hierarchy.definition("media").unwrap();
    let entity = model.hierarchy.definition("entity").unwrap();
    let owned = model.graph.attribute(media, "abstract").unwrap();
    let action = ModelAction::RestoreInheritedAttribute(
        RestoreInheritedAction::capture(&model.graph, media, owned).unwrap(),
    );

    action.execute(&mut model.graph).unwrap();

    assert_eq!(model.graph.attribute(media, "abstract"), model.graph.attribute(entity, "abstract"));
    let change_sets = action.changeset(&model.graph).unwrap();
    assert_eq!(change_sets[0].selector, "definition=media/attribute=abstract");
    assert_eq!(change_sets[0].old_value, ChangeValue::Single(json!(false)));
    assert_eq!(change_sets[0].new_value, ChangeValue::Single(json!(true)));
}

#[test]
fn test_entry_without_ancestor_cannot_be_restored() {
    let model = common::load_media();
    let media = model.hierarchy.definition("media").unwrap();
    let title = model.graph.child(media, ModelKind::Field, "title").unwrap();

    let err = RestoreInheritedAction::capture(&model.graph, media, title).unwrap_err();

    assert_eq!(err, ModelError::MissingReference { node: "title".to_string() });
}

#[test]
fn test_restore_twice_violates_contract() {
    let mut model = common::load_media();
    let media = model.hierarchy.definition("media").unwrap();
    let owned = model.graph.child(media, ModelKind::Field, "description").unwrap();
    let action = restore_field(&model, media, owned);
    action.execute(&mut model.graph).unwrap();
    let after_first = model.graph.clone();

    let err = action.execute(&mut model.graph).unwrap_err();

    assert!(matches!(err, ModelError::ActionContractViolation { .. }));
    assert_eq!(model.graph, after_first);
}

#[test]
fn test_every_restore_kind_is_symmetric() {
    let model = common::load_media();
    let media = model.hierarchy.definition("media").unwrap();
    let description = model.graph.child(media, ModelKind::Field, "description").unwrap();
    let label = model.graph.attribute(description, "label").unwrap();

    let cases: Vec<(NodeId, NodeId, fn(RestoreInheritedAction) -> ModelAction)> = vec![
        (media, model.graph.attribute(media, "abstract").unwrap(), ModelAction::RestoreInheritedAttribute),
        (media, model.graph.attribute(media, "label").unwrap(), ModelAction::RestoreInheritedAttribute),
        (media, description, ModelAction::RestoreInheritedField),
        (description, label, ModelAction::RestoreInheritedAttribute),
        (media, model.graph.child(media, ModelKind::Region, "generalDetails").unwrap(), ModelAction::RestoreInheritedRegion),
    ];

    for (context, owned, wrap) in cases {
        let mut graph = model.graph.clone();
        let orders: Vec<Vec<NodeId>> = [ModelKind::Attribute, ModelKind::Field, ModelKind::Region]
            .iter()
            .map(|kind| graph.children(context, *kind))
            .collect();
        let action = wrap(RestoreInheritedAction::capture(&graph, context, owned).unwrap());

        action.execute(&mut graph).unwrap();
        action.restore(&mut graph).unwrap();

        assert_eq!(graph, model.graph, "{} did not round trip", action.name());
        let after: Vec<Vec<NodeId>> = [ModelKind::Attribute, ModelKind::Field, ModelKind::Region]
            .iter()
            .map(|kind| graph.children(context, *kind))
            .collect();
        assert_eq!(after, orders, "{} changed collection order", action.name());
    }
}
