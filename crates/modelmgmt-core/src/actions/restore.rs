use crate::changeset::{build_node_change_set, ChangeValue, ModelChangeSet, ModelOperation};
use crate::errors::{ModelError, Result};
use crate::model::{ModelKind, NodeId};
use crate::ops::ModelGraph;
use crate::path::build_path_from_model;

use super::ActionProcessor;

/// Put the ancestor's node back in place of an owned counterpart
///
/// Everything needed to undo is captured up front by [`capture`](Self::capture).
#[derive(Debug, Clone, PartialEq)]
pub struct RestoreInheritedAction {
    pub context: NodeId,
    /// The owned node being replaced
    pub owned: NodeId,
    /// The ancestor node it referenced
    pub inherited: NodeId,
    /// Fields laid out in a restored region, with their region id
    pub region_fields: Vec<(NodeId, Option<String>)>,
}

impl RestoreInheritedAction {
    /// Capture the state to restore `owned`, listed under `context`
    ///
    /// # Errors
    ///
    /// Returns `MissingReference` if `owned` has no ancestor counterpart and
    /// `ActionContractViolation` if it is not listed under `context`.
    pub fn capture(graph: &ModelGraph, context: NodeId, owned: NodeId) -> Result<Self> {
        let found = graph.node(owned)?;
        let kind = found.kind();
        let id = found.id().to_string();
        if graph.child(context, kind, &id) != Some(owned) {
            return Err(ModelError::contract("restore_inherited", "node is not listed in the context"));
        }
        let inherited = found.reference().ok_or_else(|| ModelError::MissingReference { node: id.clone() })?;

        let region_fields = if kind == ModelKind::Region {
            graph
                .owned_children(context, ModelKind::Field)
                .into_iter()
                .filter_map(|field| {
                    let region = graph.get(field)?.region_id()?;
                    (region == id).then(|| (field, Some(region.to_string())))
                })
                .collect()
        } else {
            Vec::new()
        };

        Ok(Self {
            context,
            owned,
            inherited,
            region_fields,
        })
    }
}

/// Restores inherited attributes, controls, fields, regions and headers
#[derive(Debug, Clone, Copy)]
pub struct RestoreInheritedProcessor {
    kind: ModelKind,
}

impl RestoreInheritedProcessor {
    pub fn new(kind: ModelKind) -> Self {
        Self { kind }
    }

    fn name(&self) -> String {
        format!("restore_inherited_{}", self.kind.segment())
    }

    fn listed_id(&self, graph: &ModelGraph, action: &RestoreInheritedAction) -> Result<String> {
        let owned = graph.expect_kind(action.owned, self.kind)?;
        let id = owned.id().to_string();
        if owned.reference() != Some(action.inherited) {
            return Err(ModelError::contract(&self.name(), "captured reference no longer matches"));
        }
        Ok(id)
    }
}

impl ActionProcessor for RestoreInheritedProcessor {
    type Action = RestoreInheritedAction;

    fn execute(&self, graph: &mut ModelGraph, action: &RestoreInheritedAction) -> Result<()> {
        let id = self.listed_id(graph, action)?;
        if graph.child(action.context, self.kind, &id) != Some(action.owned) {
            return Err(ModelError::contract(&self.name(), "owned node is not listed in the context"));
        }
        graph.insert_child(action.context, action.inherited)?;
        for (field, _) in &action.region_fields {
            graph.set_region_id(*field, None)?;
        }
        Ok(())
    }

    fn restore(&self, graph: &mut ModelGraph, action: &RestoreInheritedAction) -> Result<()> {
        let id = self.listed_id(graph, action)?;
        if graph.child(action.context, self.kind, &id) != Some(action.inherited) {
            return Err(ModelError::contract(&self.name(), "inherited node is not listed in the context"));
        }
        graph.insert_child(action.context, action.owned)?;
        for (field, region_id) in &action.region_fields {
            graph.set_region_id(*field, region_id.clone())?;
        }
        Ok(())
    }

    /// For attributes: the owned value going away and the inherited value
    /// taking over. Other kinds carry only the selector.
    fn changeset(&self, graph: &ModelGraph, action: &RestoreInheritedAction) -> Result<Vec<ModelChangeSet>> {
        if self.kind != ModelKind::Attribute {
            return Ok(vec![build_node_change_set(graph, action.owned, ModelOperation::Restore)?]);
        }
        let owned = graph.attribute_data(action.owned)?;
        let inherited = graph.attribute_data(action.inherited)?;
        Ok(vec![ModelChangeSet {
            selector: build_path_from_model(graph, action.owned)?.to_string(),
            old_value: ChangeValue::current(&owned.value),
            new_value: ChangeValue::current(&inherited.value),
            operation: ModelOperation::Restore,
            model: action.owned,
        }])
    }
}
