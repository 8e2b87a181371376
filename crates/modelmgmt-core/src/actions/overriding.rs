use crate::changeset::{build_change_set, build_node_change_set, ModelChangeSet, ModelOperation};
use crate::errors::{ModelError, Result};
use crate::model::{ModelKind, NodeData, NodeId};
use crate::ops::ModelGraph;

use super::ActionProcessor;

/// Replace an inherited entry of a context with an owned copy
///
/// The copy references the ancestor node, so it starts out mirroring it.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideInheritedAction {
    pub context: NodeId,
    pub inherited: NodeId,
    /// The owned copy, detached until executed
    pub overriding: NodeId,
}

impl OverrideInheritedAction {
    /// Allocate the owned copy of `inherited`
    ///
    /// An attribute copy takes over the current value as its committed
    /// original. A field copy shares the ancestor's attributes and controls
    /// until those are overridden in turn.
    ///
    /// # Errors
    ///
    /// Returns `ActionContractViolation` if `inherited` is not listed in
    /// `context` or is owned by it (an earlier override copy included), `UnexpectedKind` for kinds other than attribute
    /// and field.
    pub fn prepare(graph: &mut ModelGraph, context: NodeId, inherited: NodeId) -> Result<Self> {
        let found = graph.node(inherited)?;
        let kind = found.kind();
        let id = found.id().to_string();
        if graph.child(context, kind, &id) != Some(inherited) {
            return Err(ModelError::contract("override_inherited", "node is not listed in the context"));
        }
        if graph.is_owned_by(inherited, context) {
            return Err(ModelError::contract("override_inherited", "node is already owned by the context"));
        }

        let descriptions = found.descriptions.clone();
        let tooltips = found.tooltips.clone();
        let overriding = match found.data.clone() {
            NodeData::Attribute(mut data) => {
                data.value.commit();
                graph.add_node(id, NodeData::Attribute(data))
            }
            NodeData::Field(data) => {
                let shared: Vec<NodeId> = kind
                    .child_kinds()
                    .iter()
                    .flat_map(|k| graph.children(inherited, *k))
                    .collect();
                let copy = graph.add_node(id, NodeData::Field(data));
                for entry in shared {
                    graph.insert_child(copy, entry)?;
                }
                copy
            }
            other => {
                return Err(ModelError::UnexpectedKind {
                    node: id,
                    expected: "attribute or field".to_string(),
                    actual: other.kind().to_string(),
                })
            }
        };
        let copy = graph.node_mut(overriding)?;
        copy.descriptions = descriptions;
        copy.tooltips = tooltips;

        Ok(Self {
            context,
            inherited,
            overriding,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OverrideInheritedProcessor {
    kind: ModelKind,
}

impl OverrideInheritedProcessor {
    pub fn new(kind: ModelKind) -> Self {
        Self { kind }
    }

    fn name(&self) -> String {
        format!("override_inherited_{}", self.kind.segment())
    }
}

impl ActionProcessor for OverrideInheritedProcessor {
    type Action = OverrideInheritedAction;

    fn execute(&self, graph: &mut ModelGraph, action: &OverrideInheritedAction) -> Result<()> {
        let overriding = graph.expect_kind(action.overriding, self.kind)?;
        if overriding.parent().is_some() {
            return Err(ModelError::contract(&self.name(), "copy is already attached"));
        }
        let id = overriding.id().to_string();
        if graph.child(action.context, self.kind, &id) != Some(action.inherited) {
            return Err(ModelError::contract(&self.name(), "inherited node is not listed in the context"));
        }
        graph.set_parent(action.overriding, Some(action.context))?;
        graph.set_reference(action.overriding, Some(action.inherited))?;
        graph.insert_child(action.context, action.overriding)?;
        Ok(())
    }

    fn restore(&self, graph: &mut ModelGraph, action: &OverrideInheritedAction) -> Result<()> {
        let id = graph.expect_kind(action.overriding, self.kind)?.id().to_string();
        if graph.child(action.context, self.kind, &id) != Some(action.overriding) {
            return Err(ModelError::contract(&self.name(), "copy is not listed in the context"));
        }
        graph.insert_child(action.context, action.inherited)?;
        graph.set_reference(action.overriding, None)?;
        graph.set_parent(action.overriding, None)?;
        Ok(())
    }

    fn changeset(&self, graph: &ModelGraph, action: &OverrideInheritedAction) -> Result<Vec<ModelChangeSet>> {
        let change_set = if self.kind == ModelKind::Attribute {
            build_change_set(graph, action.overriding, ModelOperation::Override)?
        } else {
            build_node_change_set(graph, action.overriding, ModelOperation::Override)?
        };
        Ok(vec![change_set])
    }
}
