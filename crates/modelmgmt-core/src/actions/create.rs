use crate::changeset::{build_change_sets, ChangeValue, ModelChangeSet, ModelOperation};
use crate::errors::{ModelError, Result};
use crate::linkers::ModelLinker;
use crate::model::{ModelKind, ModelsMetaData, NodeData, NodeId};
use crate::ops::ModelGraph;
use crate::path::build_path_in_context;

use super::ActionProcessor;

/// Add a new node to a context's collection
#[derive(Debug, Clone, PartialEq)]
pub struct CreateAction {
    pub context: NodeId,
    pub model: NodeId,
}

impl CreateAction {
    pub fn new(context: NodeId, model: NodeId) -> Self {
        Self { context, model }
    }

    /// Allocate a detached node carrying default-valued attributes
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` for a foreign context handle.
    pub fn prepare(
        graph: &mut ModelGraph,
        linker: &ModelLinker,
        context: NodeId,
        kind: ModelKind,
        id: &str,
        meta: &ModelsMetaData,
    ) -> Result<Self> {
        graph.node(context)?;
        let model = graph.add_node(id, NodeData::empty(kind));
        if let Some(collection) = meta.for_kind(kind) {
            linker.link_default_attributes(graph, model, collection)?;
        }
        linker.descriptions().insert_descriptions(graph, model, None)?;
        Ok(Self { context, model })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CreateProcessor {
    kind: ModelKind,
}

impl CreateProcessor {
    pub fn new(kind: ModelKind) -> Self {
        Self { kind }
    }

    fn name(&self) -> String {
        format!("create_{}", self.kind.segment())
    }
}

impl ActionProcessor for CreateProcessor {
    type Action = CreateAction;

    fn execute(&self, graph: &mut ModelGraph, action: &CreateAction) -> Result<()> {
        let model = graph.expect_kind(action.model, self.kind)?;
        if model.parent().is_some() {
            return Err(ModelError::contract(&self.name(), "model is already attached"));
        }
        let id = model.id().to_string();
        let context = graph.node(action.context)?;
        if !context.kind().accepts_child(self.kind) {
            return Err(ModelError::UnexpectedKind {
                node: context.id().to_string(),
                expected: format!("owner of {}", self.kind),
                actual: context.kind().to_string(),
            });
        }
        if graph.child(action.context, self.kind, &id).is_some() {
            return Err(ModelError::DuplicateNode {
                id,
                context: context.id().to_string(),
            });
        }
        graph.set_parent(action.model, Some(action.context))?;
        graph.insert_child(action.context, action.model)?;
        Ok(())
    }

    fn restore(&self, graph: &mut ModelGraph, action: &CreateAction) -> Result<()> {
        let id = graph.expect_kind(action.model, self.kind)?.id().to_string();
        if graph.child(action.context, self.kind, &id) != Some(action.model)
            || !graph.is_owned_by(action.model, action.context)
        {
            return Err(ModelError::contract(&self.name(), "model is not attached to the context"));
        }
        graph.remove_child(action.context, self.kind, &id)?;
        graph.set_parent(action.model, None)?;
        Ok(())
    }

    /// Attributes of the new node that are changed or carry a value
    fn changeset(&self, graph: &ModelGraph, action: &CreateAction) -> Result<Vec<ModelChangeSet>> {
        graph.expect_kind(action.model, self.kind)?;
        let attributes: Vec<NodeId> = graph
            .owned_attributes(action.model)
            .into_iter()
            .filter(|a| {
                graph
                    .attribute_data(*a)
                    .map(|data| data.value.is_dirty() || !data.value.is_empty())
                    .unwrap_or(false)
            })
            .collect();
        build_change_sets(graph, &attributes, ModelOperation::Create)
    }
}

/// Detach an owned node from a context's collection
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveAction {
    pub context: NodeId,
    pub model: NodeId,
    /// Position in the collection before removal
    pub position: usize,
}

impl RemoveAction {
    /// Capture the node's current position
    ///
    /// # Errors
    ///
    /// Returns `ActionContractViolation` if `model` is not an owned entry of
    /// `context`.
    pub fn capture(graph: &ModelGraph, context: NodeId, model: NodeId) -> Result<Self> {
        let found = graph.node(model)?;
        let position = graph
            .collection(context, found.kind())
            .and_then(|list| list.index_of(found.id()))
            .filter(|_| graph.child(context, found.kind(), found.id()) == Some(model))
            .ok_or_else(|| ModelError::contract("remove", "model is not listed in the context"))?;
        if !graph.is_owned_by(model, context) {
            return Err(ModelError::contract("remove", "inherited models cannot be removed"));
        }
        Ok(Self {
            context,
            model,
            position,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RemoveProcessor {
    kind: ModelKind,
}

impl RemoveProcessor {
    pub fn new(kind: ModelKind) -> Self {
        Self { kind }
    }

    fn name(&self) -> String {
        format!("remove_{}", self.kind.segment())
    }
}

impl ActionProcessor for RemoveProcessor {
    type Action = RemoveAction;

    fn execute(&self, graph: &mut ModelGraph, action: &RemoveAction) -> Result<()> {
        let id = graph.expect_kind(action.model, self.kind)?.id().to_string();
        let position = graph
            .collection(action.context, self.kind)
            .and_then(|list| list.index_of(&id));
        if position != Some(action.position)
            || graph.child(action.context, self.kind, &id) != Some(action.model)
        {
            return Err(ModelError::contract(&self.name(), "captured position no longer matches"));
        }
        graph.remove_child(action.context, self.kind, &id)?;
        graph.set_parent(action.model, None)?;
        Ok(())
    }

    fn restore(&self, graph: &mut ModelGraph, action: &RemoveAction) -> Result<()> {
        let id = graph.expect_kind(action.model, self.kind)?.id().to_string();
        if graph.child(action.context, self.kind, &id).is_some() || graph.parent(action.model).is_some() {
            return Err(ModelError::contract(&self.name(), "model was not removed"));
        }
        graph.set_parent(action.model, Some(action.context))?;
        graph.insert_child_at(action.context, action.position, action.model)?;
        Ok(())
    }

    fn changeset(&self, graph: &ModelGraph, action: &RemoveAction) -> Result<Vec<ModelChangeSet>> {
        let selector = build_path_in_context(graph, action.context, action.model)?.to_string();
        Ok(vec![ModelChangeSet {
            selector,
            old_value: ChangeValue::Single(serde_json::Value::Null),
            new_value: ChangeValue::Single(serde_json::Value::Null),
            operation: ModelOperation::Remove,
            model: action.model,
        }])
    }
}
