//! Change sets: persistable records of attribute edits

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;
use crate::model::{AttributeValue, ModelKind, NodeId};
use crate::ops::ModelGraph;
use crate::path::build_path_from_model;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelOperation {
    Modify,
    Create,
    Remove,
    Restore,
    Override,
}

/// A scalar, or a `language -> value` map for multi-language attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChangeValue {
    Multi(IndexMap<String, Value>),
    Single(Value),
}

impl ChangeValue {
    pub(crate) fn current(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::Single(single) => ChangeValue::Single(single.value().clone()),
            AttributeValue::Multi(multi) => ChangeValue::Multi(multi.current_values()),
        }
    }

    pub(crate) fn old(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::Single(single) => ChangeValue::Single(single.old_value().clone()),
            AttributeValue::Multi(multi) => ChangeValue::Multi(multi.old_values()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelChangeSet {
    /// Model path of the changed node, in string form
    pub selector: String,
    pub old_value: ChangeValue,
    pub new_value: ChangeValue,
    pub operation: ModelOperation,
    /// The originating node
    #[serde(skip)]
    pub model: NodeId,
}

impl ModelChangeSet {
    pub fn is_noop(&self) -> bool {
        self.old_value == self.new_value
    }

    /// Wire form handed to persistence
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if a value cannot be rendered.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Change set of one attribute
///
/// # Errors
///
/// Returns `UnexpectedKind` if `attribute` is not an attribute node.
pub fn build_change_set(graph: &ModelGraph, attribute: NodeId, operation: ModelOperation) -> Result<ModelChangeSet> {
    let data = graph.attribute_data(attribute)?;
    let selector = build_path_from_model(graph, attribute)?.to_string();
    Ok(ModelChangeSet {
        selector,
        old_value: ChangeValue::old(&data.value),
        new_value: ChangeValue::current(&data.value),
        operation,
        model: attribute,
    })
}

/// One change set per attribute, in order
///
/// # Errors
///
/// Fails on the first non-attribute handle.
pub fn build_change_sets(graph: &ModelGraph, attributes: &[NodeId], operation: ModelOperation) -> Result<Vec<ModelChangeSet>> {
    attributes
        .iter()
        .map(|attribute| build_change_set(graph, *attribute, operation))
        .collect()
}

/// Change set for a structural edit of a non-attribute node
///
/// Carries no values: the selector and operation say everything.
///
/// # Errors
///
/// Returns `NodeNotFound` for a foreign handle.
pub fn build_node_change_set(graph: &ModelGraph, node: NodeId, operation: ModelOperation) -> Result<ModelChangeSet> {
    let selector = build_path_from_model(graph, node)?.to_string();
    Ok(ModelChangeSet {
        selector,
        old_value: ChangeValue::Single(Value::Null),
        new_value: ChangeValue::Single(Value::Null),
        operation,
        model: node,
    })
}

impl ModelGraph {
    /// Owned attributes under `node` (itself included when an attribute)
    pub fn owned_attributes(&self, node: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.collect_owned_attributes(node, &mut found);
        found
    }

    fn collect_owned_attributes(&self, node: NodeId, found: &mut Vec<NodeId>) {
        let Some(current) = self.get(node) else {
            return;
        };
        if current.kind() == ModelKind::Attribute {
            found.push(node);
            return;
        }
        for kind in current.kind().child_kinds() {
            for child in self.owned_children(node, *kind) {
                self.collect_owned_attributes(child, found);
            }
        }
    }

    /// Modify change sets for every dirty owned attribute under `node`
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` for a foreign handle.
    pub fn collect_change_sets(&self, node: NodeId) -> Result<Vec<ModelChangeSet>> {
        self.node(node)?;
        let dirty: Vec<NodeId> = self
            .owned_attributes(node)
            .into_iter()
            .filter(|a| self.is_dirty(*a))
            .collect();
        build_change_sets(self, &dirty, ModelOperation::Modify)
    }

    /// Mark the attributes behind persisted change sets as clean
    ///
    /// Change sets for non-attribute nodes are skipped.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if a change set points outside the graph.
    pub fn commit(&mut self, change_sets: &[ModelChangeSet]) -> Result<()> {
        for change_set in change_sets {
            if self.kind(change_set.model)? == ModelKind::Attribute {
                self.attribute_data_mut(change_set.model)?.value.commit();
            }
        }
        Ok(())
    }

    /// Reset every owned attribute under `node` to its original value
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` for a foreign handle.
    pub fn rollback(&mut self, node: NodeId) -> Result<()> {
        self.node(node)?;
        for attribute in self.owned_attributes(node) {
            self.attribute_data_mut(attribute)?.value.rollback();
            self.refresh_label_descriptions(attribute)?;
        }
        Ok(())
    }
}
