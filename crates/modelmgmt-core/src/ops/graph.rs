use std::collections::HashMap;

use serde_json::Value;

use crate::errors::{ModelError, Result};
use crate::linkers::attribute::LABEL_ATTRIBUTE;
use crate::linkers::DescriptionLinker;
use crate::model::{
    AttributeData, AttributeValue, ModelKind, ModelList, ModelNode, NodeData, NodeId,
};

/// Arena holding every node of a loaded model
///
/// Nodes refer to each other through `NodeId` handles (parent, reference,
/// collection entries), so ancestor and descendant definitions can share
/// nodes without shared ownership. Nothing is ever freed: detaching a node
/// from a collection leaves the handle valid so an action can put it back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelGraph {
    pub(crate) nodes: Vec<ModelNode>,
    /// (kind, id) of classes and definitions
    pub(crate) base_index: HashMap<(ModelKind, String), NodeId>,
    /// Resolution used when a `label` edit re-derives descriptions
    pub(crate) labels: Option<DescriptionLinker>,
}

impl ModelGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a detached node
    pub fn add_node(&mut self, id: impl Into<String>, data: NodeData) -> NodeId {
        let handle = NodeId(self.nodes.len() as u32);
        self.nodes.push(ModelNode::new(id, data));
        handle
    }

    /// Allocate a class or definition and register it in the base index
    ///
    /// A later registration under the same (kind, id) wins.
    pub fn add_base_node(&mut self, id: impl Into<String>, data: NodeData) -> NodeId {
        let id = id.into();
        let kind = data.kind();
        let handle = self.add_node(id.clone(), data);
        if kind.is_base_type() {
            self.base_index.insert((kind, id), handle);
        }
        handle
    }

    pub fn find_base(&self, kind: ModelKind, id: &str) -> Option<NodeId> {
        self.base_index.get(&(kind, id.to_string())).copied()
    }

    pub fn get(&self, node: NodeId) -> Option<&ModelNode> {
        self.nodes.get(node.index())
    }

    /// Get a node by handle
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle belongs to another graph.
    pub fn node(&self, node: NodeId) -> Result<&ModelNode> {
        self.nodes
            .get(node.index())
            .ok_or_else(|| ModelError::NodeNotFound {
                node: node.to_string(),
            })
    }

    /// Get a mutable node by handle
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the handle belongs to another graph.
    pub fn node_mut(&mut self, node: NodeId) -> Result<&mut ModelNode> {
        self.nodes
            .get_mut(node.index())
            .ok_or_else(|| ModelError::NodeNotFound {
                node: node.to_string(),
            })
    }

    pub fn kind(&self, node: NodeId) -> Result<ModelKind> {
        Ok(self.node(node)?.kind())
    }

    /// Fail unless `node` is of `expected` kind
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedKind` on mismatch, `NodeNotFound` on a bad handle.
    pub fn expect_kind(&self, node: NodeId, expected: ModelKind) -> Result<&ModelNode> {
        let found = self.node(node)?;
        if found.kind() != expected {
            return Err(ModelError::UnexpectedKind {
                node: found.id.clone(),
                expected: expected.to_string(),
                actual: found.kind().to_string(),
            });
        }
        Ok(found)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|n| n.parent)
    }

    pub fn reference(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|n| n.reference)
    }

    /// Set the structural owner. Does not touch any collection.
    pub fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) -> Result<()> {
        self.node_mut(node)?.parent = parent;
        Ok(())
    }

    pub(crate) fn set_reference(&mut self, node: NodeId, reference: Option<NodeId>) -> Result<()> {
        self.node_mut(node)?.reference = reference;
        Ok(())
    }

    pub(crate) fn mark_loaded(&mut self, node: NodeId) -> Result<()> {
        self.node_mut(node)?.loaded = true;
        Ok(())
    }

    pub fn collection(&self, owner: NodeId, kind: ModelKind) -> Option<&ModelList<NodeId>> {
        self.get(owner).and_then(|n| n.collection(kind))
    }

    fn collection_mut(&mut self, owner: NodeId, kind: ModelKind) -> Result<&mut ModelList<NodeId>> {
        let node = self.node_mut(owner)?;
        let owner_kind = node.kind();
        let owner_id = node.id.clone();
        node.collections
            .get_mut(&kind)
            .ok_or(ModelError::UnexpectedKind {
                node: owner_id,
                expected: format!("owner of {}", kind),
                actual: owner_kind.to_string(),
            })
    }

    /// Handles held in one of `owner`'s collections, in order
    pub fn children(&self, owner: NodeId, kind: ModelKind) -> Vec<NodeId> {
        self.collection(owner, kind)
            .map(|list| list.get_models().copied().collect())
            .unwrap_or_default()
    }

    pub fn child(&self, owner: NodeId, kind: ModelKind, id: &str) -> Option<NodeId> {
        self.collection(owner, kind)
            .and_then(|list| list.get_model(id))
            .copied()
    }

    pub fn attribute(&self, owner: NodeId, name: &str) -> Option<NodeId> {
        self.child(owner, ModelKind::Attribute, name)
    }

    /// List `child` in the matching collection of `owner`
    ///
    /// The collection is chosen by the child's kind and keyed by its id; an
    /// existing entry with that id is replaced in place. The child's parent
    /// is left as is.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedKind` if `owner` has no collection for the child's kind.
    pub fn insert_child(&mut self, owner: NodeId, child: NodeId) -> Result<Option<NodeId>> {
        let (kind, id) = {
            let node = self.node(child)?;
            (node.kind(), node.id.clone())
        };
        Ok(self.collection_mut(owner, kind)?.insert_keyed(id, child))
    }

    /// List `child` at a fixed position of `owner`'s collection
    pub(crate) fn insert_child_at(&mut self, owner: NodeId, index: usize, child: NodeId) -> Result<()> {
        let (kind, id) = {
            let node = self.node(child)?;
            (node.kind(), node.id.clone())
        };
        self.collection_mut(owner, kind)?.insert_at(index, id, child);
        Ok(())
    }

    /// Drop an entry from `owner`'s collection; no-op when absent
    pub fn remove_child(&mut self, owner: NodeId, kind: ModelKind, id: &str) -> Result<Option<NodeId>> {
        Ok(self.collection_mut(owner, kind)?.remove(id))
    }

    pub(crate) fn sort_collection<F>(&mut self, owner: NodeId, kind: ModelKind, mut compare: F) -> Result<()>
    where
        F: FnMut(&ModelGraph, NodeId, NodeId) -> std::cmp::Ordering,
    {
        let mut list = self.collection_mut(owner, kind)?.clone();
        let graph: &ModelGraph = self;
        list.sort_by(|a, b| compare(graph, *a, *b));
        *self.collection_mut(owner, kind)? = list;
        Ok(())
    }

    /// Attribute payload of an attribute node
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedKind` if `node` is not an attribute.
    pub fn attribute_data(&self, node: NodeId) -> Result<&AttributeData> {
        let found = self.expect_kind(node, ModelKind::Attribute)?;
        found.attribute_data().ok_or_else(|| ModelError::Internal {
            message: format!("attribute {} carries no attribute data", node),
        })
    }

    pub(crate) fn attribute_data_mut(&mut self, node: NodeId) -> Result<&mut AttributeData> {
        self.expect_kind(node, ModelKind::Attribute)?;
        match &mut self.node_mut(node)?.data {
            NodeData::Attribute(data) => Ok(data),
            _ => Err(ModelError::Internal {
                message: format!("attribute {} carries no attribute data", node),
            }),
        }
    }

    /// Derive descriptions from `label` attributes on every later edit
    pub fn bind_label_descriptions(&mut self, linker: DescriptionLinker) {
        self.labels = Some(linker);
    }

    /// Re-derive the descriptions of every node labelled by `attribute`
    pub(crate) fn refresh_label_descriptions(&mut self, attribute: NodeId) -> Result<()> {
        if self.get(attribute).map(|n| n.id()) != Some(LABEL_ATTRIBUTE) {
            return Ok(());
        }
        let Some(linker) = self.labels.clone() else {
            return Ok(());
        };
        let owners: Vec<NodeId> = (0..self.nodes.len() as u32)
            .map(NodeId)
            .filter(|node| self.attribute(*node, LABEL_ATTRIBUTE) == Some(attribute))
            .collect();
        for owner in owners {
            linker.insert_label_descriptions(self, owner)?;
        }
        Ok(())
    }

    /// Set the value of a single-valued attribute
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedKind` if the attribute is multi-language.
    pub fn set_attribute_value(&mut self, attribute: NodeId, value: Value) -> Result<()> {
        let data = self.attribute_data_mut(attribute)?;
        match &mut data.value {
            AttributeValue::Single(single) => single.set_value(value),
            AttributeValue::Multi(_) => {
                return Err(ModelError::UnexpectedKind {
                    node: attribute.to_string(),
                    expected: "single value".to_string(),
                    actual: "multi-language value".to_string(),
                })
            }
        }
        self.refresh_label_descriptions(attribute)
    }

    /// Set one language of a multi-language attribute
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedKind` if the attribute is single-valued.
    pub fn set_attribute_language_value(
        &mut self,
        attribute: NodeId,
        language: &str,
        value: Value,
    ) -> Result<()> {
        let data = self.attribute_data_mut(attribute)?;
        match &mut data.value {
            AttributeValue::Multi(multi) => multi.set_value(language, value),
            AttributeValue::Single(_) => {
                return Err(ModelError::UnexpectedKind {
                    node: attribute.to_string(),
                    expected: "multi-language value".to_string(),
                    actual: "single value".to_string(),
                })
            }
        }
        self.refresh_label_descriptions(attribute)
    }

    /// Set a field's region back-link
    pub fn set_region_id(&mut self, field: NodeId, region_id: Option<String>) -> Result<()> {
        self.expect_kind(field, ModelKind::Field)?;
        if let NodeData::Field(data) = &mut self.node_mut(field)?.data {
            data.region_id = region_id;
        }
        Ok(())
    }
}
