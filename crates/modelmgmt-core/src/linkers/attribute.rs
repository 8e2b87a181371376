use std::cmp::Ordering;
use std::sync::Arc;

use crate::errors::{ModelError, Result};
use crate::model::{
    AttributeData, AttributeValue, MetaCollection, ModelKind, ModelMetaData, NodeData, NodeId,
};
use crate::ops::ModelGraph;
use crate::payload::RawAttribute;

use super::ModelLinker;

/// Name of the attribute whose values double as node descriptions
pub const LABEL_ATTRIBUTE: &str = "label";

impl ModelLinker {
    /// Create one owned attribute per raw entry and order them by meta-data
    ///
    /// Meta-data is matched by name (id, then uri). Attributes listed in the
    /// meta collection come first in its order; the rest keep payload order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPayload` for an attribute without a name,
    /// `UnexpectedKind` if `owner` cannot hold attributes.
    pub fn link_attributes(
        &self,
        graph: &mut ModelGraph,
        owner: NodeId,
        raw: &[RawAttribute],
        meta: &MetaCollection,
    ) -> Result<()> {
        for attribute in raw {
            if attribute.name.trim().is_empty() {
                return Err(ModelError::InvalidPayload {
                    reason: format!("attribute without a name under {}", graph.node(owner)?.id()),
                });
            }
            let record = meta.find(&attribute.name).cloned();
            let attr_type = attribute
                .attr_type
                .clone()
                .or_else(|| record.as_ref().and_then(|m| m.attr_type.clone()));
            let value = AttributeValue::from_raw(
                attr_type.as_deref(),
                &attribute.value,
                self.descriptions().default_language(),
            );
            self.add_attribute(graph, owner, &attribute.name, attr_type, value, record)?;
        }
        order_attributes(graph, owner, meta)
    }

    /// Create an owned attribute for every meta record, set to its default
    ///
    /// Used for brand new nodes that have no payload yet.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedKind` if `owner` cannot hold attributes.
    pub fn link_default_attributes(&self, graph: &mut ModelGraph, owner: NodeId, meta: &MetaCollection) -> Result<()> {
        for record in meta.iter() {
            let value = AttributeValue::from_raw(
                record.attr_type.as_deref(),
                &record.default_value,
                self.descriptions().default_language(),
            );
            self.add_attribute(graph, owner, &record.id, record.attr_type.clone(), value, Some(record.clone()))?;
        }
        Ok(())
    }

    fn add_attribute(
        &self,
        graph: &mut ModelGraph,
        owner: NodeId,
        name: &str,
        attr_type: Option<String>,
        value: AttributeValue,
        meta: Option<Arc<ModelMetaData>>,
    ) -> Result<NodeId> {
        let descriptions = meta.as_ref().map(|m| m.descriptions.clone());
        let attribute = graph.add_node(
            name,
            NodeData::Attribute(AttributeData {
                attr_type,
                value,
                meta,
            }),
        );
        match descriptions {
            Some(descriptions) => graph.node_mut(attribute)?.descriptions = descriptions,
            None => self.descriptions().insert_descriptions(graph, attribute, None)?,
        }
        graph.set_parent(attribute, Some(owner))?;
        graph.insert_child(owner, attribute)?;
        Ok(attribute)
    }

    /// Use the node's `label` attribute as its descriptions, if it has one
    ///
    /// Returns whether a label attribute was found. The graph keeps the
    /// descriptions in step with later edits of that attribute.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` for a foreign handle.
    pub fn link_label_descriptions(&self, graph: &mut ModelGraph, node: NodeId) -> Result<bool> {
        if !self.descriptions().insert_label_descriptions(graph, node)? {
            return Ok(false);
        }
        graph.bind_label_descriptions(self.descriptions().clone());
        Ok(true)
    }
}

fn order_attributes(graph: &mut ModelGraph, owner: NodeId, meta: &MetaCollection) -> Result<()> {
    let rank = |graph: &ModelGraph, attribute: NodeId| -> Option<usize> {
        let data = graph.get(attribute)?.attribute_data()?;
        let record = data.meta.as_ref()?;
        meta.position(&record.id)
    };
    graph.sort_collection(owner, ModelKind::Attribute, |graph, a, b| {
        match (rank(graph, a), rank(graph, b)) {
            (Some(l), Some(r)) => l.cmp(&r),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    })
}
