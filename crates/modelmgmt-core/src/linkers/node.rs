use crate::errors::{ModelError, Result};
use crate::model::{FieldData, MetaCollection, ModelKind, ModelsMetaData, NodeData, NodeId};
use crate::ops::ModelGraph;
use crate::payload::RawNode;

use super::ModelLinker;

impl ModelLinker {
    /// Link one raw element as an owned child of `owner`
    ///
    /// Attributes are linked against `meta`; descriptions come from the
    /// `label` attribute when there is one, else from the raw labels.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPayload` for an element without an id,
    /// `UnexpectedKind` if `owner` has no collection for `data`'s kind.
    pub fn link_child(
        &self,
        graph: &mut ModelGraph,
        owner: NodeId,
        raw: &RawNode,
        data: NodeData,
        meta: &MetaCollection,
    ) -> Result<NodeId> {
        if raw.id.trim().is_empty() {
            return Err(ModelError::InvalidPayload {
                reason: format!("{} without an id under {}", data.kind(), graph.node(owner)?.id()),
            });
        }
        let node = graph.add_node(raw.id.clone(), data);
        self.link_attributes(graph, node, &raw.attributes, meta)?;
        if !self.link_label_descriptions(graph, node)? {
            self.descriptions()
                .insert_descriptions(graph, node, raw.labels.as_ref())?;
        }
        self.descriptions()
            .insert_tooltips(graph, node, raw.tooltips.as_ref())?;
        graph.set_parent(node, Some(owner))?;
        graph.insert_child(owner, node)?;
        Ok(node)
    }

    /// Fields of a definition, with their controls
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedKind` if `owner` is not a definition.
    pub fn link_fields(
        &self,
        graph: &mut ModelGraph,
        owner: NodeId,
        raw: &[RawNode],
        meta: &ModelsMetaData,
    ) -> Result<Vec<NodeId>> {
        let mut linked = Vec::with_capacity(raw.len());
        for field in raw {
            let data = NodeData::Field(FieldData {
                region_id: field.region_id.clone(),
            });
            let node = self.link_child(graph, owner, field, data, &meta.fields)?;
            self.link_controls(graph, node, &field.controls, meta)?;
            linked.push(node);
        }
        Ok(linked)
    }

    /// Controls of a field, with their parameters
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedKind` if `owner` is not a field.
    pub fn link_controls(
        &self,
        graph: &mut ModelGraph,
        owner: NodeId,
        raw: &[RawNode],
        meta: &ModelsMetaData,
    ) -> Result<Vec<NodeId>> {
        let mut linked = Vec::with_capacity(raw.len());
        for control in raw {
            let node = self.link_child(graph, owner, control, NodeData::Control, &meta.controls)?;
            for param in &control.params {
                self.link_child(graph, node, param, NodeData::ControlParam, &MetaCollection::default())?;
            }
            linked.push(node);
        }
        Ok(linked)
    }

    /// Actions of a definition, with their executions
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedKind` if `owner` is not a definition.
    pub fn link_actions(
        &self,
        graph: &mut ModelGraph,
        owner: NodeId,
        raw: &[RawNode],
        meta: &ModelsMetaData,
    ) -> Result<Vec<NodeId>> {
        let mut linked = Vec::with_capacity(raw.len());
        for action in raw {
            let node = self.link_child(graph, owner, action, NodeData::Action, &meta.actions)?;
            for execution in &action.executions {
                self.link_child(graph, node, execution, NodeData::ActionExecution, &MetaCollection::default())?;
            }
            linked.push(node);
        }
        Ok(linked)
    }

    /// Elements without nested collections: regions, headers, properties
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedKind` if `kind` has nested collections or `owner`
    /// cannot hold it.
    pub fn link_children(
        &self,
        graph: &mut ModelGraph,
        owner: NodeId,
        kind: ModelKind,
        raw: &[RawNode],
        meta: &ModelsMetaData,
    ) -> Result<Vec<NodeId>> {
        let collection = meta.for_kind(kind).cloned().unwrap_or_default();
        raw.iter()
            .map(|element| self.link_child(graph, owner, element, NodeData::empty(kind), &collection))
            .collect()
    }

    /// Properties not filed under any class
    ///
    /// They stay detached: no parent, not listed anywhere.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPayload` for an attribute without a name.
    pub fn link_detached_properties(
        &self,
        graph: &mut ModelGraph,
        raw: &[RawNode],
        meta: &ModelsMetaData,
    ) -> Result<Vec<NodeId>> {
        let mut linked = Vec::with_capacity(raw.len());
        for property in raw {
            let node = graph.add_node(property.id.clone(), NodeData::Property);
            self.link_attributes(graph, node, &property.attributes, &meta.properties)?;
            if !self.link_label_descriptions(graph, node)? {
                self.descriptions()
                    .insert_descriptions(graph, node, property.labels.as_ref())?;
            }
            linked.push(node);
        }
        Ok(linked)
    }
}
