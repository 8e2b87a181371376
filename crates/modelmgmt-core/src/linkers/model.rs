use crate::errors::Result;
use crate::hierarchy::ModelHierarchy;
use crate::model::{DefinitionData, ModelKind, ModelsMetaData, NodeData, NodeId};
use crate::ops::{link_inheritance, ModelGraph};
use crate::payload::{ClassModelPayload, DefinitionModelPayload, ModelPayload};
use crate::{log_op_result, log_op_start};

use super::ModelLinker;

impl ModelLinker {
    /// Link a full model payload into the graph
    ///
    /// Classes and definitions are looked up in the hierarchy (or the
    /// graph's base index) and created when unknown. Models already loaded
    /// are left untouched. Once everything is linked, every loaded
    /// definition inherits from its loaded parent, ancestors first.
    ///
    /// Returns the handles of the classes and definitions in the payload.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedKind` if an id in the payload resolves to a node
    /// of the wrong kind.
    pub fn link_model(
        &self,
        graph: &mut ModelGraph,
        hierarchy: &ModelHierarchy,
        payload: &ModelPayload,
        meta: &ModelsMetaData,
    ) -> Result<Vec<NodeId>> {
        let start = std::time::Instant::now();
        log_op_start!(
            "link_model",
            node_count = payload.classes.len() + payload.definitions.len()
        );

        let result = self.link_payload(graph, hierarchy, payload, meta);

        log_op_result!("link_model", start, result)
    }

    fn link_payload(
        &self,
        graph: &mut ModelGraph,
        hierarchy: &ModelHierarchy,
        payload: &ModelPayload,
        meta: &ModelsMetaData,
    ) -> Result<Vec<NodeId>> {
        let mut linked = Vec::new();
        for class in &payload.classes {
            linked.push(self.link_class(graph, hierarchy, class, meta)?);
        }

        let mut definitions = Vec::new();
        for definition in &payload.definitions {
            let node = self.link_definition(graph, hierarchy, definition, meta)?;
            definitions.push(node);
            linked.push(node);
        }

        for definition in &payload.definitions {
            let Some(parent_id) = definition.parent.as_deref() else {
                continue;
            };
            let node = resolve(graph, hierarchy, ModelKind::Definition, &definition.id);
            let parent = resolve(graph, hierarchy, ModelKind::Definition, parent_id);
            if let (Some(node), Some(parent)) = (node, parent) {
                if node != parent {
                    graph.set_parent(node, Some(parent))?;
                }
            }
        }

        definitions.sort_by_key(|d| depth(graph, *d));
        for definition in definitions {
            if let Some(parent) = graph.parent_definition(definition) {
                if graph.node(parent)?.is_loaded() {
                    link_inheritance(graph, definition, parent)?;
                }
            }
        }

        Ok(linked)
    }

    fn link_class(
        &self,
        graph: &mut ModelGraph,
        hierarchy: &ModelHierarchy,
        payload: &ClassModelPayload,
        meta: &ModelsMetaData,
    ) -> Result<NodeId> {
        let node = match resolve(graph, hierarchy, ModelKind::Class, &payload.id) {
            Some(node) => node,
            None => graph.add_base_node(payload.id.clone(), NodeData::Class),
        };
        graph.expect_kind(node, ModelKind::Class)?;
        if graph.node(node)?.is_loaded() {
            return Ok(node);
        }

        self.link_attributes(graph, node, &payload.attributes, &meta.semantics)?;
        if !self.link_label_descriptions(graph, node)? && payload.labels.is_some() {
            self.descriptions()
                .insert_descriptions(graph, node, payload.labels.as_ref())?;
        }
        self.link_children(graph, node, ModelKind::Property, &payload.properties, meta)?;
        graph.mark_loaded(node)?;
        Ok(node)
    }

    fn link_definition(
        &self,
        graph: &mut ModelGraph,
        hierarchy: &ModelHierarchy,
        payload: &DefinitionModelPayload,
        meta: &ModelsMetaData,
    ) -> Result<NodeId> {
        let node = match resolve(graph, hierarchy, ModelKind::Definition, &payload.id) {
            Some(node) => node,
            None => {
                let node = graph.add_base_node(
                    payload.id.clone(),
                    NodeData::Definition(DefinitionData::default()),
                );
                self.descriptions()
                    .insert_descriptions(graph, node, payload.labels.as_ref())?;
                node
            }
        };
        graph.expect_kind(node, ModelKind::Definition)?;
        if graph.node(node)?.is_loaded() {
            return Ok(node);
        }

        self.link_attributes(graph, node, &payload.attributes, &meta.definitions)?;
        self.link_label_descriptions(graph, node)?;
        self.link_fields(graph, node, &payload.fields, meta)?;
        self.link_children(graph, node, ModelKind::Region, &payload.regions, meta)?;
        self.link_children(graph, node, ModelKind::Header, &payload.headers, meta)?;
        self.link_actions(graph, node, &payload.actions, meta)?;
        graph.mark_loaded(node)?;
        Ok(node)
    }
}

fn resolve(graph: &ModelGraph, hierarchy: &ModelHierarchy, kind: ModelKind, id: &str) -> Option<NodeId> {
    let from_hierarchy = match kind {
        ModelKind::Class => hierarchy.class(id),
        ModelKind::Definition => hierarchy.definition(id),
        _ => None,
    };
    from_hierarchy.or_else(|| graph.find_base(kind, id))
}

fn depth(graph: &ModelGraph, definition: NodeId) -> usize {
    let mut depth = 0;
    let mut current = definition;
    while let Some(parent) = graph.parent_definition(current) {
        depth += 1;
        if depth > graph.len() {
            break;
        }
        current = parent;
    }
    depth
}
