use std::sync::Arc;

use modelmgmt_core::hierarchy::ModelHierarchy;
use modelmgmt_core::model::{ModelKind, ModelsMetaData};
use modelmgmt_core::{ModelGraph, NodeId};
use modelmgmt_core_types::TraceId;

/// One edit session over a freshly built graph
///
/// The session owns its graph exclusively; models are linked into it on
/// demand and edited in place.
#[derive(Debug, Clone)]
pub struct ModelSession {
    pub graph: ModelGraph,
    pub hierarchy: ModelHierarchy,
    pub meta: Arc<ModelsMetaData>,
    /// Detached properties, linked once per session
    pub properties: Vec<NodeId>,
    /// Carried on every error raised while serving this session
    pub trace_id: TraceId,
}

impl ModelSession {
    /// Class or definition with the given id, loaded or not
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.hierarchy
            .definition(id)
            .or_else(|| self.hierarchy.class(id))
            .or_else(|| self.graph.find_base(ModelKind::Definition, id))
            .or_else(|| self.graph.find_base(ModelKind::Class, id))
    }

    /// Handle of an already loaded model
    pub fn loaded(&self, id: &str) -> Option<NodeId> {
        self.find(id)
            .filter(|node| self.graph.get(*node).is_some_and(|n| n.is_loaded()))
    }
}
