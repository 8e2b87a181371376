//! Load-once model management service
//!
//! The hierarchy listing, meta-data and properties are fetched on first use
//! and served from memory afterwards. Code lists are cached per id. A failed
//! fetch is never cached: the next call asks the source again.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use modelmgmt_core::hierarchy::HierarchyBuilder;
use modelmgmt_core::model::ModelsMetaData;
use modelmgmt_core::payload::{ClassDescriptor, RawNode};
use modelmgmt_core::logging_facility::elapsed_ms;
use modelmgmt_core::{log_op_end, log_op_result, log_op_start};
use modelmgmt_core::{ModelChangeSet, ModelGraph, ModelLinker, NodeId};
use modelmgmt_core_types::correlation::{RequestId, TraceId};
use tokio::sync::{Mutex, OnceCell};

use crate::config::EngineConfig;
use crate::errors::{not_found, source_error, Result};
use crate::session::ModelSession;
use crate::source::{CodeList, CodeValue, ModelPersistence, ModelSource};

pub struct ModelManagementService<S, P> {
    source: S,
    persistence: P,
    linker: ModelLinker,
    hierarchy: OnceCell<Arc<Vec<ClassDescriptor>>>,
    meta_data: OnceCell<Arc<ModelsMetaData>>,
    properties: OnceCell<Arc<Vec<RawNode>>>,
    code_lists: Mutex<HashMap<String, Arc<CodeList>>>,
}

impl<S: ModelSource, P: ModelPersistence> ModelManagementService<S, P> {
    pub fn new(source: S, persistence: P, config: &EngineConfig) -> Self {
        Self::with_linker(source, persistence, ModelLinker::new(config.languages.clone()))
    }

    pub fn with_linker(source: S, persistence: P, linker: ModelLinker) -> Self {
        Self {
            source,
            persistence,
            linker,
            hierarchy: OnceCell::new(),
            meta_data: OnceCell::new(),
            properties: OnceCell::new(),
            code_lists: Mutex::new(HashMap::new()),
        }
    }

    pub fn linker(&self) -> &ModelLinker {
        &self.linker
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// The raw hierarchy listing, fetched once
    ///
    /// # Errors
    ///
    /// Returns `ExternalService` if the fetch fails.
    pub async fn get_hierarchy(&self) -> Result<Arc<Vec<ClassDescriptor>>> {
        let listing = self
            .hierarchy
            .get_or_try_init(|| async {
                let listing = self
                    .source
                    .fetch_hierarchy()
                    .await
                    .map_err(|e| source_error("fetch_hierarchy", e))?;
                Ok::<_, modelmgmt_core::ExError>(Arc::new(listing))
            })
            .await?;
        Ok(listing.clone())
    }

    /// Linked meta-data, fetched once
    ///
    /// # Errors
    ///
    /// Returns `ExternalService` if the fetch fails.
    pub async fn get_meta_data(&self) -> Result<Arc<ModelsMetaData>> {
        let start = Instant::now();
        log_op_start!("get_meta_data");

        let result = self
            .meta_data
            .get_or_try_init(|| async {
                let payload = self
                    .source
                    .fetch_meta_data()
                    .await
                    .map_err(|e| source_error("fetch_meta_data", e))?;
                Ok::<_, modelmgmt_core::ExError>(Arc::new(self.linker.link_meta_data(&payload)))
            })
            .await
            .cloned();

        log_op_result!("get_meta_data", start, result)
    }

    /// Raw properties, fetched once
    ///
    /// # Errors
    ///
    /// Returns `ExternalService` if the fetch fails.
    pub async fn get_properties(&self) -> Result<Arc<Vec<RawNode>>> {
        let properties = self
            .properties
            .get_or_try_init(|| async {
                let properties = self
                    .source
                    .fetch_properties()
                    .await
                    .map_err(|e| source_error("fetch_properties", e))?;
                Ok::<_, modelmgmt_core::ExError>(Arc::new(properties))
            })
            .await?;
        Ok(properties.clone())
    }

    /// Start a session: a fresh graph with the class/definition hierarchy
    /// and the detached properties linked in
    ///
    /// # Errors
    ///
    /// Returns `ExternalService` if a fetch fails.
    pub async fn load_hierarchy(&self) -> Result<ModelSession> {
        let start = Instant::now();
        let trace_id = TraceId::new();
        log_op_start!("load_hierarchy", trace_id = %trace_id);

        let result = self
            .build_session(trace_id.clone())
            .await
            .map_err(|e| e.with_trace_id(trace_id));

        log_op_result!("load_hierarchy", start, result)
    }

    async fn build_session(&self, trace_id: TraceId) -> Result<ModelSession> {
        let listing = self.get_hierarchy().await?;
        let meta = self.get_meta_data().await?;
        let raw_properties = self.get_properties().await?;

        let mut graph = ModelGraph::new();
        let hierarchy = HierarchyBuilder::new(self.linker.descriptions()).build(&mut graph, &listing)?;
        let properties = self
            .linker
            .link_detached_properties(&mut graph, &raw_properties, &meta)?;

        Ok(ModelSession {
            graph,
            hierarchy,
            meta,
            properties,
            trace_id,
        })
    }

    /// Link a model into the session, fetching it unless already loaded
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the source's payload does not contain the
    /// model, `ExternalService` if the fetch fails.
    pub async fn load_model(&self, session: &mut ModelSession, id: &str) -> Result<NodeId> {
        let start = Instant::now();
        log_op_start!("load_model", node_id = id, trace_id = %session.trace_id);

        if let Some(node) = session.loaded(id) {
            log_op_end!("load_model", duration_ms = elapsed_ms(start), cached = true);
            return Ok(node);
        }

        let result = self
            .fetch_and_link(session, id)
            .await
            .map_err(|e| e.with_trace_id(session.trace_id.clone()));

        log_op_result!("load_model", start, result)
    }

    async fn fetch_and_link(&self, session: &mut ModelSession, id: &str) -> Result<NodeId> {
        let payload = self
            .source
            .fetch_model(id)
            .await
            .map_err(|e| source_error("fetch_model", e))?;
        self.linker
            .link_model(&mut session.graph, &session.hierarchy, &payload, &session.meta)?;
        session.loaded(id).ok_or_else(|| not_found("load_model", id))
    }

    /// Code list with linked descriptions, cached per id
    ///
    /// # Errors
    ///
    /// Returns `ExternalService` if the fetch fails.
    pub async fn get_code_list(&self, id: &str) -> Result<Arc<CodeList>> {
        let mut cache = self.code_lists.lock().await;
        if let Some(list) = cache.get(id) {
            return Ok(list.clone());
        }

        let start = Instant::now();
        log_op_start!("get_code_list", code_list = id);
        let result = self
            .source
            .fetch_code_list(id)
            .await
            .map_err(|e| source_error("fetch_code_list", e))
            .map(|raw| {
                let values = raw
                    .into_iter()
                    .map(|entry| {
                        let mut descriptions = modelmgmt_core::model::Descriptions::new();
                        self.linker.descriptions().link_descriptions(
                            &mut descriptions,
                            &entry.value,
                            entry.labels.as_ref(),
                        );
                        CodeValue {
                            value: entry.value,
                            descriptions,
                        }
                    })
                    .collect();
                Arc::new(CodeList {
                    id: id.to_string(),
                    values,
                })
            });
        let list = log_op_result!("get_code_list", start, result)?;

        cache.insert(id.to_string(), list.clone());
        Ok(list)
    }

    /// Persist change sets, then mark them committed in the session
    ///
    /// Nothing is committed when persistence fails, so the edits stay dirty
    /// and can be saved again.
    ///
    /// # Errors
    ///
    /// Returns `ExternalService` if persistence fails.
    pub async fn save(&self, session: &mut ModelSession, change_sets: &[ModelChangeSet]) -> Result<()> {
        let start = Instant::now();
        let request_id = RequestId::new();
        log_op_start!(
            "save",
            request_id = %request_id,
            trace_id = %session.trace_id,
            change_set_count = change_sets.len()
        );

        let result = match self.persistence.save(change_sets).await {
            Ok(()) => session.graph.commit(change_sets).map_err(Into::into),
            Err(err) => Err(source_error("save", err)
                .with_request_id(request_id)
                .with_trace_id(session.trace_id.clone())),
        };

        log_op_result!("save", start, result)
    }

    /// Save every pending edit under `node`
    ///
    /// Returns the change sets that were persisted; none when nothing is
    /// dirty, in which case persistence is not called.
    ///
    /// # Errors
    ///
    /// Returns `ExternalService` if persistence fails.
    pub async fn save_model(&self, session: &mut ModelSession, node: NodeId) -> Result<Vec<ModelChangeSet>> {
        let change_sets = session.graph.collect_change_sets(node)?;
        if !change_sets.is_empty() {
            self.save(session, &change_sets).await?;
        }
        Ok(change_sets)
    }
}
