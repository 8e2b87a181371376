use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use modelmgmt_core::payload::{ClassDescriptor, ModelPayload, ModelsMetaDataPayload, RawNode};
use modelmgmt_core::{ExError, ExErrorKind, LanguageConfig, ModelChangeSet};
use modelmgmt_engine::{EngineConfig, ModelManagementService, ModelPersistence, ModelSource, RawCodeValue, Result};
use serde_json::{json, Value};

/// In-memory source counting every fetch
#[derive(Default)]
pub struct MemorySource {
    pub hierarchy_calls: AtomicUsize,
    pub meta_data_calls: AtomicUsize,
    pub model_calls: AtomicUsize,
    pub properties_calls: AtomicUsize,
    pub code_list_calls: AtomicUsize,
    /// Number of upcoming fetches that fail
    pub failures: AtomicUsize,
}

#[allow(dead_code)]
impl MemorySource {
    pub fn fail_next(&self, count: usize) {
        self.failures.store(count, Ordering::SeqCst);
    }

    fn call(&self, counter: &AtomicUsize) -> Result<()> {
        counter.fetch_add(1, Ordering::SeqCst);
        let failed = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            Err(ExError::new(ExErrorKind::Internal).with_message("service unavailable"))
        } else {
            Ok(())
        }
    }
}

fn from_json<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}

#[async_trait]
impl ModelSource for MemorySource {
    async fn fetch_hierarchy(&self) -> Result<Vec<ClassDescriptor>> {
        self.call(&self.hierarchy_calls)?;
        Ok(from_json(json!([
            {
                "id": "emf:Entity",
                "labels": {"en": "Entity", "bg": "Обект"},
                "subTypes": [
                    {"id": "entity", "labels": {"en": "Entity", "bg": "Обект"}, "abstract": true},
                    {"id": "media", "parentId": "entity", "labels": {"en": "Media", "bg": "Медия"}, "abstract": true}
                ]
            }
        ])))
    }

    async fn fetch_meta_data(&self) -> Result<ModelsMetaDataPayload> {
        self.call(&self.meta_data_calls)?;
        Ok(from_json(json!({
            "definitions": [
                {"id": "label", "type": "label", "defaultValue": "", "labels": {"en": "Label", "bg": "Име"}},
                {"id": "abstract", "type": "boolean", "defaultValue": false, "labels": {"en": "Is abstract"}}
            ],
            "fields": [
                {"id": "label", "type": "label", "defaultValue": ""},
                {"id": "mandatory", "type": "boolean", "defaultValue": false}
            ],
            "properties": [
                {"id": "title", "uri": "dcterms:title", "type": "label", "defaultValue": ""}
            ]
        })))
    }

    async fn fetch_model(&self, id: &str) -> Result<ModelPayload> {
        self.call(&self.model_calls)?;
        if id != "media" && id != "entity" {
            return Ok(ModelPayload::default());
        }
        Ok(from_json(json!({
            "definitions": [
                {
                    "id": "media",
                    "parent": "entity",
                    "attributes": [
                        {"name": "abstract", "type": "boolean", "value": false},
                        {"name": "label", "type": "label", "value": {"en": "Media", "bg": "Медиа"}}
                    ],
                    "fields": [
                        {"id": "title", "attributes": [
                            {"name": "label", "type": "label", "value": {"en": "Title"}},
                            {"name": "mandatory", "type": "boolean", "value": true}
                        ]}
                    ]
                },
                {
                    "id": "entity",
                    "attributes": [
                        {"name": "abstract", "type": "boolean", "value": true},
                        {"name": "label", "type": "label", "value": {"en": "Entity", "bg": "Обект"}}
                    ],
                    "fields": [
                        {"id": "description", "attributes": [
                            {"name": "label", "type": "label", "value": {"en": "Description"}}
                        ]}
                    ]
                }
            ]
        })))
    }

    async fn fetch_properties(&self) -> Result<Vec<RawNode>> {
        self.call(&self.properties_calls)?;
        Ok(from_json(json!([
            {"id": "dcterms:title", "attributes": [
                {"name": "title", "type": "label", "value": {"en": "Title"}}
            ]}
        ])))
    }

    async fn fetch_code_list(&self, id: &str) -> Result<Vec<RawCodeValue>> {
        self.call(&self.code_list_calls)?;
        Ok(from_json(json!([
            {"value": format!("{}-1", id), "labels": {"en": "First", "bg": "Първи"}},
            {"value": format!("{}-2", id)}
        ])))
    }
}

/// Persistence recording the wire form of every save
#[derive(Default)]
pub struct MemoryPersistence {
    pub saved: Mutex<Vec<Vec<Value>>>,
    pub fail: AtomicBool,
}

#[allow(dead_code)]
impl MemoryPersistence {
    pub fn saved(&self) -> Vec<Vec<Value>> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelPersistence for MemoryPersistence {
    async fn save(&self, change_sets: &[ModelChangeSet]) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ExError::new(ExErrorKind::Internal).with_message("write rejected"));
        }
        let wire = change_sets
            .iter()
            .map(|c| c.to_json().map_err(ExError::from))
            .collect::<Result<Vec<_>>>()?;
        self.saved.lock().unwrap().push(wire);
        Ok(())
    }
}

pub type TestService = ModelManagementService<MemorySource, MemoryPersistence>;

#[allow(dead_code)]
pub fn service() -> TestService {
    let config = EngineConfig {
        languages: LanguageConfig {
            default_language: "en".to_string(),
            user_language: "bg".to_string(),
            supported_languages: vec!["en".to_string(), "bg".to_string()],
        },
        ..EngineConfig::default()
    };
    ModelManagementService::new(MemorySource::default(), MemoryPersistence::default(), &config)
}
