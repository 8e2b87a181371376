//! The external model collaborator
//!
//! Every fetch is a one-shot request; caching is the service's concern.
//! Implementations report their own failures as `ExError`s, which the
//! service wraps as `ExternalService` errors.

use async_trait::async_trait;
use modelmgmt_core::model::Descriptions;
use modelmgmt_core::payload::{ClassDescriptor, ModelPayload, ModelsMetaDataPayload, RawNode};
use modelmgmt_core::ModelChangeSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;

/// Read side of the collaborator
#[async_trait]
pub trait ModelSource: Send + Sync {
    /// Flat class listing with each class's definitions
    async fn fetch_hierarchy(&self) -> Result<Vec<ClassDescriptor>>;

    async fn fetch_meta_data(&self) -> Result<ModelsMetaDataPayload>;

    /// A model together with every ancestor model it inherits from
    async fn fetch_model(&self, id: &str) -> Result<ModelPayload>;

    /// Semantic properties not filed under a class
    async fn fetch_properties(&self) -> Result<Vec<RawNode>>;

    async fn fetch_code_list(&self, id: &str) -> Result<Vec<RawCodeValue>>;
}

/// Write side of the collaborator
#[async_trait]
pub trait ModelPersistence: Send + Sync {
    /// Persist change sets as one request
    async fn save(&self, change_sets: &[ModelChangeSet]) -> Result<()>;
}

/// A code list entry as delivered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCodeValue {
    pub value: String,
    #[serde(default)]
    pub labels: Option<Value>,
}

/// A code list entry with resolved descriptions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeValue {
    pub value: String,
    pub descriptions: Descriptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeList {
    pub id: String,
    pub values: Vec<CodeValue>,
}

impl CodeList {
    pub fn get(&self, value: &str) -> Option<&CodeValue> {
        self.values.iter().find(|v| v.value == value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
