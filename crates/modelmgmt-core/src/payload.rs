//! Raw payloads as delivered by the model REST collaborator
//!
//! These are plain serde types; the linkers and the hierarchy builder turn
//! them into graph nodes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{ModelMetaData, ModelRestrictions};

/// One class of the flat hierarchy listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDescriptor {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub labels: Option<Value>,
    #[serde(default)]
    pub sub_types: Vec<DefinitionDescriptor>,
}

/// One definition filed under a class in the hierarchy listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionDescriptor {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default)]
    pub labels: Option<Value>,
}

/// Descriptors that form a parent-pointer forest
pub trait HierarchyDescriptor {
    fn id(&self) -> &str;
    fn parent_id(&self) -> Option<&str>;
}

impl HierarchyDescriptor for ClassDescriptor {
    fn id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }
}

impl HierarchyDescriptor for DefinitionDescriptor {
    fn id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAttribute {
    pub name: String,
    #[serde(default, rename = "type")]
    pub attr_type: Option<String>,
    #[serde(default)]
    pub value: Value,
}

/// A field, region, header, action, control or their sub-elements
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    pub id: String,
    #[serde(default)]
    pub attributes: Vec<RawAttribute>,
    #[serde(default)]
    pub labels: Option<Value>,
    #[serde(default)]
    pub tooltips: Option<Value>,
    #[serde(default)]
    pub region_id: Option<String>,
    #[serde(default)]
    pub controls: Vec<RawNode>,
    #[serde(default, alias = "controlParams")]
    pub params: Vec<RawNode>,
    #[serde(default)]
    pub executions: Vec<RawNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassModelPayload {
    pub id: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub labels: Option<Value>,
    #[serde(default)]
    pub attributes: Vec<RawAttribute>,
    #[serde(default)]
    pub properties: Vec<RawNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionModelPayload {
    pub id: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub labels: Option<Value>,
    #[serde(default)]
    pub attributes: Vec<RawAttribute>,
    #[serde(default)]
    pub fields: Vec<RawNode>,
    #[serde(default)]
    pub regions: Vec<RawNode>,
    #[serde(default)]
    pub headers: Vec<RawNode>,
    #[serde(default)]
    pub actions: Vec<RawNode>,
}

/// Full model of a definition together with the models it inherits from
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelPayload {
    #[serde(default)]
    pub classes: Vec<ClassModelPayload>,
    #[serde(default)]
    pub definitions: Vec<DefinitionModelPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaDataPayload {
    pub id: String,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default, rename = "type")]
    pub attr_type: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub default_value: Value,
    #[serde(default, alias = "restrictions")]
    pub validation_model: ModelRestrictions,
    #[serde(default)]
    pub labels: Option<Value>,
}

impl MetaDataPayload {
    /// Meta record without descriptions; the linker adds those
    pub fn to_meta_data(&self) -> ModelMetaData {
        ModelMetaData {
            id: self.id.clone(),
            uri: self.uri.clone(),
            attr_type: self.attr_type.clone(),
            order: self.order,
            default_value: self.default_value.clone(),
            restrictions: self.validation_model.clone(),
            ..ModelMetaData::new(self.id.clone())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsMetaDataPayload {
    pub semantics: Vec<MetaDataPayload>,
    pub definitions: Vec<MetaDataPayload>,
    pub properties: Vec<MetaDataPayload>,
    pub fields: Vec<MetaDataPayload>,
    pub regions: Vec<MetaDataPayload>,
    pub controls: Vec<MetaDataPayload>,
    pub headers: Vec<MetaDataPayload>,
    pub actions: Vec<MetaDataPayload>,
}
