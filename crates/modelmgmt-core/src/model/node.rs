use std::collections::BTreeMap;
use std::sync::Arc;

use super::description::Descriptions;
use super::kind::ModelKind;
use super::list::ModelList;
use super::meta::ModelMetaData;
use super::value::AttributeValue;

/// Handle of a node inside a `ModelGraph`
///
/// Handles stay valid for the lifetime of the graph: nodes are never freed,
/// only detached from the collections that list them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DefinitionData {
    pub is_abstract: bool,
    /// Class the definition is filed under
    pub class: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldData {
    /// Region the field is laid out in
    pub region_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeData {
    pub attr_type: Option<String>,
    pub value: AttributeValue,
    pub meta: Option<Arc<ModelMetaData>>,
}

/// Variant-specific payload of a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Class,
    Definition(DefinitionData),
    Field(FieldData),
    Region,
    Property,
    Action,
    ActionExecution,
    Header,
    Control,
    ControlParam,
    Attribute(AttributeData),
}

impl NodeData {
    pub fn kind(&self) -> ModelKind {
        match self {
            NodeData::Class => ModelKind::Class,
            NodeData::Definition(_) => ModelKind::Definition,
            NodeData::Field(_) => ModelKind::Field,
            NodeData::Region => ModelKind::Region,
            NodeData::Property => ModelKind::Property,
            NodeData::Action => ModelKind::Action,
            NodeData::ActionExecution => ModelKind::ActionExecution,
            NodeData::Header => ModelKind::Header,
            NodeData::Control => ModelKind::Control,
            NodeData::ControlParam => ModelKind::ControlParam,
            NodeData::Attribute(_) => ModelKind::Attribute,
        }
    }

    /// Empty payload for a kind
    pub fn empty(kind: ModelKind) -> Self {
        match kind {
            ModelKind::Class => NodeData::Class,
            ModelKind::Definition => NodeData::Definition(DefinitionData::default()),
            ModelKind::Field => NodeData::Field(FieldData::default()),
            ModelKind::Region => NodeData::Region,
            ModelKind::Property => NodeData::Property,
            ModelKind::Action => NodeData::Action,
            ModelKind::ActionExecution => NodeData::ActionExecution,
            ModelKind::Header => NodeData::Header,
            ModelKind::Control => NodeData::Control,
            ModelKind::ControlParam => NodeData::ControlParam,
            ModelKind::Attribute => NodeData::Attribute(AttributeData {
                attr_type: None,
                value: AttributeValue::Single(super::value::ModelValue::new(
                    serde_json::Value::Null,
                )),
                meta: None,
            }),
        }
    }
}

/// A node of the model graph
#[derive(Debug, Clone, PartialEq)]
pub struct ModelNode {
    pub(crate) id: String,
    pub data: NodeData,
    pub(crate) parent: Option<NodeId>,
    pub(crate) reference: Option<NodeId>,
    pub(crate) collections: BTreeMap<ModelKind, ModelList<NodeId>>,
    pub descriptions: Descriptions,
    pub tooltips: Descriptions,
    pub icon: Option<String>,
    pub(crate) loaded: bool,
}

impl ModelNode {
    pub(crate) fn new(id: impl Into<String>, data: NodeData) -> Self {
        let kind = data.kind();
        let collections = kind
            .child_kinds()
            .iter()
            .map(|k| (*k, ModelList::new()))
            .collect();
        Self {
            id: id.into(),
            data,
            parent: None,
            reference: None,
            collections,
            descriptions: Descriptions::new(),
            tooltips: Descriptions::new(),
            icon: Some(kind.icon().to_string()),
            loaded: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ModelKind {
        self.data.kind()
    }

    /// Structural owner
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Ancestor node this one mirrors or overrides
    pub fn reference(&self) -> Option<NodeId> {
        self.reference
    }

    /// Whether the full model payload has been linked
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn collection(&self, kind: ModelKind) -> Option<&ModelList<NodeId>> {
        self.collections.get(&kind)
    }

    pub fn attributes(&self) -> Option<&ModelList<NodeId>> {
        self.collection(ModelKind::Attribute)
    }

    pub fn attribute_data(&self) -> Option<&AttributeData> {
        match &self.data {
            NodeData::Attribute(data) => Some(data),
            _ => None,
        }
    }

    pub fn region_id(&self) -> Option<&str> {
        match &self.data {
            NodeData::Field(field) => field.region_id.as_deref(),
            _ => None,
        }
    }
}
