pub mod description;
pub mod kind;
pub mod list;
pub mod meta;
pub mod node;
pub mod value;

pub use description::{normalize_language, Descriptions, LocaleResolver, ModelDescription};
pub use kind::ModelKind;
pub use list::{Keyed, ModelList};
pub use meta::{MetaCollection, ModelMetaData, ModelRestrictions, ModelsMetaData};
pub use node::{AttributeData, DefinitionData, FieldData, ModelNode, NodeData, NodeId};
pub use value::{is_value_empty, AttributeValue, ModelMultiValue, ModelValue, MULTI_LANGUAGE_TYPES};
