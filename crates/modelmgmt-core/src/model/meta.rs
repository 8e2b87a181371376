use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use super::description::Descriptions;
use super::kind::ModelKind;
use super::list::{Keyed, ModelList};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelRestrictions {
    pub mandatory: bool,
    pub updateable: bool,
    pub visible: bool,
}

impl Default for ModelRestrictions {
    fn default() -> Self {
        Self {
            mandatory: false,
            updateable: true,
            visible: true,
        }
    }
}

/// Schema record describing one attribute name
#[derive(Debug, Clone, PartialEq)]
pub struct ModelMetaData {
    pub id: String,
    pub uri: Option<String>,
    pub attr_type: Option<String>,
    pub order: Option<i64>,
    pub default_value: Value,
    pub restrictions: ModelRestrictions,
    pub descriptions: Descriptions,
}

impl ModelMetaData {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            uri: None,
            attr_type: None,
            order: None,
            default_value: Value::Null,
            restrictions: ModelRestrictions::default(),
            descriptions: Descriptions::new(),
        }
    }

    pub fn is_mandatory(&self) -> bool {
        self.restrictions.mandatory
    }

    pub fn is_visible(&self) -> bool {
        self.restrictions.visible
    }

    pub fn is_updateable(&self) -> bool {
        self.restrictions.updateable
    }
}

impl Keyed for ModelMetaData {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Ordered meta-data for one node kind
///
/// Position in the collection is the display order of matching attributes.
#[derive(Debug, Clone, Default)]
pub struct MetaCollection {
    list: ModelList<Arc<ModelMetaData>>,
}

impl MetaCollection {
    /// Build from records, sorted by explicit `order` where present
    pub fn from_records(records: impl IntoIterator<Item = ModelMetaData>) -> Self {
        let mut list: ModelList<Arc<ModelMetaData>> = records.into_iter().map(Arc::new).collect();
        list.sort_by(|a, b| match (a.order, b.order) {
            (Some(l), Some(r)) => l.cmp(&r),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Self { list }
    }

    /// Look up by id first, then by uri
    pub fn find(&self, name: &str) -> Option<&Arc<ModelMetaData>> {
        self.list.get_model(name).or_else(|| {
            self.list
                .get_models()
                .find(|m| m.uri.as_deref() == Some(name))
        })
    }

    /// Display rank of a meta record
    pub fn position(&self, id: &str) -> Option<usize> {
        self.list.index_of(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ModelMetaData>> + '_ {
        self.list.get_models()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

/// All meta-data collections keyed by the node kind they describe
#[derive(Debug, Clone, Default)]
pub struct ModelsMetaData {
    pub semantics: MetaCollection,
    pub definitions: MetaCollection,
    pub properties: MetaCollection,
    pub fields: MetaCollection,
    pub regions: MetaCollection,
    pub controls: MetaCollection,
    pub headers: MetaCollection,
    pub actions: MetaCollection,
}

impl ModelsMetaData {
    /// Collection describing attributes of nodes of `kind`
    pub fn for_kind(&self, kind: ModelKind) -> Option<&MetaCollection> {
        match kind {
            ModelKind::Class => Some(&self.semantics),
            ModelKind::Definition => Some(&self.definitions),
            ModelKind::Property => Some(&self.properties),
            ModelKind::Field => Some(&self.fields),
            ModelKind::Region => Some(&self.regions),
            ModelKind::Control => Some(&self.controls),
            ModelKind::Header => Some(&self.headers),
            ModelKind::Action => Some(&self.actions),
            ModelKind::ActionExecution | ModelKind::ControlParam | ModelKind::Attribute => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(id: &str, order: Option<i64>) -> ModelMetaData {
        ModelMetaData {
            order,
            ..ModelMetaData::new(id)
        }
    }

    #[test]
    fn test_explicit_order_sorts_first() {
        let collection = MetaCollection::from_records([
            meta("c", None),
            meta("b", Some(2)),
            meta("a", Some(1)),
        ]);
        let ids: Vec<&str> = collection.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_find_falls_back_to_uri() {
        let collection = MetaCollection::from_records([ModelMetaData {
            uri: Some("urn:title".to_string()),
            ..ModelMetaData::new("title")
        }]);
        assert!(collection.find("title").is_some());
        assert_eq!(collection.find("urn:title").map(|m| m.id.as_str()), Some("title"));
        assert!(collection.find("missing").is_none());
    }

    #[test]
    fn test_restrictions_default_to_visible_and_updateable() {
        let restrictions: ModelRestrictions = serde_json::from_str("{}").unwrap();
        assert!(restrictions.visible);
        assert!(restrictions.updateable);
        assert!(!restrictions.mandatory);
    }
}
