use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::description::normalize_language;

/// Attribute types whose values are kept per language
pub const MULTI_LANGUAGE_TYPES: [&str; 2] = ["label", "multiLangString"];

/// Whether a raw value counts as empty
///
/// Null, blank strings, and empty arrays or objects are empty. Booleans and
/// numbers never are.
pub fn is_value_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// A single current value with its last committed original
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelValue {
    value: Value,
    original: Option<Value>,
}

impl ModelValue {
    /// Value with its original captured
    pub fn new(value: Value) -> Self {
        Self {
            original: Some(value.clone()),
            value,
        }
    }

    /// Value with no captured original. Never reports dirty.
    pub fn uncaptured(value: Value) -> Self {
        Self {
            value,
            original: None,
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The original, or the current value when none was captured
    pub fn old_value(&self) -> &Value {
        self.original.as_ref().unwrap_or(&self.value)
    }

    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    pub fn is_dirty(&self) -> bool {
        self.original.as_ref().is_some_and(|o| *o != self.value)
    }

    pub fn is_empty(&self) -> bool {
        is_value_empty(&self.value)
    }

    pub fn commit(&mut self) {
        self.original = Some(self.value.clone());
    }

    pub fn rollback(&mut self) {
        if let Some(original) = &self.original {
            self.value = original.clone();
        }
    }
}

/// Language-keyed values of a multi-language attribute
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelMultiValue {
    values: IndexMap<String, ModelValue>,
}

impl ModelMultiValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a `{lang: value}` payload, capturing every original
    pub fn from_map<'a>(entries: impl IntoIterator<Item = (&'a String, &'a Value)>) -> Self {
        let values = entries
            .into_iter()
            .map(|(lang, value)| (normalize_language(lang), ModelValue::new(value.clone())))
            .collect();
        Self { values }
    }

    pub fn value(&self, language: &str) -> Option<&ModelValue> {
        self.values.get(&normalize_language(language))
    }

    /// Set one language. A language seen for the first time starts from
    /// an original of null, so the new value shows as a change.
    pub fn set_value(&mut self, language: &str, value: Value) {
        let language = normalize_language(language);
        match self.values.get_mut(&language) {
            Some(existing) => existing.set_value(value),
            None => {
                self.values.insert(
                    language,
                    ModelValue {
                        value,
                        original: Some(Value::Null),
                    },
                );
            }
        }
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelValue)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_dirty(&self) -> bool {
        self.values.values().any(ModelValue::is_dirty)
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(ModelValue::is_empty)
    }

    pub fn current_values(&self) -> IndexMap<String, Value> {
        self.values
            .iter()
            .map(|(lang, v)| (lang.clone(), v.value().clone()))
            .collect()
    }

    pub fn old_values(&self) -> IndexMap<String, Value> {
        self.values
            .iter()
            .map(|(lang, v)| (lang.clone(), v.old_value().clone()))
            .collect()
    }

    pub fn commit(&mut self) {
        self.values.values_mut().for_each(ModelValue::commit);
    }

    pub fn rollback(&mut self) {
        self.values.values_mut().for_each(ModelValue::rollback);
    }
}

/// Value payload of an attribute node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Single(ModelValue),
    Multi(ModelMultiValue),
}

impl AttributeValue {
    /// Build from a raw payload value
    ///
    /// Multi-language when the type says so or the raw value is an object.
    /// A primitive given to a multi-language type is stored under
    /// `default_language`.
    pub fn from_raw(attr_type: Option<&str>, raw: &Value, default_language: &str) -> Self {
        let multi_type = attr_type.is_some_and(|t| MULTI_LANGUAGE_TYPES.contains(&t));
        match raw {
            Value::Object(map) => AttributeValue::Multi(ModelMultiValue::from_map(map.iter())),
            Value::Null if multi_type => AttributeValue::Multi(ModelMultiValue::new()),
            other if multi_type => {
                let mut multi = ModelMultiValue::new();
                multi.values.insert(
                    normalize_language(default_language),
                    ModelValue::new(other.clone()),
                );
                AttributeValue::Multi(multi)
            }
            other => AttributeValue::Single(ModelValue::new(other.clone())),
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, AttributeValue::Multi(_))
    }

    pub fn is_dirty(&self) -> bool {
        match self {
            AttributeValue::Single(v) => v.is_dirty(),
            AttributeValue::Multi(m) => m.is_dirty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            AttributeValue::Single(v) => v.is_empty(),
            AttributeValue::Multi(m) => m.is_empty(),
        }
    }

    pub fn commit(&mut self) {
        match self {
            AttributeValue::Single(v) => v.commit(),
            AttributeValue::Multi(m) => m.commit(),
        }
    }

    pub fn rollback(&mut self) {
        match self {
            AttributeValue::Single(v) => v.rollback(),
            AttributeValue::Multi(m) => m.rollback(),
        }
    }
}
