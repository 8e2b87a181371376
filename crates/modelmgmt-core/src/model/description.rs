use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Language codes are compared case-insensitively
pub fn normalize_language(language: &str) -> String {
    language.trim().to_ascii_lowercase()
}

/// A (language, text) pair attached to a node as label or tooltip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescription {
    pub language: String,
    pub value: String,
}

impl ModelDescription {
    pub fn new(language: &str, value: impl Into<String>) -> Self {
        Self {
            language: normalize_language(language),
            value: value.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Picks the description to display out of a set
pub trait LocaleResolver: Send + Sync {
    fn resolve<'a>(&self, descriptions: &'a Descriptions) -> Option<&'a ModelDescription>;
}

/// Per-language descriptions plus the resolved applicable one
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Descriptions {
    entries: IndexMap<String, ModelDescription>,
    applicable: Option<ModelDescription>,
}

impl Descriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a description, replacing any previous one for the language
    pub fn insert(&mut self, description: ModelDescription) {
        self.entries
            .insert(description.language.clone(), description);
    }

    pub fn get(&self, language: &str) -> Option<&ModelDescription> {
        self.entries.get(&normalize_language(language))
    }

    /// Non-empty description for a language
    pub fn get_non_empty(&self, language: &str) -> Option<&ModelDescription> {
        self.get(language).filter(|d| !d.is_empty())
    }

    pub fn first_non_empty(&self) -> Option<&ModelDescription> {
        self.entries.values().find(|d| !d.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelDescription> + '_ {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn applicable(&self) -> Option<&ModelDescription> {
        self.applicable.as_ref()
    }

    /// Recompute the applicable description
    pub fn resolve(&mut self, resolver: &dyn LocaleResolver) {
        self.applicable = resolver.resolve(self).cloned();
    }

    /// Text of the applicable description, empty when none
    pub fn text(&self) -> &str {
        self.applicable
            .as_ref()
            .map(|d| d.value.as_str())
            .unwrap_or("")
    }
}
