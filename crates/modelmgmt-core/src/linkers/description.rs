use std::sync::Arc;

use serde_json::Value;

use crate::config::LanguageConfig;
use crate::errors::Result;
use crate::model::{AttributeValue, Descriptions, LocaleResolver, ModelDescription, NodeId};
use crate::ops::ModelGraph;

use super::attribute::LABEL_ATTRIBUTE;

/// Attaches multi-language labels and tooltips to nodes
#[derive(Clone)]
pub struct DescriptionLinker {
    config: LanguageConfig,
    resolver: Arc<dyn LocaleResolver>,
}

impl std::fmt::Debug for DescriptionLinker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptionLinker")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PartialEq for DescriptionLinker {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config && Arc::ptr_eq(&self.resolver, &other.resolver)
    }
}

impl Default for DescriptionLinker {
    fn default() -> Self {
        Self::new(LanguageConfig::default())
    }
}

impl DescriptionLinker {
    /// Linker resolving through the language configuration itself
    pub fn new(config: LanguageConfig) -> Self {
        let resolver = Arc::new(config.clone());
        Self { config, resolver }
    }

    pub fn with_resolver(config: LanguageConfig, resolver: Arc<dyn LocaleResolver>) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> &LanguageConfig {
        &self.config
    }

    pub fn default_language(&self) -> &str {
        &self.config.default_language
    }

    /// Fill `descriptions` from raw labels and resolve the applicable one
    ///
    /// A primitive label is used for every configured language. When the
    /// default language ends up missing or empty, `fallback_id` is used as
    /// its text.
    pub fn link_descriptions(&self, descriptions: &mut Descriptions, fallback_id: &str, labels: Option<&Value>) {
        self.fill(descriptions, labels);
        if descriptions.get_non_empty(self.default_language()).is_none() {
            descriptions.insert(ModelDescription::new(self.default_language(), fallback_id));
        }
        descriptions.resolve(self.resolver.as_ref());
    }

    /// Like `link_descriptions` but without the default-language fallback
    pub fn link_tooltips(&self, tooltips: &mut Descriptions, labels: Option<&Value>) {
        self.fill(tooltips, labels);
        tooltips.resolve(self.resolver.as_ref());
    }

    fn fill(&self, descriptions: &mut Descriptions, labels: Option<&Value>) {
        match labels {
            None | Some(Value::Null) => {}
            Some(Value::Object(map)) => {
                for (language, value) in map {
                    descriptions.insert(ModelDescription::new(language, label_text(value)));
                }
            }
            Some(primitive) => {
                let text = label_text(primitive);
                for language in self.config.languages() {
                    descriptions.insert(ModelDescription::new(&language, text.clone()));
                }
            }
        }
    }

    /// Descriptions of a node from raw labels
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` for a foreign handle.
    pub fn insert_descriptions(&self, graph: &mut ModelGraph, node: NodeId, labels: Option<&Value>) -> Result<()> {
        let found = graph.node_mut(node)?;
        let fallback = found.id().to_string();
        self.link_descriptions(&mut found.descriptions, &fallback, labels);
        Ok(())
    }

    /// Merge the current values of the node's `label` attribute into its
    /// descriptions
    ///
    /// Returns whether the node has a label attribute.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` for a foreign handle.
    pub fn insert_label_descriptions(&self, graph: &mut ModelGraph, node: NodeId) -> Result<bool> {
        let Some(label) = graph.attribute(node, LABEL_ATTRIBUTE) else {
            return Ok(false);
        };
        let labels = match &graph.attribute_data(label)?.value {
            AttributeValue::Multi(multi) => serde_json::to_value(multi.current_values())?,
            AttributeValue::Single(single) => single.value().clone(),
        };
        self.insert_descriptions(graph, node, Some(&labels))?;
        Ok(true)
    }

    /// Tooltips of a node from raw labels
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` for a foreign handle.
    pub fn insert_tooltips(&self, graph: &mut ModelGraph, node: NodeId, labels: Option<&Value>) -> Result<()> {
        let found = graph.node_mut(node)?;
        self.link_tooltips(&mut found.tooltips, labels);
        Ok(())
    }
}

fn label_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
