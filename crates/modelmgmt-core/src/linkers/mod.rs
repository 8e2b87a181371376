//! Linkers turn raw payloads into graph nodes
//!
//! Every linker sets the parent back-reference explicitly before listing a
//! node in its owner's collection.

pub mod attribute;
pub mod description;
pub mod meta;
pub mod model;
pub mod node;

pub use description::DescriptionLinker;

use crate::config::LanguageConfig;

/// Entry point for linking payloads into a `ModelGraph`
#[derive(Debug, Clone, Default)]
pub struct ModelLinker {
    descriptions: DescriptionLinker,
}

impl ModelLinker {
    pub fn new(config: LanguageConfig) -> Self {
        Self {
            descriptions: DescriptionLinker::new(config),
        }
    }

    pub fn with_descriptions(descriptions: DescriptionLinker) -> Self {
        Self { descriptions }
    }

    pub fn descriptions(&self) -> &DescriptionLinker {
        &self.descriptions
    }
}
