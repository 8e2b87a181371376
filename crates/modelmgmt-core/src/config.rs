use serde::{Deserialize, Serialize};

use crate::model::{normalize_language, Descriptions, LocaleResolver, ModelDescription};

/// Languages the engine links and resolves descriptions for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Fallback language; descriptions are synthesized for it
    pub default_language: String,
    /// Language of the current user
    pub user_language: String,
    /// Extra languages a primitive label is expanded into
    pub supported_languages: Vec<String>,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            user_language: "en".to_string(),
            supported_languages: Vec::new(),
        }
    }
}

impl LanguageConfig {
    /// Every configured language, normalized, without duplicates
    pub fn languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = Vec::new();
        let all = [&self.user_language, &self.default_language]
            .into_iter()
            .chain(self.supported_languages.iter());
        for language in all {
            let language = normalize_language(language);
            if !language.is_empty() && !languages.contains(&language) {
                languages.push(language);
            }
        }
        languages
    }
}

/// User language, then default language, then anything non-empty
impl LocaleResolver for LanguageConfig {
    fn resolve<'a>(&self, descriptions: &'a Descriptions) -> Option<&'a ModelDescription> {
        descriptions
            .get_non_empty(&self.user_language)
            .or_else(|| descriptions.get_non_empty(&self.default_language))
            .or_else(|| descriptions.first_non_empty())
    }
}
