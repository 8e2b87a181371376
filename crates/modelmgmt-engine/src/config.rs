//! Engine configuration
//!
//! Values come from an optional file, overridden by `MODELMGMT__*`
//! environment variables with `__` as the nesting separator, e.g.
//! `MODELMGMT__LANGUAGES__USER_LANGUAGE=bg`.

use std::collections::HashMap;
use std::path::Path;

use modelmgmt_core::logging_facility::Profile;
use modelmgmt_core::LanguageConfig;
use serde::Deserialize;

use crate::errors::{config_error, Result};

pub const ENV_PREFIX: &str = "MODELMGMT";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub languages: LanguageConfig,
    pub logging: Profile,
}

impl EngineConfig {
    /// Load from `path` (if it exists) and the process environment
    ///
    /// # Errors
    ///
    /// Returns a `Config` error for unreadable files or malformed values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`load`](Self::load), with the environment given explicitly
    ///
    /// `None` reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error for unreadable files or malformed values.
    pub fn load_with_env(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        let settings = builder
            .add_source(environment().source(env))
            .build()
            .map_err(config_error)?;
        settings.try_deserialize().map_err(config_error)
    }

    /// Parse a JSON document, without environment overrides
    ///
    /// # Errors
    ///
    /// Returns a `Config` error for malformed values.
    pub fn from_json(json: &str) -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(json, config::FileFormat::Json))
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(config_error)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("languages.supported_languages")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelmgmt_core::ExErrorKind;

    fn env(entries: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = EngineConfig::load_with_env(None, env(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.languages.default_language, "en");
    }

    #[test]
    fn test_environment_overrides() {
        let config = EngineConfig::load_with_env(
            None,
            env(&[
                ("MODELMGMT__LANGUAGES__USER_LANGUAGE", "bg"),
                ("MODELMGMT__LANGUAGES__SUPPORTED_LANGUAGES", "en,bg"),
                ("MODELMGMT__LOGGING", "production"),
            ]),
        )
        .unwrap();

        assert_eq!(config.languages.user_language, "bg");
        assert_eq!(config.languages.supported_languages, vec!["en", "bg"]);
        assert_eq!(config.logging, Profile::Production);
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let config = EngineConfig::load_with_env(Some(Path::new("/nonexistent/modelmgmt.toml")), env(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_json_document() {
        let config = EngineConfig::from_json(r#"{"languages": {"default_language": "de"}, "logging": "test"}"#).unwrap();
        assert_eq!(config.languages.default_language, "de");
        assert_eq!(config.languages.user_language, "en");
        assert_eq!(config.logging, Profile::Test);
    }

    #[test]
    fn test_unknown_profile_is_config_error() {
        let err = EngineConfig::from_json(r#"{"logging": "verbose"}"#).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Config);
    }
}
