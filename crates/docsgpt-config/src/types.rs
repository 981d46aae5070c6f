//! Configuration types.
//!
//! All leaf fields are optional so that partial config files merge cleanly;
//! accessor methods apply the built-in defaults.

use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_API_HOST, DEFAULT_EMBEDDINGS_NAME, DEFAULT_NARROW_BREAKPOINT};

/// Root configuration for the navigation client.
///
/// ```toml
/// [api]
/// host = "http://localhost:7091"
///
/// [embeddings]
/// name = "openai_text-embedding-ada-002"
///
/// [ui]
/// narrow_breakpoint = 768
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub embeddings: EmbeddingsConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Remote backend settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the DocsGPT API.
    pub host: Option<String>,
}

impl ApiConfig {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_API_HOST)
    }
}

/// Embedding model settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsConfig {
    /// Only documents built with this model are selectable.
    pub name: Option<String>,
}

impl EmbeddingsConfig {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_EMBEDDINGS_NAME)
    }
}

/// Layout settings consumed by the navigation panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    pub narrow_breakpoint: Option<u32>,
}

impl UiConfig {
    pub fn narrow_breakpoint(&self) -> u32 {
        self.narrow_breakpoint.unwrap_or(DEFAULT_NARROW_BREAKPOINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_unset() {
        let config = NavConfig::default();
        assert_eq!(config.api.host(), DEFAULT_API_HOST);
        assert_eq!(config.embeddings.name(), DEFAULT_EMBEDDINGS_NAME);
        assert_eq!(config.ui.narrow_breakpoint(), 768);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: NavConfig = toml::from_str("").unwrap();
        assert_eq!(config, NavConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config: NavConfig = toml::from_str(
            r#"
[embeddings]
name = "openai_text-embedding-ada-002"
"#,
        )
        .unwrap();
        assert_eq!(config.embeddings.name(), "openai_text-embedding-ada-002");
        assert_eq!(config.api.host(), DEFAULT_API_HOST);
    }
}
