//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Later sources override earlier ones:
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.docsgpt/config.toml`
//! 3. **Project config** - `./.docsgpt/config.toml`
//! 4. **Environment** - `DOCSGPT_API_HOST`, `DOCSGPT_EMBEDDINGS_NAME`
//! 5. **CLI arguments** - applied by the caller (highest priority)

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::errors::ConfigError;
use crate::paths::DocsPaths;
use crate::types::{ApiConfig, EmbeddingsConfig, NavConfig, UiConfig};
use crate::validation::validate_config;

/// Environment variable overriding the API base URL.
pub const ENV_API_HOST: &str = "DOCSGPT_API_HOST";

/// Environment variable overriding the embedding model identifier.
pub const ENV_EMBEDDINGS_NAME: &str = "DOCSGPT_EMBEDDINGS_NAME";

/// Load configuration from the full hierarchy.
///
/// # Errors
///
/// Missing config files are not errors. Parse errors and validation
/// failures are.
pub fn load_hierarchy() -> Result<NavConfig, ConfigError> {
    let user_config = match DocsPaths::resolve() {
        Ok(paths) => Some(paths.user_config()),
        Err(e) => {
            warn!(event = "config.user_path_unavailable", error = %e);
            None
        }
    };
    let project_root = std::env::current_dir()?;
    let project_config = DocsPaths::project_config(&project_root);

    load_from_sources(
        user_config.as_deref(),
        Some(&project_config),
        |key| std::env::var(key).ok(),
    )
}

/// Load and merge the given config files, then apply environment overrides.
pub(crate) fn load_from_sources(
    user_config: Option<&Path>,
    project_config: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<NavConfig, ConfigError> {
    let mut config = NavConfig::default();

    for path in [user_config, project_config].into_iter().flatten() {
        match load_config_file(path) {
            Ok(file_config) => {
                debug!(event = "config.file_loaded", path = %path.display());
                config = merge_configs(config, file_config);
            }
            Err(e) if e.is_file_not_found() => {}
            Err(e) => return Err(e),
        }
    }

    let config = apply_env_overrides(config, env);
    validate_config(&config)?;

    Ok(config)
}

/// Load a single configuration file.
pub fn load_config_file(path: &Path) -> Result<NavConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Merge two configurations, with `override_config` taking precedence.
///
/// Override values replace base values only when present.
pub fn merge_configs(base: NavConfig, override_config: NavConfig) -> NavConfig {
    NavConfig {
        api: ApiConfig {
            host: override_config.api.host.or(base.api.host),
        },
        embeddings: EmbeddingsConfig {
            name: override_config.embeddings.name.or(base.embeddings.name),
        },
        ui: UiConfig {
            narrow_breakpoint: override_config
                .ui
                .narrow_breakpoint
                .or(base.ui.narrow_breakpoint),
        },
    }
}

/// Apply environment overrides. Empty values are ignored.
pub fn apply_env_overrides(
    mut config: NavConfig,
    env: impl Fn(&str) -> Option<String>,
) -> NavConfig {
    let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    if let Some(host) = non_empty(ENV_API_HOST) {
        debug!(event = "config.env_override", key = ENV_API_HOST);
        config.api.host = Some(host);
    }
    if let Some(name) = non_empty(ENV_EMBEDDINGS_NAME) {
        debug!(event = "config.env_override", key = ENV_EMBEDDINGS_NAME);
        config.embeddings.name = Some(name);
    }
    config
}
