//! # docsgpt-config
//!
//! Configuration types, loading, and validation for the DocsGPT navigation
//! client.
//!
//! Every value has a built-in default, so the client runs without any config
//! file or environment variable present.

mod defaults;
mod loading;
mod validation;

pub mod errors;
pub mod paths;
pub mod types;

// Public API re-exports
pub use defaults::{DEFAULT_API_HOST, DEFAULT_EMBEDDINGS_NAME, DEFAULT_NARROW_BREAKPOINT};
pub use errors::ConfigError;
pub use loading::{
    ENV_API_HOST, ENV_EMBEDDINGS_NAME, apply_env_overrides, load_config_file, load_hierarchy,
    merge_configs,
};
pub use paths::{DocsPaths, PathError};
pub use types::{ApiConfig, EmbeddingsConfig, NavConfig, UiConfig};
pub use validation::validate_config;

impl NavConfig {
    /// Load configuration from defaults, config files, and environment.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }
}
