//! Configuration validation logic.

use crate::errors::ConfigError;
use crate::types::NavConfig;

/// Validate a NavConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - API host must be an `http://` or `https://` URL
/// - Embedding model name, if set, must not be blank
/// - Narrow breakpoint, if set, must be greater than zero
pub fn validate_config(config: &NavConfig) -> Result<(), ConfigError> {
    let host = config.api.host();
    if !(host.starts_with("http://") || host.starts_with("https://")) {
        return Err(ConfigError::InvalidApiHost {
            host: host.to_string(),
        });
    }

    if config.embeddings.name().trim().is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            message: "Embedding model name must not be empty".to_string(),
        });
    }

    if config.ui.narrow_breakpoint() == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "ui.narrow_breakpoint must be greater than zero".to_string(),
        });
    }

    Ok(())
}
