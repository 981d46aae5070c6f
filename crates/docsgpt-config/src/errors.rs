#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config file '{path}': {message}")]
    ConfigParseError { path: String, message: String },

    #[error("Invalid API host '{host}': must start with http:// or https://")]
    InvalidApiHost { host: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("IO error reading config: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Whether the error came from a missing config file.
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, ConfigError::IoError { source } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let error = ConfigError::ConfigParseError {
            path: "/tmp/config.toml".to_string(),
            message: "expected `=`".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse config file '/tmp/config.toml': expected `=`"
        );
    }

    #[test]
    fn test_is_file_not_found() {
        let missing = ConfigError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        assert!(missing.is_file_not_found());

        let denied = ConfigError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "nope",
        ));
        assert!(!denied.is_file_not_found());

        let invalid = ConfigError::InvalidConfiguration {
            message: "x".to_string(),
        };
        assert!(!invalid.is_file_not_found());
    }
}
