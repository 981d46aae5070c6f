use std::error::Error;

mod navigation;

pub use navigation::NavigationError;

use crate::store::StoreError;

/// Base trait for all client errors
pub trait DocsError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the client
pub type DocsResult<T> = Result<T, Box<dyn DocsError>>;

impl DocsError for docsgpt_config::ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            docsgpt_config::ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            docsgpt_config::ConfigError::InvalidApiHost { .. } => "INVALID_API_HOST",
            docsgpt_config::ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            docsgpt_config::ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            docsgpt_config::ConfigError::ConfigParseError { .. }
                | docsgpt_config::ConfigError::InvalidApiHost { .. }
                | docsgpt_config::ConfigError::InvalidConfiguration { .. }
        )
    }
}

impl DocsError for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            StoreError::ClientInit { .. } => "STORE_CLIENT_INIT",
            StoreError::InvalidHost { .. } => "STORE_INVALID_HOST",
            StoreError::Transport { .. } => "STORE_TRANSPORT",
            StoreError::Status { .. } => "STORE_STATUS",
            StoreError::NotFound { .. } => "STORE_NOT_FOUND",
            StoreError::Rejected { .. } => "STORE_REJECTED",
            StoreError::InvalidResponse { .. } => "STORE_INVALID_RESPONSE",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidHost { .. } | StoreError::NotFound { .. } | StoreError::Rejected { .. }
        )
    }
}

impl DocsError for NavigationError {
    fn error_code(&self) -> &'static str {
        match self {
            NavigationError::FetchFailed { .. } => "FETCH_FAILED",
            NavigationError::NotFound { .. } => "CONVERSATION_NOT_FOUND",
            NavigationError::NotDeletable { .. } => "DOCUMENT_NOT_DELETABLE",
            NavigationError::RenameRejected { .. } => "RENAME_REJECTED",
            NavigationError::DeleteFailed { .. } => "DELETE_FAILED",
            NavigationError::RenameFailed { .. } => "RENAME_FAILED",
            NavigationError::InvalidApiKey => "INVALID_API_KEY",
            NavigationError::IneligibleDocument { .. } => "INELIGIBLE_DOCUMENT",
            NavigationError::Busy { .. } => "OPERATION_BUSY",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            NavigationError::NotFound { .. }
                | NavigationError::NotDeletable { .. }
                | NavigationError::RenameRejected { .. }
                | NavigationError::InvalidApiKey
                | NavigationError::IneligibleDocument { .. }
                | NavigationError::Busy { .. }
        )
    }
}
