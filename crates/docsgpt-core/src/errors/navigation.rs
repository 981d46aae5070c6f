use docsgpt_protocol::{ConversationId, DocumentLocation};

use crate::store::StoreError;

/// Failures surfaced by session, document, and panel operations.
///
/// None of these are fatal: the state that produced them keeps its last
/// known good value.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("Failed to fetch {what}: {source}")]
    FetchFailed {
        what: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("Conversation '{id}' no longer exists on the server")]
    NotFound { id: ConversationId },

    #[error("Document '{name}' is stored {location} and cannot be deleted")]
    NotDeletable {
        name: String,
        location: DocumentLocation,
    },

    #[error("Rename of conversation '{id}' was rejected: {reason}")]
    RenameRejected { id: ConversationId, reason: String },

    #[error("Failed to delete {what} '{name}': {source}")]
    DeleteFailed {
        what: &'static str,
        name: String,
        #[source]
        source: StoreError,
    },

    #[error("Failed to rename conversation '{id}': {source}")]
    RenameFailed {
        id: ConversationId,
        #[source]
        source: StoreError,
    },

    #[error("Invalid API key: cannot be empty")]
    InvalidApiKey,

    #[error("Document '{name}' was built for '{model}', not the configured '{expected}'")]
    IneligibleDocument {
        name: String,
        model: String,
        expected: String,
    },

    #[error("A delete of '{name}' is already in progress")]
    Busy { name: String },
}

impl NavigationError {
    /// Failed read of `what`, keeping the store error as the source.
    pub(crate) fn fetch(what: &'static str, source: StoreError) -> Self {
        NavigationError::FetchFailed { what, source }
    }
}
