use async_trait::async_trait;
use docsgpt_protocol::{
    ConversationId, ConversationSummary, DocumentDescriptor, DocumentLocation, Transcript,
};

use super::errors::StoreError;

/// Conversation endpoints of the remote store.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Every saved conversation, in server order.
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, StoreError>;

    /// Full transcript of one conversation.
    async fn get_conversation(&self, id: &ConversationId) -> Result<Transcript, StoreError>;

    /// Rename a conversation. A declined rename is `StoreError::Rejected`.
    ///
    /// Returns the updated summary when the server echoes one.
    async fn rename_conversation(
        &self,
        id: &ConversationId,
        name: &str,
    ) -> Result<Option<ConversationSummary>, StoreError>;

    async fn delete_conversation(&self, id: &ConversationId) -> Result<(), StoreError>;
}

/// Source-document endpoints of the remote store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list_documents(&self) -> Result<Vec<DocumentDescriptor>, StoreError>;

    async fn delete_document(
        &self,
        location: DocumentLocation,
        name: &str,
    ) -> Result<(), StoreError>;
}
