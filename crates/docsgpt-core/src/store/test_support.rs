//! In-memory store with scripted server behaviour, for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use docsgpt_protocol::{
    ConversationId, ConversationSummary, DocumentDescriptor, DocumentLocation, QueryExchange,
    Transcript,
};

use super::errors::StoreError;
use super::traits::{ConversationStore, DocumentStore};

#[derive(Default)]
struct FakeServer {
    conversations: Vec<ConversationSummary>,
    transcripts: HashMap<ConversationId, Transcript>,
    documents: Vec<DocumentDescriptor>,
    fail_reads: bool,
    decline_renames: bool,
    calls: Vec<String>,
}

/// Cloneable handle: tests keep one clone to script and inspect the server
/// while the panel owns another.
#[derive(Clone, Default)]
pub(crate) struct FakeStore {
    inner: Arc<Mutex<FakeServer>>,
}

pub(crate) fn doc(name: &str, model: &str, location: DocumentLocation) -> DocumentDescriptor {
    DocumentDescriptor {
        name: name.to_string(),
        version: "1".to_string(),
        model: model.to_string(),
        location,
    }
}

pub(crate) fn transcript(prompt: &str, response: &str) -> Transcript {
    Transcript {
        queries: vec![QueryExchange {
            prompt: prompt.to_string(),
            response: Some(response.to_string()),
            sources: Vec::new(),
        }],
    }
}

impl FakeStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_conversations(self, names: &[(&str, &str)]) -> Self {
        {
            let mut server = self.inner.lock().unwrap();
            for (id, name) in names {
                server
                    .conversations
                    .push(ConversationSummary::new(*id, *name));
                server
                    .transcripts
                    .insert(ConversationId::new(*id), transcript(name, "ok"));
            }
        }
        self
    }

    pub(crate) fn with_documents(self, documents: Vec<DocumentDescriptor>) -> Self {
        self.inner.lock().unwrap().documents = documents;
        self
    }

    pub(crate) fn set_fail_reads(&self, fail: bool) {
        self.inner.lock().unwrap().fail_reads = fail;
    }

    pub(crate) fn set_decline_renames(&self, decline: bool) {
        self.inner.lock().unwrap().decline_renames = decline;
    }

    /// Remove a conversation behind the client's back.
    pub(crate) fn drop_conversation(&self, id: &str) {
        let mut server = self.inner.lock().unwrap();
        server.conversations.retain(|c| c.id != *id);
        server.transcripts.remove(&ConversationId::new(id));
    }

    pub(crate) fn server_conversations(&self) -> Vec<ConversationSummary> {
        self.inner.lock().unwrap().conversations.clone()
    }

    pub(crate) fn server_documents(&self) -> Vec<DocumentDescriptor> {
        self.inner.lock().unwrap().documents.clone()
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub(crate) fn call_count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) -> std::sync::MutexGuard<'_, FakeServer> {
        let mut server = self.inner.lock().unwrap();
        server.calls.push(call);
        server
    }
}

fn unavailable(path: &str) -> StoreError {
    StoreError::Status {
        path: path.to_string(),
        status: 503,
        message: "unavailable".to_string(),
    }
}

#[async_trait]
impl ConversationStore for FakeStore {
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, StoreError> {
        let server = self.record("list_conversations".to_string());
        if server.fail_reads {
            return Err(unavailable("/api/conversations"));
        }
        Ok(server.conversations.clone())
    }

    async fn get_conversation(&self, id: &ConversationId) -> Result<Transcript, StoreError> {
        let server = self.record(format!("get_conversation {id}"));
        let path = format!("/api/conversations/{id}");
        if server.fail_reads {
            return Err(unavailable(&path));
        }
        server
            .transcripts
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound { path })
    }

    async fn rename_conversation(
        &self,
        id: &ConversationId,
        name: &str,
    ) -> Result<Option<ConversationSummary>, StoreError> {
        let mut server = self.record(format!("rename_conversation {id} {name}"));
        let path = format!("/api/conversations/{id}/rename");
        if server.decline_renames {
            return Err(StoreError::Rejected {
                path,
                message: "declined".to_string(),
            });
        }
        let summary = server
            .conversations
            .iter_mut()
            .find(|c| c.id == *id)
            .ok_or(StoreError::NotFound { path })?;
        summary.name = name.to_string();
        Ok(Some(summary.clone()))
    }

    async fn delete_conversation(&self, id: &ConversationId) -> Result<(), StoreError> {
        let mut server = self.record(format!("delete_conversation {id}"));
        let before = server.conversations.len();
        server.conversations.retain(|c| c.id != *id);
        if server.conversations.len() == before {
            return Err(StoreError::NotFound {
                path: format!("/api/conversations/{id}/delete"),
            });
        }
        server.transcripts.remove(id);
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FakeStore {
    async fn list_documents(&self) -> Result<Vec<DocumentDescriptor>, StoreError> {
        let server = self.record("list_documents".to_string());
        if server.fail_reads {
            return Err(unavailable("/api/documents"));
        }
        Ok(server.documents.clone())
    }

    async fn delete_document(
        &self,
        location: DocumentLocation,
        name: &str,
    ) -> Result<(), StoreError> {
        let mut server = self.record(format!("delete_document {location} {name}"));
        let before = server.documents.len();
        server
            .documents
            .retain(|d| !(d.name == name && d.location == location));
        if server.documents.len() == before {
            return Err(StoreError::NotFound {
                path: format!("/api/documents/{location}/{name}"),
            });
        }
        Ok(())
    }
}
