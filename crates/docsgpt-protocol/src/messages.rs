use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ConversationId, DocumentLocation};

/// One entry of the conversation list as returned by the server.
///
/// Only `name` changes after fetch (via rename); identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub id: ConversationId,
    pub name: String,
    #[serde(default, alias = "date", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl ConversationSummary {
    pub fn new(id: impl Into<ConversationId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            last_updated: None,
        }
    }
}

/// Full transcript of a persisted conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub queries: Vec<QueryExchange>,
}

impl Transcript {
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

/// A single prompt/response pair inside a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryExchange {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceRef>,
}

/// Retrieval source quoted alongside a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub text: String,
}

/// An indexed documentation collection usable as retrieval context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentDescriptor {
    pub name: String,
    pub version: String,
    /// Embedding model the index was built with.
    pub model: String,
    pub location: DocumentLocation,
}

impl DocumentDescriptor {
    /// Whether this index was built for the given embedding model.
    pub fn is_eligible_for(&self, embeddings_model: &str) -> bool {
        self.model == embeddings_model
    }

    pub fn is_local(&self) -> bool {
        self.location == DocumentLocation::Local
    }

    /// Display label, e.g. `"default 0.1.0"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}

/// Body of `POST /api/conversations/{id}/rename`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRequest {
    pub name: String,
}
