//! Route layout of the DocsGPT HTTP API.
//!
//! `Route::segments` yields raw (unencoded) path segments; the client is
//! responsible for percent-encoding them when building a URL.

use crate::types::{ConversationId, DocumentLocation};

/// Axum-style route patterns, used by test servers.
pub const CONVERSATIONS: &str = "/api/conversations";
pub const CONVERSATION: &str = "/api/conversations/:id";
pub const CONVERSATION_RENAME: &str = "/api/conversations/:id/rename";
pub const CONVERSATION_DELETE: &str = "/api/conversations/:id/delete";
pub const DOCUMENTS: &str = "/api/documents";
pub const DOCUMENT: &str = "/api/documents/:location/:name";

/// HTTP method of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// Every endpoint the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    ListConversations,
    GetConversation(&'a ConversationId),
    RenameConversation(&'a ConversationId),
    DeleteConversation(&'a ConversationId),
    ListDocuments,
    DeleteDocument {
        location: DocumentLocation,
        name: &'a str,
    },
}

impl Route<'_> {
    pub fn method(&self) -> Method {
        match self {
            Route::ListConversations | Route::GetConversation(_) | Route::ListDocuments => {
                Method::Get
            }
            Route::RenameConversation(_) | Route::DeleteConversation(_) => Method::Post,
            Route::DeleteDocument { .. } => Method::Delete,
        }
    }

    pub fn segments(&self) -> Vec<&str> {
        match self {
            Route::ListConversations => vec!["api", "conversations"],
            Route::GetConversation(id) => vec!["api", "conversations", id.as_str()],
            Route::RenameConversation(id) => vec!["api", "conversations", id.as_str(), "rename"],
            Route::DeleteConversation(id) => vec!["api", "conversations", id.as_str(), "delete"],
            Route::ListDocuments => vec!["api", "documents"],
            Route::DeleteDocument { location, name } => {
                vec!["api", "documents", location.as_str(), name]
            }
        }
    }

    /// Unencoded path, for logging.
    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }
}
