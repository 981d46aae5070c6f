//! # docsgpt-protocol
//!
//! Wire types for the DocsGPT conversation and document API.
//!
//! Shared by the HTTP client in `docsgpt-core` and by the in-process test
//! servers, so both sides agree on JSON shapes and route layout.

mod messages;
pub mod routes;
mod types;

pub use messages::{
    ConversationSummary, DocumentDescriptor, QueryExchange, RenameRequest, SourceRef, Transcript,
};
pub use types::{ConversationId, DocumentLocation};
