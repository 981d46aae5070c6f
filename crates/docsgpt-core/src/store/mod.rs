//! Remote conversation and document store.
//!
//! The traits are the seam between the coordination logic and the network;
//! [`HttpStore`] talks to a DocsGPT API host over HTTP.

mod errors;
mod http;
mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use errors::StoreError;
pub use http::HttpStore;
pub use traits::{ConversationStore, DocumentStore};
