//! Source-document list and the selection gate.

mod state;

pub use state::{DocumentFetch, DocumentState, LoadOutcome};
