//! Conversation list lifecycle and the active conversation.
//!
//! [`SessionState`] is synchronous: each network-backed operation is split
//! into a `begin_*` step that hands out a ticket and a `finish_*` step that
//! applies the response. The panel drives the store in between.

mod loading;
mod state;

pub use state::{ListFetch, SessionState, TranscriptFetch};
