use std::collections::HashSet;

use docsgpt_protocol::{ConversationId, ConversationSummary, Transcript};
use tracing::{debug, info, warn};

use super::loading::LoadingState;
use crate::errors::NavigationError;
use crate::store::StoreError;

/// Ticket for an outstanding conversation-list fetch.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFetch {
    seq: u64,
}

/// Ticket for an outstanding transcript fetch.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptFetch {
    id: ConversationId,
    generation: u64,
}

impl TranscriptFetch {
    pub fn id(&self) -> &ConversationId {
        &self.id
    }
}

/// Conversation list, active conversation, and its transcript.
///
/// The list is `None` until the first successful fetch; `Some(vec![])` is a
/// loaded but empty list.
#[derive(Debug, Default)]
pub struct SessionState {
    conversations: Option<Vec<ConversationSummary>>,
    active_id: Option<ConversationId>,
    transcript: Transcript,
    loading: LoadingState,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Queries ---

    pub fn conversations(&self) -> Option<&[ConversationSummary]> {
        self.conversations.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.conversations.is_some()
    }

    /// `None` means a new, unsaved chat.
    pub fn active_id(&self) -> Option<&ConversationId> {
        self.active_id.as_ref()
    }

    pub fn active_conversation(&self) -> Option<&ConversationSummary> {
        let id = self.active_id.as_ref()?;
        self.conversations
            .as_ref()?
            .iter()
            .find(|c| &c.id == id)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_loading_list(&self) -> bool {
        self.loading.is_list_loading()
    }

    /// True while a rename or delete is awaiting the server.
    pub fn has_pending_mutations(&self) -> bool {
        self.loading.has_pending_mutations()
    }

    // --- List fetch ---

    /// Start the initial list load.
    ///
    /// Returns `None` when a fetch is already in flight or the list is
    /// already populated; no request should be sent in that case.
    pub fn begin_load(&mut self) -> Option<ListFetch> {
        if self.loading.is_list_loading() || self.conversations.is_some() {
            debug!(
                event = "core.session.load_skipped",
                in_flight = self.loading.is_list_loading(),
                loaded = self.conversations.is_some()
            );
            return None;
        }
        Some(self.begin_resync())
    }

    /// Start an unconditional list fetch, used after mutations.
    pub fn begin_resync(&mut self) -> ListFetch {
        let seq = self.loading.start_list();
        debug!(event = "core.session.list_fetch_started", seq = seq);
        ListFetch { seq }
    }

    /// Apply a list response. Returns `Ok(false)` when the response was
    /// overtaken by a newer one and discarded.
    ///
    /// On failure the previous list is kept.
    pub fn finish_load(
        &mut self,
        ticket: ListFetch,
        result: Result<Vec<ConversationSummary>, StoreError>,
    ) -> Result<bool, NavigationError> {
        let newest = self.loading.finish_list(ticket.seq);

        let conversations = match result {
            Ok(conversations) => conversations,
            Err(e) => {
                warn!(
                    event = "core.session.list_fetch_failed",
                    seq = ticket.seq,
                    error = %e
                );
                return Err(NavigationError::fetch("conversations", e));
            }
        };

        if !newest {
            debug!(event = "core.session.list_fetch_stale", seq = ticket.seq);
            return Ok(false);
        }

        let conversations = dedup_by_id(conversations);
        info!(
            event = "core.session.list_fetch_completed",
            seq = ticket.seq,
            count = conversations.len()
        );
        self.loading.mark_applied(ticket.seq);
        self.conversations = Some(conversations);
        Ok(true)
    }

    // --- Selection ---

    pub fn begin_select(&mut self, id: ConversationId) -> TranscriptFetch {
        let generation = self.loading.start_selection(id.clone());
        debug!(event = "core.session.select_started", id = %id, generation = generation);
        TranscriptFetch { id, generation }
    }

    /// Apply a transcript response. Returns `Ok(false)` when a later
    /// selection, new chat, or delete of the conversation made the response
    /// stale.
    pub fn finish_select(
        &mut self,
        ticket: TranscriptFetch,
        result: Result<Transcript, StoreError>,
    ) -> Result<bool, NavigationError> {
        if !self.loading.finish_selection(ticket.generation) {
            debug!(event = "core.session.select_stale", id = %ticket.id);
            return Ok(false);
        }

        match result {
            Ok(transcript) => {
                info!(
                    event = "core.session.select_completed",
                    id = %ticket.id,
                    queries = transcript.queries.len()
                );
                self.active_id = Some(ticket.id);
                self.transcript = transcript;
                Ok(true)
            }
            Err(e) if e.is_not_found() => {
                warn!(event = "core.session.select_not_found", id = %ticket.id);
                Err(NavigationError::NotFound { id: ticket.id })
            }
            Err(e) => {
                warn!(event = "core.session.select_failed", id = %ticket.id, error = %e);
                Err(NavigationError::fetch("transcript", e))
            }
        }
    }

    /// Switch to a new, unsaved chat. The saved list is untouched.
    pub fn start_new_conversation(&mut self) {
        self.loading.next_selection();
        self.active_id = None;
        self.transcript = Transcript::default();
        info!(event = "core.session.new_conversation");
    }

    // --- Delete ---

    pub fn begin_delete(&mut self, id: &ConversationId) -> Result<(), NavigationError> {
        if !self.loading.start_delete(id) {
            warn!(event = "core.session.delete_busy", id = %id);
            return Err(NavigationError::Busy {
                name: id.to_string(),
            });
        }
        debug!(event = "core.session.delete_started", id = %id);
        Ok(())
    }

    /// Record the delete outcome. Returns whether the deleted conversation
    /// was the active one, in which case a new chat is started.
    ///
    /// The list itself is only replaced by the resync fetch that follows.
    pub fn finish_delete(
        &mut self,
        id: &ConversationId,
        result: Result<(), StoreError>,
    ) -> Result<bool, NavigationError> {
        self.loading.finish_delete(id);

        match result {
            Ok(()) => {
                info!(event = "core.session.delete_completed", id = %id);
                if self.loading.cancel_selection_of(id) {
                    debug!(event = "core.session.select_cancelled", id = %id);
                }
                let was_active = self.active_id.as_ref() == Some(id);
                if was_active {
                    self.start_new_conversation();
                }
                Ok(was_active)
            }
            Err(e) if e.is_not_found() => {
                warn!(event = "core.session.delete_not_found", id = %id);
                Err(NavigationError::NotFound { id: id.clone() })
            }
            Err(e) => {
                warn!(event = "core.session.delete_failed", id = %id, error = %e);
                Err(NavigationError::DeleteFailed {
                    what: "conversation",
                    name: id.to_string(),
                    source: e,
                })
            }
        }
    }

    // --- Rename ---

    pub fn begin_rename(&mut self, id: &ConversationId, name: &str) -> Result<(), NavigationError> {
        if name.trim().is_empty() {
            warn!(event = "core.session.rename_rejected", id = %id, reason = "empty name");
            return Err(NavigationError::RenameRejected {
                id: id.clone(),
                reason: "name cannot be empty".to_string(),
            });
        }
        if self.loading.is_deleting(id) {
            warn!(event = "core.session.rename_busy", id = %id);
            return Err(NavigationError::Busy {
                name: id.to_string(),
            });
        }
        self.loading.start_rename();
        debug!(event = "core.session.rename_started", id = %id, name = name);
        Ok(())
    }

    /// Record the rename outcome. Returns whether the renamed conversation is
    /// the active one.
    pub fn finish_rename(
        &mut self,
        id: &ConversationId,
        result: Result<Option<ConversationSummary>, StoreError>,
    ) -> Result<bool, NavigationError> {
        self.loading.finish_rename();

        match result {
            Ok(_) => {
                info!(event = "core.session.rename_completed", id = %id);
                Ok(self.active_id.as_ref() == Some(id))
            }
            Err(StoreError::Rejected { message, .. }) => {
                warn!(event = "core.session.rename_rejected", id = %id, reason = %message);
                Err(NavigationError::RenameRejected {
                    id: id.clone(),
                    reason: message,
                })
            }
            Err(e) if e.is_not_found() => {
                warn!(event = "core.session.rename_not_found", id = %id);
                Err(NavigationError::NotFound { id: id.clone() })
            }
            Err(e) => {
                warn!(event = "core.session.rename_failed", id = %id, error = %e);
                Err(NavigationError::RenameFailed {
                    id: id.clone(),
                    source: e,
                })
            }
        }
    }
}

/// Keep the first occurrence of each id, preserving server order.
fn dedup_by_id(conversations: Vec<ConversationSummary>) -> Vec<ConversationSummary> {
    let mut seen = HashSet::new();
    let before = conversations.len();
    let unique: Vec<_> = conversations
        .into_iter()
        .filter(|c| seen.insert(c.id.clone()))
        .collect();
    if unique.len() != before {
        warn!(
            event = "core.session.duplicate_ids_dropped",
            dropped = before - unique.len()
        );
    }
    unique
}
