use std::collections::HashSet;

use docsgpt_protocol::ConversationId;

/// Tracks in-flight conversation requests.
///
/// - List fetches carry a monotonically increasing sequence number so that a
///   response overtaken by a newer one is never applied.
/// - Selections carry a generation; any later selection, new chat, or delete
///   of the pending id makes an outstanding transcript response stale.
/// - Deletes are tracked per id to prevent double-dispatch.
#[derive(Clone, Debug, Default)]
pub(super) struct LoadingState {
    lists_in_flight: usize,
    last_issued_seq: u64,
    last_applied_seq: u64,
    selection_generation: u64,
    pending_selection: Option<ConversationId>,
    deleting: HashSet<ConversationId>,
    mutations_in_flight: usize,
}

impl LoadingState {
    pub(super) fn start_list(&mut self) -> u64 {
        self.lists_in_flight += 1;
        self.last_issued_seq += 1;
        self.last_issued_seq
    }

    /// Record a finished list fetch. Returns whether its result is newer than
    /// anything applied so far.
    pub(super) fn finish_list(&mut self, seq: u64) -> bool {
        self.lists_in_flight = self.lists_in_flight.saturating_sub(1);
        seq > self.last_applied_seq
    }

    pub(super) fn mark_applied(&mut self, seq: u64) {
        self.last_applied_seq = seq;
    }

    pub(super) fn is_list_loading(&self) -> bool {
        self.lists_in_flight > 0
    }

    pub(super) fn next_selection(&mut self) -> u64 {
        self.pending_selection = None;
        self.selection_generation += 1;
        self.selection_generation
    }

    pub(super) fn start_selection(&mut self, id: ConversationId) -> u64 {
        let generation = self.next_selection();
        self.pending_selection = Some(id);
        generation
    }

    /// Record a finished transcript fetch. Returns whether it is still the
    /// current selection.
    pub(super) fn finish_selection(&mut self, generation: u64) -> bool {
        if !self.is_current_selection(generation) {
            return false;
        }
        self.pending_selection = None;
        true
    }

    /// Invalidate an outstanding selection of `id`. Returns whether one was
    /// pending.
    pub(super) fn cancel_selection_of(&mut self, id: &ConversationId) -> bool {
        if self.pending_selection.as_ref() != Some(id) {
            return false;
        }
        self.next_selection();
        true
    }

    pub(super) fn is_current_selection(&self, generation: u64) -> bool {
        generation == self.selection_generation
    }

    /// Returns false if a delete of `id` is already in flight.
    pub(super) fn start_delete(&mut self, id: &ConversationId) -> bool {
        if !self.deleting.insert(id.clone()) {
            return false;
        }
        self.mutations_in_flight += 1;
        true
    }

    pub(super) fn finish_delete(&mut self, id: &ConversationId) {
        if self.deleting.remove(id) {
            self.mutations_in_flight = self.mutations_in_flight.saturating_sub(1);
        }
    }

    pub(super) fn is_deleting(&self, id: &ConversationId) -> bool {
        self.deleting.contains(id)
    }

    pub(super) fn start_rename(&mut self) {
        self.mutations_in_flight += 1;
    }

    pub(super) fn finish_rename(&mut self) {
        self.mutations_in_flight = self.mutations_in_flight.saturating_sub(1);
    }

    pub(super) fn has_pending_mutations(&self) -> bool {
        self.mutations_in_flight > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_sequence_rejects_overtaken_fetch() {
        let mut state = LoadingState::default();
        let first = state.start_list();
        let second = state.start_list();
        assert!(state.is_list_loading());

        assert!(state.finish_list(second));
        state.mark_applied(second);
        assert!(!state.finish_list(first));
        assert!(!state.is_list_loading());
    }

    #[test]
    fn test_selection_generation() {
        let mut state = LoadingState::default();
        let first = state.next_selection();
        let second = state.next_selection();
        assert!(!state.is_current_selection(first));
        assert!(state.is_current_selection(second));
    }

    #[test]
    fn test_cancel_selection_only_matches_pending_id() {
        let mut state = LoadingState::default();
        let a = ConversationId::new("a");
        let generation = state.start_selection(a.clone());

        assert!(!state.cancel_selection_of(&ConversationId::new("b")));
        assert!(state.is_current_selection(generation));

        assert!(state.cancel_selection_of(&a));
        assert!(!state.finish_selection(generation));
        assert!(!state.cancel_selection_of(&a));
    }

    #[test]
    fn test_finished_selection_is_not_cancelled() {
        let mut state = LoadingState::default();
        let a = ConversationId::new("a");
        let generation = state.start_selection(a.clone());

        assert!(state.finish_selection(generation));
        assert!(!state.cancel_selection_of(&a));
    }

    #[test]
    fn test_delete_tracking_prevents_double_dispatch() {
        let mut state = LoadingState::default();
        let id = ConversationId::new("a");

        assert!(state.start_delete(&id));
        assert!(!state.start_delete(&id));
        assert!(state.is_deleting(&id));
        assert!(state.has_pending_mutations());

        state.finish_delete(&id);
        assert!(!state.is_deleting(&id));
        assert!(!state.has_pending_mutations());
    }

    #[test]
    fn test_finish_delete_for_unknown_id_is_noop() {
        let mut state = LoadingState::default();
        state.start_rename();
        state.finish_delete(&ConversationId::new("never-started"));
        assert!(state.has_pending_mutations());
        state.finish_rename();
        assert!(!state.has_pending_mutations());
    }
}
