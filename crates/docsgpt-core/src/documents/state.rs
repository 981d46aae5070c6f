use std::collections::HashSet;

use docsgpt_protocol::DocumentDescriptor;
use tracing::{debug, info, warn};

use crate::errors::NavigationError;
use crate::store::StoreError;

/// Ticket for an outstanding document-list fetch.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentFetch {
    seq: u64,
}

/// Result of applying a document-list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Applied, selection unchanged.
    Applied,
    /// Applied, and the only eligible document was selected.
    AutoSelected,
    /// Overtaken by a newer fetch and discarded.
    Stale,
}

/// Available source documents and the one selected for retrieval.
#[derive(Debug)]
pub struct DocumentState {
    embeddings_model: String,
    documents: Option<Vec<DocumentDescriptor>>,
    selected: Option<DocumentDescriptor>,
    last_issued_seq: u64,
    last_applied_seq: u64,
    deleting: HashSet<String>,
}

impl DocumentState {
    pub fn new(embeddings_model: impl Into<String>) -> Self {
        Self {
            embeddings_model: embeddings_model.into(),
            documents: None,
            selected: None,
            last_issued_seq: 0,
            last_applied_seq: 0,
            deleting: HashSet::new(),
        }
    }

    /// Start with a selection restored by the host.
    pub fn with_selected(mut self, document: Option<DocumentDescriptor>) -> Self {
        self.selected = document;
        self
    }

    pub fn embeddings_model(&self) -> &str {
        &self.embeddings_model
    }

    /// All documents the server reported, eligible or not.
    pub fn documents(&self) -> Option<&[DocumentDescriptor]> {
        self.documents.as_deref()
    }

    /// Documents built for the configured embedding model.
    pub fn eligible(&self) -> Vec<&DocumentDescriptor> {
        self.documents
            .iter()
            .flatten()
            .filter(|d| d.is_eligible_for(&self.embeddings_model))
            .collect()
    }

    pub fn selected(&self) -> Option<&DocumentDescriptor> {
        self.selected.as_ref()
    }

    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    pub fn begin_load(&mut self) -> DocumentFetch {
        self.last_issued_seq += 1;
        debug!(event = "core.documents.fetch_started", seq = self.last_issued_seq);
        DocumentFetch {
            seq: self.last_issued_seq,
        }
    }

    /// Apply a document-list response. When nothing is selected and exactly
    /// one document is eligible, that document becomes the selection.
    pub fn finish_load(
        &mut self,
        ticket: DocumentFetch,
        result: Result<Vec<DocumentDescriptor>, StoreError>,
    ) -> Result<LoadOutcome, NavigationError> {
        let documents = result.map_err(|e| {
            warn!(event = "core.documents.fetch_failed", seq = ticket.seq, error = %e);
            NavigationError::fetch("documents", e)
        })?;

        if ticket.seq <= self.last_applied_seq {
            debug!(event = "core.documents.fetch_stale", seq = ticket.seq);
            return Ok(LoadOutcome::Stale);
        }
        self.last_applied_seq = ticket.seq;
        self.documents = Some(documents);

        let eligible = self.eligible();
        info!(
            event = "core.documents.fetch_completed",
            seq = ticket.seq,
            eligible = eligible.len()
        );

        if self.selected.is_none() && eligible.len() == 1 {
            let only = eligible[0].clone();
            info!(event = "core.documents.auto_selected", name = %only.name);
            self.selected = Some(only);
            return Ok(LoadOutcome::AutoSelected);
        }
        Ok(LoadOutcome::Applied)
    }

    /// Select a document for retrieval. Documents built for another
    /// embedding model are rejected.
    pub fn select(&mut self, document: DocumentDescriptor) -> Result<(), NavigationError> {
        if !document.is_eligible_for(&self.embeddings_model) {
            warn!(
                event = "core.documents.select_ineligible",
                name = %document.name,
                model = %document.model
            );
            return Err(NavigationError::IneligibleDocument {
                name: document.name,
                model: document.model,
                expected: self.embeddings_model.clone(),
            });
        }
        info!(event = "core.documents.selected", name = %document.name);
        self.selected = Some(document);
        Ok(())
    }

    /// Check a delete before any request goes out. Only local documents may
    /// be deleted, one request at a time.
    pub fn begin_delete(&mut self, document: &DocumentDescriptor) -> Result<(), NavigationError> {
        if !document.is_local() {
            warn!(
                event = "core.documents.delete_not_deletable",
                name = %document.name,
                location = %document.location
            );
            return Err(NavigationError::NotDeletable {
                name: document.name.clone(),
                location: document.location,
            });
        }
        if !self.deleting.insert(document.name.clone()) {
            warn!(event = "core.documents.delete_busy", name = %document.name);
            return Err(NavigationError::Busy {
                name: document.name.clone(),
            });
        }
        debug!(event = "core.documents.delete_started", name = %document.name);
        Ok(())
    }

    /// Apply a delete outcome. On success the row is removed locally; the
    /// selection is left as is.
    pub fn finish_delete(
        &mut self,
        document: &DocumentDescriptor,
        result: Result<(), StoreError>,
    ) -> Result<(), NavigationError> {
        self.deleting.remove(&document.name);

        if let Err(e) = result {
            warn!(event = "core.documents.delete_failed", name = %document.name, error = %e);
            return Err(NavigationError::DeleteFailed {
                what: "document",
                name: document.name.clone(),
                source: e,
            });
        }

        if let Some(documents) = self.documents.as_mut() {
            documents.retain(|d| d != document);
        }
        info!(event = "core.documents.delete_completed", name = %document.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::doc;
    use docsgpt_protocol::DocumentLocation;

    const MODEL: &str = "m1";

    fn loaded(documents: Vec<DocumentDescriptor>) -> (DocumentState, LoadOutcome) {
        let mut state = DocumentState::new(MODEL);
        let ticket = state.begin_load();
        let outcome = state.finish_load(ticket, Ok(documents)).unwrap();
        (state, outcome)
    }

    #[test]
    fn test_single_eligible_document_is_auto_selected() {
        let docs = doc("Docs", MODEL, DocumentLocation::Local);
        let (state, outcome) = loaded(vec![docs.clone()]);
        assert_eq!(outcome, LoadOutcome::AutoSelected);
        assert_eq!(state.selected(), Some(&docs));
    }

    #[test]
    fn test_ineligible_documents_do_not_count_for_auto_select() {
        let (state, outcome) = loaded(vec![
            doc("Docs", MODEL, DocumentLocation::Remote),
            doc("Other", "m2", DocumentLocation::Remote),
        ]);
        assert_eq!(outcome, LoadOutcome::AutoSelected);
        assert_eq!(state.selected().unwrap().name, "Docs");
        assert_eq!(state.eligible().len(), 1);
        assert_eq!(state.documents().unwrap().len(), 2);
    }

    #[test]
    fn test_two_eligible_documents_stay_unselected() {
        let (state, outcome) = loaded(vec![
            doc("A", MODEL, DocumentLocation::Remote),
            doc("B", MODEL, DocumentLocation::Local),
        ]);
        assert_eq!(outcome, LoadOutcome::Applied);
        assert!(!state.has_selection());
    }

    #[test]
    fn test_existing_selection_is_not_replaced() {
        let restored = doc("Restored", MODEL, DocumentLocation::Remote);
        let mut state = DocumentState::new(MODEL).with_selected(Some(restored.clone()));
        let ticket = state.begin_load();
        let outcome = state
            .finish_load(ticket, Ok(vec![doc("Docs", MODEL, DocumentLocation::Local)]))
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Applied);
        assert_eq!(state.selected(), Some(&restored));
    }

    #[test]
    fn test_failed_load_keeps_state() {
        let (mut state, _) = loaded(vec![doc("A", MODEL, DocumentLocation::Remote)]);
        let ticket = state.begin_load();
        let err = state
            .finish_load(
                ticket,
                Err(StoreError::Status {
                    path: "/api/documents".to_string(),
                    status: 500,
                    message: String::new(),
                }),
            )
            .unwrap_err();
        assert!(matches!(err, NavigationError::FetchFailed { what: "documents", .. }));
        assert_eq!(state.documents().unwrap().len(), 1);
    }

    #[test]
    fn test_stale_load_discarded() {
        let mut state = DocumentState::new(MODEL);
        let first = state.begin_load();
        let second = state.begin_load();
        state.finish_load(second, Ok(vec![])).unwrap();
        let outcome = state
            .finish_load(first, Ok(vec![doc("A", MODEL, DocumentLocation::Local)]))
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Stale);
        assert_eq!(state.documents(), Some(&[][..]));
        assert!(!state.has_selection());
    }

    #[test]
    fn test_select_rejects_other_model() {
        let mut state = DocumentState::new(MODEL);
        let err = state
            .select(doc("Other", "m2", DocumentLocation::Remote))
            .unwrap_err();
        assert!(matches!(err, NavigationError::IneligibleDocument { ref expected, .. } if expected == MODEL));
        assert!(!state.has_selection());
    }

    #[test]
    fn test_remote_document_not_deletable() {
        let remote = doc("Docs", MODEL, DocumentLocation::Remote);
        let (mut state, _) = loaded(vec![remote.clone(), doc("B", MODEL, DocumentLocation::Local)]);
        let err = state.begin_delete(&remote).unwrap_err();
        assert!(matches!(err, NavigationError::NotDeletable { .. }));
        assert_eq!(state.documents().unwrap().len(), 2);
    }

    #[test]
    fn test_local_delete_removes_row_and_keeps_selection() {
        let local = doc("Docs", MODEL, DocumentLocation::Local);
        let (mut state, _) = loaded(vec![local.clone()]);
        assert_eq!(state.selected(), Some(&local));

        state.begin_delete(&local).unwrap();
        assert!(matches!(
            state.begin_delete(&local),
            Err(NavigationError::Busy { .. })
        ));
        state.finish_delete(&local, Ok(())).unwrap();

        assert_eq!(state.documents(), Some(&[][..]));
        assert_eq!(state.selected(), Some(&local));
    }

    #[test]
    fn test_failed_delete_keeps_row() {
        let local = doc("Docs", MODEL, DocumentLocation::Local);
        let (mut state, _) = loaded(vec![local.clone()]);
        state.begin_delete(&local).unwrap();
        let err = state
            .finish_delete(
                &local,
                Err(StoreError::NotFound {
                    path: "/api/documents/local/Docs".to_string(),
                }),
            )
            .unwrap_err();
        assert!(matches!(err, NavigationError::DeleteFailed { .. }));
        assert_eq!(state.documents().unwrap().len(), 1);
        assert!(state.begin_delete(&local).is_ok());
    }
}
