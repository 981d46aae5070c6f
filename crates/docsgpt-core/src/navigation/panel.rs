use std::cell::RefCell;
use std::rc::Rc;

use docsgpt_protocol::{ConversationId, DocumentDescriptor};
use tracing::{debug, info};

use super::layout::{PanelLayout, Route};
use super::state::{AppState, PanelOptions};
use crate::dismissal::{OutsideDismissal, Point, PointerEvents, Subscription};
use crate::errors::NavigationError;
use crate::modal::{ModalChannel, ModalState};
use crate::store::{ConversationStore, DocumentStore};

/// User-facing navigation actions over a remote store.
///
/// Single-threaded. Each async action updates [`AppState`] before and after
/// its request without holding a borrow across the await, so actions may be
/// interleaved on one task.
pub struct NavigationPanel<S> {
    store: S,
    state: Rc<RefCell<AppState>>,
    pointer: PointerEvents,
    _dismissals: Vec<Subscription>,
}

impl<S> NavigationPanel<S>
where
    S: ConversationStore + DocumentStore,
{
    pub fn new(store: S, options: PanelOptions) -> Self {
        let state = Rc::new(RefCell::new(AppState::new(&options)));
        let pointer = PointerEvents::new();
        let dismissals = vec![
            docs_list_dismissal(&state, &pointer),
            panel_dismissal(&state, &pointer),
        ];

        info!(
            event = "core.panel.created",
            embeddings_model = %options.embeddings_model,
            modal = ?state.borrow().modal_state()
        );

        Self {
            store,
            state,
            pointer,
            _dismissals: dismissals,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the current state.
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.state.borrow())
    }

    fn update<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        f(&mut self.state.borrow_mut())
    }

    pub fn modal_state(&self) -> ModalState {
        self.read(|s| s.modal_state())
    }

    pub fn is_panel_open(&self) -> bool {
        self.read(|s| s.is_panel_open())
    }

    pub fn is_docs_list_open(&self) -> bool {
        self.read(|s| s.is_docs_list_open())
    }

    pub fn route(&self) -> Route {
        self.read(|s| s.route())
    }

    // =========================================================================
    // Conversations
    // =========================================================================

    /// Load conversations and documents concurrently.
    ///
    /// Both loads run to completion; the first failure is returned.
    pub async fn mount(&self) -> Result<(), NavigationError> {
        let (conversations, documents) =
            futures::join!(self.load_conversations(), self.load_documents());
        conversations.and(documents)
    }

    /// Initial list load. No request is sent while one is in flight or once
    /// the list is populated.
    pub async fn load_conversations(&self) -> Result<(), NavigationError> {
        let Some(ticket) = self.update(|s| s.sessions_mut().begin_load()) else {
            return Ok(());
        };
        let result = self.store.list_conversations().await;
        self.update(|s| s.sessions_mut().finish_load(ticket, result))
            .map(|_| ())
    }

    /// Unconditional list fetch, e.g. after `NotFound`.
    pub async fn reload_conversations(&self) -> Result<(), NavigationError> {
        let ticket = self.update(|s| s.sessions_mut().begin_resync());
        let result = self.store.list_conversations().await;
        self.update(|s| s.sessions_mut().finish_load(ticket, result))
            .map(|_| ())
    }

    pub fn new_chat(&self) {
        self.update(|s| {
            s.sessions_mut().start_new_conversation();
            s.navigate(Route::Chat);
        });
    }

    /// Open a saved conversation. A response overtaken by a later selection
    /// or new chat is dropped.
    pub async fn select_conversation(&self, id: &ConversationId) -> Result<(), NavigationError> {
        let ticket = self.update(|s| s.sessions_mut().begin_select(id.clone()));
        let result = self.store.get_conversation(id).await;
        self.update(|s| -> Result<(), NavigationError> {
            if s.sessions_mut().finish_select(ticket, result)? {
                s.navigate(Route::Chat);
            }
            Ok(())
        })
    }

    /// Delete a conversation, then refetch the list whatever the outcome.
    /// Removing the active conversation returns to a new chat.
    pub async fn delete_conversation(&self, id: &ConversationId) -> Result<(), NavigationError> {
        self.update(|s| s.sessions_mut().begin_delete(id))?;
        let result = self.store.delete_conversation(id).await;
        let deleted = self.update(|s| -> Result<(), NavigationError> {
            if s.sessions_mut().finish_delete(id, result)? {
                s.navigate(Route::Chat);
            }
            Ok(())
        });

        let resynced = self.reload_conversations().await;
        deleted.and(resynced)
    }

    /// Rename a conversation. An accepted rename refetches the list and,
    /// for the active conversation, returns to the chat view.
    pub async fn rename_conversation(
        &self,
        id: &ConversationId,
        name: &str,
    ) -> Result<(), NavigationError> {
        let name = name.trim();
        self.update(|s| s.sessions_mut().begin_rename(id, name))?;
        let result = self.store.rename_conversation(id, name).await;
        let was_active = self.update(|s| s.sessions_mut().finish_rename(id, result))?;

        let resynced = self.reload_conversations().await;
        if was_active {
            self.update(|s| s.navigate(Route::Chat));
        }
        resynced
    }

    // =========================================================================
    // Documents
    // =========================================================================

    /// Fetch the document list; a single eligible document is selected and
    /// completes the selection gate.
    pub async fn load_documents(&self) -> Result<(), NavigationError> {
        let ticket = self.update(|s| s.documents_mut().begin_load());
        let result = self.store.list_documents().await;
        self.update(|s| -> Result<(), NavigationError> {
            let outcome = s.documents_mut().finish_load(ticket, result)?;
            s.apply_document_outcome(outcome);
            Ok(())
        })
    }

    pub fn select_document(&self, document: DocumentDescriptor) -> Result<(), NavigationError> {
        self.update(|s| s.select_document(document))
    }

    /// Delete a local document. Remote documents are refused before any
    /// request is sent.
    pub async fn delete_document(
        &self,
        document: &DocumentDescriptor,
    ) -> Result<(), NavigationError> {
        self.update(|s| s.documents_mut().begin_delete(document))?;
        let result = self
            .store
            .delete_document(document.location, &document.name)
            .await;
        self.update(|s| s.documents_mut().finish_delete(document, result))
    }

    // =========================================================================
    // Modals
    // =========================================================================

    pub fn open_upload(&self) -> bool {
        self.update(|s| s.open_modal(ModalChannel::Upload))
    }

    /// Close the upload modal after a finished upload and pick up the new
    /// document.
    pub async fn finish_upload(&self) -> Result<(), NavigationError> {
        let completed = self.update(|s| s.complete_modal(ModalChannel::Upload));
        if !completed {
            debug!(event = "core.panel.upload_finish_without_modal");
        }
        self.load_documents().await
    }

    pub fn open_api_key(&self) -> bool {
        self.update(|s| s.open_modal(ModalChannel::ApiKey))
    }

    pub fn require_api_key(&self) -> bool {
        self.update(|s| s.require_api_key())
    }

    pub fn save_api_key(&self, key: &str) -> Result<(), NavigationError> {
        self.update(|s| s.save_api_key(key))
    }

    /// Cancel the visible modal if its channel allows it right now.
    pub fn cancel_modal(&self, channel: ModalChannel) -> bool {
        self.update(|s| s.close_modal(channel))
    }

    // =========================================================================
    // Panel surface
    // =========================================================================

    pub fn toggle_panel(&self) {
        self.update(|s| s.toggle_panel());
    }

    pub fn toggle_docs_list(&self) {
        self.update(|s| s.toggle_docs_list());
    }

    pub fn set_viewport_width(&self, width: u32) {
        self.update(|s| s.set_viewport_width(width));
    }

    pub fn set_layout(&self, layout: PanelLayout) {
        self.update(|s| s.set_layout(layout));
    }

    pub fn navigate(&self, route: Route) {
        self.update(|s| s.navigate(route));
    }

    /// Deliver a pointer-down to the outside-dismissal rules.
    pub fn pointer_down(&self, point: Point) {
        self.pointer.pointer_down(point);
    }
}

/// The dropdown closes on outside pointer-downs unless a modal is visible.
fn docs_list_dismissal(state: &Rc<RefCell<AppState>>, pointer: &PointerEvents) -> Subscription {
    let region = Rc::downgrade(state);
    let toggle = Rc::downgrade(state);
    let modal = Rc::downgrade(state);
    let target = Rc::downgrade(state);

    OutsideDismissal::new("docs_list", move || {
        region.upgrade().and_then(|s| s.borrow().docs_list_region())
    })
    .with_toggle(move || toggle.upgrade().and_then(|s| s.borrow().layout().docs_toggle))
    .guard("modal_active", move || {
        modal.upgrade().is_some_and(|s| s.borrow().is_modal_blocking())
    })
    .attach(pointer, move || {
        if let Some(state) = target.upgrade() {
            state.borrow_mut().close_docs_list();
        }
    })
}

/// On narrow viewports the panel overlays the content and closes on outside
/// pointer-downs, taking the dropdown with it.
fn panel_dismissal(state: &Rc<RefCell<AppState>>, pointer: &PointerEvents) -> Subscription {
    let region = Rc::downgrade(state);
    let toggle = Rc::downgrade(state);
    let wide = Rc::downgrade(state);
    let modal = Rc::downgrade(state);
    let target = Rc::downgrade(state);

    OutsideDismissal::new("panel", move || {
        region.upgrade().and_then(|s| s.borrow().panel_region())
    })
    .with_toggle(move || toggle.upgrade().and_then(|s| s.borrow().layout().panel_toggle))
    .guard("wide_viewport", move || {
        wide.upgrade().is_some_and(|s| !s.borrow().viewport().is_narrow())
    })
    .guard("modal_active", move || {
        modal.upgrade().is_some_and(|s| s.borrow().is_modal_blocking())
    })
    .attach(pointer, move || {
        if let Some(state) = target.upgrade() {
            state.borrow_mut().dismiss_panel();
        }
    })
}

