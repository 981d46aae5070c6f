use docsgpt_config::NavConfig;
use docsgpt_protocol::DocumentDescriptor;
use tracing::{debug, info, warn};

use super::layout::{PanelLayout, Route, Viewport};
use crate::dismissal::Bounds;
use crate::documents::{DocumentState, LoadOutcome};
use crate::errors::NavigationError;
use crate::modal::{ModalChannel, ModalCoordinator, ModalState, Preconditions};
use crate::sessions::SessionState;

/// Assumed viewport width when the host does not report one.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;

/// Startup inputs for the navigation panel.
#[derive(Debug, Clone)]
pub struct PanelOptions {
    pub embeddings_model: String,
    pub narrow_breakpoint: u32,
    pub viewport_width: u32,
    pub api_key: Option<String>,
    pub selected_document: Option<DocumentDescriptor>,
}

impl PanelOptions {
    pub fn from_config(config: &NavConfig) -> Self {
        Self {
            embeddings_model: config.embeddings.name().to_string(),
            narrow_breakpoint: config.ui.narrow_breakpoint(),
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            api_key: None,
            selected_document: None,
        }
    }

    pub fn with_viewport_width(mut self, width: u32) -> Self {
        self.viewport_width = width;
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_selected_document(mut self, document: DocumentDescriptor) -> Self {
        self.selected_document = Some(document);
        self
    }
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self::from_config(&NavConfig::default())
    }
}

/// Everything the navigation panel shows.
///
/// All fields are private; mutations go through the methods below so the
/// modal gate and the panel flags stay consistent.
#[derive(Debug)]
pub struct AppState {
    sessions: SessionState,
    documents: DocumentState,
    modal: ModalCoordinator,
    api_key: Option<String>,
    panel_open: bool,
    docs_list_open: bool,
    viewport: Viewport,
    layout: PanelLayout,
    route: Route,
}

impl AppState {
    pub fn new(options: &PanelOptions) -> Self {
        let viewport = Viewport::new(options.viewport_width, options.narrow_breakpoint);
        let documents = DocumentState::new(options.embeddings_model.clone())
            .with_selected(options.selected_document.clone());
        let modal = ModalCoordinator::new(documents.has_selection());

        let mut state = Self {
            sessions: SessionState::new(),
            documents,
            modal,
            api_key: options.api_key.clone(),
            panel_open: !viewport.is_narrow(),
            docs_list_open: false,
            viewport,
            layout: PanelLayout::default(),
            route: Route::Chat,
        };
        state.enforce_preconditions();
        state
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn sessions(&self) -> &SessionState {
        &self.sessions
    }

    pub fn documents(&self) -> &DocumentState {
        &self.documents
    }

    pub fn modal_state(&self) -> ModalState {
        self.modal.state()
    }

    pub fn is_modal_blocking(&self) -> bool {
        self.modal.is_blocking()
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn is_docs_list_open(&self) -> bool {
        self.docs_list_open
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn has_valid_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }

    pub fn preconditions(&self) -> Preconditions {
        Preconditions {
            has_selected_document: self.documents.has_selection(),
            has_valid_api_key: self.has_valid_api_key(),
        }
    }

    /// Panel bounds while it is open.
    pub fn panel_region(&self) -> Option<Bounds> {
        self.panel_open.then_some(self.layout.panel).flatten()
    }

    /// Dropdown bounds while it is expanded.
    pub fn docs_list_region(&self) -> Option<Bounds> {
        self.docs_list_open.then_some(self.layout.docs_list).flatten()
    }

    pub(super) fn sessions_mut(&mut self) -> &mut SessionState {
        &mut self.sessions
    }

    pub(super) fn documents_mut(&mut self) -> &mut DocumentState {
        &mut self.documents
    }

    // =========================================================================
    // Panel flags and layout
    // =========================================================================

    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
        if !self.panel_open {
            self.docs_list_open = false;
        }
        debug!(event = "core.panel.toggled", open = self.panel_open);
    }

    pub fn toggle_docs_list(&mut self) {
        self.docs_list_open = !self.docs_list_open;
        debug!(event = "core.panel.docs_list_toggled", open = self.docs_list_open);
    }

    /// Collapse the dropdown. Idempotent.
    pub fn close_docs_list(&mut self) {
        self.docs_list_open = false;
    }

    /// Close the panel together with its dropdown. Idempotent.
    pub fn dismiss_panel(&mut self) {
        self.panel_open = false;
        self.docs_list_open = false;
    }

    /// Record a new viewport width. Crossing from narrow to wide opens the
    /// panel; crossing back leaves it as is.
    pub fn set_viewport_width(&mut self, width: u32) {
        let was_narrow = self.viewport.is_narrow();
        self.viewport = self.viewport.with_width(width);
        if was_narrow && !self.viewport.is_narrow() && !self.panel_open {
            self.panel_open = true;
            info!(event = "core.panel.auto_opened", width = width);
        }
    }

    pub fn set_layout(&mut self, layout: PanelLayout) {
        self.layout = layout;
    }

    pub fn navigate(&mut self, route: Route) {
        if self.route != route {
            debug!(event = "core.panel.navigated", from = %self.route, to = %route);
            self.route = route;
        }
    }

    // =========================================================================
    // Modal workflows
    // =========================================================================

    pub fn open_modal(&mut self, channel: ModalChannel) -> bool {
        self.modal.open(channel)
    }

    /// Cancel a modal, evaluating cancellability against current state.
    pub fn close_modal(&mut self, channel: ModalChannel) -> bool {
        let preconditions = self.preconditions();
        self.modal.close(channel, &preconditions)
    }

    /// Finish a modal's action and re-check the startup preconditions.
    pub fn complete_modal(&mut self, channel: ModalChannel) -> bool {
        let completed = self.modal.complete(channel);
        if completed {
            self.enforce_preconditions();
        }
        completed
    }

    /// Open the gate a missing precondition calls for: document selection
    /// first, then the API key. Only acts while no modal is visible.
    pub fn enforce_preconditions(&mut self) {
        if self.modal.is_blocking() {
            return;
        }
        if !self.documents.has_selection() {
            self.modal.open(ModalChannel::SelectDocs);
        } else if !self.has_valid_api_key() {
            self.modal.open(ModalChannel::ApiKey);
        }
    }

    pub fn save_api_key(&mut self, key: &str) -> Result<(), NavigationError> {
        let key = key.trim();
        if key.is_empty() {
            warn!(event = "core.api_key.rejected");
            return Err(NavigationError::InvalidApiKey);
        }
        self.api_key = Some(key.to_string());
        info!(event = "core.api_key.saved");
        self.complete_modal(ModalChannel::ApiKey);
        Ok(())
    }

    /// Show the API key modal if the key is missing or blank.
    pub fn require_api_key(&mut self) -> bool {
        if self.has_valid_api_key() {
            return false;
        }
        self.modal.open(ModalChannel::ApiKey)
    }

    /// Pick a source document from the dropdown or the selection modal.
    pub fn select_document(&mut self, document: DocumentDescriptor) -> Result<(), NavigationError> {
        self.documents.select(document)?;
        self.docs_list_open = false;
        self.complete_modal(ModalChannel::SelectDocs);
        Ok(())
    }

    pub(super) fn apply_document_outcome(&mut self, outcome: LoadOutcome) {
        if outcome == LoadOutcome::AutoSelected {
            self.complete_modal(ModalChannel::SelectDocs);
        }
    }
}
