//! docsgpt-core: session and navigation coordination for the DocsGPT client
//!
//! Keeps the active conversation, the selected source documents, and the
//! visible modal consistent with each other and with the remote store.
//!
//! # Main Entry Points
//!
//! - [`navigation`] - `NavigationPanel`, the user-facing action surface
//! - [`sessions`] - Conversation list lifecycle synchronized with the server
//! - [`documents`] - Source-document list and selection gate
//! - [`modal`] - Mutually exclusive modal state machine
//! - [`dismissal`] - Outside-pointer dismissal of transient surfaces
//! - [`store`] - Remote store traits and the HTTP implementation

pub mod dismissal;
pub mod documents;
pub mod errors;
pub mod logging;
pub mod modal;
pub mod navigation;
pub mod sessions;
pub mod store;

// Re-export wire types so consumers only need this crate
pub use docsgpt_protocol::{
    ConversationId, ConversationSummary, DocumentDescriptor, DocumentLocation, QueryExchange,
    SourceRef, Transcript,
};

pub use dismissal::{Bounds, DismissDecision, OutsideDismissal, Point, PointerEvents, Subscription};
pub use documents::DocumentState;
pub use errors::{DocsError, DocsResult, NavigationError};
pub use modal::{ModalChannel, ModalCoordinator, ModalState, Preconditions};
pub use navigation::{AppState, NavigationPanel, PanelLayout, PanelOptions, Route, Viewport};
pub use sessions::SessionState;
pub use store::{ConversationStore, DocumentStore, HttpStore, StoreError};

// Re-export logging initialization
pub use logging::init_logging;
