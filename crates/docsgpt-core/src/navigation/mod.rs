//! The navigation panel: conversation list, document picker, and modal gate.

mod layout;
mod panel;
mod state;


pub use layout::{PanelLayout, Route, Viewport};
pub use panel::NavigationPanel;
pub use state::{AppState, DEFAULT_VIEWPORT_WIDTH, PanelOptions};
