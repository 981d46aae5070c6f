//! Which modal workflow is visible.

mod coordinator;

pub use coordinator::{ModalChannel, ModalCoordinator, ModalState, Preconditions};
