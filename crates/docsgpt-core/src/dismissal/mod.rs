//! Close transient surfaces on pointer-downs outside them.
//!
//! An [`OutsideDismissal`] describes one surface: where it is, which control
//! toggles it, and which conditions block dismissal. Attaching it to
//! [`PointerEvents`] yields a [`Subscription`] that deregisters on drop.

mod geometry;
mod outside;
mod pointer;

pub use geometry::{Bounds, Point};
pub use outside::{DismissDecision, OutsideDismissal};
pub use pointer::{PointerEvents, Subscription};
