use tracing::debug;

use super::geometry::{Bounds, Point};
use super::pointer::{PointerEvents, Subscription};

type RegionFn = Box<dyn Fn() -> Option<Bounds>>;
type GuardFn = Box<dyn Fn() -> bool>;

/// How a pointer-down relates to a transient surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissDecision {
    /// Outside the surface and no guard blocks: close it.
    Dismiss,
    /// Inside the surface.
    Inside,
    /// On the control that toggles the surface; the toggle handles it.
    OnToggle,
    /// Blocked by the named guard.
    Guarded(&'static str),
    /// The surface is not open.
    NotOpen,
}

/// Outside-pointer dismissal rule for one transient surface.
///
/// The region closure returns the surface bounds while it is open and `None`
/// otherwise. Guards return `true` when dismissal must not happen.
pub struct OutsideDismissal {
    surface: &'static str,
    region: RegionFn,
    toggle: Option<RegionFn>,
    guards: Vec<(&'static str, GuardFn)>,
}

impl OutsideDismissal {
    pub fn new(surface: &'static str, region: impl Fn() -> Option<Bounds> + 'static) -> Self {
        Self {
            surface,
            region: Box::new(region),
            toggle: None,
            guards: Vec::new(),
        }
    }

    /// Bounds of the control that opens and closes the surface.
    pub fn with_toggle(mut self, toggle: impl Fn() -> Option<Bounds> + 'static) -> Self {
        self.toggle = Some(Box::new(toggle));
        self
    }

    /// Block dismissal while `blocked` returns true.
    pub fn guard(mut self, name: &'static str, blocked: impl Fn() -> bool + 'static) -> Self {
        self.guards.push((name, Box::new(blocked)));
        self
    }

    pub fn surface(&self) -> &'static str {
        self.surface
    }

    pub fn decide(&self, point: Point) -> DismissDecision {
        let Some(region) = (self.region)() else {
            return DismissDecision::NotOpen;
        };
        if region.contains(point) {
            return DismissDecision::Inside;
        }
        if let Some(toggle) = &self.toggle
            && toggle().is_some_and(|bounds| bounds.contains(point))
        {
            return DismissDecision::OnToggle;
        }
        for (name, blocked) in &self.guards {
            if blocked() {
                return DismissDecision::Guarded(*name);
            }
        }
        DismissDecision::Dismiss
    }

    /// Subscribe to `events`, calling `on_dismiss` for every pointer-down
    /// that decides [`DismissDecision::Dismiss`].
    pub fn attach(
        self,
        events: &PointerEvents,
        mut on_dismiss: impl FnMut() + 'static,
    ) -> Subscription {
        events.subscribe(move |point| match self.decide(point) {
            DismissDecision::Dismiss => {
                debug!(event = "core.dismissal.dismissed", surface = self.surface);
                on_dismiss();
            }
            DismissDecision::Guarded(guard) => {
                debug!(
                    event = "core.dismissal.guarded",
                    surface = self.surface,
                    guard = guard
                );
            }
            DismissDecision::Inside | DismissDecision::OnToggle | DismissDecision::NotOpen => {}
        })
    }
}

impl std::fmt::Debug for OutsideDismissal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutsideDismissal")
            .field("surface", &self.surface)
            .field("has_toggle", &self.toggle.is_some())
            .field(
                "guards",
                &self.guards.iter().map(|(name, _)| *name).collect::<Vec<_>>(),
            )
            .finish()
    }
}
