use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::geometry::Point;

type Listener = Rc<RefCell<dyn FnMut(Point)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Fan-out of pointer-down events to subscribed listeners.
///
/// Single-threaded; cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct PointerEvents {
    registry: Rc<RefCell<Registry>>,
}

impl PointerEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` until the returned subscription is dropped.
    pub fn subscribe(&self, listener: impl FnMut(Point) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        let listener: Listener = Rc::new(RefCell::new(listener));
        registry.listeners.push((id, listener));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver a pointer-down to every listener registered when it started.
    ///
    /// Listeners may subscribe or drop subscriptions while being called. A
    /// listener that is already running (re-entrant dispatch) is skipped.
    pub fn pointer_down(&self, point: Point) {
        let snapshot: Vec<Listener> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            match listener.try_borrow_mut() {
                Ok(mut callback) => (&mut *callback)(point),
                Err(_) => {
                    tracing::debug!(event = "core.dismissal.reentrant_dispatch_skipped");
                }
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Registration handle returned by [`PointerEvents::subscribe`].
///
/// Dropping it removes the listener.
#[must_use = "dropping a Subscription immediately deregisters the listener"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_listener_receives_points_until_dropped() {
        let events = PointerEvents::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let subscription = events.subscribe(move |_| counter.set(counter.get() + 1));

        events.pointer_down(Point::new(1.0, 1.0));
        events.pointer_down(Point::new(2.0, 2.0));
        assert_eq!(hits.get(), 2);
        assert_eq!(events.listener_count(), 1);

        drop(subscription);
        assert_eq!(events.listener_count(), 0);
        events.pointer_down(Point::new(3.0, 3.0));
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_subscription_outliving_registry_drops_cleanly() {
        let events = PointerEvents::new();
        let subscription = events.subscribe(|_| {});
        drop(events);
        drop(subscription);
    }

    #[test]
    fn test_listener_can_drop_its_own_subscription() {
        let events = PointerEvents::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(Cell::new(0));

        let inner_slot = Rc::clone(&slot);
        let counter = Rc::clone(&hits);
        let subscription = events.subscribe(move |_| {
            counter.set(counter.get() + 1);
            inner_slot.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(subscription);

        events.pointer_down(Point::default());
        events.pointer_down(Point::default());
        assert_eq!(hits.get(), 1);
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn test_reentrant_dispatch_skips_running_listener() {
        let events = PointerEvents::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let handle = events.clone();
        let _subscription = events.subscribe(move |point| {
            counter.set(counter.get() + 1);
            handle.pointer_down(point);
        });

        events.pointer_down(Point::default());
        assert_eq!(hits.get(), 1);
    }
}
