//! Change subscriptions.
//!
//! Listeners run synchronously on the thread that mutated the controller,
//! after the mutation has completed. The registry is `Rc`-based, so the whole
//! thing stays on one thread.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::events::QueueChange;
use crate::state::QueueState;

type Listener = Rc<dyn Fn(QueueChange, &QueueState)>;

#[derive(Default)]
struct Registry {
    next_id: usize,
    listeners: Vec<(usize, Listener)>,
}

/// Set of listeners attached to one controller
#[derive(Clone, Default)]
pub struct Observers {
    registry: Rc<RefCell<Registry>>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(QueueChange, &QueueState) + 'static,
    {
        let listener: Listener = Rc::new(listener);
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, listener));
        log::trace!("Listener {} subscribed", id);

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Call every listener in subscription order.
    ///
    /// The registry is not borrowed while a listener runs, so listeners may
    /// cancel subscriptions (their own included). A listener cancelled earlier
    /// in the same round is skipped.
    pub fn notify(&self, change: QueueChange, state: &QueueState) {
        let ids: Vec<usize> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(id, _)| *id)
            .collect();
        log::trace!("Notifying {} listener(s): {}", ids.len(), change);

        for id in ids {
            let listener = self
                .registry
                .borrow()
                .listeners
                .iter()
                .find(|(lid, _)| *lid == id)
                .map(|(_, l)| Rc::clone(l));

            if let Some(listener) = listener {
                listener(change, state);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.len())
            .finish()
    }
}

/// Handle returned by `subscribe`. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the listener immediately"]
#[derive(Debug)]
pub struct Subscription {
    id: usize,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.cancel();
    }

    /// Keep the listener registered for as long as the controller lives.
    pub fn detach(mut self) {
        self.registry = Weak::new();
    }

    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .map(|registry| {
                registry
                    .borrow()
                    .listeners
                    .iter()
                    .any(|(id, _)| *id == self.id)
            })
            .unwrap_or(false)
    }

    fn cancel(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
            log::trace!("Listener {} unsubscribed", self.id);
        }
        self.registry = Weak::new();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
