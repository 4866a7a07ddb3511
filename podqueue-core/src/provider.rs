//! Explicit, injectable access to a session's controller.
//!
//! A [`PlayerProvider`] is created at session start and cloned into every
//! component that needs the player. Until a controller is provided (or after
//! the scope is reset) every access fails with [`PlayerError::NotInitialized`].

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::{
    controller::PlaybackQueueController,
    error::{PlayerError, Result},
};

type SharedController = Rc<RefCell<PlaybackQueueController>>;

#[derive(Debug, Clone, Default)]
pub struct PlayerProvider {
    slot: Rc<RefCell<Option<SharedController>>>,
}

impl PlayerProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the session's controller, replacing any previous one
    pub fn provide(&self, controller: PlaybackQueueController) -> PlayerHandle {
        let shared = Rc::new(RefCell::new(controller));
        if self.slot.borrow_mut().replace(Rc::clone(&shared)).is_some() {
            log::warn!("Replacing an already provided player controller");
        } else {
            log::debug!("Player controller provided");
        }
        PlayerHandle { controller: shared }
    }

    /// Get the provided controller
    pub fn player(&self) -> Result<PlayerHandle> {
        self.slot
            .borrow()
            .as_ref()
            .map(|shared| PlayerHandle {
                controller: Rc::clone(shared),
            })
            .ok_or(PlayerError::NotInitialized)
    }

    pub fn is_provided(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// End the scope. Handles obtained earlier stay usable; new lookups fail.
    pub fn reset(&self) {
        if self.slot.borrow_mut().take().is_some() {
            log::debug!("Player controller scope ended");
        }
    }

    /// Provide `controller` for the duration of `f`, then reset.
    pub fn scoped<T>(
        &self,
        controller: PlaybackQueueController,
        f: impl FnOnce(&PlayerHandle) -> T,
    ) -> T {
        struct ResetOnDrop<'a>(&'a PlayerProvider);
        impl Drop for ResetOnDrop<'_> {
            fn drop(&mut self) {
                self.0.reset();
            }
        }

        let handle = self.provide(controller);
        let _guard = ResetOnDrop(self);
        f(&handle)
    }
}

/// Shared handle to a provided controller.
///
/// Listeners run while the controller is mutably borrowed; they get the new
/// state as an argument and must not go back through a handle.
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    controller: SharedController,
}

impl PlayerHandle {
    pub fn borrow(&self) -> Ref<'_, PlaybackQueueController> {
        self.controller.borrow()
    }

    /// Read from the controller
    pub fn with<T>(&self, f: impl FnOnce(&PlaybackQueueController) -> T) -> T {
        f(&self.controller.borrow())
    }

    /// Run an operation against the controller
    pub fn update<T>(&self, f: impl FnOnce(&mut PlaybackQueueController) -> T) -> T {
        f(&mut self.controller.borrow_mut())
    }
}
