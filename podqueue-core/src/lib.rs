pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod item;
pub mod observer;
pub mod provider;
pub mod state;

pub use config::ControllerConfig;
pub use controller::PlaybackQueueController;
pub use error::{PlayerError, Result};
pub use events::{MediaEvent, QueueChange};
pub use item::PlayableItem;
pub use observer::{Observers, Subscription};
pub use provider::{PlayerHandle, PlayerProvider};
pub use state::QueueState;

/// Install `env_logger` for consumers that have no logger of their own.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger(level: log::LevelFilter) {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .try_init();
}
