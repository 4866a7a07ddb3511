use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlayerError {
    /// The controller was requested outside the scope of its provider
    #[error("player controller must be obtained within a provided PlayerProvider scope")]
    NotInitialized,
    #[error("start index {index} is out of range for a queue of {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, PlayerError>;
