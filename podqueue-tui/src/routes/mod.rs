pub mod episode;
pub mod log;
pub mod playback;
pub mod queue;
