use crate::item::PlayableItem;

/// The playback queue state
///
/// Owned and mutated by [`PlaybackQueueController`](crate::controller::PlaybackQueueController);
/// consumers only ever see it through a shared reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueState {
    /// Items in playback order (when not shuffling)
    pub queue: Vec<PlayableItem>,
    /// Selected item. Only meaningful while `queue` is non-empty
    pub current_index: usize,
    pub is_playing: bool,
    pub is_looping: bool,
    pub is_shuffling: bool,
}

impl QueueState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_previous(&self) -> bool {
        self.current_index > 0
    }

    /// While shuffling there is always a next pick, even at the last index.
    pub fn has_next(&self) -> bool {
        self.is_shuffling || self.current_index < self.queue.len().saturating_sub(1)
    }

    /// Get current item
    pub fn current_item(&self) -> Option<&PlayableItem> {
        self.queue.get(self.current_index)
    }

    /// Get item by index
    pub fn get(&self, index: usize) -> Option<&PlayableItem> {
        self.queue.get(index)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
