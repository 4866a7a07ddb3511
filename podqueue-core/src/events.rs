use strum::{Display, EnumIter};

/// Reports sent from the audio element back to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum MediaEvent {
    /// Playback started or resumed (native controls, buffering finished)
    #[strum(serialize = "playing")]
    Playing,
    /// Playback paused (native controls, buffering)
    #[strum(serialize = "paused")]
    Paused,
    /// The current item reached its natural end
    #[strum(serialize = "ended")]
    Ended,
}

/// What a mutation changed, delivered to every subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum QueueChange {
    /// A new queue replaced the old one
    #[strum(serialize = "Queue loaded")]
    Loaded,
    /// Queue emptied
    #[strum(serialize = "Queue cleared")]
    Cleared,
    /// Selection moved within the same queue
    #[strum(serialize = "Track changed")]
    IndexChanged,
    #[strum(serialize = "Playing state changed")]
    PlayingChanged,
    #[strum(serialize = "Loop toggled")]
    LoopingChanged,
    #[strum(serialize = "Shuffle toggled")]
    ShufflingChanged,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn media_events_have_lowercase_labels() {
        let labels: Vec<String> = MediaEvent::iter().map(|e| e.to_string()).collect();
        assert_eq!(labels, vec!["playing", "paused", "ended"]);
    }

    #[test]
    fn change_labels_read_as_status_text() {
        assert_eq!(QueueChange::Loaded.to_string(), "Queue loaded");
        assert_eq!(QueueChange::ShufflingChanged.to_string(), "Shuffle toggled");
    }
}
