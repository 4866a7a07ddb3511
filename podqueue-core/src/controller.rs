use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    config::ControllerConfig,
    error::{PlayerError, Result},
    events::{MediaEvent, QueueChange},
    item::PlayableItem,
    observer::{Observers, Subscription},
    state::QueueState,
};

/// Single source of truth for what is playing and what comes next.
///
/// Every effective mutation notifies subscribers after it completes. Navigation
/// that turns out to be a no-op (`next` at the end of a sequential queue,
/// `previous` at the start) leaves state alone and notifies nobody.
#[derive(Debug)]
pub struct PlaybackQueueController<R = StdRng> {
    state: QueueState,
    rng: R,
    observers: Observers,
}

impl PlaybackQueueController<StdRng> {
    pub fn new() -> Self {
        Self::with_config(&ControllerConfig::default())
    }

    pub fn with_config(config: &ControllerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => {
                log::debug!("Shuffle RNG seeded with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(rng)
    }
}

impl Default for PlaybackQueueController<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PlaybackQueueController<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            state: QueueState::new(),
            rng,
            observers: Observers::new(),
        }
    }

    pub fn state(&self) -> &QueueState {
        &self.state
    }

    pub fn has_next(&self) -> bool {
        self.state.has_next()
    }

    pub fn has_previous(&self) -> bool {
        self.state.has_previous()
    }

    pub fn current_item(&self) -> Option<&PlayableItem> {
        self.state.current_item()
    }

    /// Register a listener called after every state change
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(QueueChange, &QueueState) + 'static,
    {
        self.observers.subscribe(listener)
    }

    // ==============================================
    // Loading
    // ==============================================

    /// Replace the queue with a single item and start playing it
    pub fn play_single(&mut self, item: PlayableItem) {
        log::debug!("Playing single item: {}", item.title);
        self.state.queue = vec![item];
        self.state.current_index = 0;
        self.state.is_playing = true;
        self.emit(QueueChange::Loaded);
    }

    /// Replace the queue and start playing at `start_index`.
    ///
    /// `start_index` must be a valid index into `items`. It is not checked;
    /// a bad index shows up as [`QueueState::current_item`] returning `None`.
    /// Use [`try_play_queue`](Self::try_play_queue) to validate.
    pub fn play_queue(&mut self, items: Vec<PlayableItem>, start_index: usize) {
        log::debug!("Playing queue of {} items from {}", items.len(), start_index);
        if start_index >= items.len() {
            log::warn!(
                "Start index {} is outside a queue of {} items",
                start_index,
                items.len()
            );
        }
        self.state.queue = items;
        self.state.current_index = start_index;
        self.state.is_playing = true;
        self.emit(QueueChange::Loaded);
    }

    /// Like `play_queue`, but rejects an out-of-range start and leaves state untouched
    pub fn try_play_queue(&mut self, items: Vec<PlayableItem>, start_index: usize) -> Result<()> {
        if start_index >= items.len() {
            return Err(PlayerError::IndexOutOfRange {
                index: start_index,
                len: items.len(),
            });
        }
        self.play_queue(items, start_index);
        Ok(())
    }

    /// Empty the queue. Playing, looping and shuffling flags are left as they are.
    pub fn clear(&mut self) {
        log::debug!("Clearing queue ({} items)", self.state.queue.len());
        self.state.queue.clear();
        self.state.current_index = 0;
        self.emit(QueueChange::Cleared);
    }

    // ==============================================
    // Navigation
    // ==============================================

    /// Jump to an item of the loaded queue and play it
    pub fn select(&mut self, index: usize) {
        if index >= self.state.queue.len() {
            log::warn!(
                "Ignoring selection of {} in a queue of {} items",
                index,
                self.state.queue.len()
            );
            return;
        }
        log::debug!("Selected {}", index);
        self.state.current_index = index;
        self.state.is_playing = true;
        self.emit(QueueChange::IndexChanged);
    }

    /// Advance. While shuffling, picks any index uniformly, the current one included.
    pub fn next(&mut self) {
        if !self.state.has_next() {
            return;
        }

        let len = self.state.queue.len();
        let next = if self.state.is_shuffling {
            if len == 0 {
                return;
            }
            self.rng.random_range(0..len)
        } else {
            self.state.current_index + 1
        };

        log::debug!("Next: {} -> {}", self.state.current_index, next);
        self.state.current_index = next;
        self.emit(QueueChange::IndexChanged);
    }

    /// Step back one item. Shuffling has no effect here.
    pub fn previous(&mut self) {
        if !self.state.has_previous() {
            return;
        }
        let prev = self.state.current_index - 1;
        log::debug!("Previous: {} -> {}", self.state.current_index, prev);
        self.state.current_index = prev;
        self.emit(QueueChange::IndexChanged);
    }

    // ==============================================
    // Flags
    // ==============================================

    pub fn toggle_play(&mut self) {
        self.set_playing_state(!self.state.is_playing);
    }

    pub fn set_playing_state(&mut self, playing: bool) {
        log::debug!("Playing: {}", playing);
        self.state.is_playing = playing;
        self.emit(QueueChange::PlayingChanged);
    }

    pub fn toggle_loop(&mut self) {
        self.state.is_looping = !self.state.is_looping;
        log::debug!("Looping: {}", self.state.is_looping);
        self.emit(QueueChange::LoopingChanged);
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.is_shuffling = !self.state.is_shuffling;
        log::debug!("Shuffling: {}", self.state.is_shuffling);
        self.emit(QueueChange::ShufflingChanged);
    }

    /// Apply a report from the audio element.
    ///
    /// On `Ended` with looping on, the element restarts the item by itself and
    /// the controller does not change.
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        log::debug!("Media event: {}", event);
        match event {
            MediaEvent::Playing => self.set_playing_state(true),
            MediaEvent::Paused => self.set_playing_state(false),
            MediaEvent::Ended => {
                if !self.state.is_looping {
                    self.set_playing_state(false);
                }
            }
        }
    }

    fn emit(&self, change: QueueChange) {
        self.observers.notify(change, &self.state);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn episodes(n: usize) -> Vec<PlayableItem> {
        (1..=n)
            .map(|i| {
                PlayableItem::new(format!("Ep{}", i), format!("ep{}.mp3", i))
                    .with_members("Host")
                    .with_duration(60 * i as u32)
            })
            .collect()
    }

    fn seeded() -> PlaybackQueueController {
        PlaybackQueueController::with_config(&ControllerConfig::default().with_seed(42))
    }

    fn recorder(
        controller: &PlaybackQueueController,
    ) -> (Subscription, Rc<RefCell<Vec<QueueChange>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let sub = controller.subscribe(move |change, _| sink.borrow_mut().push(change));
        (sub, log)
    }

    #[test]
    fn play_single_replaces_queue() {
        let mut c = seeded();
        c.play_queue(episodes(3), 2);
        c.set_playing_state(false);

        let item = PlayableItem::new("Solo", "solo.mp3");
        c.play_single(item.clone());

        assert_eq!(c.state().queue, vec![item]);
        assert_eq!(c.state().current_index, 0);
        assert!(c.state().is_playing);
    }

    #[test]
    fn play_queue_sets_index_and_playing() {
        let mut c = seeded();
        for start in 0..4 {
            c.set_playing_state(false);
            c.play_queue(episodes(4), start);
            assert_eq!(c.state().current_index, start);
            assert!(c.state().is_playing);
        }
    }

    #[test]
    fn play_queue_does_not_validate_start() {
        let mut c = seeded();
        c.play_queue(episodes(2), 5);
        assert_eq!(c.state().current_index, 5);
        assert!(c.current_item().is_none());
    }

    #[test]
    fn navigation_from_usize_max_start_does_not_overflow() {
        let mut c = seeded();
        c.play_queue(episodes(2), usize::MAX);
        assert!(!c.has_next());

        c.next();
        assert_eq!(c.state().current_index, usize::MAX);
        assert!(c.current_item().is_none());
    }

    #[test]
    fn try_play_queue_rejects_bad_start() {
        let mut c = seeded();
        c.play_queue(episodes(2), 1);
        let before = c.state().clone();

        let err = c.try_play_queue(episodes(3), 3).unwrap_err();
        assert_eq!(err, PlayerError::IndexOutOfRange { index: 3, len: 3 });
        assert_eq!(c.state(), &before);

        let err = c.try_play_queue(Vec::new(), 0).unwrap_err();
        assert_eq!(err, PlayerError::IndexOutOfRange { index: 0, len: 0 });

        assert!(c.try_play_queue(episodes(3), 2).is_ok());
        assert_eq!(c.state().current_index, 2);
    }

    #[test]
    fn clear_keeps_flags() {
        let mut c = seeded();
        c.play_queue(episodes(3), 2);
        c.toggle_loop();
        c.toggle_shuffle();

        c.clear();
        assert!(c.state().is_empty());
        assert_eq!(c.state().current_index, 0);
        assert!(c.state().is_playing);
        assert!(c.state().is_looping);
        assert!(c.state().is_shuffling);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut c = seeded();
        c.play_queue(episodes(2), 1);
        c.clear();
        let once = c.state().clone();
        c.clear();
        assert_eq!(c.state(), &once);
    }

    #[test]
    fn next_advances_sequentially_until_the_end() {
        let mut c = seeded();
        c.play_queue(episodes(3), 0);
        c.next();
        assert_eq!(c.state().current_index, 1);
        c.next();
        assert_eq!(c.state().current_index, 2);
        assert!(!c.has_next());

        let before = c.state().clone();
        c.next();
        assert_eq!(c.state(), &before);
    }

    #[test]
    fn next_on_empty_queue_is_noop() {
        let mut c = seeded();
        c.next();
        assert_eq!(c.state(), &QueueState::new());

        c.toggle_shuffle();
        assert!(c.has_next());
        c.next();
        assert_eq!(c.state().current_index, 0);
    }

    #[test]
    fn shuffled_next_stays_in_range_even_from_last_index() {
        let mut c = seeded();
        c.play_queue(episodes(5), 4);
        c.toggle_shuffle();

        for _ in 0..200 {
            assert!(c.has_next());
            c.next();
            assert!(c.state().current_index < 5);
        }
    }

    #[test]
    fn shuffled_next_reaches_every_index() {
        let mut c = seeded();
        c.play_queue(episodes(3), 0);
        c.toggle_shuffle();

        let mut seen = [false; 3];
        for _ in 0..200 {
            c.next();
            seen[c.state().current_index] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn same_seed_same_shuffle_sequence() {
        let run = || {
            let mut c = seeded();
            c.play_queue(episodes(10), 0);
            c.toggle_shuffle();
            (0..20)
                .map(|_| {
                    c.next();
                    c.state().current_index
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn previous_steps_back_and_stops_at_zero() {
        let mut c = seeded();
        c.play_queue(episodes(3), 2);
        c.previous();
        assert_eq!(c.state().current_index, 1);
        c.previous();
        assert_eq!(c.state().current_index, 0);
        assert!(!c.has_previous());

        c.previous();
        assert_eq!(c.state().current_index, 0);
    }

    #[test]
    fn previous_ignores_shuffle() {
        let mut c = seeded();
        c.play_queue(episodes(5), 3);
        c.toggle_shuffle();
        c.previous();
        assert_eq!(c.state().current_index, 2);
    }

    #[test]
    fn toggles_are_involutions() {
        let mut c = seeded();
        let start = c.state().clone();

        c.toggle_play();
        assert!(c.state().is_playing);
        c.toggle_play();

        c.toggle_loop();
        assert!(c.state().is_looping);
        c.toggle_loop();

        c.toggle_shuffle();
        assert!(c.state().is_shuffling);
        c.toggle_shuffle();

        assert_eq!(c.state(), &start);
    }

    #[test]
    fn select_jumps_within_queue() {
        let mut c = seeded();
        c.play_queue(episodes(4), 0);
        c.set_playing_state(false);

        c.select(3);
        assert_eq!(c.state().current_index, 3);
        assert!(c.state().is_playing);

        c.select(9);
        assert_eq!(c.state().current_index, 3);
    }

    #[test]
    fn ended_stops_unless_looping() {
        let mut c = seeded();
        c.play_queue(episodes(2), 0);

        c.toggle_loop();
        c.handle_media_event(MediaEvent::Ended);
        assert!(c.state().is_playing);

        c.toggle_loop();
        c.handle_media_event(MediaEvent::Ended);
        assert!(!c.state().is_playing);
        assert_eq!(c.state().current_index, 0);
    }

    #[test]
    fn native_controls_drive_playing_flag() {
        let mut c = seeded();
        c.handle_media_event(MediaEvent::Playing);
        assert!(c.state().is_playing);
        c.handle_media_event(MediaEvent::Paused);
        assert!(!c.state().is_playing);
    }

    #[test]
    fn every_effective_mutation_notifies_once() {
        let mut c = seeded();
        let (_sub, log) = recorder(&c);

        c.play_queue(episodes(2), 0);
        c.previous();
        c.next();
        c.next();
        c.toggle_loop();
        c.toggle_shuffle();
        c.toggle_play();
        c.play_single(PlayableItem::new("Solo", "solo.mp3"));
        c.clear();

        assert_eq!(
            *log.borrow(),
            vec![
                QueueChange::Loaded,
                QueueChange::IndexChanged,
                QueueChange::LoopingChanged,
                QueueChange::ShufflingChanged,
                QueueChange::PlayingChanged,
                QueueChange::Loaded,
                QueueChange::Cleared,
            ]
        );
    }

    #[test]
    fn listener_sees_state_after_mutation() {
        let mut c = seeded();
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let _sub = c.subscribe(move |_, state| {
            *sink.borrow_mut() = Some((state.current_index, state.is_playing, state.len()));
        });

        c.play_queue(episodes(3), 1);
        assert_eq!(*seen.borrow(), Some((1, true, 3)));
    }

    #[test]
    fn looped_end_does_not_notify() {
        let mut c = seeded();
        c.toggle_loop();
        let (_sub, log) = recorder(&c);
        c.handle_media_event(MediaEvent::Ended);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn unsubscribed_listener_is_not_called() {
        let mut c = seeded();
        let (sub, log) = recorder(&c);
        c.toggle_loop();
        sub.unsubscribe();
        c.toggle_loop();
        assert_eq!(*log.borrow(), vec![QueueChange::LoopingChanged]);
    }
}
