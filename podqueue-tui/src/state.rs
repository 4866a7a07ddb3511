use std::cell::{Cell, RefCell};
use std::rc::Rc;

use podqueue_core::{MediaEvent, PlayerHandle, QueueChange, Subscription};
use ratatui::widgets::ListState;

use crate::media::{ElementCommand, ElementReport, Generation, bridge};

/// Application state for the TUI
///
/// The player itself lives behind `player`; everything else here is view
/// state that only the terminal cares about.
pub struct AppState {
    pub player: PlayerHandle,

    // ==============================
    // Element feedback
    // ==============================
    /// Current playback position in seconds
    pub position: f32,
    /// Total duration in seconds
    pub duration: f32,

    // ==============================
    // View state
    // ==============================
    pub queue_list: ListState,
    generation: Generation,
    status_message: Rc<RefCell<String>>,
    dirty: Rc<Cell<bool>>,
    _subscriptions: Vec<Subscription>,
}

impl AppState {
    pub fn new(player: PlayerHandle, cmd_tx: crossbeam_channel::Sender<ElementCommand>) -> Self {
        let status_message = Rc::new(RefCell::new("Nothing queued".to_string()));
        let dirty = Rc::new(Cell::new(true));

        let status = Rc::clone(&status_message);
        let redraw = Rc::clone(&dirty);
        let view_sub = player.with(|c| {
            c.subscribe(move |change, state| {
                *status.borrow_mut() = match (change, state.current_item()) {
                    (QueueChange::Loaded | QueueChange::IndexChanged, Some(item)) => format!(
                        "Track {}/{}: {}",
                        state.current_index + 1,
                        state.len(),
                        item.title
                    ),
                    _ => change.to_string(),
                };
                redraw.set(true);
            })
        });
        let generation = Generation::default();
        let element_sub = bridge(&player, cmd_tx, generation.clone());

        Self {
            player,
            position: 0.0,
            duration: 0.0,
            queue_list: ListState::default(),
            generation,
            status_message,
            dirty,
            _subscriptions: vec![view_sub, element_sub],
        }
    }

    pub fn status_message(&self) -> String {
        self.status_message.borrow().clone()
    }

    /// Whether a redraw is due; clears the flag
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    /// Handle a report from the audio element
    ///
    /// Reports about an item the UI has since moved away from are dropped.
    pub fn handle_report(&mut self, report: ElementReport) {
        if report.generation() != self.generation.current() {
            log::trace!("Dropping stale element report: {:?}", report);
            return;
        }

        match report {
            ElementReport::Position { current, total, .. } => {
                self.position = current;
                self.duration = total;
                self.dirty.set(true);
            }
            ElementReport::Media { event, .. } => {
                self.player.update(|c| {
                    c.handle_media_event(event);
                    if event == MediaEvent::Ended && !c.state().is_looping && c.has_next() {
                        c.next();
                        c.set_playing_state(true);
                    }
                });
                self.position = 0.0;
            }
        }
    }

    /// Get the progress percentage (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (self.position / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Format time as MM:SS
    pub fn format_time(seconds: f32) -> String {
        podqueue_core::item::format_seconds(seconds.max(0.0).floor() as u32)
    }

    // ==============================================
    // Queue list navigation
    // ==============================================

    pub fn queue_len(&self) -> usize {
        self.player.with(|c| c.state().len())
    }

    pub fn queue_next(&mut self) {
        let len = self.queue_len();
        if len == 0 {
            return;
        }
        let i = match self.queue_list.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.queue_list.select(Some(i));
    }

    pub fn queue_prev(&mut self) {
        let len = self.queue_len();
        if len == 0 {
            return;
        }
        let i = match self.queue_list.selected() {
            Some(i) if i > 0 && i < len => i - 1,
            _ => len - 1,
        };
        self.queue_list.select(Some(i));
    }

    /// Point the list selection at the playing item
    pub fn select_current(&mut self) {
        let (len, current) = self
            .player
            .with(|c| (c.state().len(), c.state().current_index));
        self.queue_list
            .select(if current < len { Some(current) } else { None });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{Receiver, unbounded};
    use podqueue_core::{ControllerConfig, PlayableItem, PlaybackQueueController, PlayerProvider};

    fn app() -> (AppState, Receiver<ElementCommand>) {
        let provider = PlayerProvider::new();
        let handle = provider.provide(PlaybackQueueController::with_config(
            &ControllerConfig::default().with_seed(11),
        ));
        let (tx, rx) = unbounded();
        (AppState::new(handle, tx), rx)
    }

    fn ended(state: &AppState) -> ElementReport {
        ElementReport::Media {
            event: MediaEvent::Ended,
            generation: state.generation.current(),
        }
    }

    fn episodes(n: usize) -> Vec<PlayableItem> {
        (1..=n)
            .map(|i| PlayableItem::new(format!("Ep{}", i), format!("{}.mp3", i)).with_duration(10))
            .collect()
    }

    #[test]
    fn status_follows_track_changes() {
        let (state, _rx) = app();
        state.take_dirty();

        state.player.update(|c| c.play_queue(episodes(3), 1));
        assert_eq!(state.status_message(), "Track 2/3: Ep2");
        assert!(state.take_dirty());
        assert!(!state.take_dirty());

        state.player.update(|c| c.toggle_shuffle());
        assert_eq!(state.status_message(), "Shuffle toggled");
    }

    #[test]
    fn loading_drives_the_element() {
        let (state, rx) = app();
        state.player.update(|c| c.play_queue(episodes(2), 0));

        let cmds: Vec<ElementCommand> = rx.try_iter().collect();
        assert!(matches!(
            cmds.as_slice(),
            [ElementCommand::Load { item, .. }, ElementCommand::Play] if item.title == "Ep1"
        ));
    }

    #[test]
    fn end_of_track_auto_advances() {
        let (mut state, _rx) = app();
        state.player.update(|c| c.play_queue(episodes(2), 0));

        let report = ended(&state);
        state.handle_report(report);
        state.player.with(|c| {
            assert_eq!(c.state().current_index, 1);
            assert!(c.state().is_playing);
        });

        let report = ended(&state);
        state.handle_report(report);
        state.player.with(|c| {
            assert_eq!(c.state().current_index, 1);
            assert!(!c.state().is_playing);
        });
    }

    #[test]
    fn end_report_for_a_replaced_item_is_ignored() {
        let (mut state, _rx) = app();
        state.player.update(|c| c.play_queue(episodes(4), 0));
        let in_flight = ended(&state);

        // User skips ahead before the queued end-of-track is drained
        state.player.update(|c| c.next());
        state.handle_report(in_flight);

        state.player.with(|c| {
            assert_eq!(c.state().current_index, 1);
            assert!(c.state().is_playing);
        });

        let fresh = ended(&state);
        state.handle_report(fresh);
        state.player.with(|c| assert_eq!(c.state().current_index, 2));
    }

    #[test]
    fn position_after_clear_is_ignored() {
        let (mut state, _rx) = app();
        state.player.update(|c| c.play_queue(episodes(2), 0));
        let stale = ElementReport::Position {
            current: 4.0,
            total: 10.0,
            generation: state.generation.current(),
        };

        state.player.update(|c| c.clear());
        state.handle_report(stale);
        assert_eq!(state.position, 0.0);
    }

    #[test]
    fn list_navigation_wraps() {
        let (mut state, _rx) = app();
        state.queue_next();
        assert_eq!(state.queue_list.selected(), None);

        state.player.update(|c| c.play_queue(episodes(3), 2));
        state.select_current();
        assert_eq!(state.queue_list.selected(), Some(2));

        state.queue_next();
        assert_eq!(state.queue_list.selected(), Some(0));
        state.queue_prev();
        assert_eq!(state.queue_list.selected(), Some(2));
    }

    #[test]
    fn progress_is_clamped() {
        let (mut state, _rx) = app();
        assert_eq!(state.progress(), 0.0);

        state.handle_report(ElementReport::Position {
            current: 15.0,
            total: 10.0,
            generation: state.generation.current(),
        });
        assert_eq!(state.progress(), 1.0);
        assert_eq!(AppState::format_time(75.4), "01:15");
    }
}
