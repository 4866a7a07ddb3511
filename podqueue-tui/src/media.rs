//! Simulated audio element.
//!
//! Stands in for the real playback element: it never decodes anything, it only
//! runs a clock over the loaded item's duration on its own thread and reports
//! position and end-of-track back to the UI thread.

use std::cell::Cell;
use std::rc::Rc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::Context;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use podqueue_core::{MediaEvent, PlayableItem, PlayerHandle, QueueChange, QueueState, Subscription};

const TICK: Duration = Duration::from_millis(250);

/// Commands sent from the UI to the audio element
#[derive(Debug, Clone)]
pub enum ElementCommand {
    /// Load an item and rewind to the start; later reports carry `generation`
    Load { item: PlayableItem, generation: u64 },
    Play,
    Pause,
    /// Unload the current item
    Stop,
    /// Restart the item on its own at end-of-track
    SetLooping(bool),
    Quit,
}

/// Reports sent from the audio element to the UI
#[derive(Debug, Clone, PartialEq)]
pub enum ElementReport {
    Position {
        current: f32,
        total: f32,
        generation: u64,
    },
    Media {
        event: MediaEvent,
        generation: u64,
    },
}

impl ElementReport {
    /// Load the report belongs to
    pub fn generation(&self) -> u64 {
        match self {
            ElementReport::Position { generation, .. } | ElementReport::Media { generation, .. } => {
                *generation
            }
        }
    }
}

/// Counter bumped on every `Load` or `Stop` sent to the element.
///
/// Reports already in flight when the UI switches items carry an older value
/// and are dropped.
#[derive(Debug, Clone, Default)]
pub struct Generation(Rc<Cell<u64>>);

impl Generation {
    pub fn current(&self) -> u64 {
        self.0.get()
    }

    fn bump(&self) -> u64 {
        let next = self.0.get().wrapping_add(1);
        self.0.set(next);
        next
    }
}

/// Playback clock for one loaded item
#[derive(Debug, Clone, Default)]
pub struct ElementClock {
    pub position: f32,
    pub total: f32,
    pub playing: bool,
    pub looping: bool,
    pub loaded: bool,
}

impl ElementClock {
    pub fn load(&mut self, item: &PlayableItem) {
        self.position = 0.0;
        self.total = item.duration_seconds as f32;
        self.loaded = true;
    }

    pub fn unload(&mut self) {
        *self = Self {
            looping: self.looping,
            ..Self::default()
        };
    }

    /// Advance by `dt` seconds.
    ///
    /// Returns `Some(MediaEvent::Ended)` when a non-looping item runs out.
    /// Items with an unknown (zero) duration never end.
    pub fn advance(&mut self, dt: f32) -> Option<MediaEvent> {
        if !self.loaded || !self.playing {
            return None;
        }
        self.position += dt;
        if self.total <= 0.0 || self.position < self.total {
            return None;
        }

        if self.looping {
            log::debug!("Looping item restarted by element");
            self.position = 0.0;
            None
        } else {
            self.position = self.total;
            self.playing = false;
            Some(MediaEvent::Ended)
        }
    }
}

pub struct AudioElement {
    cmd_rx: Receiver<ElementCommand>,
    report_tx: Sender<ElementReport>,
    clock: ElementClock,
    generation: u64,
}

/// UI-side ends of the element's channels
#[derive(Clone)]
pub struct AudioElementHandle {
    pub cmd_tx: Sender<ElementCommand>,
    pub report_rx: Receiver<ElementReport>,
}

impl AudioElement {
    pub fn new() -> (Self, AudioElementHandle) {
        let (cmd_tx, cmd_rx) = unbounded();
        let (report_tx, report_rx) = unbounded();
        let element = Self {
            cmd_rx,
            report_tx,
            clock: ElementClock::default(),
            generation: 0,
        };
        (element, AudioElementHandle { cmd_tx, report_rx })
    }

    pub fn spawn(self) -> anyhow::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("audio-element".to_string())
            .spawn(move || self.run())
            .context("Cannot spawn audio element thread")
    }

    fn run(mut self) {
        log::info!("Audio element started");
        let mut last_tick = Instant::now();

        loop {
            match self.cmd_rx.recv_timeout(TICK) {
                Ok(ElementCommand::Quit) => break,
                Ok(cmd) => self.apply(cmd),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            let now = Instant::now();
            let dt = now.duration_since(last_tick).as_secs_f32();
            last_tick = now;

            let ended = self.clock.advance(dt);
            if self.clock.loaded && !self.report(ElementReport::Position {
                current: self.clock.position,
                total: self.clock.total,
                generation: self.generation,
            }) {
                break;
            }
            if let Some(event) = ended {
                if !self.report(ElementReport::Media {
                    event,
                    generation: self.generation,
                }) {
                    break;
                }
            }
        }
        log::info!("Audio element stopped");
    }

    fn apply(&mut self, cmd: ElementCommand) {
        log::trace!("Element command: {:?}", cmd);
        match cmd {
            ElementCommand::Load { item, generation } => {
                log::info!("Element loading {} ({})", item.media_url, generation);
                self.generation = generation;
                self.clock.load(&item);
            }
            ElementCommand::Play => self.clock.playing = true,
            ElementCommand::Pause => self.clock.playing = false,
            ElementCommand::Stop => self.clock.unload(),
            ElementCommand::SetLooping(looping) => self.clock.looping = looping,
            ElementCommand::Quit => {}
        }
    }

    /// Returns false once the UI side has gone away
    fn report(&self, report: ElementReport) -> bool {
        self.report_tx.send(report).is_ok()
    }
}

/// Commands that bring the element in line with a controller change
pub fn commands_for(
    change: QueueChange,
    state: &QueueState,
    generation: &Generation,
) -> Vec<ElementCommand> {
    let play_or_pause = if state.is_playing {
        ElementCommand::Play
    } else {
        ElementCommand::Pause
    };

    match change {
        QueueChange::Loaded | QueueChange::IndexChanged => match state.current_item() {
            Some(item) => vec![
                ElementCommand::Load {
                    item: item.clone(),
                    generation: generation.bump(),
                },
                play_or_pause,
            ],
            None => {
                generation.bump();
                vec![ElementCommand::Stop]
            }
        },
        QueueChange::Cleared => {
            generation.bump();
            vec![ElementCommand::Stop]
        }
        QueueChange::PlayingChanged => vec![play_or_pause],
        QueueChange::LoopingChanged => vec![ElementCommand::SetLooping(state.is_looping)],
        QueueChange::ShufflingChanged => Vec::new(),
    }
}

/// Keep the element following the controller for as long as the subscription lives
pub fn bridge(
    player: &PlayerHandle,
    cmd_tx: Sender<ElementCommand>,
    generation: Generation,
) -> Subscription {
    player.with(|c| {
        c.subscribe(move |change, state| {
            for cmd in commands_for(change, state, &generation) {
                if let Err(e) = cmd_tx.send(cmd) {
                    log::error!("Audio element unreachable: {}", e);
                    return;
                }
            }
        })
    })
}
