use std::io;
use std::time::Duration;

use clap::Parser;
use podqueue_core::{PlaybackQueueController, PlayerProvider};
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};

mod args;
mod demo;
mod media;
mod router;
mod routes;
mod state;
mod ui;

use args::CliArgs;
use media::{AudioElement, AudioElementHandle, ElementCommand};
use router::{Router, Tab};
use state::AppState;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    tui_logger::init_logger(args.log_level)
        .map_err(|e| anyhow::anyhow!("Failed to init tui_logger: {}", e))?;
    tui_logger::set_default_level(args.log_level);

    log::info!("Starting podqueue");

    let config = args.controller_config();
    let provider = PlayerProvider::new();
    let player = provider.provide(PlaybackQueueController::with_config(&config));

    // Audio element on its own thread
    let (element, element_handle) = AudioElement::new();
    let element_thread = element.spawn()?;

    let mut state = AppState::new(player, element_handle.cmd_tx.clone());
    let episodes = demo::initial_episodes(&args.media);
    log::info!("Queueing {} episodes", episodes.len());
    state.player.update(|c| c.play_queue(episodes, 0));

    let result = run_tui(&mut state, &element_handle);

    // Ensure clean shutdown
    let _ = element_handle.cmd_tx.send(ElementCommand::Quit);
    if element_thread.join().is_err() {
        log::error!("Audio element thread panicked");
    }
    provider.reset();

    result
}

fn run_tui(state: &mut AppState, element: &AudioElementHandle) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut router = Router::new(Tab::Playback.route());

    let result = event_loop(&mut terminal, state, element, &mut router);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut ratatui::Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    element: &AudioElementHandle,
    router: &mut Router,
) -> anyhow::Result<()> {
    loop {
        // Handle audio element reports
        while let Ok(report) = element.report_rx.try_recv() {
            state.handle_report(report);
        }

        // The log tab changes without player activity, so it always redraws
        if state.take_dirty() || router.current_tab() == Some(Tab::Log) {
            terminal.draw(|f| ui::draw(f, state, router))?;
        }

        // Handle input
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let should_quit = handle_global_keys(key.code, state, router)?;
                    if should_quit {
                        return Ok(());
                    }
                    terminal.draw(|f| ui::draw(f, state, router))?;
                }
                Event::Resize(_, _) => {
                    terminal.draw(|f| ui::draw(f, state, router))?;
                }
                _ => {}
            }
        }
    }
}

/// Handle global keys and delegate route-specific input to router
fn handle_global_keys(
    key: KeyCode,
    state: &mut AppState,
    router: &mut Router,
) -> anyhow::Result<bool> {
    match key {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char(' ') => {
            state.player.update(|c| c.toggle_play());
            return Ok(false);
        }
        KeyCode::Char('n') => {
            state.player.update(|c| c.next());
            return Ok(false);
        }
        KeyCode::Char('p') => {
            state.player.update(|c| c.previous());
            return Ok(false);
        }
        KeyCode::Char('l') => {
            state.player.update(|c| c.toggle_loop());
            return Ok(false);
        }
        KeyCode::Char('s') => {
            state.player.update(|c| c.toggle_shuffle());
            return Ok(false);
        }
        KeyCode::Char('c') => {
            state.player.update(|c| c.clear());
            state.queue_list.select(None);
            return Ok(false);
        }
        KeyCode::Tab => {
            // Pushed routes (episode details) count as the Queue tab
            let next = router.current_tab().unwrap_or(Tab::Queue).cycle();
            router.reset_to(next.route(), state)?;
            return Ok(false);
        }
        KeyCode::Esc => {
            if router.depth() > 1 {
                router.pop();
                return Ok(false);
            }
        }
        _ => {}
    }

    // Delegate to the current route's input handler
    let action = router.current_mut().handle_input(key, state)?;
    router.execute_action(action, state)?;
    Ok(false)
}
