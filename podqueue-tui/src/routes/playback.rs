use ratatui::{
    Frame,
    crossterm::event::KeyCode,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::{
    router::{RouteAction, RouteHandler},
    state::AppState,
};

// ==================================================================
// Playback Route Implementation
// ==================================================================

#[derive(Debug, Clone)]
pub struct PlaybackRoute;

impl RouteHandler for PlaybackRoute {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        draw_playback_panel(frame, area, state);
    }

    fn handle_input(&mut self, key: KeyCode, state: &mut AppState) -> anyhow::Result<RouteAction> {
        match key {
            KeyCode::Right => state.player.update(|c| c.next()),
            KeyCode::Left => state.player.update(|c| c.previous()),
            _ => {}
        }
        Ok(RouteAction::None)
    }

    fn name(&self) -> &str {
        "Playback"
    }

    fn help_items(&self, _state: &AppState) -> Vec<(&str, &str)> {
        vec![
            ("Space", "Play/Pause"),
            ("N/P", "Next/Prev"),
            ("L", "Loop"),
            ("S", "Shuffle"),
            ("C", "Clear"),
            ("Tab", "Switch Tab"),
            ("Q", "Quit"),
        ]
    }
}

/// Draw the playback panel
pub fn draw_playback_panel(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Now playing info
            Constraint::Length(3), // Progress bar
            Constraint::Length(3), // Flags
            Constraint::Min(0),
        ])
        .split(area);

    draw_now_playing(f, chunks[0], state);
    draw_progress(f, chunks[1], state);
    draw_flags(f, chunks[2], state);
}

/// Draw the now playing section
fn draw_now_playing(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" 🎙 Now Playing ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    let inner = block.inner(area);
    f.render_widget(block, area);

    let text = state.player.with(|c| {
        c.current_item().map(|item| {
            vec![
                Line::from(Span::styled(
                    item.title.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    item.members.clone(),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(Span::styled(
                    item.media_url.clone(),
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        })
    });

    match text {
        Some(lines) => f.render_widget(Paragraph::new(lines), inner),
        None => f.render_widget(
            Paragraph::new("Nothing playing").style(Style::default().fg(Color::DarkGray)),
            inner,
        ),
    }
}

/// Draw the progress bar
fn draw_progress(f: &mut Frame, area: Rect, state: &AppState) {
    let progress_pct = (state.progress() * 100.0) as u16;
    let label = format!(
        "{} / {}",
        AppState::format_time(state.position),
        AppState::format_time(state.duration)
    );

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .percent(progress_pct)
        .label(label);

    f.render_widget(gauge, area);
}

fn flag_span(label: &str, on: bool) -> Span<'static> {
    let style = if on {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!(" {} ", label), style)
}

/// Draw playing / loop / shuffle indicators and navigation availability
fn draw_flags(f: &mut Frame, area: Rect, state: &AppState) {
    let line = state.player.with(|c| {
        let s = c.state();
        Line::from(vec![
            flag_span(if s.is_playing { "▶ Playing" } else { "⏸ Paused" }, s.is_playing),
            flag_span("🔁 Loop", s.is_looping),
            flag_span("🔀 Shuffle", s.is_shuffling),
            flag_span("⏮ Prev", s.has_previous()),
            flag_span("⏭ Next", s.has_next()),
        ])
    });

    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}
