use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strum::IntoEnumIterator;

use crate::{
    router::{Router, Tab},
    state::AppState,
};

/// Draw the TUI interface
pub fn draw(f: &mut Frame, state: &AppState, router: &Router) {
    // Sidebar (left) and main content (right)
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Length(15), Constraint::Min(40)])
        .split(f.area());

    draw_sidebar(f, main_chunks[0], router);
    draw_main_content(f, main_chunks[1], state, router);
}

/// Draw the sidebar navigation
fn draw_sidebar(f: &mut Frame, area: Rect, router: &Router) {
    let block = Block::default()
        .title(" Navigation ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let active = router.current_tab();
    let nav_text: Vec<Line> = Tab::iter()
        .map(|tab| {
            let is_active = active == Some(tab);
            let prefix = if is_active { "▶ " } else { "  " };
            let style = if is_active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(format!("{}{}", prefix, tab), style))
        })
        .collect();

    f.render_widget(Paragraph::new(nav_text), inner);
}

fn draw_main_content(f: &mut Frame, area: Rect, state: &AppState, router: &Router) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Route content
            Constraint::Length(3), // Controls info
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    router.current().render(f, chunks[0], state);
    draw_controls(f, chunks[1], state, router);
    draw_status(f, chunks[2], state);
}

/// Draw the controls help section from the current route's help items
fn draw_controls(f: &mut Frame, area: Rect, state: &AppState, router: &Router) {
    let spans: Vec<Span> = router
        .current()
        .help_items(state)
        .into_iter()
        .flat_map(|(key, label)| {
            let key_color = match key {
                "Q" => Color::Red,
                "Tab" | "Esc" => Color::Magenta,
                _ => Color::Yellow,
            };
            [
                Span::styled(format!("[{}]", key), Style::default().fg(key_color)),
                Span::raw(format!(" {}  ", label)),
            ]
        })
        .collect();

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Controls "));

    f.render_widget(paragraph, area);
}

/// Draw the status section
fn draw_status(f: &mut Frame, area: Rect, state: &AppState) {
    let (is_playing, queue_len, flags) = state.player.with(|c| {
        let s = c.state();
        let mut flags = Vec::new();
        if s.is_looping {
            flags.push("🔁");
        }
        if s.is_shuffling {
            flags.push("🔀");
        }
        (s.is_playing, s.len(), flags.join(" "))
    });

    let status_style = if is_playing {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let status_text = format!(
        "{}  |  Queue: {}  |  {}",
        state.status_message(),
        queue_len,
        if flags.is_empty() { "➡️" } else { flags.as_str() }
    );

    let paragraph = Paragraph::new(status_text)
        .style(status_style)
        .block(Block::default().borders(Borders::ALL).title(" Status "));

    f.render_widget(paragraph, area);
}
