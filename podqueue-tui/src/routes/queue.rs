use ratatui::{
    Frame,
    crossterm::event::KeyCode,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::{
    router::{RouteAction, RouteHandler},
    routes::episode::EpisodeRoute,
    state::AppState,
};

/// Queue route
#[derive(Debug, Clone)]
pub struct QueueRoute;

impl RouteHandler for QueueRoute {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        draw_queue_panel(frame, area, state);
    }

    fn handle_input(&mut self, key: KeyCode, state: &mut AppState) -> anyhow::Result<RouteAction> {
        match key {
            KeyCode::Up => state.queue_prev(),
            KeyCode::Down => state.queue_next(),
            KeyCode::Enter => {
                if let Some(idx) = state.queue_list.selected() {
                    state.player.update(|c| c.select(idx));
                }
            }
            KeyCode::Char('i') => {
                if let Some(idx) = state.queue_list.selected() {
                    return Ok(RouteAction::Push(Box::new(EpisodeRoute::new(idx))));
                }
            }
            _ => {}
        }
        Ok(RouteAction::None)
    }

    fn name(&self) -> &str {
        "Queue"
    }

    fn on_enter(&mut self, state: &mut AppState) -> anyhow::Result<()> {
        state.select_current();
        Ok(())
    }

    fn help_items(&self, _state: &AppState) -> Vec<(&str, &str)> {
        vec![
            ("↑/↓", "Navigate"),
            ("Enter", "Play"),
            ("I", "Episode"),
            ("N/P", "Next/Prev"),
            ("Tab", "Switch Tab"),
            ("Q", "Quit"),
        ]
    }
}

/// Draw the queue panel
pub fn draw_queue_panel(f: &mut Frame, area: Rect, state: &AppState) {
    let (items, count): (Vec<ListItem>, usize) = state.player.with(|c| {
        let queue = c.state();
        let items: Vec<ListItem> = queue
            .queue
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let is_current = queue.current_index == i;
                let prefix = if is_current { "▶ " } else { "  " };
                let style = if is_current {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(format!(
                    "{}{}  [{}]",
                    prefix,
                    item.title,
                    item.display_duration()
                ))
                .style(style)
            })
            .collect();
        (items, queue.len())
    });

    let block = Block::default()
        .title(format!(" Queue ({} episodes) ", count))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if items.is_empty() {
        let empty_msg = Paragraph::new("Queue is empty. Pass media files on the command line.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty_msg, area);
    } else {
        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut list_state = state.queue_list.clone();
        f.render_stateful_widget(list, area, &mut list_state);
    }
}
