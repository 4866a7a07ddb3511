use ratatui::{
    Frame,
    crossterm::event::KeyCode,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    router::{RouteAction, RouteHandler},
    state::AppState,
};

const OPTIONS: [&str; 2] = ["▶ Play from here", "♪ Play only this episode"];

/// Details for one queued episode, with a choice of how to play it
#[derive(Debug, Clone)]
pub struct EpisodeRoute {
    index: usize,
    selected: usize,
}

impl EpisodeRoute {
    pub fn new(index: usize) -> Self {
        Self { index, selected: 0 }
    }

    /// Run the selected option against the player
    fn confirm(&self, state: &mut AppState) {
        let index = self.index;
        match self.selected {
            0 => state.player.update(|c| {
                let items = c.state().queue.clone();
                c.play_queue(items, index);
            }),
            _ => state.player.update(|c| {
                if let Some(item) = c.state().get(index).cloned() {
                    c.play_single(item);
                }
            }),
        }
    }
}

impl RouteHandler for EpisodeRoute {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(0)])
            .split(area);

        let details = state.player.with(|c| {
            c.state().get(self.index).map(|item| {
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
                    Line::from(format!("Length: {}", item.display_duration())),
                    Line::from(Span::styled(
                        item.media_url.clone(),
                        Style::default().fg(Color::DarkGray),
                    )),
                    Line::from(Span::styled(
                        item.thumbnail_url.clone(),
                        Style::default().fg(Color::DarkGray),
                    )),
                ]
            })
        });

        let block = Block::default()
            .title(" Episode ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let body = match details {
            Some(lines) => Paragraph::new(lines),
            None => Paragraph::new("Episode is no longer queued")
                .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(body.block(block), chunks[0]);

        let options: Vec<Line> = OPTIONS
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let is_selected = i == self.selected;
                let style = if is_selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let prefix = if is_selected { "> " } else { "  " };
                Line::from(Span::styled(format!("{}{}", prefix, label), style))
            })
            .collect();
        frame.render_widget(
            Paragraph::new(options).block(Block::default().borders(Borders::ALL)),
            chunks[1],
        );
    }

    fn handle_input(&mut self, key: KeyCode, state: &mut AppState) -> anyhow::Result<RouteAction> {
        match key {
            KeyCode::Up | KeyCode::Down => {
                self.selected = (self.selected + 1) % OPTIONS.len();
            }
            KeyCode::Enter => {
                self.confirm(state);
                return Ok(RouteAction::Pop);
            }
            _ => {}
        }
        Ok(RouteAction::None)
    }

    fn name(&self) -> &str {
        "Episode"
    }

    fn help_items(&self, _state: &AppState) -> Vec<(&str, &str)> {
        vec![("↑/↓", "Choose"), ("Enter", "Play"), ("Esc", "Back"), ("Q", "Quit")]
    }
}
