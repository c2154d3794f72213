//! Summary metric tiles.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

/// A row of labelled counters, each in its own bordered tile.
pub struct Counters<'a> {
    metrics: &'a [(&'a str, usize)],
}

impl<'a> Counters<'a> {
    pub fn new(metrics: &'a [(&'a str, usize)]) -> Self {
        Self { metrics }
    }
}

impl Widget for Counters<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.metrics.is_empty() {
            return;
        }

        let tiles = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Ratio(1, self.metrics.len() as u32);
                self.metrics.len()
            ])
            .split(area);

        for (&(label, value), &tile) in self.metrics.iter().zip(tiles.iter()) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray));
            let lines = vec![
                Line::styled(label.to_string(), Style::default().fg(Color::Gray)),
                Line::styled(
                    value.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ];
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block)
                .render(tile, buf);
        }
    }
}
