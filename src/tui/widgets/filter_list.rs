//! Multi-select filter list.

use crate::query::MultiSelect;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// A bordered checklist over a [`MultiSelect`].
pub struct FilterList<'a> {
    title: &'a str,
    select: &'a MultiSelect,
    cursor: usize,
    focused: bool,
}

impl<'a> FilterList<'a> {
    pub fn new(title: &'a str, select: &'a MultiSelect, cursor: usize, focused: bool) -> Self {
        Self {
            title,
            select,
            cursor,
            focused,
        }
    }

    /// First visible option index so that the cursor stays on screen.
    fn scroll_offset(&self, visible: usize) -> usize {
        if visible == 0 {
            return 0;
        }
        self.cursor.saturating_sub(visible - 1)
    }
}

impl Widget for FilterList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title = format!(
            " {} ({}/{}) ",
            self.title,
            self.select.selected().len(),
            self.select.options().len()
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.select.options().is_empty() {
            Paragraph::new(Span::styled(
                "(no options)",
                Style::default().fg(Color::DarkGray),
            ))
            .render(inner, buf);
            return;
        }

        let visible = inner.height as usize;
        let offset = self.scroll_offset(visible);
        let lines: Vec<Line> = self
            .select
            .options()
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, option)| {
                let checked = self.select.is_selected(option);
                let marker = if checked { "[x]" } else { "[ ]" };
                let pointer = if i == self.cursor && self.focused {
                    ">"
                } else {
                    " "
                };
                let mut style = if checked {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::Gray)
                };
                if i == self.cursor && self.focused {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Line::from(vec![
                    Span::styled(pointer, Style::default().fg(Color::Cyan)),
                    Span::styled(format!("{marker} {option}"), style),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
