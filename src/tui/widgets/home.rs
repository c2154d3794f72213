//! Landing page.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub const TITLE: &str = "Northwind Sales Analysis";

/// Static introduction to the project.
pub struct HomePage;

impl HomePage {
    fn lines() -> Vec<Line<'static>> {
        let heading = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let subheading = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        let dim = Style::default().fg(Color::DarkGray);

        vec![
            Line::styled(TITLE, heading).alignment(Alignment::Center),
            Line::default(),
            Line::styled("Project Introduction", subheading),
            Line::default(),
            Line::styled("Objective", heading),
            Line::raw(
                "Analyze Northwind's sales trends in detail using data visualization \
                 and analysis techniques.",
            ),
            Line::default(),
            Line::styled("Context", heading),
            Line::raw(
                "Built as a programming workshop project, applying data analysis and \
                 programming to a classic sample database.",
            ),
            Line::default(),
            Line::styled("Methodology", heading),
            Line::from(vec![
                Span::raw(" • "),
                Span::styled("Tools: ", subheading),
                Span::raw("Rust, ratatui, SQLite"),
            ]),
            Line::from(vec![
                Span::raw(" • "),
                Span::styled("Database: ", subheading),
                Span::raw("Northwind"),
            ]),
            Line::from(vec![
                Span::raw(" • "),
                Span::styled("Techniques: ", subheading),
                Span::raw("sales visualization, analysis by category and country"),
            ]),
            Line::default(),
            Line::styled("Project Description", subheading),
            Line::raw(
                "This project explores the Northwind database for insight into sales, \
                 product categories and geographic distribution. Interactive charts \
                 and filters help explain how the business performs.",
            ),
            Line::default(),
            Line::styled("─".repeat(40), dim),
            Line::styled("Press 2 or Tab to open the dashboard, q to quit.", dim),
        ]
    }
}

impl Widget for HomePage {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        Paragraph::new(Self::lines())
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
