//! Bar chart of total sales per country.
//!
//! Bars are colored along the viridis scale by their own value, so the
//! largest market is the brightest.

use super::palette;
use crate::query::CountrySales;
use ratatui::{
    buffer::Buffer,
    layout::{Direction, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Widget},
};

/// Shown instead of the chart when no country is selected.
pub const NO_COUNTRY_DATA: &str = "No data available for selected countries";

/// One bar: label, height and fill color.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesBar {
    pub label: String,
    pub value: u64,
    pub color: Color,
}

/// Turns rows into bars. Negative totals draw as empty bars.
pub fn sales_bars(rows: &[CountrySales]) -> Vec<SalesBar> {
    let (min, max) = rows.iter().fold((f64::MAX, f64::MIN), |(lo, hi), r| {
        (lo.min(r.total_sales), hi.max(r.total_sales))
    });

    rows.iter()
        .map(|r| SalesBar {
            label: r.country.clone(),
            value: r.total_sales.max(0.0).round() as u64,
            color: palette::viridis(palette::normalize(r.total_sales, min, max)),
        })
        .collect()
}

/// Sales by country widget.
pub struct SalesChart<'a> {
    rows: &'a [CountrySales],
}

impl<'a> SalesChart<'a> {
    pub fn new(rows: &'a [CountrySales]) -> Self {
        Self { rows }
    }
}

impl Widget for SalesChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Sales by Country ");

        if self.rows.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(Line::styled(
                NO_COUNTRY_DATA,
                Style::default().fg(Color::Yellow),
            ))
            .render(inner, buf);
            return;
        }

        let bars: Vec<Bar> = sales_bars(self.rows)
            .into_iter()
            .map(|b| {
                Bar::default()
                    .label(Line::from(b.label))
                    .value(b.value)
                    .text_value(super::table::format_thousands(b.value as f64, 0))
                    .style(Style::default().fg(b.color))
                    .value_style(Style::default().fg(Color::Black).bg(b.color))
            })
            .collect();

        BarChart::default()
            .block(block)
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .data(BarGroup::default().bars(&bars))
            .render(area, buf);
    }
}
