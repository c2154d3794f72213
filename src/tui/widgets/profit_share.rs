//! Share-of-profit chart per category.
//!
//! A terminal stand-in for a donut chart: one proportional stacked bar and a
//! legend with each category's percentage of the selected total.

use super::palette;
use super::table::format_thousands;
use crate::query::CategoryProfit;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Shown instead of the chart when no category is selected.
pub const NO_CATEGORY_DATA: &str = "No data available for selected categories";

/// Height of the stacked bar.
const BAR_ROWS: u16 = 2;

/// One slice of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub label: String,
    pub profit: f64,
    /// Percentage of the positive total, 0..=100.
    pub percent: f64,
    pub color: Color,
}

/// Computes slices. Negative profits count as zero share.
pub fn profit_shares(rows: &[CategoryProfit]) -> Vec<Share> {
    let total: f64 = rows.iter().map(|r| r.profit.max(0.0)).sum();
    rows.iter()
        .enumerate()
        .map(|(i, r)| Share {
            label: r.category_name.clone(),
            profit: r.profit,
            percent: if total > 0.0 {
                r.profit.max(0.0) / total * 100.0
            } else {
                0.0
            },
            color: palette::categorical(i, rows.len()),
        })
        .collect()
}

/// Splits `width` cells across slices by largest remainder so they sum exactly.
pub fn segment_widths(shares: &[Share], width: u16) -> Vec<u16> {
    let exact: Vec<f64> = shares
        .iter()
        .map(|s| s.percent / 100.0 * width as f64)
        .collect();
    let mut widths: Vec<u16> = exact.iter().map(|w| w.floor() as u16).collect();

    let assigned: u16 = widths.iter().sum();
    let has_share = shares.iter().any(|s| s.percent > 0.0);
    if has_share {
        let mut order: Vec<usize> = (0..exact.len()).collect();
        order.sort_by(|&a, &b| {
            let ra = exact[a] - exact[a].floor();
            let rb = exact[b] - exact[b].floor();
            rb.total_cmp(&ra).then(a.cmp(&b))
        });
        for &i in order.iter().take(width.saturating_sub(assigned) as usize) {
            widths[i] += 1;
        }
    }
    widths
}

/// Profit by category widget.
pub struct ProfitShare<'a> {
    rows: &'a [CategoryProfit],
}

impl<'a> ProfitShare<'a> {
    pub fn new(rows: &'a [CategoryProfit]) -> Self {
        Self { rows }
    }
}

impl Widget for ProfitShare<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Profit by Category ");
        let inner = block.inner(area);
        block.render(area, buf);

        if self.rows.is_empty() {
            Paragraph::new(Line::styled(
                NO_CATEGORY_DATA,
                Style::default().fg(Color::Yellow),
            ))
            .render(inner, buf);
            return;
        }

        let shares = profit_shares(self.rows);
        let bar_width = inner.width.saturating_sub(2);
        let widths = segment_widths(&shares, bar_width);

        let bar_rows = BAR_ROWS.min(inner.height);
        for dy in 0..bar_rows {
            let mut x = inner.x + 1;
            for (share, &w) in shares.iter().zip(&widths) {
                for _ in 0..w {
                    buf[(x, inner.y + dy)]
                        .set_symbol("█")
                        .set_style(Style::default().fg(share.color));
                    x += 1;
                }
            }
        }

        let legend_top = inner.y + bar_rows + 1;
        if legend_top >= inner.bottom() {
            return;
        }
        let name_width = shares
            .iter()
            .map(|s| s.label.chars().count())
            .max()
            .unwrap_or(0);
        let lines: Vec<Line> = shares
            .iter()
            .map(|s| {
                Line::from(vec![
                    Span::styled(" ■ ", Style::default().fg(s.color)),
                    Span::raw(format!("{:<name_width$} ", s.label)),
                    Span::styled(
                        format!("{:>5.1}%", s.percent),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(
                        format!("  {}", format_thousands(s.profit, 2)),
                        Style::default().fg(Color::Gray),
                    ),
                ])
            })
            .collect();

        let legend_area = Rect::new(
            inner.x,
            legend_top,
            inner.width,
            inner.bottom() - legend_top,
        );
        Paragraph::new(lines).render(legend_area, buf);
    }
}
