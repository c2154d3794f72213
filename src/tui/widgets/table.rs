//! Data table widget for the TUI.
//!
//! Renders a result table with box-drawing borders, auto-sized columns,
//! and a blue background gradient on numeric cells, scaled per column.

use super::palette;
use crate::db::{Table, Value};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Maximum width for any column.
const MAX_COLUMN_WIDTH: usize = 40;

/// Minimum width for any column.
const MIN_COLUMN_WIDTH: usize = 4;

/// Formats a number with comma thousands separators.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Display text for a cell.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Int(i) => format_thousands(*i as f64, 0),
        Value::Float(f) => format_thousands(*f, 2),
        other => other.to_display_string(),
    }
}

/// Widget for rendering a table with gradient-shaded numbers.
pub struct DataTable<'a> {
    title: &'a str,
    table: &'a Table,
}

impl<'a> DataTable<'a> {
    /// Creates a new data table widget.
    pub fn new(title: &'a str, table: &'a Table) -> Self {
        Self { title, table }
    }

    /// Calculates the optimal width for each column.
    fn calculate_column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .table
            .columns
            .iter()
            .map(|col| col.name.chars().count().max(MIN_COLUMN_WIDTH))
            .collect();

        for row in &self.table.rows {
            for (width, value) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell_text(value).chars().count());
            }
        }

        widths.iter().map(|&w| w.min(MAX_COLUMN_WIDTH)).collect()
    }

    /// Min and max of each numeric column, or None for non-numeric columns.
    fn column_ranges(&self) -> Vec<Option<(f64, f64)>> {
        (0..self.table.columns.len())
            .map(|c| {
                let mut values = self.table.rows.iter().filter_map(|row| match row.get(c) {
                    Some(Value::Int(i)) => Some(*i as f64),
                    Some(Value::Float(f)) => Some(*f),
                    _ => None,
                });
                let first = values.next()?;
                Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
            })
            .collect()
    }

    /// Truncates a string to fit within the given width, adding ellipsis if needed.
    fn truncate(s: &str, max_width: usize) -> String {
        if s.chars().count() <= max_width {
            s.to_string()
        } else if max_width <= 3 {
            s.chars().take(max_width).collect()
        } else {
            let kept: String = s.chars().take(max_width - 3).collect();
            format!("{kept}...")
        }
    }

    /// Renders the table to a vector of Lines for embedding in other widgets.
    pub fn render_to_lines(&self, available_width: usize) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            self.title.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))];

        if self.table.columns.is_empty() {
            lines.push(Line::from(Span::styled(
                "(no data)",
                Style::default().fg(Color::DarkGray),
            )));
            return lines;
        }

        let widths = self.calculate_column_widths();

        // Borders and padding
        let total_width: usize = widths.iter().sum::<usize>() + widths.len() * 3 + 1;
        let scale_factor = if total_width > available_width && available_width > 0 {
            available_width as f64 / total_width as f64
        } else {
            1.0
        };

        let adjusted_widths: Vec<usize> = widths
            .iter()
            .map(|&w| ((w as f64 * scale_factor) as usize).max(MIN_COLUMN_WIDTH))
            .collect();

        let ranges = self.column_ranges();

        lines.push(Self::render_border(&adjusted_widths, '┌', '┬', '┐'));
        lines.push(self.render_header_row(&adjusted_widths));
        lines.push(Self::render_border(&adjusted_widths, '├', '┼', '┤'));
        for row in &self.table.rows {
            lines.push(Self::render_data_row(row, &adjusted_widths, &ranges));
        }
        lines.push(Self::render_border(&adjusted_widths, '└', '┴', '┘'));

        let row_count = self.table.row_count();
        lines.push(Line::from(Span::styled(
            format!("{} row{}", row_count, if row_count == 1 { "" } else { "s" }),
            Style::default().fg(Color::DarkGray),
        )));

        lines
    }

    /// Renders a horizontal border line.
    fn render_border(widths: &[usize], left: char, mid: char, right: char) -> Line<'static> {
        let mut border = String::new();
        border.push(left);

        for (i, &width) in widths.iter().enumerate() {
            border.push_str(&"─".repeat(width + 2));
            if i < widths.len() - 1 {
                border.push(mid);
            }
        }

        border.push(right);

        Line::from(Span::styled(border, Style::default().fg(Color::DarkGray)))
    }

    /// Renders the header row with column names.
    fn render_header_row(&self, widths: &[usize]) -> Line<'static> {
        let mut spans = vec![Span::styled("│", Style::default().fg(Color::DarkGray))];

        for (i, col) in self.table.columns.iter().enumerate() {
            let width = widths.get(i).copied().unwrap_or(MIN_COLUMN_WIDTH);
            let name = Self::truncate(&col.name, width);
            spans.push(Span::styled(
                format!(" {:width$} ", name, width = width),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        }

        Line::from(spans)
    }

    /// Renders a data row. Numbers are right-aligned on a gradient background.
    fn render_data_row(
        row: &[Value],
        widths: &[usize],
        ranges: &[Option<(f64, f64)>],
    ) -> Line<'static> {
        let mut spans = vec![Span::styled("│", Style::default().fg(Color::DarkGray))];

        for (i, value) in row.iter().enumerate() {
            let width = widths.get(i).copied().unwrap_or(MIN_COLUMN_WIDTH);
            let text = Self::truncate(&cell_text(value), width);

            let numeric = match value {
                Value::Int(n) => Some(*n as f64),
                Value::Float(f) => Some(*f),
                _ => None,
            };
            let (padded, style) = match (numeric, ranges.get(i).copied().flatten()) {
                (Some(n), Some((lo, hi))) => {
                    let t = palette::normalize(n, lo, hi);
                    (
                        format!(" {:>width$} ", text, width = width),
                        Style::default()
                            .bg(palette::blues(t))
                            .fg(palette::blues_text(t)),
                    )
                }
                _ if value.is_null() => (
                    format!(" {:width$} ", text, width = width),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ),
                _ => (format!(" {:width$} ", text, width = width), Style::default()),
            };

            spans.push(Span::styled(padded, style));
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        }

        Line::from(spans)
    }
}

impl Widget for DataTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.render_to_lines(area.width as usize);

        for (i, line) in lines.iter().enumerate() {
            if i >= area.height as usize {
                break;
            }
            let y = area.y + i as u16;
            buf.set_line(area.x, y, line, area.width);
        }
    }
}
