//! UI rendering for the TUI.
//!
//! Defines the layout and renders all UI components.

use super::app::{App, Focus, Page};
use super::widgets::{
    counters::Counters, filter_list::FilterList, header::Header, home::HomePage,
    profit_share::ProfitShare, sales_chart::SalesChart, table::DataTable, toast::Toast,
};
use crate::query::{CategoryProfit, CountrySales};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Rows a filter list gets, including its border.
const FILTER_HEIGHT: u16 = 8;

/// Rows the counter tiles get.
const COUNTER_HEIGHT: u16 = 4;

/// Renders the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: header, content, key hints
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(
        Header::new(app.store_info.as_deref(), app.page, app.loading),
        main_layout[0],
    );

    match app.page {
        Page::Home => frame.render_widget(HomePage, main_layout[1]),
        Page::Dashboard => render_dashboard(frame, main_layout[1], app),
    }

    render_key_hints(frame, main_layout[2], app.page);

    if let Some(toast) = &app.toast {
        frame.render_widget(Toast::new(&toast.text, toast.is_error), Toast::area(area));
    }
}

/// Renders the dashboard page: notices, filters, charts, table, counters.
fn render_dashboard(frame: &mut Frame, area: Rect, app: &App) {
    let notices = app.data.notices.len() as u16;
    let table_height = (app.data.top_products.row_count() as u16 + 6).min(16);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(notices),
            Constraint::Length(FILTER_HEIGHT),
            Constraint::Min(6),
            Constraint::Length(table_height),
            Constraint::Length(COUNTER_HEIGHT),
        ])
        .split(area);

    render_notices(frame, rows[0], &app.data.notices);

    let filter_cols = halves(rows[1]);
    frame.render_widget(
        FilterList::new(
            "Countries",
            &app.filters.countries,
            app.country_cursor,
            app.focus == Focus::Countries,
        ),
        filter_cols[0],
    );
    frame.render_widget(
        FilterList::new(
            "Product Categories",
            &app.filters.categories,
            app.category_cursor,
            app.focus == Focus::Categories,
        ),
        filter_cols[1],
    );

    let view = app.filtered();
    let country_rows = CountrySales::from_table(&view.country_sales);
    let category_rows = CategoryProfit::from_table(&view.category_profit);

    let chart_cols = halves(rows[2]);
    frame.render_widget(SalesChart::new(&country_rows), chart_cols[0]);
    frame.render_widget(ProfitShare::new(&category_rows), chart_cols[1]);

    frame.render_widget(
        DataTable::new("Top 10 Selling Products", &app.data.top_products),
        rows[3],
    );

    let metrics = [
        ("Total Countries", app.data.total_countries()),
        ("Total Product Categories", app.data.total_categories()),
    ];
    frame.render_widget(Counters::new(&metrics), rows[4]);
}

/// Renders one red line per failed query.
fn render_notices(frame: &mut Frame, area: Rect, notices: &[String]) {
    if notices.is_empty() {
        return;
    }
    let style = Style::default()
        .fg(Color::White)
        .bg(Color::Red)
        .add_modifier(Modifier::BOLD);
    let lines: Vec<Line> = notices
        .iter()
        .map(|n| Line::from(Span::styled(format!(" {n} "), style)))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// Renders the key hint line at the bottom.
fn render_key_hints(frame: &mut Frame, area: Rect, page: Page) {
    let hints = match page {
        Page::Home => " 1/2/Tab: pages  r: reload  q: quit",
        Page::Dashboard => {
            " ←/→: filter  ↑/↓: move  Space: toggle  a: all  n: none  d: defaults  r: reload  q: quit"
        }
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray))),
        area,
    );
}

fn halves(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}
