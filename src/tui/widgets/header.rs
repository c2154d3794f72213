//! Header widget for the TUI.
//!
//! Displays the application name, version, page tabs, and the store path.

use crate::tui::app::Page;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// Header bar widget.
pub struct Header<'a> {
    store_info: Option<&'a str>,
    page: Page,
    loading: bool,
}

impl<'a> Header<'a> {
    /// Creates a new header widget.
    pub fn new(store_info: Option<&'a str>, page: Page, loading: bool) -> Self {
        Self {
            store_info,
            page,
            loading,
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        // Fill background
        let style = Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        for x in area.left()..area.right() {
            buf[(x, area.y)].set_style(style);
        }

        // Left side: app name and version, then page tabs
        let left_text = format!(" Northwind Dash v{} ", env!("CARGO_PKG_VERSION"));
        buf.set_string(area.x, area.y, &left_text, style);

        let mut x = area.x + left_text.len() as u16;
        for (i, page) in [Page::Home, Page::Dashboard].into_iter().enumerate() {
            let tab = format!(" {} {} ", i + 1, page.title());
            let tab_style = if page == self.page {
                Style::default()
                    .bg(Color::White)
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD)
            } else {
                style
            };
            if x + tab.len() as u16 > area.right() {
                break;
            }
            buf.set_string(x, area.y, &tab, tab_style);
            x += tab.len() as u16;
        }

        // Right side: store path, or a loading marker while queries run
        let right_text = if self.loading {
            Some(" loading… ".to_string())
        } else {
            self.store_info.map(|info| format!(" [db: {}] ", info))
        };
        if let Some(text) = right_text {
            let right_width = text.chars().count() as u16;
            let right_x = area.right().saturating_sub(right_width);
            if right_x >= x {
                buf.set_string(right_x, area.y, &text, style);
            }
        }
    }
}
