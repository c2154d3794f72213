//! Application state for the TUI.
//!
//! Contains the main App struct and related types for managing UI state.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::query::{DashboardData, FilterState, FilteredView, MultiSelect};

/// How long a toast stays on screen.
const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Which page is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// Landing page with the project description.
    #[default]
    Home,
    /// Charts, filters and the top products table.
    Dashboard,
}

impl Page {
    /// Switches to the other page.
    pub fn next(self) -> Self {
        match self {
            Self::Home => Self::Dashboard,
            Self::Dashboard => Self::Home,
        }
    }

    /// Tab title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Dashboard => "Dashboard",
        }
    }
}

/// Which filter list receives cursor keys on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Countries,
    Categories,
}

impl Focus {
    /// Cycles to the other filter.
    pub fn next(self) -> Self {
        match self {
            Self::Countries => Self::Categories,
            Self::Categories => Self::Countries,
        }
    }
}

/// A transient message in the bottom-right corner.
#[derive(Debug, Clone)]
pub struct ToastMessage {
    pub text: String,
    pub is_error: bool,
    shown_at: Instant,
}

/// Main application state.
pub struct App {
    /// Whether the application is still running.
    pub running: bool,
    /// Current page.
    pub page: Page,
    /// Focused filter list on the dashboard.
    pub focus: Focus,
    /// Tables from the last page load.
    pub data: DashboardData,
    /// Current filter selections.
    pub filters: FilterState,
    /// Cursor row in the country filter.
    pub country_cursor: usize,
    /// Cursor row in the category filter.
    pub category_cursor: usize,
    /// Store description for the header.
    pub store_info: Option<String>,
    /// Active toast, if any.
    pub toast: Option<ToastMessage>,
    /// True while a page load is in flight.
    pub loading: bool,
    default_country_count: usize,
    reload_requested: bool,
}

impl App {
    /// Creates a new App instance with no data loaded yet.
    pub fn new(store_info: Option<String>, default_country_count: usize) -> Self {
        Self {
            running: true,
            page: Page::default(),
            focus: Focus::default(),
            data: DashboardData::default(),
            filters: FilterState::default(),
            country_cursor: 0,
            category_cursor: 0,
            store_info,
            toast: None,
            loading: false,
            default_country_count,
            reload_requested: false,
        }
    }

    /// Installs freshly loaded tables and resets filters to their defaults.
    pub fn set_data(&mut self, data: DashboardData) {
        self.filters = FilterState::defaults(&data, self.default_country_count);
        self.data = data;
        self.country_cursor = 0;
        self.category_cursor = 0;
    }

    /// Installs the result of a finished reload and reports it in a toast.
    pub fn finish_load(&mut self, data: DashboardData) {
        self.loading = false;
        let failed = data.notices.len();
        self.set_data(data);
        if failed > 0 {
            self.show_toast(format!("{failed} of 3 queries failed"), true);
        } else {
            self.show_toast("Dashboard data loaded", false);
        }
    }

    /// The tables the charts should draw, given the current selection.
    pub fn filtered(&self) -> FilteredView {
        self.filters.apply(&self.data)
    }

    /// Shows a transient message.
    pub fn show_toast(&mut self, text: impl Into<String>, is_error: bool) {
        self.toast = Some(ToastMessage {
            text: text.into(),
            is_error,
            shown_at: Instant::now(),
        });
    }

    /// Drops the toast once it has been visible long enough.
    pub fn clear_expired_toast(&mut self) {
        if self
            .toast
            .as_ref()
            .is_some_and(|t| t.shown_at.elapsed() >= TOAST_DURATION)
        {
            self.toast = None;
        }
    }

    /// Returns and clears a pending reload request.
    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }

    /// Handles an event and updates application state.
    pub fn handle_event(&mut self, event: super::Event) {
        use super::Event;

        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(_, _) => {
                // Terminal resize is handled automatically by ratatui
            }
            Event::Tick => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('1') => self.page = Page::Home,
            KeyCode::Char('2') => self.page = Page::Dashboard,
            KeyCode::Tab | KeyCode::BackTab => self.page = self.page.next(),
            KeyCode::Char('r') => self.reload_requested = true,
            _ if self.page == Page::Dashboard => self.handle_dashboard_key(key.code),
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Right => self.focus = self.focus.next(),
            KeyCode::Up => {
                let cursor = self.cursor_mut();
                *cursor = cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                let len = self.focused_select().options().len();
                let cursor = self.cursor_mut();
                if *cursor + 1 < len {
                    *cursor += 1;
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                let cursor = match self.focus {
                    Focus::Countries => self.country_cursor,
                    Focus::Categories => self.category_cursor,
                };
                let option = self.focused_select().options().get(cursor).cloned();
                if let Some(option) = option {
                    self.focused_select_mut().toggle(&option);
                }
            }
            KeyCode::Char('a') => self.focused_select_mut().select_all(),
            KeyCode::Char('n') => self.focused_select_mut().clear(),
            KeyCode::Char('d') => {
                self.filters = FilterState::defaults(&self.data, self.default_country_count);
            }
            _ => {}
        }
    }

    fn cursor_mut(&mut self) -> &mut usize {
        match self.focus {
            Focus::Countries => &mut self.country_cursor,
            Focus::Categories => &mut self.category_cursor,
        }
    }

    fn focused_select(&self) -> &MultiSelect {
        match self.focus {
            Focus::Countries => &self.filters.countries,
            Focus::Categories => &self.filters.categories,
        }
    }

    fn focused_select_mut(&mut self) -> &mut MultiSelect {
        match self.focus {
            Focus::Countries => &mut self.filters.countries,
            Focus::Categories => &mut self.filters.categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ColumnInfo, Table, Value};
    use crate::query::aggregates::columns;
    use crate::tui::Event;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn sample_data() -> DashboardData {
        let sales = Table::with_data(
            vec![
                ColumnInfo::new(columns::COUNTRY, ""),
                ColumnInfo::new(columns::TOTAL_SALES, ""),
                ColumnInfo::new(columns::TOTAL_ORDERS, ""),
            ],
            ["USA", "Germany", "Austria"]
                .iter()
                .map(|c| vec![Value::from(*c), Value::Float(10.0), Value::Int(1)])
                .collect(),
        );
        let profit = Table::with_data(
            vec![
                ColumnInfo::new(columns::CATEGORY_NAME, ""),
                ColumnInfo::new(columns::PROFIT, ""),
            ],
            vec![
                vec![Value::from("Beverages"), Value::Float(5.0)],
                vec![Value::from("Seafood"), Value::Float(4.0)],
            ],
        );
        DashboardData {
            sales_by_country: sales,
            profit_by_category: profit,
            ..Default::default()
        }
    }

    fn dashboard_app() -> App {
        let mut app = App::new(None, 2);
        app.set_data(sample_data());
        app.page = Page::Dashboard;
        app
    }

    #[test]
    fn test_new_app_starts_on_home() {
        let app = App::new(Some("data/nw.sqlite".to_string()), 5);
        assert!(app.running);
        assert_eq!(app.page, Page::Home);
        assert_eq!(app.focus, Focus::Countries);
    }

    #[test]
    fn test_page_switching() {
        let mut app = App::new(None, 5);
        app.handle_event(key(KeyCode::Char('2')));
        assert_eq!(app.page, Page::Dashboard);
        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.page, Page::Home);
        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.page, Page::Dashboard);
        app.handle_event(key(KeyCode::Char('1')));
        assert_eq!(app.page, Page::Home);
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = App::new(None, 5);
            app.handle_event(key(code));
            assert!(!app.running);
        }

        let mut app = App::new(None, 5);
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(!app.running);
    }

    #[test]
    fn test_set_data_applies_defaults() {
        let app = dashboard_app();
        assert_eq!(
            app.filters.countries.selected_in_order(),
            vec!["USA", "Germany"]
        );
        assert_eq!(app.filters.categories.selected().len(), 2);
        assert_eq!(app.filtered().country_sales.row_count(), 2);
    }

    #[test]
    fn test_toggle_under_cursor() {
        let mut app = dashboard_app();
        app.handle_event(key(KeyCode::Down));
        app.handle_event(key(KeyCode::Down));
        app.handle_event(key(KeyCode::Char(' ')));
        assert!(app.filters.countries.is_selected("Austria"));

        app.handle_event(key(KeyCode::Up));
        app.handle_event(key(KeyCode::Char(' ')));
        assert!(!app.filters.countries.is_selected("Germany"));
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut app = dashboard_app();
        for _ in 0..10 {
            app.handle_event(key(KeyCode::Down));
        }
        assert_eq!(app.country_cursor, 2);
        for _ in 0..10 {
            app.handle_event(key(KeyCode::Up));
        }
        assert_eq!(app.country_cursor, 0);
    }

    #[test]
    fn test_focus_switch_and_clear_categories() {
        let mut app = dashboard_app();
        app.handle_event(key(KeyCode::Right));
        assert_eq!(app.focus, Focus::Categories);
        app.handle_event(key(KeyCode::Char('n')));
        assert!(app.filtered().category_profit.is_empty());
        app.handle_event(key(KeyCode::Char('a')));
        assert_eq!(app.filtered().category_profit.row_count(), 2);
    }

    #[test]
    fn test_restore_defaults() {
        let mut app = dashboard_app();
        app.handle_event(key(KeyCode::Char('a')));
        assert_eq!(app.filters.countries.selected().len(), 3);
        app.handle_event(key(KeyCode::Char('d')));
        assert_eq!(app.filters.countries.selected().len(), 2);
    }

    #[test]
    fn test_filter_keys_ignored_on_home() {
        let mut app = dashboard_app();
        app.page = Page::Home;
        app.handle_event(key(KeyCode::Char('n')));
        assert_eq!(app.filters.countries.selected().len(), 2);
    }

    #[test]
    fn test_reload_request() {
        let mut app = App::new(None, 5);
        assert!(!app.take_reload_request());
        app.handle_event(key(KeyCode::Char('r')));
        assert!(app.take_reload_request());
        assert!(!app.take_reload_request());
    }

    #[test]
    fn test_finish_load_reports_outcome() {
        let mut app = App::new(None, 2);
        app.loading = true;
        app.finish_load(sample_data());

        assert!(!app.loading);
        assert_eq!(app.filters.countries.selected().len(), 2);
        let toast = app.toast.as_ref().map(|t| (t.text.as_str(), t.is_error));
        assert_eq!(toast, Some(("Dashboard data loaded", false)));

        let failed = DashboardData {
            notices: vec!["Database error: locked".to_string()],
            ..Default::default()
        };
        app.finish_load(failed);
        let toast = app.toast.as_ref().map(|t| (t.text.as_str(), t.is_error));
        assert_eq!(toast, Some(("1 of 3 queries failed", true)));
    }

    #[test]
    fn test_toast_lifecycle() {
        let mut app = App::new(None, 5);
        app.show_toast("Reloaded", false);
        app.clear_expired_toast();
        assert!(app.toast.is_some());
        if let Some(toast) = app.toast.as_mut() {
            toast.shown_at = Instant::now() - TOAST_DURATION;
        }
        app.clear_expired_toast();
        assert!(app.toast.is_none());
    }
}
