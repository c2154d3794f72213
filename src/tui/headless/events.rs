//! Event DSL for headless runs.
//!
//! A script is a list of `type:value` items separated by commas or newlines,
//! with `#` comments:
//!
//! ```text
//! key:2
//! key:space
//! assert:state:selected_countries=4
//! assert:selected:countries=Germany|France|Brazil|Austria
//! snapshot:after-toggle
//! ```
//!
//! Everything is validated at parse time, so a typo in a field name or
//! pattern fails the run up front instead of silently failing an assertion.

use crate::error::{DashError, Result};
use crate::tui::app::{App, Focus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;

/// Key names understood by `key:` besides single characters.
const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("space", KeyCode::Char(' ')),
    ("enter", KeyCode::Enter),
    ("return", KeyCode::Enter),
    ("esc", KeyCode::Esc),
    ("escape", KeyCode::Esc),
    ("tab", KeyCode::Tab),
    ("backtab", KeyCode::BackTab),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
];

/// Separator between options in `assert:selected:`.
const OPTION_SEPARATOR: char = '|';

/// A readable piece of dashboard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateField {
    Page,
    Focus,
    Running,
    SelectedCountries,
    SelectedCategories,
    CountryCursor,
    CategoryCursor,
    NoticeCount,
    TotalCountries,
    TotalCategories,
}

impl StateField {
    const ALL: [StateField; 10] = [
        Self::Page,
        Self::Focus,
        Self::Running,
        Self::SelectedCountries,
        Self::SelectedCategories,
        Self::CountryCursor,
        Self::CategoryCursor,
        Self::NoticeCount,
        Self::TotalCountries,
        Self::TotalCategories,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Focus => "focus",
            Self::Running => "running",
            Self::SelectedCountries => "selected_countries",
            Self::SelectedCategories => "selected_categories",
            Self::CountryCursor => "country_cursor",
            Self::CategoryCursor => "category_cursor",
            Self::NoticeCount => "notice_count",
            Self::TotalCountries => "total_countries",
            Self::TotalCategories => "total_categories",
        }
    }

    fn parse(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|f| f.name()).collect();
                DashError::config(format!(
                    "Unknown state field: '{}'. Valid fields: {}",
                    name,
                    known.join(", ")
                ))
            })
    }

    /// Current value as it appears in assertions. Selections read as counts.
    pub fn read(self, app: &App) -> String {
        match self {
            Self::Page => format!("{:?}", app.page),
            Self::Focus => format!("{:?}", app.focus),
            Self::Running => app.running.to_string(),
            Self::SelectedCountries => app.filters.countries.selected().len().to_string(),
            Self::SelectedCategories => app.filters.categories.selected().len().to_string(),
            Self::CountryCursor => app.country_cursor.to_string(),
            Self::CategoryCursor => app.category_cursor.to_string(),
            Self::NoticeCount => app.data.notices.len().to_string(),
            Self::TotalCountries => app.data.total_countries().to_string(),
            Self::TotalCategories => app.data.total_categories().to_string(),
        }
    }
}

/// Comparison in a state assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ge,
    Le,
    Gt,
    Lt,
}

impl CompareOp {
    /// Longest symbols first so `>=` is not read as `>`.
    const SYMBOLS: [(&'static str, CompareOp); 6] = [
        (">=", Self::Ge),
        ("<=", Self::Le),
        ("==", Self::Eq),
        (">", Self::Gt),
        ("<", Self::Lt),
        ("=", Self::Eq),
    ];

    fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Lt => "<",
        }
    }

    /// Numbers compare numerically; anything else only supports equality.
    fn holds(self, actual: &str, expected: &str) -> bool {
        match (actual.parse::<i64>(), expected.parse::<i64>()) {
            (Ok(a), Ok(e)) => self.accepts(a.cmp(&e)),
            _ => self == Self::Eq && actual == expected,
        }
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering.is_eq(),
            Self::Ge => ordering.is_ge(),
            Self::Le => ordering.is_le(),
            Self::Gt => ordering.is_gt(),
            Self::Lt => ordering.is_lt(),
        }
    }
}

/// A check against the rendered screen or the dashboard state.
#[derive(Debug, Clone, PartialEq)]
pub enum Assertion {
    /// Screen contains text, ignoring case.
    Contains(String),
    /// Screen contains text exactly.
    ContainsExact(String),
    /// Screen does not contain text, ignoring case.
    NotContains(String),
    /// Screen matches a regex. The pattern is validated when parsed.
    Matches(String),
    /// A state field compared against a value.
    State {
        field: StateField,
        op: CompareOp,
        value: String,
    },
    /// A filter's selection, in display order, is exactly `options`.
    Selected { filter: Focus, options: Vec<String> },
}

impl Assertion {
    /// Checks the assertion against the screen and app state.
    pub fn check(&self, screen: &str, app: &App) -> bool {
        match self {
            Self::Contains(text) => screen.to_lowercase().contains(&text.to_lowercase()),
            Self::ContainsExact(text) => screen.contains(text.as_str()),
            Self::NotContains(text) => !screen.to_lowercase().contains(&text.to_lowercase()),
            Self::Matches(pattern) => regex::Regex::new(pattern)
                .map(|re| re.is_match(screen))
                .unwrap_or(false),
            Self::State { field, op, value } => op.holds(&field.read(app), value),
            Self::Selected { filter, options } => {
                let select = match filter {
                    Focus::Countries => &app.filters.countries,
                    Focus::Categories => &app.filters.categories,
                };
                select.selected_in_order() == *options
            }
        }
    }
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains(t) => write!(f, "contains:{t}"),
            Self::ContainsExact(t) => write!(f, "contains-exact:{t}"),
            Self::NotContains(t) => write!(f, "not-contains:{t}"),
            Self::Matches(p) => write!(f, "matches:{p}"),
            Self::State { field, op, value } => {
                write!(f, "state:{}{}{}", field.name(), op.symbol(), value)
            }
            Self::Selected { filter, options } => {
                let name = match filter {
                    Focus::Countries => "countries",
                    Focus::Categories => "categories",
                };
                let joined = options.join(&OPTION_SEPARATOR.to_string());
                write!(f, "selected:{name}={joined}")
            }
        }
    }
}

/// A parsed event that can be executed.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Key(KeyEvent),
    Wait(Duration),
    Resize(u16, u16),
    /// Captures the screen under a name.
    Snapshot(String),
    Assert(Assertion),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => {
                f.write_str("key:")?;
                for (flag, name) in [
                    (KeyModifiers::CONTROL, "ctrl"),
                    (KeyModifiers::ALT, "alt"),
                    (KeyModifiers::SHIFT, "shift"),
                ] {
                    if key.modifiers.contains(flag) {
                        write!(f, "{name}+")?;
                    }
                }
                match key.code {
                    KeyCode::Char(c) if c != ' ' => write!(f, "{c}"),
                    code => {
                        let name = NAMED_KEYS
                            .iter()
                            .find(|(_, k)| *k == code)
                            .map_or("unknown", |(name, _)| name);
                        f.write_str(name)
                    }
                }
            }
            Self::Wait(d) => write!(f, "wait:{}ms", d.as_millis()),
            Self::Resize(w, h) => write!(f, "resize:{w}x{h}"),
            Self::Snapshot(name) => write!(f, "snapshot:{name}"),
            Self::Assert(a) => write!(f, "assert:{a}"),
        }
    }
}

/// Parser for the event DSL.
#[derive(Debug, Default)]
pub struct EventParser;

impl EventParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses a whole script. Blank lines and `#` lines are skipped.
    pub fn parse_all(&self, input: &str) -> Result<Vec<Event>> {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .flat_map(|line| line.split(','))
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| self.parse_one(item))
            .collect()
    }

    /// Parses a single `type:value` item.
    pub fn parse_one(&self, input: &str) -> Result<Event> {
        let input = input.trim();
        let (kind, value) = split_pair(input, ':').ok_or_else(|| {
            DashError::config(format!(
                "Invalid event syntax: '{input}'. Expected format: type:value"
            ))
        })?;

        match kind.to_lowercase().as_str() {
            "key" => parse_key(value).map(Event::Key),
            "wait" => parse_wait(value).map(Event::Wait),
            "resize" => parse_resize(value),
            "snapshot" => Ok(Event::Snapshot(value.to_string())),
            "assert" => parse_assertion(value).map(Event::Assert),
            other => Err(DashError::config(format!(
                "Unknown event type: '{other}'. Valid types: key, wait, resize, snapshot, assert"
            ))),
        }
    }
}

/// Splits on the first `sep` and trims both halves.
fn split_pair(input: &str, sep: char) -> Option<(&str, &str)> {
    input
        .split_once(sep)
        .map(|(left, right)| (left.trim(), right.trim()))
}

/// Parses "tab", "ctrl+c", "space" or a single character.
fn parse_key(value: &str) -> Result<KeyEvent> {
    let (modifier_names, key) = match value.rsplit_once('+') {
        // A lone "+" is the plus key itself.
        Some((mods, key)) if !key.is_empty() => (Some(mods), key),
        _ => (None, value),
    };

    let mut modifiers = KeyModifiers::empty();
    for name in modifier_names.into_iter().flat_map(|m| m.split('+')) {
        modifiers |= match name.to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            _ => {
                return Err(DashError::config(format!(
                    "Unknown modifier: '{name}'. Valid modifiers: ctrl, alt, shift"
                )))
            }
        };
    }

    let lowered = key.to_lowercase();
    let code = match NAMED_KEYS.iter().find(|(name, _)| *name == lowered) {
        Some((_, code)) => *code,
        None => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => {
                    return Err(DashError::config(format!(
                        "Unknown key: '{key}'. Use single characters or named keys like tab, space, up"
                    )))
                }
            }
        }
    };

    Ok(KeyEvent::new(code, modifiers))
}

/// Parses "100ms", "2s", or a bare number of milliseconds.
fn parse_wait(value: &str) -> Result<Duration> {
    let value = value.to_lowercase();
    let invalid = || DashError::config(format!("Invalid duration: '{value}'"));

    if let Some(ms) = value.strip_suffix("ms") {
        ms.parse().map(Duration::from_millis).map_err(|_| invalid())
    } else if let Some(secs) = value.strip_suffix('s') {
        secs.parse().map(Duration::from_secs).map_err(|_| invalid())
    } else {
        value.parse().map(Duration::from_millis).map_err(|_| invalid())
    }
}

/// Parses "120x40".
fn parse_resize(value: &str) -> Result<Event> {
    let invalid =
        || DashError::config(format!("Invalid resize format: '{value}'. Expected WIDTHxHEIGHT"));
    let (w, h) = split_pair(value, 'x').ok_or_else(invalid)?;
    let width = w.parse().map_err(|_| invalid())?;
    let height = h.parse().map_err(|_| invalid())?;
    Ok(Event::Resize(width, height))
}

/// Parses the part after `assert:`.
fn parse_assertion(value: &str) -> Result<Assertion> {
    let (kind, rest) = split_pair(value, ':').ok_or_else(|| {
        DashError::config(format!(
            "Invalid assertion syntax: '{value}'. Expected assert:type:value"
        ))
    })?;

    match kind.to_lowercase().as_str() {
        "contains" => Ok(Assertion::Contains(rest.to_string())),
        "contains-exact" => Ok(Assertion::ContainsExact(rest.to_string())),
        "not-contains" => Ok(Assertion::NotContains(rest.to_string())),
        "matches" => regex::Regex::new(rest)
            .map(|_| Assertion::Matches(rest.to_string()))
            .map_err(|e| DashError::config(format!("Invalid pattern '{rest}': {e}"))),
        "state" => parse_state(rest),
        "selected" => parse_selected(rest),
        other => Err(DashError::config(format!(
            "Unknown assertion type: '{other}'. Valid types: contains, contains-exact, \
             not-contains, matches, state, selected"
        ))),
    }
}

/// Parses "page=Dashboard" or "selected_countries>=2".
fn parse_state(value: &str) -> Result<Assertion> {
    let (pos, symbol, op) = CompareOp::SYMBOLS
        .iter()
        .find_map(|(symbol, op)| value.find(symbol).map(|pos| (pos, *symbol, *op)))
        .ok_or_else(|| {
            DashError::config(format!(
                "Invalid state assertion: '{value}'. Expected field=value or field>=value"
            ))
        })?;

    Ok(Assertion::State {
        field: StateField::parse(value[..pos].trim())?,
        op,
        value: value[pos + symbol.len()..].trim().to_string(),
    })
}

/// Parses "countries=USA|Germany". An empty list means nothing selected.
fn parse_selected(value: &str) -> Result<Assertion> {
    let (name, list) = split_pair(value, '=').ok_or_else(|| {
        DashError::config(format!(
            "Invalid selection assertion: '{value}'. Expected countries=A|B or categories=A|B"
        ))
    })?;

    let filter = match name.to_lowercase().as_str() {
        "countries" => Focus::Countries,
        "categories" => Focus::Categories,
        other => {
            return Err(DashError::config(format!(
                "Unknown filter: '{other}'. Valid filters: countries, categories"
            )))
        }
    };

    let options = list
        .split(OPTION_SEPARATOR)
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect();

    Ok(Assertion::Selected { filter, options })
}
