//! Report formatting for headless runs.
//!
//! Every format carries the final screen plus a digest of the dashboard
//! state (page, filter selections, counters, store notices) so scripted
//! checks don't have to scrape the rendered charts.

use super::{Frame, HeadlessResult, HeadlessState};
use ratatui::buffer::Buffer;
use serde::Serialize;
use std::fmt::Write as _;

/// Output format for headless mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Final screen, named snapshots and a state digest.
    #[default]
    Text,
    /// JSON with screen, state, snapshots and run metadata.
    Json,
    /// Every captured frame in order.
    Frames,
}

/// Renders a ratatui buffer to a string.
pub struct ScreenRenderer;

impl ScreenRenderer {
    /// One line per buffer row, right-trimmed, without trailing blank rows.
    /// Always ends with a newline.
    pub fn render(buffer: &Buffer) -> String {
        let width = usize::from(buffer.area.width).max(1);
        let mut rows: Vec<String> = buffer
            .content
            .chunks(width)
            .map(|row| {
                let line: String = row.iter().map(|cell| cell.symbol()).collect();
                line.trim_end().to_string()
            })
            .collect();

        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }

        let mut screen = rows.join("\n");
        screen.push('\n');
        screen
    }
}

/// Human-readable digest of the dashboard state.
fn state_digest(state: &HeadlessState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Page: {} (focus: {})", state.page, state.focus);
    let _ = writeln!(
        out,
        "Countries: {}",
        selection(&state.selected_countries, state.total_countries)
    );
    let _ = writeln!(
        out,
        "Categories: {}",
        selection(&state.selected_categories, state.total_categories)
    );
    if state.notices.is_empty() {
        out.push_str("Notices: none\n");
    } else {
        for notice in &state.notices {
            let _ = writeln!(out, "Notice: {notice}");
        }
    }
    out
}

fn selection(selected: &[String], total: usize) -> String {
    if selected.is_empty() {
        format!("none (0 of {total})")
    } else {
        format!("{} ({} of {total})", selected.join(", "), selected.len())
    }
}

fn status_line(result: &HeadlessResult) -> String {
    let mut line = format!(
        "Events: {} executed in {}ms",
        result.events_executed,
        result.duration.as_millis()
    );
    if result.assertions_passed + result.assertions_failed > 0 {
        let _ = write!(
            line,
            " | Assertions: {} passed, {} failed",
            result.assertions_passed, result.assertions_failed
        );
    }
    line
}

fn snapshots(frames: &[Frame]) -> impl Iterator<Item = (&str, &str)> {
    frames
        .iter()
        .filter_map(|f| f.snapshot.as_deref().map(|name| (name, f.screen.as_str())))
}

#[derive(Serialize)]
struct JsonReport<'a> {
    screen: &'a str,
    screen_lines: &'a [String],
    events_executed: usize,
    duration_ms: u64,
    assertions: JsonAssertions,
    state: &'a HeadlessState,
    snapshots: Vec<JsonSnapshot<'a>>,
}

#[derive(Serialize)]
struct JsonAssertions {
    passed: usize,
    failed: usize,
}

#[derive(Serialize)]
struct JsonSnapshot<'a> {
    name: &'a str,
    screen: &'a str,
}

/// Formats headless execution results.
pub struct HeadlessOutput {
    format: OutputFormat,
}

impl HeadlessOutput {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the result according to the configured format.
    pub fn format(&self, result: &HeadlessResult) -> String {
        match self.format {
            OutputFormat::Text => text_report(result),
            OutputFormat::Json => json_report(result),
            OutputFormat::Frames => frames_report(result),
        }
    }
}

fn text_report(result: &HeadlessResult) -> String {
    let mut out = String::new();
    for (name, screen) in snapshots(&result.frames) {
        let _ = write!(out, "=== SNAPSHOT {name} ===\n{screen}\n");
    }
    out.push_str(&result.screen);
    out.push_str("---\n");
    out.push_str(&state_digest(&result.state));
    out.push_str(&status_line(result));
    out.push('\n');
    out
}

fn json_report(result: &HeadlessResult) -> String {
    let report = JsonReport {
        screen: &result.screen,
        screen_lines: &result.screen_lines,
        events_executed: result.events_executed,
        duration_ms: u64::try_from(result.duration.as_millis()).unwrap_or(u64::MAX),
        assertions: JsonAssertions {
            passed: result.assertions_passed,
            failed: result.assertions_failed,
        },
        state: &result.state,
        snapshots: snapshots(&result.frames)
            .map(|(name, screen)| JsonSnapshot { name, screen })
            .collect(),
    };

    serde_json::to_string_pretty(&report)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize: {e}\"}}"))
}

fn frames_report(result: &HeadlessResult) -> String {
    let mut out = String::new();
    for frame in &result.frames {
        let label = frame.event.as_deref().unwrap_or("initial");
        let _ = write!(
            out,
            "=== FRAME {} ({label}) ===\n{}\n\n",
            frame.number, frame.screen
        );
    }
    let _ = writeln!(out, "Total: {} frames", result.frames.len());
    out.push_str(&state_digest(&result.state));
    out.push_str(&status_line(result));
    out.push('\n');
    out
}
