//! Headless mode for testing and automation.
//!
//! Runs the TUI without a terminal, executing scripted events against an
//! off-screen buffer and capturing output for verification.

mod events;
mod output;

pub use events::{Assertion, CompareOp, Event, EventParser, StateField};
pub use output::{HeadlessOutput, OutputFormat, ScreenRenderer};

use crate::cli::Cli;
use crate::error::{DashError, Result};
use crate::query::{DashboardData, QueryExecutor};
use crate::tui::app::App;
use crate::tui::ui;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::time::{Duration, Instant};
use tracing::info;

/// Configuration for headless mode execution.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Screen width in columns.
    pub width: u16,
    /// Screen height in rows.
    pub height: u16,
    /// Output format.
    pub output_format: OutputFormat,
    /// Whether to stop on first assertion failure.
    pub fail_fast: bool,
    /// Path to write output (None = stdout).
    pub output_file: Option<std::path::PathBuf>,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: 120,
            height: 40,
            output_format: OutputFormat::Text,
            fail_fast: false,
            output_file: None,
        }
    }
}

impl HeadlessConfig {
    /// Creates a HeadlessConfig from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let (width, height) = cli.parse_screen_size().map_err(DashError::config)?;
        let output_format = cli.parse_output_format().map_err(DashError::config)?;

        Ok(Self {
            width,
            height,
            output_format: match output_format {
                crate::cli::OutputFormat::Text => OutputFormat::Text,
                crate::cli::OutputFormat::Json => OutputFormat::Json,
                crate::cli::OutputFormat::Frames => OutputFormat::Frames,
            },
            fail_fast: cli.fail_fast,
            output_file: cli.output_file.clone(),
        })
    }
}

/// Result of headless execution.
#[derive(Debug)]
pub struct HeadlessResult {
    /// Final screen content as text.
    pub screen: String,
    /// Screen lines for JSON output.
    pub screen_lines: Vec<String>,
    /// Number of events executed.
    pub events_executed: usize,
    /// Total execution duration.
    pub duration: Duration,
    /// Number of assertions passed.
    pub assertions_passed: usize,
    /// Number of assertions failed.
    pub assertions_failed: usize,
    /// Application state snapshot.
    pub state: HeadlessState,
    /// The initial frame, named snapshots, and in frames mode one frame per
    /// event.
    pub frames: Vec<Frame>,
}

/// Snapshot of application state for JSON output.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HeadlessState {
    pub page: String,
    pub focus: String,
    pub running: bool,
    /// Selected countries in display order.
    pub selected_countries: Vec<String>,
    /// Selected categories in display order.
    pub selected_categories: Vec<String>,
    /// Store error notices from the last load.
    pub notices: Vec<String>,
    pub total_countries: usize,
    pub total_categories: usize,
}

impl HeadlessState {
    fn from_app(app: &App) -> Self {
        let owned = |items: Vec<&str>| items.into_iter().map(String::from).collect();
        Self {
            page: format!("{:?}", app.page),
            focus: format!("{:?}", app.focus),
            running: app.running,
            selected_countries: owned(app.filters.countries.selected_in_order()),
            selected_categories: owned(app.filters.categories.selected_in_order()),
            notices: app.data.notices.clone(),
            total_countries: app.data.total_countries(),
            total_categories: app.data.total_categories(),
        }
    }
}

/// A captured frame (screen state after an event).
#[derive(Debug, Clone)]
pub struct Frame {
    /// Frame number (0 = initial state).
    pub number: usize,
    /// Event that produced this frame (None for initial).
    pub event: Option<String>,
    /// Name given by a `snapshot:<name>` event.
    pub snapshot: Option<String>,
    /// Screen content.
    pub screen: String,
}

/// Runs the TUI in headless mode.
pub struct HeadlessRunner {
    config: HeadlessConfig,
    terminal: Terminal<TestBackend>,
    app: App,
    executor: Option<QueryExecutor>,
    events: Vec<Event>,
    frames: Vec<Frame>,
    assertions_passed: usize,
    assertions_failed: usize,
}

impl HeadlessRunner {
    /// Creates a new headless runner over the given app state.
    pub fn new(config: HeadlessConfig, app: App) -> Result<Self> {
        let backend = TestBackend::new(config.width, config.height);
        let terminal = Terminal::new(backend)
            .map_err(|e| DashError::internal(format!("Failed to create test terminal: {e}")))?;

        Ok(Self {
            config,
            terminal,
            app,
            executor: None,
            events: Vec::new(),
            frames: Vec::new(),
            assertions_passed: 0,
            assertions_failed: 0,
        })
    }

    /// Sets the executor used for the initial page load and reloads.
    pub fn with_executor(mut self, executor: QueryExecutor) -> Self {
        self.app.store_info = Some(executor.store_description());
        self.executor = Some(executor);
        self
    }

    /// Loads events from a string (comma-separated or newline-separated).
    pub fn load_events(&mut self, input: &str) -> Result<()> {
        self.events = EventParser::new().parse_all(input)?;
        Ok(())
    }

    /// Loads events from a script file.
    pub fn load_script(&mut self, path: &str) -> Result<()> {
        let content = if path == "-" {
            use std::io::Read;
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| DashError::internal(format!("Failed to read stdin: {e}")))?;
            buffer
        } else {
            std::fs::read_to_string(path)
                .map_err(|e| DashError::internal(format!("Failed to read script file: {e}")))?
        };

        self.load_events(&content)
    }

    /// Runs the headless execution and returns the result.
    pub async fn run(mut self) -> Result<HeadlessResult> {
        let start_time = Instant::now();

        if let Some(executor) = &self.executor {
            let data = DashboardData::load(executor).await;
            self.app.set_data(data);
        }
        self.capture_frame(None, None)?;

        let events = std::mem::take(&mut self.events);
        let mut events_executed = 0;

        for event in events {
            let event_str = event.to_string();

            match &event {
                Event::Key(key_event) => {
                    self.app.handle_event(crate::tui::Event::Key(*key_event));
                    if self.app.take_reload_request() {
                        self.reload().await;
                    }
                }
                Event::Wait(duration) => {
                    tokio::time::sleep(*duration).await;
                }
                Event::Resize(w, h) => {
                    self.terminal
                        .resize(Rect::new(0, 0, *w, *h))
                        .map_err(|e| DashError::internal(format!("Resize failed: {e}")))?;
                }
                Event::Snapshot(name) => {
                    self.capture_frame(Some(event_str.clone()), Some(name.clone()))?;
                }
                Event::Assert(assertion) => {
                    self.draw()?;
                    let screen = self.render_screen();
                    if assertion.check(&screen, &self.app) {
                        self.assertions_passed += 1;
                    } else {
                        info!("Assertion failed: {}", event_str);
                        self.assertions_failed += 1;
                        if self.config.fail_fast {
                            events_executed += 1;
                            break;
                        }
                    }
                }
            }

            events_executed += 1;

            if self.config.output_format == OutputFormat::Frames
                && !matches!(event, Event::Snapshot(_))
            {
                self.capture_frame(Some(event_str), None)?;
            }

            if !self.app.running {
                break;
            }
        }

        self.draw()?;
        let screen = self.render_screen();
        let screen_lines = screen.lines().map(String::from).collect();

        Ok(HeadlessResult {
            screen,
            screen_lines,
            events_executed,
            duration: start_time.elapsed(),
            assertions_passed: self.assertions_passed,
            assertions_failed: self.assertions_failed,
            state: HeadlessState::from_app(&self.app),
            frames: self.frames,
        })
    }

    /// Runs a requested reload inline and reports it like the terminal UI
    /// does. Without an executor this is a no-op.
    async fn reload(&mut self) {
        if let Some(executor) = &self.executor {
            self.app.loading = true;
            let data = DashboardData::load(executor).await;
            self.app.finish_load(data);
        }
    }

    fn draw(&mut self) -> Result<()> {
        self.app.clear_expired_toast();
        self.terminal
            .draw(|frame| ui::render(frame, &self.app))
            .map_err(|e| DashError::internal(format!("Failed to render: {e}")))?;
        Ok(())
    }

    /// Renders the current screen to a string.
    fn render_screen(&self) -> String {
        ScreenRenderer::render(self.terminal.backend().buffer())
    }

    /// Captures the current frame.
    fn capture_frame(&mut self, event: Option<String>, snapshot: Option<String>) -> Result<()> {
        self.draw()?;
        let screen = self.render_screen();
        let number = self.frames.len();

        self.frames.push(Frame {
            number,
            event,
            snapshot,
            screen,
        });

        Ok(())
    }
}

/// Runs headless mode from CLI arguments.
pub async fn run_headless(cli: &Cli, executor: QueryExecutor, app: App) -> Result<i32> {
    cli.validate_headless().map_err(DashError::config)?;

    let config = HeadlessConfig::from_cli(cli)?;
    let mut runner = HeadlessRunner::new(config.clone(), app)?.with_executor(executor);

    if let Some(ref events_str) = cli.events {
        runner.load_events(events_str)?;
    } else if let Some(ref script_path) = cli.script {
        runner.load_script(script_path)?;
    }

    let result = runner.run().await?;

    let output_str = HeadlessOutput::new(config.output_format).format(&result);

    if let Some(ref path) = config.output_file {
        std::fs::write(path, &output_str)
            .map_err(|e| DashError::internal(format!("Failed to write output file: {e}")))?;
    } else {
        print!("{}", output_str);
    }

    if result.assertions_failed > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}
