//! Terminal User Interface for the Northwind dashboard.
//!
//! Provides the main TUI application loop using ratatui and crossterm.

pub mod app;
mod events;
pub mod headless;
mod ui;
pub mod widgets;

pub use app::{App, Focus, Page};
pub use events::{Event, EventHandler};

use crate::error::{DashError, Result};
use crate::query::{DashboardData, QueryExecutor};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Messages sent from background tasks to the main loop.
#[derive(Debug)]
pub enum AsyncMessage {
    /// A page load finished.
    Loaded(DashboardData),
}

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new() -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        Ok(Self {
            terminal,
            event_handler: EventHandler::new(),
        })
    }

    /// Sets up the terminal for TUI rendering.
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| DashError::internal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| DashError::internal(format!("Failed to enter alternate screen: {e}")))?;

        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
            .map_err(|e| DashError::internal(format!("Failed to create terminal: {e}")))
    }

    /// Restores the terminal to its original state.
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| DashError::internal(format!("Failed to disable raw mode: {e}")))?;

        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| DashError::internal(format!("Failed to leave alternate screen: {e}")))?;

        self.terminal
            .show_cursor()
            .map_err(|e| DashError::internal(format!("Failed to show cursor: {e}")))?;

        Ok(())
    }

    /// Runs the main event loop until the user quits.
    pub async fn run(&mut self, executor: QueryExecutor, mut app_state: App) -> Result<()> {
        // Set up panic hook to restore terminal on panic
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        let (tx, mut rx) = mpsc::channel::<AsyncMessage>(4);
        spawn_load(&executor, &mut app_state, tx.clone());

        let result = self
            .run_event_loop(&executor, &mut app_state, tx, &mut rx)
            .await;

        // Restore panic hook
        let _ = panic::take_hook();

        result
    }

    /// The main event loop, separated for cleaner error handling.
    async fn run_event_loop(
        &mut self,
        executor: &QueryExecutor,
        app_state: &mut App,
        tx: mpsc::Sender<AsyncMessage>,
        rx: &mut mpsc::Receiver<AsyncMessage>,
    ) -> Result<()> {
        loop {
            app_state.clear_expired_toast();

            if app_state.take_reload_request() {
                if app_state.loading {
                    debug!("Reload ignored: page load already in flight");
                } else {
                    spawn_load(executor, app_state, tx.clone());
                }
            }

            self.terminal
                .draw(|frame| ui::render(frame, app_state))
                .map_err(|e| DashError::internal(format!("Failed to draw: {e}")))?;

            if !app_state.running {
                break;
            }

            let handler = self.event_handler;
            tokio::select! {
                event_result = tokio::task::spawn_blocking(move || handler.next()) => {
                    let event = event_result
                        .map_err(|e| DashError::internal(format!("Event task failed: {e}")))??;
                    app_state.handle_event(event);
                }

                Some(msg) = rx.recv() => {
                    handle_async_message(msg, app_state);
                }
            }
        }

        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Starts a page load in the background.
fn spawn_load(executor: &QueryExecutor, app_state: &mut App, tx: mpsc::Sender<AsyncMessage>) {
    app_state.loading = true;
    let executor = executor.clone();
    tokio::spawn(async move {
        let data = DashboardData::load(&executor).await;
        // The receiver is gone once the loop has exited.
        let _ = tx.send(AsyncMessage::Loaded(data)).await;
    });
}

/// Applies a message from a background task.
fn handle_async_message(msg: AsyncMessage, app_state: &mut App) {
    match msg {
        AsyncMessage::Loaded(data) => app_state.finish_load(data),
    }
}

/// Runs the TUI application against the given executor.
pub async fn run(executor: QueryExecutor, app_state: App) -> Result<()> {
    info!("Starting TUI against {}", executor.store_description());
    let mut tui = Tui::new()?;
    tui.run(executor, app_state).await
}
