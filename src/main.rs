//! Northwind Dash - a terminal sales dashboard over the Northwind SQLite sample.

use std::sync::Arc;

use northwind_dash::cli::Cli;
use northwind_dash::config::Config;
use northwind_dash::db::open_store;
use northwind_dash::error::Result;
use northwind_dash::logging;
use northwind_dash::query::QueryExecutor;
use northwind_dash::tui::{self, headless, App};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    if cli.is_headless() {
        logging::init_stderr_logging();
    } else {
        logging::init_file_logging();
    }

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{}: {}", e.category(), e);
            eprintln!("{}: {}", e.category(), e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<i32> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;
    cli.apply_overrides(&mut config);

    let store = open_store(&config.store);
    info!("Store: {}", config.store.path.display());
    let executor = QueryExecutor::new(Arc::new(store));

    let mut app = App::new(
        Some(executor.store_description()),
        config.dashboard.default_country_count,
    );
    app.page = cli.page.into();

    if cli.is_headless() {
        return headless::run_headless(&cli, executor, app).await;
    }

    tui::run(executor, app).await?;
    Ok(0)
}
