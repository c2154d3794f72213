//! Common test utilities for TUI tests.

use std::path::Path;
use std::process::Command;

/// Runs the binary in headless mode against `db`, with a config path that
/// does not exist so user configuration never leaks in.
pub fn run_headless(db: &Path, args: &[&str]) -> (i32, String, String) {
    let config = db.with_file_name("absent-config.toml");
    let output = Command::new(env!("CARGO_BIN_EXE_northwind-dash"))
        .arg("--db")
        .arg(db)
        .arg("--config")
        .arg(&config)
        .arg("--headless")
        .args(args)
        .output()
        .expect("Failed to execute command");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}
