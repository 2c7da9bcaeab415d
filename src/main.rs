#![recursion_limit = "256"]

mod cli;
mod application;
mod domain;
mod data;
mod ml;
mod infra;

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "student_risk=info";

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;
    cli.run()
}

/// RUST_LOG when it is set and parses; otherwise this crate at info.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// The form owns the terminal, so `ui` sessions should pass --log-file.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Cannot create log file '{}'", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
