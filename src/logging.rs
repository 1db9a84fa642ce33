// src/logging.rs

//! Logger setup shared by both binaries.
//!
//! The terminal's stdout belongs to the display, so records go to stderr, or
//! to the file named by `ASCIIGOL_LOG_FILE` when that is set. `RUST_LOG`
//! overrides the default `warn` filter.

use std::env;
use std::fs::OpenOptions;

use anyhow::{Context, Result};

/// Environment variable naming a log file.
pub const LOG_FILE_ENV: &str = "ASCIIGOL_LOG_FILE";

pub fn init() -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.format_timestamp_micros();
    if let Some(path) = env::var_os(LOG_FILE_ENV) {
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.to_string_lossy()))?;
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }
    builder
        .try_init()
        .context("Failed to install the logger")?;
    Ok(())
}
