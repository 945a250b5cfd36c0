//! Album Viewer - photo album browser with lightbox and slideshow
//!
//! Main entry point.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod gpu;

use anyhow::Result;
use app_core::AppConfig;

fn main() -> Result<()> {
    // Logging and panic hook first; the guard flushes the log file on exit
    let _log_guard = app_log::init()?;

    if let Err(e) = app_log::cleanup_old_logs(7) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("Album Viewer {} starting...", env!("CARGO_PKG_VERSION"));

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("{}; using default configuration", e.user_message());
            AppConfig::default()
        }
    };

    app::run(config)
}
