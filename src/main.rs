//! Entry point for the AuraCast desktop client.
//!
//! Responsibilities here are intentionally minimal:
//! - Initialize logging with a reloadable filter.
//! - Load base configuration from `conf/config.toml`, then overlay settings
//!   previously saved from the UI.
//! - Launch the GUI application.

mod api;
mod app;
mod cache;
mod config;
mod history;
mod playback;
mod validate;

use crate::app::run_app;
use crate::cache::load_user_config;
use crate::config::load_config;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let base_config = load_config(Path::new("conf/config.toml"));
    let mut config = base_config.clone();
    if let Some(mut saved) = load_user_config() {
        info!("Loaded saved settings from cache");
        // Always honor the base config's log level so user edits take effect.
        saved.log_level = base_config.log_level;
        // The server address is an install-time setting, not a UI one.
        saved.server_url = base_config.server_url.clone();
        config = saved;
    }
    config.sanitize();
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        server = %config.server_url,
        theme = %config.theme,
        level = %config.log_level,
        "Starting AuraCast client"
    );
    run_app(config).context("Failed to start the GUI")?;
    Ok(())
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    }
}
