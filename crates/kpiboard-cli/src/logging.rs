// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

pub const LOG_ENV: &str = "KPIBOARD_LOG";

/// Installs the global subscriber. The terminal belongs to the TUI, so
/// events only ever go to the log file. Returns the file path when logging
/// is enabled.
pub fn init(config: &Config) -> Result<Option<PathBuf>> {
    if !config.log_enabled() {
        return Ok(None);
    }

    let path = config.log_path()?;
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let directives = filter_directives(env::var(LOG_ENV).ok(), config.log_level());
    let filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("invalid log filter {directives:?}; check {LOG_ENV}"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false),
        )
        .try_init()
        .context("install tracing subscriber")?;

    Ok(Some(path))
}

fn filter_directives(env_value: Option<String>, config_level: &str) -> String {
    env_value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| config_level.to_owned())
}
