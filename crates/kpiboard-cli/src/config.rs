// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use kpiboard_app::{
    ALL_CATEGORIES_VALUE, Catalogue, CategoryFilter, DateRange, TabKind, parse_day,
};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub const APP_NAME: &str = "kpiboard";
pub const CONFIG_PATH_ENV: &str = "KPIBOARD_CONFIG_PATH";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub dates: Dates,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ui: Ui::default(),
            dates: Dates::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub default_tab: Option<String>,
    pub default_category: Option<String>,
    pub reset_range_on_open: Option<bool>,
}

/// Initial applied range. Unset `from` keeps the built-in 2023 range.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dates {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub enabled: Option<bool>,
    pub level: Option<String>,
    pub path: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version; add `version = 1` and keep values under [ui], [dates], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path, Catalogue::builtin())?;
        Ok(config)
    }

    pub fn validate(&self, path: &Path, catalogue: &Catalogue) -> Result<()> {
        if self.version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                self.version,
                path.display()
            );
        }

        if let Some(tab) = &self.ui.default_tab
            && TabKind::parse(tab).is_none()
        {
            bail!(
                "ui.default_tab in {} must be \"overview\" or \"details\", got {tab:?}",
                path.display()
            );
        }

        if let Some(category) = &self.ui.default_category
            && category != ALL_CATEGORIES_VALUE
            && !catalogue.has_category(category)
        {
            bail!(
                "ui.default_category in {} names unknown category {category:?}; use \"{ALL_CATEGORIES_VALUE}\" or one of: {}",
                path.display(),
                catalogue.categories().join(", ")
            );
        }

        self.initial_range()
            .with_context(|| format!("invalid [dates] in {}", path.display()))?;

        if let Some(level) = &self.log.level {
            EnvFilter::try_new(level).with_context(|| {
                format!(
                    "log.level in {} is not a valid filter: {level:?}",
                    path.display()
                )
            })?;
        }

        if let Some(log_path) = &self.log.path
            && log_path.trim().is_empty()
        {
            bail!("log.path in {} must not be blank", path.display());
        }

        Ok(())
    }

    pub fn default_tab(&self) -> TabKind {
        self.ui
            .default_tab
            .as_deref()
            .and_then(TabKind::parse)
            .unwrap_or(TabKind::Overview)
    }

    pub fn default_category(&self) -> CategoryFilter {
        self.ui
            .default_category
            .as_deref()
            .map(CategoryFilter::parse)
            .unwrap_or_default()
    }

    pub fn reset_range_on_open(&self) -> bool {
        self.ui.reset_range_on_open.unwrap_or(false)
    }

    pub fn initial_range(&self) -> Result<DateRange> {
        let from = match &self.dates.from {
            Some(raw) => parse_config_day("dates.from", raw)?,
            None => {
                if self.dates.to.is_some() {
                    bail!("dates.to requires dates.from");
                }
                return Ok(DateRange::initial());
            }
        };

        let Some(raw_to) = &self.dates.to else {
            return Ok(DateRange::single(from));
        };
        let to = parse_config_day("dates.to", raw_to)?;
        if to < from {
            bail!("dates.to ({raw_to}) is before dates.from");
        }
        Ok(DateRange::between(from, to))
    }

    pub fn log_enabled(&self) -> bool {
        self.log.enabled.unwrap_or(true)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log.path {
            Some(path) => Ok(PathBuf::from(path)),
            None => default_log_path(),
        }
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# kpiboard config\n# Place this file at: {}\n\nversion = 1\n\n[ui]\n# \"overview\" or \"details\"\ndefault_tab = \"overview\"\n# \"All\" or a catalogue category such as \"Solvency Ratios\"\ndefault_category = \"{ALL_CATEGORIES_VALUE}\"\nreset_range_on_open = false\n\n[dates]\n# Initial applied range, YYYY-MM-DD. `to` requires `from`.\nfrom = \"2023-01-01\"\nto = \"2023-12-31\"\n\n[log]\nenabled = true\n# Overridden by {}\nlevel = \"{DEFAULT_LOG_LEVEL}\"\n# Optional. Default is platform data dir (for example ~/.local/share/kpiboard/kpiboard.log)\n# path = \"/absolute/path/to/kpiboard.log\"\n",
            path.display(),
            crate::logging::LOG_ENV,
        )
    }
}

fn parse_config_day(key: &str, raw: &str) -> Result<time::Date> {
    parse_day(raw).ok_or_else(|| anyhow!("{key} must be YYYY-MM-DD, got {raw:?}"))
}

pub fn default_log_path() -> Result<PathBuf> {
    let data_root = dirs::data_dir()
        .ok_or_else(|| anyhow!("cannot resolve data directory; set [log].path in the config"))?;
    Ok(data_root.join(APP_NAME).join(format!("{APP_NAME}.log")))
}
