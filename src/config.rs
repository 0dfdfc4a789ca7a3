// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Vertimar
//! Configuration management

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for persistent data (catalog, exported orders)
    pub data_dir: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// IVA percentage applied to products created without an explicit rate
    pub default_tax_rate: Decimal,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: "info".to_string(),
            default_tax_rate: crate::types::default_tax_rate(),
        }
    }
}

/// Default data directory, falling back to `.vertimar` in the current
/// directory when no platform dirs are available
#[must_use]
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "vertimar", "vertimar")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(".vertimar")
        })
}

/// Load configuration: built-in defaults, overlaid by an optional
/// `config.toml` in the data dir, overlaid by `VERTIMAR_*` env vars.
pub fn load() -> Result<Config> {
    let defaults = Config::default();
    let file = defaults.data_dir.join("config.toml");

    let settings = config::Config::builder()
        .set_default("data_dir", defaults.data_dir.display().to_string())
        .context("Failed to set default data_dir")?
        .set_default("log_level", defaults.log_level.clone())
        .context("Failed to set default log_level")?
        .set_default("default_tax_rate", defaults.default_tax_rate.to_string())
        .context("Failed to set default default_tax_rate")?
        .add_source(config::File::from(file).required(false))
        .add_source(config::Environment::with_prefix("VERTIMAR"))
        .build()
        .context("Failed to build configuration")?;

    settings
        .try_deserialize()
        .context("Failed to deserialize configuration")
}
