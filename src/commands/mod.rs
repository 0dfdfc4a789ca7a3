// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Vertimar
//
//! Command implementations

pub mod build;
pub mod catalog;
pub mod client;
pub mod completions;
pub mod config;

use anyhow::Result;
use std::path::PathBuf;

/// Resolve the data directory: CLI/env override first, then configuration
pub fn resolve_data_dir(cli_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = cli_override {
        return Ok(dir);
    }
    Ok(crate::config::load()?.data_dir)
}
