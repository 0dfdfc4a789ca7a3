// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Vertimar
//! Config command - shows the effective configuration

use anyhow::Result;
use std::path::PathBuf;

/// Print the effective configuration
pub fn run(data_dir: Option<PathBuf>) -> Result<()> {
    let config = crate::config::load()?;
    let effective_dir = super::resolve_data_dir(data_dir)?;

    println!("data_dir: {}", effective_dir.display());
    println!("log_level: {}", config.log_level);
    println!("default_tax_rate: {}", config.default_tax_rate);
    Ok(())
}
