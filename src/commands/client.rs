// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Vertimar
//! Client management commands

use crate::catalog::Catalog;
use crate::types::Client;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;

/// Arguments for client commands
#[derive(Debug, Default)]
pub struct ClientArgs {
    /// Display name
    pub name: Option<String>,
    /// Tax identifier (CUIT)
    pub tax_id: Option<String>,
    /// Tax category
    pub tax_category: Option<String>,
}

/// Run client command
pub fn run(
    data_dir: Option<PathBuf>,
    action: &str,
    id: Option<String>,
    args: ClientArgs,
) -> Result<()> {
    let data_dir = super::resolve_data_dir(data_dir)?;
    let mut catalog = Catalog::load(&data_dir)
        .with_context(|| format!("Failed to load catalog from {}", data_dir.display()))?;

    match action {
        "add" | "upsert" => {
            let id = id.ok_or_else(|| anyhow::anyhow!("Client ID is required"))?;
            let name = args
                .name
                .ok_or_else(|| anyhow::anyhow!("Client name is required (--name)"))?;

            let client = Client {
                id: id.clone(),
                name: name.clone(),
                tax_id: args.tax_id.unwrap_or_default(),
                tax_category: args
                    .tax_category
                    .unwrap_or_else(|| "Consumidor Final".into()),
            };

            catalog.upsert_client(client);
            catalog.save(&data_dir)?;
            println!("Saved client: {} ({})", name, id);
        }

        "list" | "ls" => {
            if catalog.clients.is_empty() {
                println!("No clients defined. Use 'vertimar client add <id> --name <n>' to create one.");
                return Ok(());
            }

            println!("Clients ({}):", catalog.clients.len());
            for client in &catalog.clients {
                println!("  {} - {} ({})", client.id, client.name, client.tax_category);
            }
        }

        "show" => {
            let id = id.ok_or_else(|| anyhow::anyhow!("Client ID is required"))?;
            let client = catalog.client(&id)?;

            println!("Client: {}", client.name);
            println!("  id: {}", client.id);
            println!("  tax id: {}", client.tax_id);
            println!("  tax category: {}", client.tax_category);
        }

        other => {
            bail!("Unknown client action: {}. Valid: add, list, show", other);
        }
    }

    Ok(())
}
