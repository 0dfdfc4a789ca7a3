// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Vertimar
//! Catalog management commands

use crate::catalog::{Catalog, Product};
use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Arguments for catalog commands
#[derive(Debug, Default)]
pub struct ProductArgs {
    /// Display name
    pub name: Option<String>,
    /// Unit of measure
    pub unit: Option<String>,
    /// Price per unit
    pub price: Option<Decimal>,
    /// IVA percentage
    pub tax_rate: Option<Decimal>,
    /// Available stock
    pub stock: Option<Decimal>,
}

/// Run catalog command
pub fn run(
    data_dir: Option<PathBuf>,
    action: &str,
    id: Option<String>,
    args: ProductArgs,
) -> Result<()> {
    let data_dir = super::resolve_data_dir(data_dir)?;
    let mut catalog = Catalog::load(&data_dir)
        .with_context(|| format!("Failed to load catalog from {}", data_dir.display()))?;

    match action {
        "add" | "upsert" => {
            let id = id.ok_or_else(|| anyhow::anyhow!("Product ID is required"))?;
            let name = args
                .name
                .ok_or_else(|| anyhow::anyhow!("Product name is required (--name)"))?;
            let price = args
                .price
                .ok_or_else(|| anyhow::anyhow!("Product price is required (--price)"))?;
            if price < Decimal::ZERO {
                bail!("Product price must not be negative");
            }

            let product = Product {
                id: id.clone(),
                name: name.clone(),
                unit_of_measure: args.unit,
                unit_price: price,
                tax_rate: match args.tax_rate {
                    Some(rate) => rate,
                    None => crate::config::load()?.default_tax_rate,
                },
                available_stock: args.stock.unwrap_or(Decimal::ZERO),
            };

            catalog.upsert_product(product);
            catalog.save(&data_dir)?;
            println!("Saved product: {} ({})", name, id);
        }

        "list" | "ls" => {
            if catalog.products.is_empty() {
                println!(
                    "No products defined. Use 'vertimar catalog add <id> --name <n> --price <p>' to create one."
                );
                return Ok(());
            }

            println!("Products ({}):", catalog.products.len());
            for product in &catalog.products {
                println!(
                    "  {} - {} @ {} (IVA {}%, stock {})",
                    product.id,
                    product.name,
                    product.unit_price,
                    product.tax_rate,
                    product.available_stock
                );
            }
        }

        "show" => {
            let id = id.ok_or_else(|| anyhow::anyhow!("Product ID is required"))?;
            let product = catalog.product(&id)?;

            println!("Product: {}", product.name);
            println!("  id: {}", product.id);
            if let Some(unit) = &product.unit_of_measure {
                println!("  unit: {}", unit);
            }
            println!("  price: {}", product.unit_price);
            println!("  tax rate: {}%", product.tax_rate);
            println!("  stock: {}", product.available_stock);
        }

        other => {
            bail!("Unknown catalog action: {}. Valid: add, list, show", other);
        }
    }

    Ok(())
}
