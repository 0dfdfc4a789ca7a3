// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Vertimar
//
//! Build command - replays a script of cart steps into an order payload
//!
//! The script is the caller layer the engine expects: each step resolves
//! product and client data through the catalog, checks the advisory stock
//! ceiling, and only then invokes a cart transition. Steps that fail their
//! precondition or land as engine no-ops are reported and skipped; the build
//! carries on, mirroring the engine's tolerant contract.

use crate::cart::{self, normalize_add_quantity};
use crate::catalog::Catalog;
use crate::order::OrderPayload;
use crate::types::{CartAction, CartState, ImportItem};
use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One step of a build script.
///
/// `Add` and `SetClient` carry only ids; display data, prices, and tax rates
/// are resolved from the catalog at build time. `Import` bypasses the catalog
/// and trusts its items verbatim.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BuildStep {
    /// Attach a client from the catalog
    SetClient {
        /// Catalog client id
        client_id: String,
    },
    /// Detach the client
    ClearClient,
    /// Add a catalog product to the cart
    Add {
        /// Catalog product id
        product_id: String,
        /// Raw quantity (absent or invalid falls back to 0.5)
        #[serde(default)]
        quantity: Option<Decimal>,
    },
    /// Append items verbatim, without catalog resolution
    Import {
        /// Items to append
        items: Vec<ImportItem>,
    },
    /// Change the quantity of a line already in the cart
    SetQuantity {
        /// Product id of the line
        product_id: String,
        /// Raw quantity (absent or invalid falls back to 0.5)
        #[serde(default)]
        quantity: Option<Decimal>,
    },
    /// Remove the line at an ordinal position
    Remove {
        /// Zero-based position
        index: usize,
    },
    /// Replace the order notes
    Notes {
        /// Notes text
        text: String,
    },
    /// Reset the cart
    Clear,
}

impl BuildStep {
    /// Short human description for progress output
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::SetClient { client_id } => format!("set client {client_id}"),
            Self::ClearClient => "clear client".into(),
            Self::Add {
                product_id,
                quantity,
            } => match quantity {
                Some(q) => format!("add {q} x {product_id}"),
                None => format!("add {product_id}"),
            },
            Self::Import { items } => format!("import {} items", items.len()),
            Self::SetQuantity {
                product_id,
                quantity,
            } => match quantity {
                Some(q) => format!("set quantity of {product_id} to {q}"),
                None => format!("set quantity of {product_id}"),
            },
            Self::Remove { index } => format!("remove line {index}"),
            Self::Notes { .. } => "set notes".into(),
            Self::Clear => "clear cart".into(),
        }
    }
}

/// Run build command
pub fn run(
    data_dir: Option<PathBuf>,
    script: &Path,
    out: Option<PathBuf>,
    format: &str,
) -> Result<()> {
    let data_dir = super::resolve_data_dir(data_dir)?;
    let catalog = Catalog::load(&data_dir)
        .with_context(|| format!("Failed to load catalog from {}", data_dir.display()))?;

    let content = fs::read_to_string(script)
        .with_context(|| format!("Failed to read {}", script.display()))?;
    let steps: Vec<BuildStep> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", script.display()))?;

    if steps.is_empty() {
        bail!("Script contains no steps");
    }

    println!("Building order from {}", script.display());
    println!("{}", "-".repeat(60));

    let mut state = CartState::default();
    let mut skipped = 0usize;

    for (i, step) in steps.into_iter().enumerate() {
        let line = format!("  [{}] {}", i + 1, step.description());

        match resolve_step(&catalog, &state, step) {
            Ok(action) => {
                let outcome = cart::apply(&state, action);
                if outcome.applied {
                    println!("{line} OK");
                } else {
                    // Engine-level no-op: stale product id or index
                    println!("{line} SKIPPED (no effect)");
                    skipped += 1;
                }
                state = outcome.state;
            }
            Err(reason) => {
                println!("{line} SKIPPED ({reason})");
                warn!("step {} skipped: {}", i + 1, reason);
                skipped += 1;
            }
        }
    }

    let payload = OrderPayload::from_cart(&state);
    debug!("assembled payload {}", payload.id);

    println!("{}", "=".repeat(60));
    println!(
        "{} lines, {} units, total {}",
        state.line_items.len(),
        payload.totals.item_count,
        payload.totals.grand_total
    );
    if skipped > 0 {
        println!("{skipped} steps skipped");
    }

    let rendered = match format {
        "json" => payload.to_json()?,
        "quote" | "presupuesto" => payload.to_quote(),
        other => bail!("Unknown output format: {}. Supported: json, quote", other),
    };

    match out {
        Some(path) => {
            fs::write(&path, &rendered)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            println!("Wrote order to {}", path.display());
        }
        None => {
            println!();
            println!("{rendered}");
        }
    }

    Ok(())
}

/// Resolve a script step into an engine action, or a skip reason.
///
/// All catalog lookups and the stock precondition live here; the engine never
/// sees unresolved data.
fn resolve_step(
    catalog: &Catalog,
    state: &CartState,
    step: BuildStep,
) -> Result<CartAction, String> {
    match step {
        BuildStep::SetClient { client_id } => {
            let client = catalog.client(&client_id).map_err(|e| e.to_string())?;
            Ok(CartAction::SetClient {
                client: client.clone(),
            })
        }
        BuildStep::ClearClient => Ok(CartAction::ClearClient),
        BuildStep::Add {
            product_id,
            quantity,
        } => {
            // Stock is checked against the quantity the engine will store,
            // including what the cart already holds for this product
            let normalized = normalize_add_quantity(quantity);
            let in_cart = state
                .line_item(&product_id)
                .map_or(Decimal::ZERO, |i| i.quantity);
            let product = catalog
                .check_stock(&product_id, in_cart + normalized)
                .map_err(|e| e.to_string())?;

            Ok(CartAction::AddLineItem {
                product_id: product.id.clone(),
                name: product.name.clone(),
                unit_of_measure: product.unit_of_measure.clone(),
                quantity,
                unit_price: product.unit_price,
                tax_rate: Some(product.tax_rate),
            })
        }
        BuildStep::Import { items } => Ok(CartAction::AddMultipleLineItems { items }),
        BuildStep::SetQuantity {
            product_id,
            quantity,
        } => Ok(CartAction::UpdateQuantity {
            product_id,
            quantity,
        }),
        BuildStep::Remove { index } => Ok(CartAction::RemoveLineItem { index }),
        BuildStep::Notes { text } => Ok(CartAction::SetNotes { text }),
        BuildStep::Clear => Ok(CartAction::ClearCart),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use rust_decimal_macros::dec;

    fn catalog_with(stock: Decimal) -> Catalog {
        let mut catalog = Catalog::default();
        catalog.upsert_product(Product {
            id: "P1".into(),
            name: "Widget".into(),
            unit_of_measure: None,
            unit_price: dec!(10),
            tax_rate: dec!(21),
            available_stock: stock,
        });
        catalog
    }

    #[test]
    fn test_resolve_add_pulls_catalog_data() {
        let catalog = catalog_with(dec!(10));
        let state = CartState::default();

        let action = resolve_step(
            &catalog,
            &state,
            BuildStep::Add {
                product_id: "P1".into(),
                quantity: Some(dec!(2)),
            },
        )
        .unwrap();

        match action {
            CartAction::AddLineItem {
                name, unit_price, ..
            } => {
                assert_eq!(name, "Widget");
                assert_eq!(unit_price, dec!(10));
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_add_rejects_over_stock() {
        let catalog = catalog_with(dec!(1));
        let state = CartState::default();

        let result = resolve_step(
            &catalog,
            &state,
            BuildStep::Add {
                product_id: "P1".into(),
                quantity: Some(dec!(2)),
            },
        );

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("insufficient stock"));
    }

    #[test]
    fn test_resolve_add_counts_quantity_already_in_cart() {
        let catalog = catalog_with(dec!(2));
        let state = CartState::default();

        let add = |state: &CartState| {
            resolve_step(
                &catalog,
                state,
                BuildStep::Add {
                    product_id: "P1".into(),
                    quantity: Some(dec!(1.5)),
                },
            )
        };

        let action = add(&state).unwrap();
        let state = cart::apply(&state, action).state;

        // 1.5 in cart + 1.5 requested > 2 available
        assert!(add(&state).is_err());
    }

    #[test]
    fn test_resolve_unknown_product_is_skipped() {
        let catalog = Catalog::default();
        let state = CartState::default();

        let result = resolve_step(
            &catalog,
            &state,
            BuildStep::Add {
                product_id: "nope".into(),
                quantity: None,
            },
        );

        assert!(result.unwrap_err().contains("product not found"));
    }
}
