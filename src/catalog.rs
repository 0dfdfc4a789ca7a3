// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Vertimar
//! Product and client catalog
//!
//! The lookup collaborators the cart engine is driven from: products (with
//! price, tax rate, and advisory stock) and clients. Persisted as a single
//! `catalog.json` in the data directory. The stock ceiling is enforced here,
//! before the engine is invoked; the engine itself has no concept of stock.

use crate::types::Client;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A product as listed in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Display unit string, if any
    #[serde(default)]
    pub unit_of_measure: Option<String>,
    /// Current list price per unit; stored as a string so the Decimal
    /// scale survives the catalog.json round trip
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
    /// IVA percentage
    pub tax_rate: Decimal,
    /// Units available; advisory ceiling for order building
    pub available_stock: Decimal,
}

/// Lookup failures surfaced by the catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No product with the given id
    #[error("product not found: {0}")]
    ProductNotFound(String),
    /// No client with the given id
    #[error("client not found: {0}")]
    ClientNotFound(String),
    /// Requested quantity exceeds the available stock
    #[error("insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        /// Product id
        product_id: String,
        /// Units requested
        requested: Decimal,
        /// Units available
        available: Decimal,
    },
}

/// The complete catalog store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// All products
    #[serde(default)]
    pub products: Vec<Product>,
    /// All clients
    #[serde(default)]
    pub clients: Vec<Client>,
}

impl Catalog {
    /// Load the catalog from a directory containing catalog.json
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join("catalog.json");
        if !path.exists() {
            tracing::debug!("no catalog at {}, starting empty", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Save the catalog to a directory
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        let path = dir.join("catalog.json");
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize catalog")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!("saved catalog to {}", path.display());
        Ok(())
    }

    /// Add or replace a product, keyed by id
    pub fn upsert_product(&mut self, product: Product) {
        if let Some(existing) = self.products.iter_mut().find(|p| p.id == product.id) {
            *existing = product;
        } else {
            self.products.push(product);
        }
    }

    /// Add or replace a client, keyed by id
    pub fn upsert_client(&mut self, client: Client) {
        if let Some(existing) = self.clients.iter_mut().find(|c| c.id == client.id) {
            *existing = client;
        } else {
            self.clients.push(client);
        }
    }

    /// Look up a product by id
    pub fn product(&self, id: &str) -> Result<&Product, CatalogError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.into()))
    }

    /// Look up a client by id
    pub fn client(&self, id: &str) -> Result<&Client, CatalogError> {
        self.clients
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CatalogError::ClientNotFound(id.into()))
    }

    /// Look up a product and reject the request if the quantity exceeds its
    /// available stock. This is the caller-side precondition for adding the
    /// product to a cart.
    pub fn check_stock(&self, id: &str, requested: Decimal) -> Result<&Product, CatalogError> {
        let product = self.product(id)?;
        if requested > product.available_stock {
            return Err(CatalogError::InsufficientStock {
                product_id: id.into(),
                requested,
                available: product.available_stock,
            });
        }
        Ok(product)
    }
}
