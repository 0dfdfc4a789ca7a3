// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Vertimar
//! Order payload assembly and quote rendering
//!
//! The downstream submission shape: the finished cart plus its totals, under
//! a deterministic order id. The quote rendering is the one place the
//! tax-inclusive unit price view appears.

use crate::totals::{tax_inclusive_unit_price, Totals};
use crate::types::{CartState, LineItem};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::Write as _;

/// The payload handed to the downstream order-submission service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPayload {
    /// Always "Order"
    pub kind: String,
    /// Content-hash ID: order:<hash of client + line items>
    pub id: String,
    /// The cart snapshot the order was built from
    #[serde(flatten)]
    pub cart: CartState,
    /// Totals derived from the cart at assembly time
    pub totals: Totals,
    /// When the payload was assembled
    pub created_at: DateTime<Utc>,
}

impl OrderPayload {
    /// Assemble a payload from a finished cart
    #[must_use]
    pub fn from_cart(cart: &CartState) -> Self {
        Self {
            kind: "Order".into(),
            id: Self::generate_id(cart),
            cart: cart.clone(),
            totals: Totals::of(cart),
            created_at: Utc::now(),
        }
    }

    /// Generate a deterministic ID for an order.
    ///
    /// Hashes the client id and every line item's key fields, so the same
    /// cart always yields the same id.
    #[must_use]
    pub fn generate_id(cart: &CartState) -> String {
        let mut hasher = Sha256::new();
        if let Some(client) = &cart.client {
            hasher.update(client.id.as_bytes());
        }
        for item in &cart.line_items {
            hasher.update(item.product_id.as_bytes());
            hasher.update(item.quantity.to_string().as_bytes());
            hasher.update(item.unit_price.to_string().as_bytes());
            hasher.update(item.tax_rate.to_string().as_bytes());
        }
        hasher.update(cart.notes.as_bytes());
        let hash = hex::encode(hasher.finalize());
        format!("order:{}", &hash[..12])
    }

    /// Export to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize order payload")
    }

    /// Render a plain-text quote document.
    ///
    /// Per-line prices are shown tax-inclusive; the totals block keeps the
    /// subtotal/tax split.
    #[must_use]
    pub fn to_quote(&self) -> String {
        let mut out = String::new();
        out.push_str("PRESUPUESTO VERTIMAR\n");
        let _ = writeln!(out, "{}", "=".repeat(60));
        let _ = writeln!(out, "ref: {}", self.id);
        let _ = writeln!(out, "fecha: {}", self.created_at.format("%Y-%m-%d"));
        match &self.cart.client {
            Some(c) => {
                let _ = writeln!(out, "cliente: {} ({})", c.name, c.tax_id);
                let _ = writeln!(out, "condicion: {}", c.tax_category);
            }
            None => out.push_str("cliente: (sin asignar)\n"),
        }
        let _ = writeln!(out, "{}", "-".repeat(60));
        for item in &self.cart.line_items {
            let _ = writeln!(out, "{}", quote_line(item));
        }
        let _ = writeln!(out, "{}", "-".repeat(60));
        let _ = writeln!(out, "neto:  {:>12}", self.totals.subtotal);
        let _ = writeln!(out, "iva:   {:>12}", self.totals.tax);
        let _ = writeln!(out, "total: {:>12}", self.totals.grand_total);
        if !self.cart.notes.is_empty() {
            let _ = writeln!(out, "\nnotas: {}", self.cart.notes);
        }
        out
    }
}

fn quote_line(item: &LineItem) -> String {
    let unit_with_tax = tax_inclusive_unit_price(item);
    format!(
        "{:<30} {:>6} {:<8} x {:>10} (IVA inc.)",
        item.name, item.quantity, item.unit_of_measure, unit_with_tax
    )
}
