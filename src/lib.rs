// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Vertimar
//
//! Vertimar library - order and quote builder for the back office
//!
//! This crate provides the core cart engine for building sales orders and
//! quotes: a client selection, an ordered line-item collection, free-text
//! notes, and totals derived from that state on every read.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cart;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod order;
pub mod totals;

/// Core data types for the cart engine
pub mod types {
    use rust_decimal::{Decimal, RoundingStrategy};
    use rust_decimal_macros::dec;
    use serde::{Deserialize, Serialize};

    /// Unit-of-measure placeholder used when a product carries none
    pub const UNIT_PLACEHOLDER: &str = "unidad";

    /// Default IVA rate in percent, applied when none is supplied
    #[must_use]
    pub fn default_tax_rate() -> Decimal {
        dec!(21)
    }

    /// Round a monetary amount to 2 decimal places.
    ///
    /// Applied at the point of computation of every derived amount so that
    /// repeated merges never drift beyond cent precision.
    #[must_use]
    pub fn round2(amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    // =========================================================================
    // Client
    // =========================================================================

    /// A client attached to a cart.
    ///
    /// Immutable once attached: it is replaced wholesale, never patched.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Client {
        /// Opaque identifier
        pub id: String,
        /// Display name
        pub name: String,
        /// Tax identifier (CUIT)
        pub tax_id: String,
        /// Tax category (e.g. "Responsable Inscripto")
        pub tax_category: String,
    }

    // =========================================================================
    // Line Item
    // =========================================================================

    /// One product placed in the cart.
    ///
    /// `unit_price` and `tax_rate` are fixed at insertion time; later adds of
    /// the same product merge quantities but never overwrite them. `subtotal`
    /// and `tax_amount` are derived and recomputed on every quantity change.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct LineItem {
        /// Unique key within the cart
        pub product_id: String,
        /// Display label, copied at insertion time
        pub name: String,
        /// Display unit string
        pub unit_of_measure: String,
        /// Units, always >= 0.5
        pub quantity: Decimal,
        /// Price per unit, fixed at insertion time
        pub unit_price: Decimal,
        /// IVA percentage, fixed at insertion time
        pub tax_rate: Decimal,
        /// `round2(quantity * unit_price)` - derived
        pub subtotal: Decimal,
        /// `round2(subtotal * tax_rate / 100)` - derived
        pub tax_amount: Decimal,
    }

    impl LineItem {
        /// Construct a line item with its derived amounts computed.
        ///
        /// The quantity must already be normalized; construction does not
        /// validate granularity. Derived amounts saturate at `Decimal::MAX`
        /// instead of overflowing, so construction is total for any input.
        #[must_use]
        pub fn new(
            product_id: String,
            name: String,
            unit_of_measure: Option<String>,
            quantity: Decimal,
            unit_price: Decimal,
            tax_rate: Decimal,
        ) -> Self {
            let subtotal = round2(quantity.saturating_mul(unit_price));
            let tax_amount = round2(subtotal.saturating_mul(tax_rate) / dec!(100));
            Self {
                product_id,
                name,
                unit_of_measure: unit_of_measure
                    .unwrap_or_else(|| UNIT_PLACEHOLDER.to_string()),
                quantity,
                unit_price,
                tax_rate,
                subtotal,
                tax_amount,
            }
        }

        /// Copy of this line item at a different quantity, with derived
        /// amounts recomputed from the stored price and tax rate.
        #[must_use]
        pub fn with_quantity(&self, quantity: Decimal) -> Self {
            Self::new(
                self.product_id.clone(),
                self.name.clone(),
                Some(self.unit_of_measure.clone()),
                quantity,
                self.unit_price,
                self.tax_rate,
            )
        }
    }

    /// A line item supplied verbatim by a bulk import.
    ///
    /// Quantity, price, and tax rate are trusted as given; only the derived
    /// amounts are recomputed on insertion.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ImportItem {
        /// Unique key within the cart
        pub product_id: String,
        /// Display label
        pub name: String,
        /// Display unit string
        #[serde(default)]
        pub unit_of_measure: Option<String>,
        /// Units, trusted verbatim
        pub quantity: Decimal,
        /// Price per unit
        pub unit_price: Decimal,
        /// IVA percentage
        pub tax_rate: Decimal,
    }

    // =========================================================================
    // Cart State
    // =========================================================================

    /// The full in-memory snapshot of a cart at a point in time.
    ///
    /// A plain snapshot with no mutation methods of its own; all changes flow
    /// through [`crate::cart::apply`], which takes a previous state and
    /// returns a new one.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct CartState {
        /// Zero or one client
        pub client: Option<Client>,
        /// Ordered line items, insertion order preserved, unique by product id
        #[serde(default)]
        pub line_items: Vec<LineItem>,
        /// Free text
        #[serde(default)]
        pub notes: String,
    }

    impl CartState {
        /// Whether the cart holds no client, no items, and no notes
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.client.is_none() && self.line_items.is_empty() && self.notes.is_empty()
        }

        /// Find a line item by product id
        #[must_use]
        pub fn line_item(&self, product_id: &str) -> Option<&LineItem> {
            self.line_items.iter().find(|i| i.product_id == product_id)
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// A named transition from one cart state to the next.
    ///
    /// Optional numeric fields model raw form input: `None` stands for input
    /// that did not parse, and the engine coerces it rather than rejecting.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "op", rename_all = "snake_case")]
    pub enum CartAction {
        /// Replace the client wholesale
        SetClient {
            /// New client
            client: Client,
        },
        /// Detach the client
        ClearClient,
        /// Add a product, merging quantities if it is already in the cart
        AddLineItem {
            /// Product key
            product_id: String,
            /// Display label
            name: String,
            /// Display unit string
            #[serde(default)]
            unit_of_measure: Option<String>,
            /// Raw quantity; `None` or <= 0 falls back to 0.5
            #[serde(default)]
            quantity: Option<Decimal>,
            /// Price per unit (ignored when merging into an existing item)
            unit_price: Decimal,
            /// IVA percentage; defaults to 21 when absent
            #[serde(default)]
            tax_rate: Option<Decimal>,
        },
        /// Append a batch of items verbatim (no merge)
        AddMultipleLineItems {
            /// Items to append
            items: Vec<ImportItem>,
        },
        /// Set the quantity of an existing line item
        UpdateQuantity {
            /// Product key
            product_id: String,
            /// Raw quantity; `None` or < 0.5 falls back to 0.5
            #[serde(default)]
            quantity: Option<Decimal>,
        },
        /// Remove the line item at an ordinal position
        RemoveLineItem {
            /// Zero-based position
            index: usize,
        },
        /// Replace the notes verbatim
        SetNotes {
            /// New notes text
            text: String,
        },
        /// Reset to the empty initial state
        ClearCart,
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::cart::{apply, Outcome};
    pub use crate::totals::Totals;
    pub use crate::types::*;
    pub use anyhow::{Context, Result};
}
