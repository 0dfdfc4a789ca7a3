// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Vertimar
//! Totals derived from a cart state
//!
//! Recomputed on every read, never cached in the state itself.

use crate::types::{round2, CartState, LineItem};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The four derived quantities of a cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of per-line subtotals
    pub subtotal: Decimal,
    /// Sum of per-line tax amounts
    pub tax: Decimal,
    /// `subtotal + tax`
    pub grand_total: Decimal,
    /// Total units across all lines (not the line count)
    pub item_count: Decimal,
}

impl Totals {
    /// Compute the totals of a cart state.
    ///
    /// Sums saturate at `Decimal::MAX`, matching the line items' own derived
    /// amounts, so totals are computable for any cart the engine can produce.
    #[must_use]
    pub fn of(state: &CartState) -> Self {
        let sum = |field: fn(&LineItem) -> Decimal| {
            state
                .line_items
                .iter()
                .fold(Decimal::ZERO, |acc, i| acc.saturating_add(field(i)))
        };
        let subtotal = sum(|i| i.subtotal);
        let tax = sum(|i| i.tax_amount);
        Self {
            subtotal,
            tax,
            grand_total: subtotal.saturating_add(tax),
            item_count: sum(|i| i.quantity),
        }
    }
}

/// Tax-inclusive unit price of a line item.
///
/// Display-only view used by the quote rendering; never stored.
#[must_use]
pub fn tax_inclusive_unit_price(item: &LineItem) -> Decimal {
    round2(item.unit_price.saturating_mul(dec!(1) + item.tax_rate / dec!(100)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineItem;

    fn item(id: &str, qty: Decimal, price: Decimal, rate: Decimal) -> LineItem {
        LineItem::new(id.into(), format!("product {id}"), None, qty, price, rate)
    }

    #[test]
    fn test_totals_of_empty_cart_are_zero() {
        let totals = Totals::of(&CartState::default());

        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.grand_total, Decimal::ZERO);
        assert_eq!(totals.item_count, Decimal::ZERO);
    }

    #[test]
    fn test_totals_additivity() {
        let state = CartState {
            client: None,
            line_items: vec![
                item("P1", dec!(0.5), dec!(10), dec!(21)),
                item("P2", dec!(2), dec!(33.33), dec!(10.5)),
            ],
            notes: String::new(),
        };
        let totals = Totals::of(&state);

        assert_eq!(totals.grand_total, totals.subtotal + totals.tax);
        assert_eq!(totals.subtotal, dec!(5.00) + dec!(66.66));
        assert_eq!(totals.item_count, dec!(2.5));
    }

    #[test]
    fn test_tax_inclusive_unit_price() {
        let line = item("P1", dec!(1), dec!(100), dec!(21));
        assert_eq!(tax_inclusive_unit_price(&line), dec!(121.00));

        let line = item("P2", dec!(1), dec!(10), dec!(10.5));
        assert_eq!(tax_inclusive_unit_price(&line), dec!(11.05));
    }
}
