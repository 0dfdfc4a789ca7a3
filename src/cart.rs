// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Vertimar
//! Cart transition engine
//!
//! Every operation takes an immutable previous [`CartState`] and returns a
//! new one (copy-on-write; the previous snapshot stays valid). Operations are
//! total: invalid input is coerced or ignored, never rejected, so the engine
//! is safe to drive from untrusted form state. Normalized quantities are
//! capped at [`MAX_QUANTITY`] and merged quantities saturate, so no input
//! can overflow the decimal arithmetic.

use crate::types::{default_tax_rate, CartAction, CartState, LineItem};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Minimum and granularity unit for quantities
pub const HALF_UNIT: Decimal = dec!(0.5);

/// Ceiling applied to normalized quantities.
///
/// One billion units is far beyond any real order; the cap keeps the
/// snapping and derived-amount arithmetic within `Decimal` range for
/// arbitrary script input.
pub const MAX_QUANTITY: Decimal = dec!(1_000_000_000);

/// Result of applying one action.
///
/// `applied` is false when the action was tolerated as a no-op (unknown
/// product id, out-of-range index), so callers can detect and log stale
/// references without the engine treating them as fatal.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// The next cart state
    pub state: CartState,
    /// Whether the action changed anything
    pub applied: bool,
}

impl Outcome {
    fn applied(state: CartState) -> Self {
        Self { state, applied: true }
    }

    fn ignored(state: CartState) -> Self {
        Self { state, applied: false }
    }
}

/// Normalize a raw quantity for the add path.
///
/// Unparseable (`None`) or non-positive input falls back to 0.5; anything
/// else snaps to the nearest half unit (`round(q * 2) / 2`, midpoint away
/// from zero) and is clamped into `[0.5, MAX_QUANTITY]`.
#[must_use]
pub fn normalize_add_quantity(raw: Option<Decimal>) -> Decimal {
    let Some(q) = raw else {
        return HALF_UNIT;
    };
    if q <= Decimal::ZERO {
        return HALF_UNIT;
    }
    let q = q.min(MAX_QUANTITY);
    let snapped =
        (q * dec!(2)).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero) / dec!(2);
    snapped.max(HALF_UNIT)
}

/// Normalize a raw quantity for the update path.
///
/// Unlike the add path, no half-unit snapping is applied: any value in
/// `[0.5, MAX_QUANTITY]` is accepted as-is. Unparseable or smaller input
/// falls back to 0.5.
#[must_use]
pub fn normalize_set_quantity(raw: Option<Decimal>) -> Decimal {
    match raw {
        Some(q) if q >= HALF_UNIT => q.min(MAX_QUANTITY),
        _ => HALF_UNIT,
    }
}

/// Apply one action to a cart state, producing the next state.
///
/// Total over its input domain: never panics, never errors.
#[must_use]
pub fn apply(state: &CartState, action: CartAction) -> Outcome {
    match action {
        CartAction::SetClient { client } => {
            let mut next = state.clone();
            next.client = Some(client);
            Outcome::applied(next)
        }

        CartAction::ClearClient => {
            let mut next = state.clone();
            next.client = None;
            Outcome::applied(next)
        }

        CartAction::AddLineItem {
            product_id,
            name,
            unit_of_measure,
            quantity,
            unit_price,
            tax_rate,
        } => {
            let quantity = normalize_add_quantity(quantity);
            let mut next = state.clone();

            if let Some(existing) = next
                .line_items
                .iter_mut()
                .find(|i| i.product_id == product_id)
            {
                // Merge: price and tax rate stay as stored at first insertion.
                // Saturating add keeps the engine total even when a verbatim
                // import already pushed the quantity near Decimal::MAX.
                *existing = existing.with_quantity(existing.quantity.saturating_add(quantity));
            } else {
                next.line_items.push(LineItem::new(
                    product_id,
                    name,
                    unit_of_measure,
                    quantity,
                    unit_price,
                    tax_rate.unwrap_or_else(default_tax_rate),
                ));
            }
            Outcome::applied(next)
        }

        CartAction::AddMultipleLineItems { items } => {
            let mut next = state.clone();
            for item in items {
                next.line_items.push(LineItem::new(
                    item.product_id,
                    item.name,
                    item.unit_of_measure,
                    item.quantity,
                    item.unit_price,
                    item.tax_rate,
                ));
            }
            Outcome::applied(next)
        }

        CartAction::UpdateQuantity {
            product_id,
            quantity,
        } => {
            let mut next = state.clone();
            match next
                .line_items
                .iter_mut()
                .find(|i| i.product_id == product_id)
            {
                Some(item) => {
                    *item = item.with_quantity(normalize_set_quantity(quantity));
                    Outcome::applied(next)
                }
                None => Outcome::ignored(next),
            }
        }

        CartAction::RemoveLineItem { index } => {
            if index >= state.line_items.len() {
                return Outcome::ignored(state.clone());
            }
            let mut next = state.clone();
            next.line_items.remove(index);
            Outcome::applied(next)
        }

        CartAction::SetNotes { text } => {
            let mut next = state.clone();
            next.notes = text;
            Outcome::applied(next)
        }

        CartAction::ClearCart => Outcome::applied(CartState::default()),
    }
}

/// Apply a sequence of actions, returning the final state and the per-action
/// applied flags in order.
#[must_use]
pub fn apply_all(state: &CartState, actions: Vec<CartAction>) -> (CartState, Vec<bool>) {
    let mut current = state.clone();
    let mut flags = Vec::with_capacity(actions.len());
    for action in actions {
        let outcome = apply(&current, action);
        flags.push(outcome.applied);
        current = outcome.state;
    }
    (current, flags)
}
