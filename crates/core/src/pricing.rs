//! Order summary computation.
//!
//! The breakdown is a pure projection of the cart lines and is recomputed on
//! every read; nothing here is cached or persisted.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::CartLineItem;
use crate::types::Price;

/// Promotional discount applied to every order (20%).
pub const DISCOUNT_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// Flat delivery fee in whole currency units.
pub const DELIVERY_FEE: i64 = 15;

/// Derived totals for a set of cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPricingBreakdown {
    pub subtotal: Price,
    pub discount_amount: Price,
    pub delivery_fee: Price,
    pub total: Price,
}

/// Compute subtotal, discount, delivery fee and total.
///
/// The delivery fee applies even to an empty list, so an empty cart totals
/// the fee alone. Checkout refuses empty carts before this matters.
#[must_use]
pub fn compute_breakdown(lines: &[CartLineItem]) -> OrderPricingBreakdown {
    let subtotal: Price = lines.iter().map(CartLineItem::line_total).sum();
    let discount_amount = subtotal.scaled(DISCOUNT_RATE).round_to_units();
    let delivery_fee = Price::from_units(DELIVERY_FEE);

    OrderPricingBreakdown {
        subtotal,
        discount_amount,
        delivery_fee,
        total: subtotal - discount_amount + delivery_fee,
    }
}
