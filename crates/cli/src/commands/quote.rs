//! Price a cart file.
//!
//! The file is a YAML list of line items in the same shape the storefront
//! accepts on `POST /cart/add`:
//!
//! ```yaml
//! - id: "1"
//!   name: Gradient Graphic T-shirt
//!   price: 145
//!   size: Large
//!   color: White
//!   quantity: 2
//! ```
//!
//! Identical variants are merged exactly as the storefront cart does.

use serde::Serialize;
use tracing::info;

use threadline_core::{Cart, CartLineItem, NewLineItem, OrderPricingBreakdown, compute_breakdown};

use super::{CommandError, print_yaml, read_yaml};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Quote<'a> {
    lines: &'a [CartLineItem],
    item_count: u64,
    breakdown: OrderPricingBreakdown,
}

/// Build a cart from `items`, merging duplicates.
///
/// # Errors
///
/// Returns the first entry the cart refuses, numbered from 1.
pub fn build_cart(items: Vec<NewLineItem>) -> Result<Cart, CommandError> {
    let mut cart = Cart::new();
    for (index, item) in items.into_iter().enumerate() {
        item.validate().map_err(|source| CommandError::Cart {
            line: index + 1,
            source,
        })?;
        cart.add_item(item);
    }
    Ok(cart)
}

/// Print the breakdown for a cart file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or an entry is
/// refused by the cart.
pub async fn run(file_path: &str) -> Result<(), CommandError> {
    let items: Vec<NewLineItem> = read_yaml(file_path).await?;
    info!(path = %file_path, entries = items.len(), "Loaded cart file");

    let cart = build_cart(items)?;
    print_yaml(&Quote {
        lines: cart.lines(),
        item_count: cart.item_count(),
        breakdown: compute_breakdown(cart.lines()),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use threadline_core::Price;

    use super::*;

    #[test]
    fn test_yaml_cart_is_merged_and_priced() {
        let items: Vec<NewLineItem> = serde_yaml::from_str(
            r#"
- id: "1"
  name: Gradient Graphic T-shirt
  price: 145
  size: Large
  color: White
- id: "1"
  name: Gradient Graphic T-shirt
  price: 145
  size: Large
  color: White
  quantity: 2
- id: "2"
  name: Checkered Shirt
  price: 180
"#,
        )
        .unwrap();

        let cart = build_cart(items).unwrap();
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.item_count(), 4);

        let breakdown = compute_breakdown(cart.lines());
        assert_eq!(breakdown.subtotal, Price::from_units(615));
        assert_eq!(breakdown.discount_amount, Price::from_units(123));
        assert_eq!(breakdown.total, Price::from_units(507));
    }

    #[test]
    fn test_negative_price_entry_is_reported_by_position() {
        let items: Vec<NewLineItem> = serde_yaml::from_str(
            r#"
- id: "1"
  name: Gradient Graphic T-shirt
  price: 145
- id: "2"
  name: Refund
  price: -50
"#,
        )
        .unwrap();

        let err = build_cart(items).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Cart {
                line: 2,
                source: threadline_core::CartError::NegativePrice
            }
        ));
    }
}
