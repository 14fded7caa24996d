//! Shopping cart store.
//!
//! A [`Cart`] is owned by exactly one visitor session. Lines are merged on
//! the `(id, size, color)` triple when added, so the same product in two
//! sizes occupies two lines.
//!
//! # Addressing lines
//!
//! [`Cart::set_quantity`] and [`Cart::remove_item`] take only a product id
//! and act on the *first* line with that id. When a product sits in the cart
//! in several size/color combinations, the later lines are unreachable
//! through those two calls. Callers that know the variant should use
//! [`Cart::set_line_quantity`] and [`Cart::remove_line`], which match on the
//! full [`LineKey`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Price;

/// Most units a single add request may ask for.
pub const MAX_LINE_QUANTITY: u32 = 999;

/// Highest unit price an added product may carry, in whole currency units.
pub const MAX_UNIT_PRICE: i64 = 1_000_000_000;

/// Reasons a product is refused before it reaches the cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("price must not be negative")]
    NegativePrice,
    #[error("price must not exceed {MAX_UNIT_PRICE}")]
    PriceTooLarge,
    #[error("quantity must not exceed {MAX_LINE_QUANTITY}")]
    QuantityTooLarge,
}

/// One product/size/color entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Product identity as handed out by the listing endpoint.
    pub id: String,
    pub name: String,
    pub image: String,
    /// Unit price.
    pub price: Price,
    pub size: String,
    pub color: String,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLineItem {
    /// The merge key of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            id: self.id.clone(),
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }

    fn matches(&self, key: &LineKey) -> bool {
        self.id == key.id && self.size == key.size && self.color == key.color
    }
}

/// A product the shopper asked to add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLineItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub price: Price,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub color: String,
    /// Requested quantity; absent or zero means one.
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl NewLineItem {
    /// Check the item before it enters a cart.
    ///
    /// # Errors
    ///
    /// Rejects a negative unit price, a unit price above [`MAX_UNIT_PRICE`]
    /// and a requested quantity above [`MAX_LINE_QUANTITY`].
    pub fn validate(&self) -> Result<(), CartError> {
        if self.price.is_negative() {
            return Err(CartError::NegativePrice);
        }
        if self.price.amount() > Decimal::from(MAX_UNIT_PRICE) {
            return Err(CartError::PriceTooLarge);
        }
        if self.requested_quantity() > MAX_LINE_QUANTITY {
            return Err(CartError::QuantityTooLarge);
        }
        Ok(())
    }

    fn requested_quantity(&self) -> u32 {
        self.quantity.unwrap_or(1).max(1)
    }
}

/// Identity of a cart line for merge purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub id: String,
    pub size: String,
    pub color: String,
}

impl LineKey {
    /// Build a key from its parts.
    #[must_use]
    pub fn new(id: impl Into<String>, size: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            size: size.into(),
            color: color.into(),
        }
    }
}

/// The in-memory list of cart lines for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a product, merging into an existing line with the same
    /// `(id, size, color)`.
    ///
    /// Returns the resulting quantity of the affected line. The cart itself
    /// enforces no bounds; callers taking items from outside run
    /// [`NewLineItem::validate`] first.
    pub fn add_item(&mut self, candidate: NewLineItem) -> u32 {
        let requested = candidate.requested_quantity();
        let key = LineKey::new(
            candidate.id.as_str(),
            candidate.size.as_str(),
            candidate.color.as_str(),
        );

        if let Some(line) = self.lines.iter_mut().find(|line| line.matches(&key)) {
            line.quantity = line.quantity.saturating_add(requested);
            return line.quantity;
        }

        self.lines.push(CartLineItem {
            id: candidate.id,
            name: candidate.name,
            image: candidate.image,
            price: candidate.price,
            size: candidate.size,
            color: candidate.color,
            quantity: requested,
        });
        requested
    }

    /// Replace the quantity of the first line with this product id.
    ///
    /// A quantity of zero or below removes the line. Returns `false` when no
    /// line has this id.
    pub fn set_quantity(&mut self, id: &str, quantity: i64) -> bool {
        let Some(index) = self.lines.iter().position(|line| line.id == id) else {
            return false;
        };
        self.apply_quantity(index, quantity);
        true
    }

    /// Remove the first line with this product id.
    ///
    /// Returns `false` when no line has this id.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let Some(index) = self.lines.iter().position(|line| line.id == id) else {
            return false;
        };
        self.lines.remove(index);
        true
    }

    /// Replace the quantity of the line matching the full key.
    ///
    /// Same quantity rules as [`Cart::set_quantity`].
    pub fn set_line_quantity(&mut self, key: &LineKey, quantity: i64) -> bool {
        let Some(index) = self.lines.iter().position(|line| line.matches(key)) else {
            return false;
        };
        self.apply_quantity(index, quantity);
        true
    }

    /// Remove the line matching the full key.
    pub fn remove_line(&mut self, key: &LineKey) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| !line.matches(key));
        self.lines.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `price × quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLineItem::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    fn apply_quantity(&mut self, index: usize, quantity: i64) {
        if quantity <= 0 {
            self.lines.remove(index);
            return;
        }
        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn tee(size: &str, color: &str, quantity: Option<u32>) -> NewLineItem {
        NewLineItem {
            id: "12".to_string(),
            name: "Gradient Graphic T-shirt".to_string(),
            image: "/images/tee.png".to_string(),
            price: Price::from_units(145),
            size: size.to_string(),
            color: color.to_string(),
            quantity,
        }
    }

    fn jeans() -> NewLineItem {
        NewLineItem {
            id: "7".to_string(),
            name: "Skinny Fit Jeans".to_string(),
            image: String::new(),
            price: Price::from_units(240),
            size: "Large".to_string(),
            color: "Blue".to_string(),
            quantity: None,
        }
    }

    #[test]
    fn test_add_same_key_merges() {
        let mut cart = Cart::new();
        cart.add_item(tee("Large", "White", Some(1)));
        let quantity = cart.add_item(tee("Large", "White", Some(2)));

        assert_eq!(quantity, 3);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn test_add_different_variant_is_separate_line() {
        let mut cart = Cart::new();
        cart.add_item(tee("Large", "White", None));
        cart.add_item(tee("Small", "White", None));
        cart.add_item(tee("Large", "Black", None));

        assert_eq!(cart.lines().len(), 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_defaults_quantity_to_one() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_item(tee("M", "Red", None)), 1);
        assert_eq!(cart.add_item(tee("M", "Red", Some(0))), 2);
    }

    #[test]
    fn test_set_quantity_replaces() {
        let mut cart = Cart::new();
        cart.add_item(jeans());
        assert!(cart.set_quantity("7", 5));
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_set_quantity_zero_or_negative_removes() {
        let mut cart = Cart::new();
        cart.add_item(jeans());
        cart.set_quantity("7", 0);
        assert!(cart.is_empty());

        cart.add_item(jeans());
        cart.set_quantity("7", -1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(jeans());
        let before = cart.clone();

        assert!(!cart.set_quantity("999", 4));
        assert!(!cart.remove_item("999"));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_id_only_operations_hit_first_match() {
        let mut cart = Cart::new();
        cart.add_item(tee("Large", "White", None));
        cart.add_item(tee("Small", "White", None));

        cart.set_quantity("12", 4);
        assert_eq!(cart.lines()[0].quantity, 4);
        assert_eq!(cart.lines()[1].quantity, 1);

        cart.remove_item("12");
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].size, "Small");
    }

    #[test]
    fn test_compound_key_operations() {
        let mut cart = Cart::new();
        cart.add_item(tee("Large", "White", None));
        cart.add_item(tee("Small", "White", None));

        let small = LineKey::new("12", "Small", "White");
        assert!(cart.set_line_quantity(&small, 6));
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.lines()[1].quantity, 6);

        assert!(cart.remove_line(&small));
        assert!(!cart.remove_line(&small));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_set_quantity_leaves_other_lines() {
        let mut cart = Cart::new();
        cart.add_item(tee("Large", "White", Some(2)));
        cart.add_item(jeans());

        cart.set_quantity("7", 3);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.lines()[1].quantity, 3);
    }

    #[test]
    fn test_total_and_item_count() {
        let mut cart = Cart::new();
        cart.add_item(tee("Large", "White", Some(2)));
        cart.add_item(jeans());

        assert_eq!(cart.total(), Price::from_units(145 * 2 + 240));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(jeans());
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let mut item = jeans();
        item.price = Price::from_units(-500);
        assert_eq!(item.validate(), Err(CartError::NegativePrice));

        item.price = Price::ZERO;
        assert_eq!(item.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_oversized_items() {
        let mut item = jeans();
        item.price = Price::new(Decimal::from(u64::MAX));
        item.quantity = Some(u32::MAX);
        assert_eq!(item.validate(), Err(CartError::PriceTooLarge));

        assert_eq!(
            tee("Large", "White", Some(MAX_LINE_QUANTITY + 1)).validate(),
            Err(CartError::QuantityTooLarge)
        );
        assert_eq!(tee("Large", "White", Some(MAX_LINE_QUANTITY)).validate(), Ok(()));
    }

    #[test]
    fn test_huge_unchecked_line_prices_without_panicking() {
        let mut cart = Cart::new();
        let mut item = jeans();
        item.price = Price::new(
            Decimal::from(10_000_000_000_000_000_000_u64) * Decimal::from(1_000_000_000_u64),
        );
        item.quantity = Some(u32::MAX);
        cart.add_item(item.clone());
        cart.add_item(item);

        assert_eq!(cart.total(), Price::new(Decimal::MAX));
        assert!(!crate::compute_breakdown(cart.lines()).total.is_negative());
    }

    #[test]
    fn test_largest_valid_line_prices_exactly() {
        let mut cart = Cart::new();
        let mut item = jeans();
        item.price = Price::from_units(MAX_UNIT_PRICE);
        item.quantity = Some(MAX_LINE_QUANTITY);
        item.validate().unwrap();
        cart.add_item(item);

        let expected = Price::from_units(MAX_UNIT_PRICE * i64::from(MAX_LINE_QUANTITY));
        assert_eq!(cart.total(), expected);
    }

    #[test]
    fn test_session_serialization_shape() {
        let mut cart = Cart::new();
        cart.add_item(jeans());
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["lines"][0]["id"], "7");
        assert_eq!(json["lines"][0]["quantity"], 1);

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }
}
