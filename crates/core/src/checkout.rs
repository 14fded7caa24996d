//! Checkout planning.
//!
//! Turns a cart, a shipping form and a payment method into either an
//! order-creation request for the backend or an "unsupported" outcome. The
//! HTTP submission and redirect live in the storefront; this module decides
//! *what* gets sent.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartLineItem;
use crate::types::{Email, EmailError, PaymentMethod, ProductId};

/// Size sent to the backend when a line has none.
pub const DEFAULT_SIZE: &str = "Default";

/// Reasons a checkout cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("missing required shipping field: {0}")]
    MissingField(&'static str),
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
    #[error("cart line has a non-numeric product id: {0}")]
    InvalidProductId(String),
}

/// Shipping details collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    /// Collected but not required by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ShippingInfo {
    /// Check required fields and normalize whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingField`] for a blank name, phone or
    /// address, and [`CheckoutError::InvalidEmail`] for a malformed email.
    pub fn validated(self) -> Result<Self, CheckoutError> {
        let full_name = required(self.full_name, "fullName")?;
        let phone = required(self.phone, "phone")?;
        let address = required(self.address, "address")?;
        let email = Email::parse_optional(self.email.as_deref())?.map(String::from);

        Ok(Self {
            full_name,
            phone,
            address,
            email,
        })
    }
}

fn required(value: String, field: &'static str) -> Result<String, CheckoutError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CheckoutError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// One line of the order-creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: ProductId,
    pub quantity: u32,
    pub color: String,
    pub size: String,
}

/// Body of the backend's order/payment creation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub shipping_info: ShippingInfo,
}

impl CreateOrderRequest {
    /// Build the request from cart lines.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidProductId`] if a line id is not an
    /// integer.
    pub fn from_lines(
        lines: &[CartLineItem],
        shipping_info: ShippingInfo,
    ) -> Result<Self, CheckoutError> {
        let items = lines
            .iter()
            .map(|line| {
                let product_id = line
                    .id
                    .parse::<ProductId>()
                    .map_err(|_| CheckoutError::InvalidProductId(line.id.clone()))?;
                let size = if line.size.trim().is_empty() {
                    DEFAULT_SIZE.to_string()
                } else {
                    line.size.clone()
                };
                Ok(OrderItemRequest {
                    product_id,
                    quantity: line.quantity,
                    color: line.color.clone(),
                    size,
                })
            })
            .collect::<Result<Vec<_>, CheckoutError>>()?;

        Ok(Self {
            items,
            shipping_info,
        })
    }
}

/// What the storefront should do for a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutPlan {
    /// Submit the request and follow the provider redirect.
    Redirect(CreateOrderRequest),
    /// The method has no backend flow yet; nothing is sent.
    Unsupported(PaymentMethod),
}

/// Decide how to check out.
///
/// Unsupported methods short-circuit before any cart or form checks so the
/// shopper sees the "not supported" notice first.
///
/// # Errors
///
/// Returns a [`CheckoutError`] when the cart is empty or the shipping form or
/// a cart line is invalid.
pub fn plan_checkout(
    lines: &[CartLineItem],
    shipping: ShippingInfo,
    method: PaymentMethod,
) -> Result<CheckoutPlan, CheckoutError> {
    match method {
        PaymentMethod::Bank | PaymentMethod::Momo => Ok(CheckoutPlan::Unsupported(method)),
        PaymentMethod::Vnpay => {
            if lines.is_empty() {
                return Err(CheckoutError::EmptyCart);
            }
            let shipping = shipping.validated()?;
            CreateOrderRequest::from_lines(lines, shipping).map(CheckoutPlan::Redirect)
        }
    }
}
