//! Threadline Core - Storefront domain library.
//!
//! This crate holds the pieces of the storefront that carry invariants worth
//! testing in isolation:
//! - [`cart`] - Session-owned cart store with merge semantics
//! - [`pricing`] - Subtotal, promotional discount, delivery fee and total
//! - [`checkout`] - Shipping validation and order-creation request building
//! - [`tracking`] - Projection of an order status onto fulfillment steps
//! - [`filters`] - Product sidebar selection and its canonical query
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no session storage. The `storefront` binary and the `cli` wire
//! these into the backend API.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod filters;
pub mod pricing;
pub mod tracking;
pub mod types;

pub use cart::{
    Cart, CartError, CartLineItem, LineKey, MAX_LINE_QUANTITY, MAX_UNIT_PRICE, NewLineItem,
};
pub use checkout::{
    CheckoutError, CheckoutPlan, CreateOrderRequest, OrderItemRequest, ShippingInfo,
    plan_checkout,
};
pub use filters::{FilterChange, FilterError, FilterSelection, ListingQuery, PriceRange};
pub use pricing::{DELIVERY_FEE, DISCOUNT_RATE, OrderPricingBreakdown, compute_breakdown};
pub use tracking::{OrderProgress, PaymentTiming, ProgressStep, StepKind, TimelineEntry};
pub use types::*;
