//! Wire types for the shop backend.
//!
//! Shapes follow what the backend actually returns; optional fields default
//! so a sparse listing payload still parses.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use threadline_core::{
    OrderId, OrderProgress, OrderStatus, Price, ProductId, StatusParseError, TimelineEntry,
};

// =============================================================================
// Envelopes
// =============================================================================

/// Some endpoints wrap their payload in `{ success, data }`, others return it
/// bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Enveloped<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Enveloped<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// `{ success, data, message }` envelope used by mutations.
#[derive(Debug, Deserialize)]
pub(crate) struct Outcome<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

// =============================================================================
// Products
// =============================================================================

/// Product image; the backend sends either a bare URL or an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductImage {
    Url(String),
    Object {
        url: String,
        #[serde(default)]
        alt: Option<String>,
    },
}

impl ProductImage {
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Url(url) | Self::Object { url, .. } => url,
        }
    }
}

/// A product as returned by listing and detail endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    pub price: Price,
    #[serde(default)]
    pub original_price: Option<Price>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl Product {
    /// First image URL, used as the cart thumbnail.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(ProductImage::url)
    }
}

/// Pagination block of the listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// One page of the product listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub data: Vec<Product>,
    pub pagination: Pagination,
}

// =============================================================================
// Orders
// =============================================================================

/// One purchased line on an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub name: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
}

/// An order as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: OrderId,
    /// Raw status string; see [`OrderRecord::status`].
    pub status: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub total_amount: Option<Price>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl OrderRecord {
    /// Parse the status against the known vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`StatusParseError`] for a status outside the vocabulary.
    pub fn status(&self) -> Result<OrderStatus, StatusParseError> {
        self.status.parse()
    }

    /// Project the order onto the shopper-facing progress steps.
    ///
    /// # Errors
    ///
    /// Returns [`StatusParseError`] for a status outside the vocabulary.
    pub fn progress(&self) -> Result<OrderProgress, StatusParseError> {
        Ok(OrderProgress::project(self.status()?, &self.timeline))
    }
}

/// Payload of a successful order/payment creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentData {
    pub payment_url: Option<String>,
}

// =============================================================================
// Auth
// =============================================================================

/// Public profile returned alongside an access token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopperProfile {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginData {
    #[serde(alias = "token")]
    pub access_token: String,
    #[serde(default)]
    pub user: Option<ShopperProfile>,
}

/// Result of a successful login.
pub struct LoginGrant {
    pub access_token: SecretString,
    pub profile: Option<ShopperProfile>,
}

impl std::fmt::Debug for LoginGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginGrant")
            .field("access_token", &"[REDACTED]")
            .field("profile", &self.profile)
            .finish()
    }
}
