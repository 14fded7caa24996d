//! Shop backend REST API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP via `reqwest`
//! - The backend is the source of truth for products and orders - NO local
//!   sync, direct API calls per request
//! - Product detail responses are cached in memory via `moka`
//! - Order endpoints take the shopper's bearer token from their session
//!
//! # Endpoints
//!
//! ```text
//! GET  /api/items?{filters}           paginated product listing
//! GET  /api/products/{slug}           product detail
//! POST /api/orders/create-payment     order + payment redirect URL
//! GET  /api/orders                    order history
//! GET  /api/orders/{id}               single order with timeline
//! POST /api/auth/login                access token
//! ```

mod cache;
mod client;
pub mod types;

pub use client::BackendClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when calling the shop backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Could not build the request URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Token missing, expired or rejected.
    #[error("Unauthorized")]
    Unauthorized,

    /// Non-success status with the backend's message.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The backend answered but declined the request (`success: false` or
    /// a missing payload).
    #[error("Rejected: {0}")]
    Rejected(String),
}
