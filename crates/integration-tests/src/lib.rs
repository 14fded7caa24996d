//! Integration tests for Threadline.
//!
//! # Running Tests
//!
//! ```bash
//! # Pure flow tests (no services needed)
//! cargo test -p threadline-integration-tests
//!
//! # Live tests against a running storefront and shop backend
//! STOREFRONT_BASE_URL=http://localhost:3000 \
//!     cargo test -p threadline-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `shopping_flow` - cart, pricing, checkout and tracking wired together in-process
//! - `storefront_api` - HTTP tests against a running storefront

use std::path::PathBuf;

use threadline_core::NewLineItem;

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// HTTP client that keeps the session cookie between requests.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
#[allow(clippy::expect_used)]
pub fn visitor_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Path of a file under `tests/fixtures`.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load a YAML cart fixture (same format `tl-cli quote` reads).
///
/// # Panics
///
/// Panics if the fixture is missing or malformed.
#[must_use]
#[allow(clippy::expect_used)]
pub fn load_cart_fixture(name: &str) -> Vec<NewLineItem> {
    let content = std::fs::read_to_string(fixture_path(name)).expect("Failed to read fixture");
    serde_yaml::from_str(&content).expect("Failed to parse cart fixture")
}
