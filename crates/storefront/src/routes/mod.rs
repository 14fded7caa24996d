//! HTTP route handlers for storefront.
//!
//! Every endpoint speaks JSON; errors come back as `{"error": "..."}`.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health               - Health check
//!
//! # Products
//! GET    /products             - Listing filtered by the session sidebar
//! POST   /products/filters     - Apply one sidebar change
//! DELETE /products/filters     - Reset the sidebar
//! GET    /products/{slug}      - Product detail
//!
//! # Cart
//! GET    /cart                 - Lines and pricing breakdown
//! POST   /cart/add             - Add (merges identical lines)
//! POST   /cart/update          - Set quantity (zero or less removes)
//! POST   /cart/remove          - Remove line
//! POST   /cart/clear           - Empty cart
//! GET    /cart/count           - Badge count
//!
//! # Checkout
//! POST   /checkout             - Submit order for the chosen payment method
//! GET    /checkout/return      - Provider return; clears cart on confirmed payment
//!
//! # Auth
//! POST   /auth/login           - Exchange credentials for a session
//! POST   /auth/logout          - Drop the session
//!
//! # Orders (requires auth)
//! GET    /orders               - Order history
//! GET    /orders/{id}          - Order with tracking progress
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;

use axum::{
    Json, Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route(
            "/filters",
            post(products::update_filters).delete(products::reset_filters),
        )
        .route("/{slug}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::submit))
        .route("/return", get(checkout::payment_return))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .nest("/auth", auth_routes())
        .nest("/orders", order_routes())
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
