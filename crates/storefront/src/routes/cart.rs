//! Cart route handlers.
//!
//! The cart lives in the visitor's session. Every mutation loads it, applies
//! the change and writes it back, then answers with the full cart view so the
//! client never has to recompute totals.

use axum::Json;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use threadline_core::{
    Cart, CartLineItem, LineKey, NewLineItem, OrderPricingBreakdown, compute_breakdown,
};

use crate::error::{Result, add_breadcrumb};
use crate::models::session_keys;

/// Cart lines plus the pricing breakdown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLineItem>,
    pub item_count: u64,
    pub breakdown: OrderPricingBreakdown,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().to_vec(),
            item_count: cart.item_count(),
            breakdown: compute_breakdown(cart.lines()),
        }
    }
}

/// Cart badge count.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CartCount {
    pub count: u64,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the visitor's cart, starting an empty one on first use.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Persist the visitor's cart.
///
/// # Errors
///
/// Returns an error if the session store cannot be written.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

// =============================================================================
// Request Bodies
// =============================================================================

/// Update quantity request body.
///
/// Without `size` and `color` the first line with `id` is updated.
#[derive(Debug, Deserialize)]
pub struct UpdateCartBody {
    pub id: String,
    pub quantity: i64,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Remove line request body.
///
/// Without `size` and `color` the first line with `id` is removed.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartBody {
    pub id: String,
    pub size: Option<String>,
    pub color: Option<String>,
}

fn line_key(id: &str, size: Option<&String>, color: Option<&String>) -> Option<LineKey> {
    match (size, color) {
        (Some(size), Some(color)) => Some(LineKey::new(id, size.as_str(), color.as_str())),
        _ => None,
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Add item to cart, merging with an identical line.
///
/// Negative or oversized prices and quantities are refused with `400`.
#[instrument(skip(session, item), fields(product_id = %item.id))]
pub async fn add(session: Session, Json(item): Json<NewLineItem>) -> Result<Json<CartView>> {
    item.validate()?;
    let mut cart = load_cart(&session).await?;
    let product_id = item.id.clone();
    let quantity = cart.add_item(item);
    save_cart(&session, &cart).await?;

    add_breadcrumb(
        "cart",
        "Added item",
        Some(&[
            ("product_id", product_id.as_str()),
            ("quantity", quantity.to_string().as_str()),
        ]),
    );
    Ok(Json(CartView::from(&cart)))
}

/// Update line quantity; zero or less removes the line.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Json(body): Json<UpdateCartBody>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    let changed = match line_key(&body.id, body.size.as_ref(), body.color.as_ref()) {
        Some(key) => cart.set_line_quantity(&key, body.quantity),
        None => cart.set_quantity(&body.id, body.quantity),
    };

    if changed {
        save_cart(&session, &cart).await?;
    } else {
        tracing::debug!(id = %body.id, "No cart line matched update");
    }
    Ok(Json(CartView::from(&cart)))
}

/// Remove a line.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(body): Json<RemoveFromCartBody>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    let removed = match line_key(&body.id, body.size.as_ref(), body.color.as_ref()) {
        Some(key) => cart.remove_line(&key),
        None => cart.remove_item(&body.id),
    };

    if removed {
        save_cart(&session, &cart).await?;
    }
    Ok(Json(CartView::from(&cart)))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Get cart badge count.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<CartCount>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartCount {
        count: cart.item_count(),
    }))
}
