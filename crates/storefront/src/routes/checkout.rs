//! Checkout route handlers.
//!
//! `POST /checkout` branches on the payment method. Only VNPay has a backend
//! flow; bank transfer and MoMo answer `501` without touching the cart or the
//! backend. A VNPay submission answers `303 See Other` to the provider URL
//! and leaves the cart alone; the cart is cleared by `GET /checkout/return` once the
//! provider reports success and the backend confirms the order moved past
//! `PENDING`.

use axum::{
    Json,
    extract::{Query, State},
    response::Redirect,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use threadline_core::{
    CheckoutPlan, OrderId, OrderProgress, OrderStatus, PaymentMethod, ShippingInfo, plan_checkout,
};

use crate::backend::OrderRecord;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::routes::cart::{load_cart, save_cart};
use crate::state::AppState;

/// Checkout request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutBody {
    pub shipping_info: ShippingInfo,
    pub payment_method: PaymentMethod,
}

/// Query parameters of the provider return.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnParams {
    pub order_id: OrderId,
    #[serde(default)]
    pub success: bool,
}

/// Outcome of the provider return.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnView {
    pub order: OrderRecord,
    pub progress: OrderProgress,
    pub cart_cleared: bool,
}

/// Submit the cart for payment and redirect to the provider.
#[instrument(skip(state, session, shopper, body), fields(method = %body.payment_method))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(shopper): OptionalAuth,
    Json(body): Json<CheckoutBody>,
) -> Result<Redirect> {
    let cart = load_cart(&session).await?;

    let request = match plan_checkout(cart.lines(), body.shipping_info, body.payment_method)? {
        CheckoutPlan::Unsupported(method) => return Err(AppError::UnsupportedPayment(method)),
        CheckoutPlan::Redirect(request) => request,
    };

    let shopper = shopper
        .ok_or_else(|| AppError::Unauthorized("sign in to pay with VNPay".to_string()))?;

    let payment_url = state
        .backend()
        .create_payment_order(&shopper.token(), &request)
        .await?;

    add_breadcrumb(
        "checkout",
        "Redirecting to payment provider",
        Some(&[("items", request.items.len().to_string().as_str())]),
    );
    tracing::info!(items = request.items.len(), "Payment order created");

    Ok(Redirect::to(&payment_url))
}

/// Handle the shopper's return from the payment provider.
#[instrument(skip(state, session, shopper))]
pub async fn payment_return(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(shopper): RequireAuth,
    Query(params): Query<ReturnParams>,
) -> Result<Json<ReturnView>> {
    let order = state
        .backend()
        .get_order(&shopper.token(), params.order_id)
        .await?;
    let progress = order.progress()?;

    let cart_cleared = params.success && is_confirmed(progress.status);
    if cart_cleared {
        let mut cart = load_cart(&session).await?;
        cart.clear();
        save_cart(&session, &cart).await?;
        tracing::info!(order_id = %order.id, "Payment confirmed, cart cleared");
    } else {
        tracing::warn!(
            order_id = %order.id,
            status = %progress.status,
            provider_success = params.success,
            "Payment not confirmed, keeping cart"
        );
    }

    Ok(Json(ReturnView {
        order,
        progress,
        cart_cleared,
    }))
}

/// Whether the backend has moved the order past the unpaid state.
const fn is_confirmed(status: OrderStatus) -> bool {
    !matches!(status, OrderStatus::Pending | OrderStatus::Cancelled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_confirmed() {
        assert!(!is_confirmed(OrderStatus::Pending));
        assert!(!is_confirmed(OrderStatus::Cancelled));
        assert!(is_confirmed(OrderStatus::Paid));
        assert!(is_confirmed(OrderStatus::Processing));
    }

    #[test]
    fn test_checkout_body_parses_method() {
        let body: CheckoutBody = serde_json::from_str(
            r#"{"shippingInfo": {"fullName": "A", "phone": "1", "address": "x"},
                "paymentMethod": "momo"}"#,
        )
        .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(body.payment_method, PaymentMethod::Momo);
    }
}
