//! Order history and tracking handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use threadline_core::{OrderId, OrderProgress};

use crate::backend::OrderRecord;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// One order with its projected progress.
#[derive(Debug, Serialize)]
pub struct OrderView {
    pub order: OrderRecord,
    pub progress: OrderProgress,
}

/// Order history for the signed-in shopper.
#[instrument(skip(state, shopper))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(shopper): RequireAuth,
) -> Result<Json<Vec<OrderRecord>>> {
    let orders = state.backend().list_orders(&shopper.token()).await?;
    Ok(Json(orders))
}

/// One order with its tracking steps.
#[instrument(skip(state, shopper))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(shopper): RequireAuth,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderView>> {
    let order = state.backend().get_order(&shopper.token(), id).await?;
    let progress = order.progress().inspect_err(|e| {
        tracing::warn!(order_id = %id, error = %e, "Order has an unrecognized status");
    })?;

    Ok(Json(OrderView { order, progress }))
}
