//! Product route handlers.
//!
//! The listing reads the filter sidebar from the visitor's session, so a
//! shopper who narrows the catalogue keeps that narrowing across pages.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use threadline_core::{FilterChange, FilterSelection, ListingQuery};

use crate::backend::{Pagination, Product};
use crate::error::Result;
use crate::models::session_keys;
use crate::state::AppState;

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListingParams {
    /// Style of the page the shopper came from; seeds the sidebar once.
    pub style: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Opaque client token echoed back so stale responses can be dropped.
    pub seq: Option<u64>,
}

/// One listing page with the filters that produced it.
#[derive(Debug, Serialize)]
pub struct ListingView {
    pub products: Vec<Product>,
    pub pagination: Pagination,
    pub filters: FilterSelection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seq: Option<u64>,
}

// =============================================================================
// Session Helpers
// =============================================================================

async fn load_filters(session: &Session) -> Result<FilterSelection> {
    Ok(session
        .get::<FilterSelection>(session_keys::FILTERS)
        .await?
        .unwrap_or_default())
}

async fn save_filters(session: &Session, filters: &FilterSelection) -> Result<()> {
    session.insert(session_keys::FILTERS, filters).await?;
    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

/// Product listing filtered by the session sidebar.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ListingParams>,
) -> Result<Json<ListingView>> {
    let mut filters = load_filters(&session).await?;
    let before = filters.clone();
    filters.apply_style_context(params.style.as_deref());
    if filters != before {
        save_filters(&session, &filters).await?;
    }

    let query = ListingQuery::new(filters, params.page, params.limit);
    let page = state.backend().list_products(&query).await?;

    Ok(Json(ListingView {
        products: page.data,
        pagination: page.pagination,
        filters: query.filters,
        seq: params.seq,
    }))
}

/// Apply one sidebar interaction.
#[instrument(skip(session))]
pub async fn update_filters(
    session: Session,
    Json(change): Json<FilterChange>,
) -> Result<Json<FilterSelection>> {
    let mut filters = load_filters(&session).await?;
    filters.apply(&change)?;
    save_filters(&session, &filters).await?;
    Ok(Json(filters))
}

/// Return the sidebar to its defaults.
#[instrument(skip(session))]
pub async fn reset_filters(session: Session) -> Result<Json<FilterSelection>> {
    let mut filters = load_filters(&session).await?;
    filters.reset();
    save_filters(&session, &filters).await?;
    Ok(Json(filters))
}

/// Product detail.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<Product>> {
    let product = state.backend().get_product(&slug).await?;
    Ok(Json(product))
}
