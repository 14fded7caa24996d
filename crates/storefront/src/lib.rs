//! Threadline Storefront library.
//!
//! JSON backend-for-frontend for the Threadline clothing shop. Holds each
//! visitor's cart, filter sidebar and backend token in a server-side session
//! and talks to the shop backend on their behalf.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::state::AppState;

/// Build the application router with its middleware stack.
///
/// Sentry layers are added by the binary so tests can drive the router
/// without a Sentry client.
pub fn build_router(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    routes::routes()
        .layer(session_layer)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
