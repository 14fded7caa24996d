//! Request ID middleware for request tracing and correlation.
//!
//! Every request gets an id: the upstream proxy's `x-request-id` when it is
//! usable, otherwise a fresh UUID v4. The id lands in the tracing span, the
//! Sentry scope and the response headers.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Upstream ids longer than this are replaced.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Middleware that ensures every request has a unique request ID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|h| h.to_str().ok()),
    );

    Span::current().record("request_id", &request_id);

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Accept a printable, bounded upstream id or mint a new one.
fn resolve_request_id(upstream: Option<&str>) -> String {
    upstream
        .map(str::trim)
        .filter(|id| {
            !id.is_empty()
                && id.len() <= MAX_REQUEST_ID_LEN
                && id.chars().all(|c| c.is_ascii_graphic())
        })
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}
