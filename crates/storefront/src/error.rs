//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//! Errors render as `{"error": "..."}` JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use threadline_core::{CartError, CheckoutError, FilterError, PaymentMethod, StatusParseError};

use crate::backend::ApiError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Shop backend call failed.
    #[error("Backend error: {0}")]
    Backend(#[from] ApiError),

    /// Product was refused at the cart boundary.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout input was rejected before reaching the backend.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Filter change was rejected.
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    /// The backend sent an order status outside the known vocabulary.
    #[error("Unrecognized order data: {0}")]
    Status(#[from] StatusParseError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Payment method is recognized but has no integration.
    #[error("Payment method '{0}' is not available yet")]
    UnsupportedPayment(PaymentMethod),

    /// Shopper is not signed in.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Backend(err) => match err {
                ApiError::NotFound(_) => StatusCode::NOT_FOUND,
                ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Status(_) => StatusCode::BAD_GATEWAY,
            Self::Cart(_) | Self::Checkout(_) | Self::Filter(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::UnsupportedPayment(_) => StatusCode::NOT_IMPLEMENTED,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        // Don't expose internal error details to clients
        match self {
            Self::Backend(ApiError::NotFound(what)) => format!("Not found: {what}"),
            Self::Backend(ApiError::Unauthorized) => "Please sign in again".to_string(),
            Self::Backend(ApiError::Rejected(message)) => format!("Request declined: {message}"),
            Self::Backend(_) | Self::Status(_) => "External service error".to_string(),
            Self::Session(_) => "Internal server error".to_string(),
            Self::Cart(err) => err.to_string(),
            Self::Checkout(err) => err.to_string(),
            Self::Filter(err) => err.to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = serde_json::json!({ "error": self.public_message() });
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context for a signed-in shopper.
///
/// The backend hands out no stable shopper id, so the email identifies the
/// shopper in error reports.
pub fn set_sentry_user(email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the shopper.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("product_id", "123")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
