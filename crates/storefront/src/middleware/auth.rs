//! Authentication extractors.
//!
//! Provides extractors for reading the signed-in shopper from the session in
//! route handlers.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::models::{CurrentShopper, session_keys};

/// Extractor that requires a signed-in shopper.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(shopper): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", shopper.email)
/// }
/// ```
pub struct RequireAuth(pub CurrentShopper);

/// Rejection returned when a handler needs a shopper and there is none.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "Please sign in to continue" })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let shopper = match OptionalAuth::from_request_parts(parts, state).await {
            Ok(OptionalAuth(shopper)) => shopper,
            Err(never) => match never {},
        };
        shopper.map(Self).ok_or(AuthRejection)
    }
}

/// Extractor that optionally gets the current shopper.
///
/// Unlike `RequireAuth`, this does not reject the request if nobody is
/// signed in.
pub struct OptionalAuth(pub Option<CurrentShopper>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let shopper = match parts.extensions.get::<Session>() {
            Some(session) => match session
                .get::<CurrentShopper>(session_keys::CURRENT_SHOPPER)
                .await
            {
                Ok(shopper) => shopper,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Failed to read shopper from session, treating as signed out"
                    );
                    None
                }
            },
            None => None,
        };

        Ok(Self(shopper))
    }
}

/// Store the shopper in the session after a successful login.
///
/// The session id is cycled first so a pre-login cookie cannot be reused to
/// ride the authenticated session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_shopper(
    session: &Session,
    shopper: &CurrentShopper,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session
        .insert(session_keys::CURRENT_SHOPPER, shopper)
        .await?;
    set_sentry_user(&shopper.email);
    Ok(())
}

/// Tear down all visitor state (logout).
///
/// Flushing drops the cart and filters along with the token.
///
/// # Errors
///
/// Returns an error if the session cannot be flushed.
pub async fn sign_out(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await?;
    clear_sentry_user();
    Ok(())
}
