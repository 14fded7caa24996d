//! Authentication route handlers.
//!
//! Credentials are exchanged with the shop backend for an access token, which
//! is then held in the visitor's session. Nothing is stored locally.

use axum::{Json, extract::State, http::StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use threadline_core::Email;

use crate::backend::ApiError;
use crate::error::{AppError, Result};
use crate::middleware::{set_current_shopper, sign_out};
use crate::models::CurrentShopper;
use crate::state::AppState;

/// Login request body.
#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// Signed-in shopper as shown to the client.
#[derive(Debug, Serialize)]
pub struct ShopperView {
    pub name: Option<String>,
    pub email: String,
}

/// Exchange credentials for a session.
#[instrument(skip(state, session, body))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginBody>,
) -> Result<Json<ShopperView>> {
    let email = Email::parse(&body.email)
        .map_err(|e| AppError::BadRequest(format!("Invalid email: {e}")))?;
    if body.password.is_empty() {
        return Err(AppError::BadRequest("Password is required".to_string()));
    }
    let password = SecretString::from(body.password);

    let grant = match state.backend().login(&email, &password).await {
        Ok(grant) => grant,
        Err(ApiError::Unauthorized | ApiError::Rejected(_)) => {
            tracing::info!(email = %email, "Login rejected");
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let profile = grant.profile.unwrap_or_default();
    let shopper = CurrentShopper::new(
        grant.access_token.expose_secret().to_string(),
        profile.name,
        profile.email.unwrap_or_else(|| email.as_str().to_string()),
    );
    set_current_shopper(&session, &shopper).await?;

    tracing::info!(email = %shopper.email, "Shopper signed in");
    Ok(Json(ShopperView {
        name: shopper.name,
        email: shopper.email,
    }))
}

/// Sign out and drop all visitor state.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    sign_out(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}
