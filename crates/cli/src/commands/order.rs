//! Fetch an order from the shop backend and show its progress.
//!
//! # Environment Variables
//!
//! - `STOREFRONT_API_URL` - Base URL of the shop backend REST API
//! - `THREADLINE_PASSWORD` - Password for the shopper account

use secrecy::SecretString;
use serde::Serialize;
use tracing::info;

use threadline_core::{Email, OrderId, OrderProgress};
use threadline_storefront::backend::{BackendClient, OrderRecord};
use threadline_storefront::config::BackendConfig;

use super::{CommandError, print_yaml};

#[derive(Serialize)]
struct OrderReport {
    order: OrderRecord,
    progress: OrderProgress,
}

/// Sign in as the shopper and print the order with its progress.
///
/// # Errors
///
/// Returns an error if configuration is missing, the credentials are
/// rejected, or the order cannot be fetched.
pub async fn run(id: &str, email: &str) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let id: OrderId = id
        .parse()
        .map_err(|_| CommandError::Invalid(format!("Invalid order id: {id}")))?;
    let email = Email::parse(email)?;
    let password = std::env::var("THREADLINE_PASSWORD")
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("THREADLINE_PASSWORD"))?;

    let config = BackendConfig::from_env()?;
    let client = BackendClient::new(&config);
    info!(api_url = %client.base_url(), "Signing in");

    let grant = client.login(&email, &password).await?;
    let order = client.get_order(&grant.access_token, id).await?;
    let progress = order.progress()?;

    print_yaml(&OrderReport { order, progress })?;
    Ok(())
}
