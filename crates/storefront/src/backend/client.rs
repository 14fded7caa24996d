//! Backend API client implementation.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use threadline_core::{CreateOrderRequest, Email, ListingQuery, OrderId};

use super::ApiError;
use super::cache::{CacheKey, ProductCache, product_cache};
use super::types::{
    Enveloped, LoginData, LoginGrant, OrderRecord, Outcome, PaymentData, Product, ProductPage,
};
use crate::config::BackendConfig;

/// Longest slice of a response body that ends up in logs or errors.
const BODY_SNIPPET_LEN: usize = 200;

// =============================================================================
// BackendClient
// =============================================================================

/// Client for the shop backend REST API.
///
/// Cheap to clone; all clones share one connection pool and product cache.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: String,
    products: ProductCache,
}

impl BackendClient {
    /// Create a new backend client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(BackendClientInner {
                client: reqwest::Client::new(),
                base_url: config.api_url.trim_end_matches('/').to_string(),
                products: product_cache(config.product_cache_ttl),
            }),
        }
    }

    /// Base URL the client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(Url::parse(&format!("{}{path}", self.inner.base_url))?)
    }

    /// Read a JSON body, mapping status codes onto [`ApiError`].
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> Result<T, ApiError> {
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(what.to_string()));
        }
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %snippet(&body),
                "Backend returned non-success status"
            );
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: extract_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %snippet(&body),
                "Failed to parse backend response"
            );
            ApiError::Parse(e)
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Fetch one page of the product listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload does not parse.
    #[instrument(skip(self, query), fields(page = query.page, limit = query.limit))]
    pub async fn list_products(&self, query: &ListingQuery) -> Result<ProductPage, ApiError> {
        let mut url = self.endpoint("/api/items")?;
        url.query_pairs_mut().extend_pairs(query.to_query());

        debug!(url = %url, "Fetching product listing");
        let response = self.inner.client.get(url.as_str()).send().await?;
        Self::read_json(response, "product listing").await
    }

    /// Fetch a product by slug. Cached.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown slug, or an error if the
    /// request fails.
    #[instrument(skip(self))]
    pub async fn get_product(&self, slug: &str) -> Result<Product, ApiError> {
        let key = CacheKey::Product(slug.to_string());
        if let Some(product) = self.inner.products.get(&key).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let mut url = self.endpoint("/api/products")?;
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .push(slug);

        let response = self.inner.client.get(url.as_str()).send().await?;
        let product = Self::read_json::<Enveloped<Product>>(response, &format!("product {slug}"))
            .await?
            .into_inner();

        self.inner.products.insert(key, product.clone()).await;
        Ok(product)
    }

    // =========================================================================
    // Order Methods
    // =========================================================================

    /// Create an order and obtain the payment provider redirect URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the backend reports failure or
    /// omits the URL, or another error if the request fails.
    #[instrument(skip_all, fields(items = request.items.len()))]
    pub async fn create_payment_order(
        &self,
        token: &SecretString,
        request: &CreateOrderRequest,
    ) -> Result<String, ApiError> {
        let url = self.endpoint("/api/orders/create-payment")?;
        let response = self
            .inner
            .client
            .post(url.as_str())
            .bearer_auth(token.expose_secret())
            .json(request)
            .send()
            .await?;

        let outcome: Outcome<PaymentData> = Self::read_json(response, "payment order").await?;
        if !outcome.success {
            return Err(ApiError::Rejected(
                outcome
                    .message
                    .unwrap_or_else(|| "order was not created".to_string()),
            ));
        }

        outcome
            .data
            .and_then(|data| data.payment_url)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ApiError::Rejected("no payment URL returned".to_string()))
    }

    /// List the shopper's orders.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for a rejected token, or an error if
    /// the request fails.
    #[instrument(skip_all)]
    pub async fn list_orders(&self, token: &SecretString) -> Result<Vec<OrderRecord>, ApiError> {
        let url = self.endpoint("/api/orders")?;
        let response = self
            .inner
            .client
            .get(url.as_str())
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        Ok(Self::read_json::<Enveloped<Vec<OrderRecord>>>(response, "orders")
            .await?
            .into_inner())
    }

    /// Fetch one order with its timeline.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id, or an error if the
    /// request fails.
    #[instrument(skip(self, token))]
    pub async fn get_order(
        &self,
        token: &SecretString,
        id: OrderId,
    ) -> Result<OrderRecord, ApiError> {
        let url = self.endpoint(&format!("/api/orders/{id}"))?;
        let response = self
            .inner
            .client
            .get(url.as_str())
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        Ok(
            Self::read_json::<Enveloped<OrderRecord>>(response, &format!("order {id}"))
                .await?
                .into_inner(),
        )
    }

    // =========================================================================
    // Auth Methods
    // =========================================================================

    /// Exchange credentials for an access token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for bad credentials,
    /// [`ApiError::Rejected`] if the backend declines without a status code.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &Email, password: &SecretString) -> Result<LoginGrant, ApiError> {
        let url = self.endpoint("/api/auth/login")?;
        let body = serde_json::json!({
            "email": email.as_str(),
            "password": password.expose_secret(),
        });

        let response = self.inner.client.post(url.as_str()).json(&body).send().await?;
        let outcome: Outcome<LoginData> = Self::read_json(response, "login").await?;

        match outcome.data {
            Some(data) if outcome.success => Ok(LoginGrant {
                access_token: SecretString::from(data.access_token),
                profile: data.user,
            }),
            _ => Err(ApiError::Rejected(
                outcome
                    .message
                    .unwrap_or_else(|| "login failed".to_string()),
            )),
        }
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}

/// Pull `message` out of a JSON error body, falling back to the raw text.
fn extract_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| snippet(body))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn client(api_url: &str) -> BackendClient {
        BackendClient::new(&BackendConfig {
            api_url: api_url.to_string(),
            product_cache_ttl: Duration::from_secs(60),
        })
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let c = client("http://localhost:5000/");
        assert_eq!(c.base_url(), "http://localhost:5000");
        assert_eq!(
            c.endpoint("/api/items").unwrap().as_str(),
            "http://localhost:5000/api/items"
        );

        let c = client("https://api.example.com/shop");
        assert_eq!(
            c.endpoint("/api/orders/7").unwrap().as_str(),
            "https://api.example.com/shop/api/orders/7"
        );
    }

    #[test]
    fn test_listing_query_string() {
        let c = client("http://localhost:5000");
        let mut selection = threadline_core::FilterSelection::new();
        selection.toggle_style("Casual");
        selection.toggle_color("Navy Blue");
        let query = ListingQuery::new(selection, Some(2), None);

        let mut url = c.endpoint("/api/items").unwrap();
        url.query_pairs_mut().extend_pairs(query.to_query());
        assert_eq!(
            url.query(),
            Some("minPrice=0&maxPrice=500&color=Navy+Blue&style=Casual&page=2&limit=9")
        );
    }

    #[test]
    fn test_extract_message() {
        assert_eq!(
            extract_message(r#"{"success":false,"message":"Out of stock"}"#),
            "Out of stock"
        );
        assert_eq!(extract_message("Bad Gateway"), "Bad Gateway");
    }
}
