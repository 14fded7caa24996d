//! Shared helpers for storefront router tests.
//!
//! Spins up a stub shop backend on a loopback port and drives the storefront
//! router in-process, carrying the session cookie between calls.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, RawQuery},
    http::{HeaderMap, Request, StatusCode, header},
    response::Response,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use threadline_storefront::config::{BackendConfig, StorefrontConfig};
use threadline_storefront::state::AppState;

/// Token the stub backend hands out and expects back.
pub const TOKEN: &str = "tok-test-1";
/// Password the stub backend accepts.
pub const PASSWORD: &str = "correct horse";
/// Order the stub backend reports as paid.
pub const PAID_ORDER: i64 = 77;
/// Order the stub backend reports as still pending.
pub const PENDING_ORDER: i64 = 78;
/// Order with a status outside the known vocabulary.
pub const ODD_ORDER: i64 = 79;

fn product(id: i64, slug: &str, description: &str) -> Value {
    json!({
        "id": id,
        "name": "One Life Graphic T-shirt",
        "slug": slug,
        "price": 145,
        "description": description,
        "colors": ["Red", "Navy"],
        "sizes": ["Medium", "Large"],
        "images": ["/img/one-life.png"]
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

fn order(id: i64) -> Option<Value> {
    let status = match id {
        PAID_ORDER => "PAID",
        PENDING_ORDER => "PENDING",
        ODD_ORDER => "LOST_IN_TRANSIT",
        _ => return None,
    };
    Some(json!({
        "id": id,
        "status": status,
        "items": [{"productId": 1, "quantity": 1, "color": "Red", "size": "Large"}],
        "timeline": [{"status": "PENDING", "description": "Order placed, paid via VNPay"}],
        "totalAmount": 131
    }))
}

/// Stub of the shop backend REST API.
fn stub_backend() -> Router {
    Router::new()
        .route(
            "/api/items",
            get(|RawQuery(query): RawQuery| async move {
                // The raw query is echoed in the description so tests can see
                // which filters were forwarded.
                Json(json!({
                    "data": [product(1, "one-life", &query.unwrap_or_default())],
                    "pagination": {"total": 1, "page": 1, "limit": 9, "totalPages": 1}
                }))
            }),
        )
        .route(
            "/api/products/{slug}",
            get(|Path(slug): Path<String>| async move {
                if slug == "missing" {
                    return (StatusCode::NOT_FOUND, Json(json!({"message": "not found"})));
                }
                (
                    StatusCode::OK,
                    Json(json!({"success": true, "data": product(1, &slug, "detail")})),
                )
            }),
        )
        .route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == PASSWORD {
                    (
                        StatusCode::OK,
                        Json(json!({
                            "success": true,
                            "data": {"accessToken": TOKEN, "user": {"name": "Lan", "email": body["email"]}}
                        })),
                    )
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"success": false, "message": "bad credentials"})),
                    )
                }
            }),
        )
        .route(
            "/api/orders/create-payment",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                if !authorized(&headers) {
                    return (StatusCode::UNAUTHORIZED, Json(json!({"success": false})));
                }
                let items = body["items"].as_array().map_or(0, Vec::len);
                if items == 0 || body["shippingInfo"]["fullName"].is_null() {
                    return (
                        StatusCode::OK,
                        Json(json!({"success": false, "message": "invalid order"})),
                    );
                }
                (
                    StatusCode::OK,
                    Json(json!({
                        "success": true,
                        "data": {"paymentUrl": format!("https://sandbox.vnpay.test/pay?order={PAID_ORDER}")}
                    })),
                )
            }),
        )
        .route(
            "/api/orders",
            get(|headers: HeaderMap| async move {
                if !authorized(&headers) {
                    return (StatusCode::UNAUTHORIZED, Json(json!({})));
                }
                (
                    StatusCode::OK,
                    Json(json!({"success": true, "data": [order(PAID_ORDER), order(PENDING_ORDER)]})),
                )
            }),
        )
        .route(
            "/api/orders/{id}",
            get(|headers: HeaderMap, Path(id): Path<i64>| async move {
                if !authorized(&headers) {
                    return (StatusCode::UNAUTHORIZED, Json(json!({})));
                }
                match order(id) {
                    Some(order) => (StatusCode::OK, Json(json!({"success": true, "data": order}))),
                    None => (StatusCode::NOT_FOUND, Json(json!({"message": "no such order"}))),
                }
            }),
        )
}

/// Start the stub backend and return its base URL.
pub async fn spawn_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, stub_backend()).await.unwrap();
    });
    format!("http://{addr}")
}

/// Storefront configuration pointing at `api_url`.
pub fn config(api_url: &str) -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        backend: BackendConfig {
            api_url: api_url.to_string(),
            product_cache_ttl: Duration::from_secs(60),
        },
        json_logs: false,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// A visitor driving the router, keeping their session cookie.
pub struct Visitor {
    app: Router,
    cookie: Option<String>,
}

impl Visitor {
    /// Visitor of a storefront wired to the stub backend.
    pub async fn new() -> Self {
        let api_url = spawn_backend().await;
        Self::with_backend(&api_url)
    }

    /// Visitor of a storefront wired to an arbitrary backend URL.
    pub fn with_backend(api_url: &str) -> Self {
        let state = AppState::new(config(api_url));
        Self {
            app: threadline_storefront::build_router(state),
            cookie: None,
        }
    }

    /// Another visitor of the same storefront, without a session.
    pub fn stranger(&self) -> Self {
        Self {
            app: self.app.clone(),
            cookie: None,
        }
    }

    /// Send a request, keeping any session cookie the response sets.
    pub async fn send(&mut self, method: &str, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or_default();
            self.cookie = Some(pair.to_string());
        }
        response
    }

    /// Send a request and decode the JSON body (`Null` when empty).
    pub async fn call(&mut self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let response = self.send(method, uri, body).await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&mut self, uri: &str) -> (StatusCode, Value) {
        self.call("GET", uri, None).await
    }

    pub async fn post(&mut self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call("POST", uri, Some(body)).await
    }

    /// Add one product line to the cart.
    pub async fn add(&mut self, id: &str, price: i64, size: &str, quantity: u32) -> Value {
        let (status, cart) = self
            .post(
                "/cart/add",
                json!({
                    "id": id,
                    "name": format!("Product {id}"),
                    "image": "/img/p.png",
                    "price": price,
                    "size": size,
                    "color": "Red",
                    "quantity": quantity
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{cart}");
        cart
    }

    /// Sign in against the stub backend.
    pub async fn login(&mut self) {
        let (status, body) = self
            .post(
                "/auth/login",
                json!({"email": "lan@example.com", "password": PASSWORD}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
    }
}

/// Parse a money field of a JSON response.
pub fn money(value: &Value) -> threadline_core::Price {
    serde_json::from_value(value.clone()).unwrap()
}
