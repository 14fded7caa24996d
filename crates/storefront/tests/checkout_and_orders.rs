//! Router tests for login, checkout and order tracking against a stub
//! backend.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

mod common;

use axum::http::{StatusCode, header};
use serde_json::{Value, json};

use common::{ODD_ORDER, PAID_ORDER, PENDING_ORDER, Visitor};

fn checkout_body(method: &str) -> Value {
    json!({
        "shippingInfo": {
            "fullName": "Nguyen Van A",
            "phone": "0901234567",
            "address": "12 Le Loi, District 1",
            "email": "a@example.com"
        },
        "paymentMethod": method
    })
}

#[tokio::test]
async fn bank_and_momo_are_not_implemented() {
    let mut visitor = Visitor::new().await;
    visitor.add("1", 145, "Large", 1).await;

    for method in ["bank", "momo"] {
        let (status, body) = visitor.post("/checkout", checkout_body(method)).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED, "{method}");
        assert!(body["error"].as_str().unwrap().contains(method));
    }

    let (_, count) = visitor.get("/cart/count").await;
    assert_eq!(count["count"], 1);
}

#[tokio::test]
async fn unknown_payment_method_is_rejected() {
    let mut visitor = Visitor::new().await;
    let (status, _) = visitor.post("/checkout", checkout_body("cash")).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn vnpay_requires_sign_in() {
    let mut visitor = Visitor::new().await;
    visitor.add("1", 145, "Large", 1).await;

    let (status, _) = visitor.post("/checkout", checkout_body("vnpay")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn vnpay_rejects_empty_cart_and_blank_fields() {
    let mut visitor = Visitor::new().await;
    visitor.login().await;

    let (status, body) = visitor.post("/checkout", checkout_body("vnpay")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "cart is empty");

    visitor.add("1", 145, "Large", 1).await;
    let mut blank = checkout_body("vnpay");
    blank["shippingInfo"]["address"] = json!("   ");
    let (status, body) = visitor.post("/checkout", blank).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("address"));
}

#[tokio::test]
async fn vnpay_redirects_to_provider_and_keeps_cart() {
    let mut visitor = Visitor::new().await;
    visitor.add("1", 145, "Large", 2).await;
    visitor.login().await;

    let response = visitor
        .send("POST", "/checkout", Some(checkout_body("vnpay")))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert_eq!(location, format!("https://sandbox.vnpay.test/pay?order={PAID_ORDER}"));

    let (_, count) = visitor.get("/cart/count").await;
    assert_eq!(count["count"], 2);
}

#[tokio::test]
async fn non_numeric_product_id_fails_checkout() {
    let mut visitor = Visitor::new().await;
    visitor.add("sku-abc", 145, "Large", 1).await;
    visitor.login().await;

    let (status, body) = visitor.post("/checkout", checkout_body("vnpay")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("sku-abc"));
}

#[tokio::test]
async fn confirmed_return_clears_cart() {
    let mut visitor = Visitor::new().await;
    visitor.add("1", 145, "Large", 1).await;
    visitor.login().await;

    let uri = format!("/checkout/return?orderId={PAID_ORDER}&success=true");
    let (status, body) = visitor.get(&uri).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["cartCleared"], true);
    assert_eq!(body["progress"]["orderPaid"], true);

    let (_, count) = visitor.get("/cart/count").await;
    assert_eq!(count["count"], 0);
}

#[tokio::test]
async fn unconfirmed_return_keeps_cart() {
    let mut visitor = Visitor::new().await;
    visitor.add("1", 145, "Large", 1).await;
    visitor.login().await;

    let uri = format!("/checkout/return?orderId={PENDING_ORDER}&success=true");
    let (_, body) = visitor.get(&uri).await;
    assert_eq!(body["cartCleared"], false);

    let uri = format!("/checkout/return?orderId={PAID_ORDER}&success=false");
    let (_, body) = visitor.get(&uri).await;
    assert_eq!(body["cartCleared"], false);

    let (_, count) = visitor.get("/cart/count").await;
    assert_eq!(count["count"], 1);
}

#[tokio::test]
async fn bad_credentials_are_unauthorized() {
    let mut visitor = Visitor::new().await;
    let (status, body) = visitor
        .post(
            "/auth/login",
            json!({"email": "lan@example.com", "password": "nope"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized: Invalid credentials");

    let (status, _) = visitor
        .post("/auth/login", json!({"email": "not-an-email", "password": "x"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn orders_require_sign_in() {
    let mut visitor = Visitor::new().await;
    let (status, body) = visitor.get("/orders").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn order_history_and_tracking() {
    let mut visitor = Visitor::new().await;
    visitor.login().await;

    let (status, orders) = visitor.get("/orders").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(orders.as_array().unwrap().len(), 2);

    let (status, view) = visitor.get(&format!("/orders/{PAID_ORDER}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["progress"]["timing"], "prepaid");
    assert_eq!(view["progress"]["orderMade"], true);
    assert_eq!(view["progress"]["orderPaid"], true);
    assert_eq!(view["progress"]["shipped"], false);

    let (status, _) = visitor.get("/orders/404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unrecognized_order_status_is_bad_gateway() {
    let mut visitor = Visitor::new().await;
    visitor.login().await;

    let (status, _) = visitor.get(&format!("/orders/{ODD_ORDER}")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn logout_tears_down_cart_and_token() {
    let mut visitor = Visitor::new().await;
    visitor.add("1", 145, "Large", 3).await;
    visitor.login().await;

    let (status, _) = visitor.post("/auth/logout", json!({})).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, count) = visitor.get("/cart/count").await;
    assert_eq!(count["count"], 0);
    let (status, _) = visitor.get("/orders").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
