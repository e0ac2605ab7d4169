//! Common test utilities

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, NaiveDate, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::util::ServiceExt;

use credit_application_system::{AppState, create_router};

/// Lowest bcrypt cost, keeps customer creation fast in tests.
pub const TEST_HASH_COST: u32 = 4;

/// Router over a fresh in-memory store.
pub fn app() -> Router {
    create_router(AppState::in_memory(TEST_HASH_COST))
}

pub fn tomorrow() -> NaiveDate {
    Utc::now().date_naive() + Duration::days(1)
}

pub fn customer_body(cpf: &str, email: &str) -> Value {
    json!({
        "firstName": "Alexandre",
        "lastName": "Dutra",
        "cpf": cpf,
        "income": "1000.0",
        "email": email,
        "password": "1234",
        "zipCode": "000000",
        "street": "Rua do Xande, 123"
    })
}

pub fn credit_body(customer_id: i64) -> Value {
    json!({
        "creditValue": "500.0",
        "dayFirstOfInstallment": tomorrow(),
        "numberOfInstallments": 5,
        "customerId": customer_id
    })
}

/// Send one request and return the status with the decoded JSON body.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_raw(app, method, uri, body.map(|b| b.to_string())).await
}

/// Like [`send`], but the request body is sent verbatim so tests can submit
/// malformed JSON. An empty response body decodes to `Value::Null`, a
/// non-JSON one to `Value::String`.
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, json)
}

/// Assert the shared error body shape and return its `details` map.
pub fn assert_error_body(body: &Value, status: StatusCode, exception: &str) -> Value {
    assert_eq!(body["status"], status.as_u16(), "unexpected body: {body}");
    assert_eq!(body["exception"], exception, "unexpected body: {body}");
    assert!(body["title"].is_string(), "missing title: {body}");
    assert!(body["timestamp"].is_string(), "missing timestamp: {body}");
    assert!(body["details"].is_object(), "missing details: {body}");
    body["details"].clone()
}

/// Create the default customer (id 1 on a fresh store).
pub async fn seed_customer(app: &Router) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/customers",
        Some(customer_body("28475934625", "xande@email.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "customer seed failed: {body}");
    body
}
