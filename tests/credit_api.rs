//! Credit endpoint tests against the in-memory store.

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{app, credit_body, seed_customer, send};

#[tokio::test]
async fn create_credit_returns_201_with_customer_fields() {
    let app = app();
    seed_customer(&app).await;

    let (status, body) = send(&app, "POST", "/api/credits", Some(credit_body(1))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["creditValue"], "500.0");
    assert_eq!(body["numberOfInstallment"], 5);
    assert_eq!(body["status"], "IN_PROGRESS");
    assert_eq!(body["emailCustomer"], "xande@email.com");
    assert_eq!(body["incomeCustomer"], "1000.0");
    assert!(body["creditCode"].as_str().is_some());
}

#[tokio::test]
async fn first_installment_today_is_rejected() {
    let app = app();
    seed_customer(&app).await;
    let mut request = credit_body(1);
    request["dayFirstOfInstallment"] = json!(chrono::Utc::now().date_naive());

    let (status, body) = send(&app, "POST", "/api/credits", Some(request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["title"], "Bad Request! Consult the documentation");
    assert_eq!(body["status"], 400);
    assert_eq!(body["exception"], "validation");
    assert!(body["timestamp"].is_string());
    assert_eq!(body["details"]["dayFirstOfInstallment"], "must be a future date");
}

#[tokio::test]
async fn installments_out_of_range_are_rejected() {
    let app = app();
    seed_customer(&app).await;

    let mut request = credit_body(1);
    request["numberOfInstallments"] = json!(0);
    let (status, body) = send(&app, "POST", "/api/credits", Some(request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"]["numberOfInstallments"],
        "must be greater than or equal to 1"
    );

    let mut request = credit_body(1);
    request["numberOfInstallments"] = json!(49);
    let (status, body) = send(&app, "POST", "/api/credits", Some(request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["details"]["numberOfInstallments"],
        "must be less than or equal to 48"
    );
}

#[tokio::test]
async fn credit_for_missing_customer_is_rejected() {
    let app = app();
    seed_customer(&app).await;

    let (status, body) = send(&app, "POST", "/api/credits", Some(credit_body(2))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["exception"], "not_found");
    assert_eq!(body["details"]["message"], "Id 2 not found");
}

#[tokio::test]
async fn find_by_credit_code_for_owner() {
    let app = app();
    seed_customer(&app).await;
    let (_, created) = send(&app, "POST", "/api/credits", Some(credit_body(1))).await;
    let code = created["creditCode"].as_str().unwrap();

    let (status, body) = send(&app, "GET", &format!("/api/credits/{code}?customerId=1"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["creditCode"], code);
    assert_eq!(body["creditValue"], "500.0");
    assert_eq!(body["numberOfInstallment"], 5);
    assert_eq!(body["emailCustomer"], "xande@email.com");
    assert_eq!(body["status"], "IN_PROGRESS");
}

#[tokio::test]
async fn find_by_credit_code_for_other_customer_says_contact_admin() {
    let app = app();
    seed_customer(&app).await;
    let (_, created) = send(&app, "POST", "/api/credits", Some(credit_body(1))).await;
    let code = created["creditCode"].as_str().unwrap();

    let (status, body) = send(&app, "GET", &format!("/api/credits/{code}?customerId=2"), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["exception"], "invalid_argument");
    assert_eq!(body["details"]["message"], "Contact admin");
}

#[tokio::test]
async fn unknown_credit_code_is_not_found() {
    let app = app();
    seed_customer(&app).await;
    send(&app, "POST", "/api/credits", Some(credit_body(1))).await;
    let code = "5f06f9fd-7dc7-4dc3-a85e-3a10c30183b1";

    let (status, body) = send(&app, "GET", &format!("/api/credits/{code}?customerId=1"), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["exception"], "not_found");
    assert_eq!(
        body["details"]["message"],
        format!("Creditcode {code} not found")
    );
}

#[tokio::test]
async fn list_credits_by_customer() {
    let app = app();
    seed_customer(&app).await;
    let (_, first) = send(&app, "POST", "/api/credits", Some(credit_body(1))).await;
    let (_, second) = send(&app, "POST", "/api/credits", Some(credit_body(1))).await;

    let (status, body) = send(&app, "GET", "/api/credits?customerId=1", None).await;

    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["creditCode"], first["creditCode"]);
    assert_eq!(list[1]["creditCode"], second["creditCode"]);
    assert_eq!(list[0]["creditValue"], "500.0");
    assert_eq!(list[0]["numberOfInstallments"], 5);
}

#[tokio::test]
async fn list_credits_for_unknown_customer_is_empty() {
    // Listing is deliberately lenient: no existence check, unlike the single-credit lookup.
    let app = app();
    seed_customer(&app).await;
    send(&app, "POST", "/api/credits", Some(credit_body(1))).await;

    let (status, body) = send(&app, "GET", "/api/credits?customerId=2", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
