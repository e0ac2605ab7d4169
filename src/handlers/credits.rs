//! Credit HTTP handlers.
//!
//! This module implements the credit endpoints:
//! - POST /api/credits - Create a credit for an existing customer
//! - GET /api/credits?customerId= - List a customer's credits
//! - GET /api/credits/{creditCode}?customerId= - Get one credit

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    error::{AppError, ErrorResponse},
    extract::{AppJson, AppPath, AppQuery},
    models::credit::{CreditDto, CreditView, CreditViewList},
    state::AppState,
};

/// `?customerId=` query parameter shared by the read endpoints.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CustomerIdQuery {
    /// Owning customer id
    pub customer_id: i64,
}

/// Create a new credit.
///
/// # Request Body
///
/// ```json
/// {
///   "creditValue": "500.0",
///   "dayFirstOfInstallment": "2025-12-21",
///   "numberOfInstallments": 5,
///   "customerId": 1
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: `CreditView` with generated `creditCode` and status `IN_PROGRESS`
/// - **400**: a field is invalid, or the customer does not exist (`Id {id} not found`)
#[utoipa::path(
    post,
    path = "/api/credits",
    tag = "credits",
    request_body = CreditDto,
    responses(
        (status = 201, description = "Credit created", body = CreditView),
        (status = 400, description = "Invalid field or unknown customer", body = ErrorResponse)
    )
)]
pub async fn create_credit(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreditDto>,
) -> Result<(StatusCode, Json<CreditView>), AppError> {
    request.validate(Utc::now().date_naive())?;

    let (candidate, customer_id) = request.into_parts();
    let credit = state.credits.save(candidate, customer_id).await?;

    Ok((StatusCode::CREATED, Json(credit.into())))
}

/// List all credits of a customer, oldest first.
///
/// An unknown `customerId` returns an empty array.
#[utoipa::path(
    get,
    path = "/api/credits",
    tag = "credits",
    params(CustomerIdQuery),
    responses(
        (status = 200, description = "Credits of the customer", body = [CreditViewList]),
        (status = 400, description = "Missing or malformed customerId", body = ErrorResponse)
    )
)]
pub async fn list_credits(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CustomerIdQuery>,
) -> Result<Json<Vec<CreditViewList>>, AppError> {
    let credits = state.credits.find_all_by_customer(query.customer_id).await?;

    Ok(Json(credits.into_iter().map(Into::into).collect()))
}

/// Get one credit by its code.
///
/// # Response
///
/// - **200 OK**: `CreditView`
/// - **400**: unknown code (`Creditcode {code} not found`) or the credit
///   belongs to another customer (`Contact admin`)
#[utoipa::path(
    get,
    path = "/api/credits/{credit_code}",
    tag = "credits",
    params(
        ("credit_code" = Uuid, Path, description = "Credit code"),
        CustomerIdQuery
    ),
    responses(
        (status = 200, description = "Credit found", body = CreditView),
        (status = 400, description = "Unknown code or credit owned by another customer", body = ErrorResponse)
    )
)]
pub async fn get_credit(
    State(state): State<AppState>,
    AppPath(credit_code): AppPath<Uuid>,
    AppQuery(query): AppQuery<CustomerIdQuery>,
) -> Result<Json<CreditView>, AppError> {
    let credit = state
        .credits
        .find_by_credit_code(query.customer_id, credit_code)
        .await?;

    Ok(Json(credit.into()))
}
