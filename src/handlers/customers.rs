//! Customer management HTTP handlers.
//!
//! This module implements the customer endpoints:
//! - POST /api/customers - Register a customer
//! - GET /api/customers/{id} - Get a customer
//! - DELETE /api/customers/{id} - Delete a customer and its credits
//! - PATCH /api/customers?customerId= - Update a customer's mutable fields

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    error::{AppError, ErrorResponse},
    extract::{AppJson, AppPath, AppQuery},
    handlers::credits::CustomerIdQuery,
    models::customer::{CustomerDto, CustomerUpdateDto, CustomerView},
    state::AppState,
};

/// Register a new customer.
///
/// # Request Body
///
/// ```json
/// {
///   "firstName": "Alexandre",
///   "lastName": "Dutra",
///   "cpf": "28475934625",
///   "income": "1000.0",
///   "email": "xande@email.com",
///   "password": "1234",
///   "zipCode": "000000",
///   "street": "Rua do Xande, 123"
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: `CustomerView`
/// - **400**: invalid field (CPF, email, blank values)
/// - **409**: CPF or email already registered
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "customers",
    request_body = CustomerDto,
    responses(
        (status = 201, description = "Customer registered", body = CustomerView),
        (status = 400, description = "Invalid field", body = ErrorResponse),
        (status = 409, description = "CPF or email already registered", body = ErrorResponse)
    )
)]
pub async fn create_customer(
    State(state): State<AppState>,
    AppJson(request): AppJson<CustomerDto>,
) -> Result<(StatusCode, Json<CustomerView>), AppError> {
    request.validate()?;

    let customer = state.customers.save(request).await?;

    Ok((StatusCode::CREATED, Json(customer.into())))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "customers",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer found", body = CustomerView),
        (status = 400, description = "Unknown id", body = ErrorResponse)
    )
)]
pub async fn get_customer(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<CustomerView>, AppError> {
    let customer = state.customers.find_by_id(id).await?;

    Ok(Json(customer.into()))
}

/// Delete a customer. Returns 204 No Content.
#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    tag = "customers",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 204, description = "Customer and its credits deleted"),
        (status = 400, description = "Unknown id", body = ErrorResponse)
    )
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    state.customers.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Update first name, last name, income, zip code and street.
#[utoipa::path(
    patch,
    path = "/api/customers",
    tag = "customers",
    params(CustomerIdQuery),
    request_body = CustomerUpdateDto,
    responses(
        (status = 200, description = "Customer updated", body = CustomerView),
        (status = 400, description = "Invalid field or unknown id", body = ErrorResponse)
    )
)]
pub async fn update_customer(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CustomerIdQuery>,
    AppJson(request): AppJson<CustomerUpdateDto>,
) -> Result<Json<CustomerView>, AppError> {
    request.validate()?;

    let customer = state.customers.update(query.customer_id, request).await?;

    Ok(Json(customer.into()))
}
