//! OpenAPI document for the HTTP API, served at `/api-docs/openapi.json`.

use axum::Json;
use utoipa::OpenApi;

use crate::{
    error::ErrorResponse,
    handlers::{credits, customers, health},
    models::{
        credit::{CreditDto, CreditStatus, CreditView, CreditViewList},
        customer::{CustomerDto, CustomerUpdateDto, CustomerView},
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Credit Application System", description = "Customers and the credits they request"),
    paths(
        health::health_check,
        customers::create_customer,
        customers::get_customer,
        customers::delete_customer,
        customers::update_customer,
        credits::create_credit,
        credits::list_credits,
        credits::get_credit,
    ),
    components(schemas(
        CustomerDto,
        CustomerUpdateDto,
        CustomerView,
        CreditDto,
        CreditStatus,
        CreditView,
        CreditViewList,
        ErrorResponse,
        health::HealthResponse,
    )),
    tags(
        (name = "customers", description = "Customer registration and maintenance"),
        (name = "credits", description = "Credit requests and lookups"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        assert_eq!(
            paths,
            vec![
                "/api/credits",
                "/api/credits/{credit_code}",
                "/api/customers",
                "/api/customers/{id}",
                "/health",
            ]
        );
    }
}
