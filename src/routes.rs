//! HTTP routing.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{docs, handlers, state::AppState};

/// Build the application router.
///
/// # Routes
///
/// - `GET /health`
/// - `POST|PATCH /api/customers`, `GET|DELETE /api/customers/{id}`
/// - `POST|GET /api/credits`, `GET /api/credits/{creditCode}`
/// - `GET /api-docs/openapi.json`
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/customers",
            post(handlers::customers::create_customer)
                .patch(handlers::customers::update_customer),
        )
        .route(
            "/api/customers/{id}",
            get(handlers::customers::get_customer).delete(handlers::customers::delete_customer),
        )
        .route(
            "/api/credits",
            post(handlers::credits::create_credit).get(handlers::credits::list_credits),
        )
        .route(
            "/api/credits/{credit_code}",
            get(handlers::credits::get_credit),
        )
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        // Request/response spans for every call
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
