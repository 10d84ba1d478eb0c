//! HTTP route handlers for the customer registry.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health              - Liveness check
//! GET    /health/ready        - Readiness check (verifies database)
//!
//! # Customers
//! POST   /customers           - Create a customer
//! GET    /customers           - List customers (?name=&page=&per_page=)
//! PUT    /customers/{id}      - Update a customer in place
//! DELETE /customers/{id}      - Delete a customer
//! GET    /customers/export    - Download customers as xlsx (?name=)
//! ```

pub mod customers;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{
    Router,
    routing::{get, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router with all routes and middleware.
///
/// CORS is fully permissive: the registry is consumed by a browser
/// frontend served from a different origin.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route(
            "/customers",
            get(customers::list).post(customers::create),
        )
        .route("/customers/export", get(customers::export))
        .route(
            "/customers/{id}",
            put(customers::update).delete(customers::remove),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
