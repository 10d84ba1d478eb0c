//! Customer CRUD and export route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    extract::rejection::{JsonRejection, QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use solutic_core::CustomerId;

use crate::error::{AppError, Result};
use crate::models::{CustomerPage, CustomerPayload};
use crate::services::{CustomerService, ExportService};
use crate::services::export::{EXPORT_FILE_NAME, XLSX_CONTENT_TYPE};
use crate::state::AppState;

/// Query parameters for listing customers.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring filter on the customer name.
    #[serde(default)]
    pub name: String,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Query parameters for the export endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub name: String,
}

/// Confirmation body for successful mutations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Unwrap an extracted JSON body, reporting a parse failure as a
/// validation error keyed `body` (before any field-level checks).
fn require_body(
    payload: std::result::Result<Json<CustomerPayload>, JsonRejection>,
) -> Result<CustomerPayload> {
    match payload {
        Ok(Json(payload)) => Ok(payload),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected request body");
            Err(AppError::validation("body", "invalid request body"))
        }
    }
}

/// Unwrap extracted query parameters, reporting non-numeric `page` or
/// `per_page` values as a validation error keyed `query`.
fn require_query<T>(query: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    match query {
        Ok(Query(query)) => Ok(query),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected query string");
            Err(AppError::validation("query", "invalid query parameters"))
        }
    }
}

/// Create a customer.
///
/// POST /customers
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CustomerPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let payload = require_body(payload)?;

    let id = CustomerService::new(state.pool()).create(&payload).await?;
    tracing::info!(%id, "customer created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "customer created".to_owned(),
        }),
    ))
}

/// List customers, filtered by name and paginated.
///
/// GET /customers?name=&page=&per_page=
#[instrument(skip(state, query))]
pub async fn list(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<CustomerPage>> {
    let query = require_query(query)?;

    let page = CustomerService::new(state.pool())
        .list(&query.name, query.page, query.per_page)
        .await?;

    Ok(Json(page))
}

/// Update a customer in place.
///
/// PUT /customers/{id}
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    payload: std::result::Result<Json<CustomerPayload>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let payload = require_body(payload)?;

    CustomerService::new(state.pool()).update(id, &payload).await?;
    tracing::info!(%id, "customer updated");

    Ok(Json(MessageResponse {
        message: "customer updated".to_owned(),
    }))
}

/// Delete a customer.
///
/// DELETE /customers/{id}
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<Json<MessageResponse>> {
    CustomerService::new(state.pool()).delete(id).await?;
    tracing::info!(%id, "customer deleted");

    Ok(Json(MessageResponse {
        message: "customer deleted".to_owned(),
    }))
}

/// Download matching customers as an xlsx spreadsheet.
///
/// GET /customers/export?name=
#[instrument(skip(state, query))]
pub async fn export(
    State(state): State<AppState>,
    query: std::result::Result<Query<ExportQuery>, QueryRejection>,
) -> Result<Response> {
    let query = require_query(query)?;

    let bytes = ExportService::new(state.pool())
        .export(&query.name)
        .await?;

    let headers = [
        (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_owned()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
        ),
    ];

    Ok((headers, bytes).into_response())
}
