use axum::{
    extract::{Path, Query, State},
    Json,
};
use models::{Review, ServiceRequest};
use serde::Deserialize;
use service::catalog::{RequestReceipt, SeedSummary};
use service::storage::Record;
use tracing::info;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Exact category name
    pub category: Option<String>,
    /// Keep only the N best ranked entries
    pub top: Option<usize>,
}

#[utoipa::path(post, path = "/seed", tag = "catalog", responses((status = 200, description = "Seeded"), (status = 503, description = "Store Unavailable")))]
pub async fn seed(State(state): State<AppState>) -> Result<Json<SeedSummary>, JsonApiError> {
    Ok(Json(state.catalog.seed().await?))
}

#[utoipa::path(get, path = "/categories", tag = "catalog", responses((status = 200, description = "Categories")))]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Record>>, JsonApiError> {
    Ok(Json(state.catalog.list_categories().await?))
}

#[utoipa::path(get, path = "/providers", tag = "catalog", params(ListQuery), responses((status = 200, description = "Providers, best rated first when `top` is set")))]
pub async fn list_providers(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<Record>>, JsonApiError> {
    let providers = state.catalog.list_providers(q.category.as_deref(), q.top).await?;
    Ok(Json(providers))
}

#[utoipa::path(get, path = "/services", tag = "catalog", params(ListQuery), responses((status = 200, description = "Services, most popular first when `top` is set")))]
pub async fn list_services(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<Record>>, JsonApiError> {
    let services = state.catalog.list_services(q.category.as_deref(), q.top).await?;
    Ok(Json(services))
}

#[utoipa::path(
    post, path = "/request", tag = "catalog",
    request_body = crate::openapi::ServiceRequestDoc,
    responses(
        (status = 200, description = "Received"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn create_request(
    State(state): State<AppState>,
    Json(input): Json<ServiceRequest>,
) -> Result<Json<RequestReceipt>, JsonApiError> {
    info!(category = %input.category, provider_id = ?input.provider_id, "service_request_create");
    Ok(Json(state.catalog.create_request(input).await?))
}

#[utoipa::path(
    get, path = "/provider/{provider_id}", tag = "catalog",
    params(("provider_id" = String, Path, description = "Provider id or name")),
    responses(
        (status = 200, description = "Provider with reviews and services"),
        (status = 404, description = "Provider not found")
    )
)]
pub async fn provider_detail(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
) -> Result<Json<Record>, JsonApiError> {
    Ok(Json(state.catalog.provider_detail(&provider_id).await?))
}

#[utoipa::path(
    post, path = "/review", tag = "catalog",
    request_body = crate::openapi::ReviewDoc,
    responses(
        (status = 200, description = "Stored review"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn add_review(
    State(state): State<AppState>,
    Json(input): Json<Review>,
) -> Result<Json<Record>, JsonApiError> {
    Ok(Json(state.catalog.add_review(input).await?))
}
