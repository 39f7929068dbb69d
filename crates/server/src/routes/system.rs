use axum::{extract::State, http::StatusCode, Json};
use common::types::{Health, Message};
use service::catalog::StoreStatus;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub async fn root() -> Json<Message> {
    Json(Message { message: "Home Services API is running" })
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Store connectivity probe. Always 200; the body says whether the store answered.
#[utoipa::path(get, path = "/test", tag = "health", responses((status = 200, description = "Probe result")))]
pub async fn store_test(State(state): State<AppState>) -> Json<StoreStatus> {
    Json(state.catalog.store_status().await)
}

pub async fn metrics() -> (StatusCode, String) {
    common::metrics::encode_metrics()
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
