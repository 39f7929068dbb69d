use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod catalog;
pub mod system;

pub use system::health;

/// Build the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    // Diagnostics: liveness, store probe, metrics, API document
    let system_routes = Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/test", get(system::store_test))
        .route("/metrics", get(system::metrics))
        .route("/api-docs/openapi.json", get(system::openapi_json));

    // Catalog reads and writes
    let catalog_routes = Router::new()
        .route("/seed", post(catalog::seed))
        .route("/categories", get(catalog::list_categories))
        .route("/providers", get(catalog::list_providers))
        .route("/services", get(catalog::list_services))
        .route("/request", post(catalog::create_request))
        .route("/provider/:provider_id", get(catalog::provider_detail))
        .route("/review", post(catalog::add_review));

    system_routes
        .merge(catalog_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
