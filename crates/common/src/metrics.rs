use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static STORE_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "home_services_store_operations_total",
        "Document store operations by operation, collection and outcome",
        &["operation", "collection", "outcome"]
    )
    .expect("register store_operations_total")
});

/// Count one store operation. `operation` is `create` or `read`.
pub fn observe_store_op(operation: &str, collection: &str, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    STORE_OPERATIONS_TOTAL
        .with_label_values(&[operation, collection, outcome])
        .inc();
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
