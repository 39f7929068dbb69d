use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::error;

/// JSON error body: `{"error": <title>, "detail": <message>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            ServiceError::Validation(msg) => Self::new(StatusCode::UNPROCESSABLE_ENTITY, "Validation Error", Some(msg)),
            ServiceError::WriteRejected(msg) => Self::new(StatusCode::BAD_REQUEST, "Write Rejected", Some(msg)),
            ServiceError::StoreUnavailable(msg) => Self::new(StatusCode::SERVICE_UNAVAILABLE, "Store Unavailable", Some(msg)),
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = self.title, detail = ?self.detail, "request failed");
        }
        let body = serde_json::json!({ "error": self.title, "detail": self.detail });
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_status_codes() {
        let cases = [
            (ServiceError::not_found("Provider"), StatusCode::NOT_FOUND),
            (ServiceError::Validation("rating".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (ServiceError::WriteRejected("$x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::StoreUnavailable("down".into()), StatusCode::SERVICE_UNAVAILABLE),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }

    #[test]
    fn not_found_keeps_detail() {
        let e = JsonApiError::from(ServiceError::not_found("Provider"));
        assert_eq!(e.detail.as_deref(), Some("Provider not found"));
        assert_eq!(e.into_response().status(), StatusCode::NOT_FOUND);
    }
}
