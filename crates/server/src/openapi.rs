use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ServiceRequestDoc {
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: String,
    pub category: String,
    pub provider_id: Option<String>,
    pub description: String,
    /// YYYY-MM-DD
    pub preferred_date: Option<String>,
    /// pending | scheduled | completed | cancelled
    pub status: Option<String>,
}

#[derive(ToSchema)]
pub struct ReviewDoc {
    pub provider_id: String,
    /// 1..=5
    pub rating: i64,
    pub comment: Option<String>,
    pub customer_name: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::system::health,
        crate::routes::system::store_test,
        crate::routes::catalog::seed,
        crate::routes::catalog::list_categories,
        crate::routes::catalog::list_providers,
        crate::routes::catalog::list_services,
        crate::routes::catalog::create_request,
        crate::routes::catalog::provider_detail,
        crate::routes::catalog::add_review,
    ),
    components(
        schemas(
            HealthResponse,
            ServiceRequestDoc,
            ReviewDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "catalog")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_catalog_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/providers", "/services", "/provider/{provider_id}", "/review", "/request", "/test"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
