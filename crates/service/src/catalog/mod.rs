//! Marketplace operations over the document store.

use std::sync::Arc;

use models::{Category, Document, Provider, Review, Service, ServiceRequest};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::storage::{DocumentStore, Filter, Record, ID_FIELD};

pub mod listing;
pub mod provider_detail;
pub mod seed;

/// Fixed cap on every list query.
pub const LIST_LIMIT: usize = 100;

/// Returned by `create_request`: the new record id and a fixed `received` status.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RequestReceipt {
    pub id: String,
    pub status: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SeedSummary {
    pub status: &'static str,
}

/// Connectivity probe result. Fields that do not apply are omitted.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct StoreStatus {
    pub backend: &'static str,
    pub database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Serialize a typed entity into a store record.
pub fn to_record<D: Document>(doc: &D) -> Result<Record, ServiceError> {
    match serde_json::to_value(doc) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ServiceError::WriteRejected(format!("{} is not a record: {other}", D::COLLECTION))),
        Err(e) => Err(ServiceError::WriteRejected(e.to_string())),
    }
}

/// Catalog business service, independent of the web framework.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn DocumentStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self { Self { store } }

    /// Validate and insert a typed entity into its collection.
    pub async fn insert<D: Document + Sync>(&self, doc: &D) -> Result<Record, ServiceError> {
        doc.validate()?;
        let record = to_record(doc)?;
        Ok(self.store.create_document(D::COLLECTION, record).await?)
    }

    pub async fn list_categories(&self) -> Result<Vec<Record>, ServiceError> {
        Ok(self.store.get_documents(Category::COLLECTION, &Filter::All, LIST_LIMIT).await?)
    }

    /// Providers, optionally of one category; `top` keeps the best rated.
    #[instrument(skip(self))]
    pub async fn list_providers(&self, category: Option<&str>, top: Option<usize>) -> Result<Vec<Record>, ServiceError> {
        let providers = self.list_in_category(Provider::COLLECTION, category).await?;
        Ok(listing::top_by(providers, "rating", top))
    }

    /// Services, optionally of one category; `top` keeps the most popular.
    #[instrument(skip(self))]
    pub async fn list_services(&self, category: Option<&str>, top: Option<usize>) -> Result<Vec<Record>, ServiceError> {
        let services = self.list_in_category(Service::COLLECTION, category).await?;
        Ok(listing::top_by(services, "popularity", top))
    }

    async fn list_in_category(&self, collection: &str, category: Option<&str>) -> Result<Vec<Record>, ServiceError> {
        let filter = category
            .filter(|c| !c.is_empty())
            .map(|c| Filter::eq("category", c))
            .unwrap_or_default();
        Ok(self.store.get_documents(collection, &filter, LIST_LIMIT).await?)
    }

    #[instrument(skip(self, request), fields(category = %request.category))]
    pub async fn create_request(&self, request: ServiceRequest) -> Result<RequestReceipt, ServiceError> {
        let stored = self.insert(&request).await?;
        let id = stored
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        info!(request_id = %id, status = %request.status, "service_request_received");
        Ok(RequestReceipt { id, status: "received".into() })
    }

    #[instrument(skip(self, review), fields(provider_id = %review.provider_id))]
    pub async fn add_review(&self, review: Review) -> Result<Record, ServiceError> {
        let stored = self.insert(&review).await?;
        info!(rating = review.rating, "review_added");
        Ok(stored)
    }

    pub async fn provider_detail(&self, key: &str) -> Result<Record, ServiceError> {
        provider_detail::provider_detail(self.store.as_ref(), key).await
    }

    /// Insert the sample catalog. Running it twice inserts duplicates.
    #[instrument(skip(self))]
    pub async fn seed(&self) -> Result<SeedSummary, ServiceError> {
        let categories = seed::sample_categories();
        let providers = seed::sample_providers();
        let services = seed::sample_services();

        for c in &categories {
            self.insert(c).await?;
        }
        for p in &providers {
            self.insert(p).await?;
        }
        for s in &services {
            self.insert(s).await?;
        }

        info!(
            categories = categories.len(),
            providers = providers.len(),
            services = services.len(),
            "catalog_seeded"
        );
        Ok(SeedSummary { status: "seeded" })
    }

    /// Report whether the store answers; never fails.
    pub async fn store_status(&self) -> StoreStatus {
        match self.store.list_collection_names().await {
            Ok(collections) => StoreStatus {
                backend: "ok",
                database: "ok",
                database_url: Some(self.store.location()),
                database_name: Some(self.store.database_name().to_string()),
                connection_status: Some("connected"),
                collections: Some(collections),
                error: None,
            },
            Err(e) => {
                warn!(error = %e, "store connectivity probe failed");
                StoreStatus {
                    backend: "ok",
                    database: "error",
                    database_url: None,
                    database_name: None,
                    connection_status: None,
                    collections: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use models::RequestStatus;

    fn service_with_store() -> (CatalogService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (CatalogService::new(store.clone()), store)
    }

    fn request() -> ServiceRequest {
        ServiceRequest {
            customer_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            phone: None,
            address: "1 Main St".into(),
            category: "Plumbing".into(),
            provider_id: None,
            description: "Leaking faucet".into(),
            preferred_date: Some("2025-01-15".into()),
            status: RequestStatus::default(),
        }
    }

    #[tokio::test]
    async fn created_record_is_visible_without_field_loss() -> Result<(), anyhow::Error> {
        let (svc, store) = service_with_store();
        let review = Review { provider_id: "p1".into(), rating: 4, comment: Some("Quick fix".into()), customer_name: None };
        let stored = svc.add_review(review.clone()).await?;

        let all = store.get_documents("review", &Filter::All, LIST_LIMIT).await?;
        assert_eq!(all, vec![stored.clone()]);
        let expected = to_record(&review)?;
        for (k, v) in &expected {
            assert_eq!(stored.get(k), Some(v), "field {k} lost");
        }
        Ok(())
    }

    #[tokio::test]
    async fn category_filter_returns_only_matches() -> Result<(), anyhow::Error> {
        let (svc, _) = service_with_store();
        svc.seed().await?;

        let electrical = svc.list_providers(Some("Electrical"), None).await?;
        assert_eq!(electrical.len(), 1);
        assert!(electrical.iter().all(|p| p["category"] == "Electrical"));
        assert_eq!(svc.list_providers(None, None).await?.len(), 5);
        assert!(svc.list_providers(Some("Roofing"), None).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn top_services_by_popularity() -> Result<(), anyhow::Error> {
        let (svc, _) = service_with_store();
        svc.seed().await?;
        let top = svc.list_services(None, Some(2)).await?;
        let titles: Vec<&str> = top.iter().filter_map(|s| s["title"].as_str()).collect();
        assert_eq!(titles, vec!["Deep Cleaning", "Faucet Replacement"]);

        let best = svc.list_providers(None, Some(1)).await?;
        assert_eq!(best[0]["name"], "ColorCraft Painters");
        Ok(())
    }

    #[tokio::test]
    async fn empty_category_lists_everything() -> Result<(), anyhow::Error> {
        let (svc, _) = service_with_store();
        assert_eq!(svc.seed().await?, SeedSummary { status: "seeded" });

        assert_eq!(svc.list_providers(Some(""), None).await?.len(), 5);
        assert_eq!(svc.list_services(Some(""), None).await?.len(), 4);
        assert_eq!(svc.list_providers(Some(""), Some(2)).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn top_beyond_result_count_returns_all_sorted() -> Result<(), anyhow::Error> {
        let (svc, _) = service_with_store();
        svc.seed().await?;

        let providers = svc.list_providers(None, Some(50)).await?;
        assert_eq!(providers.len(), 5);
        let ratings: Vec<f64> = providers.iter().filter_map(|p| p["rating"].as_f64()).collect();
        assert!(ratings.windows(2).all(|w| w[0] >= w[1]), "not sorted: {ratings:?}");

        let plumbing = svc.list_services(Some("Plumbing"), Some(10)).await?;
        assert!(!plumbing.is_empty());
        assert!(plumbing.iter().all(|s| s["category"] == "Plumbing"));
        Ok(())
    }

    #[tokio::test]
    async fn listing_truncates_silently_at_limit() -> Result<(), anyhow::Error> {
        let (svc, _) = service_with_store();
        for i in 0..101 {
            let s = Service::new(&format!("Job {i}"), "Cleaning", 10.0, "x", i);
            svc.insert(&s).await?;
        }
        assert_eq!(svc.list_services(None, None).await?.len(), LIST_LIMIT);
        assert_eq!(svc.list_services(Some("Cleaning"), None).await?.len(), LIST_LIMIT);
        Ok(())
    }

    #[tokio::test]
    async fn create_request_returns_receipt() -> Result<(), anyhow::Error> {
        let (svc, store) = service_with_store();
        let receipt = svc.create_request(request()).await?;
        assert_eq!(receipt.status, "received");

        let stored = store.get_documents("servicerequest", &Filter::eq("_id", receipt.id.as_str()), 1).await?;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0]["status"], "pending");
        Ok(())
    }

    #[tokio::test]
    async fn invalid_entities_never_reach_the_store() -> Result<(), anyhow::Error> {
        let (svc, store) = service_with_store();
        let mut bad = request();
        bad.email = "nope".into();
        assert!(matches!(svc.create_request(bad).await, Err(ServiceError::Validation(_))));

        let review = Review { provider_id: "p1".into(), rating: 9, comment: None, customer_name: None };
        assert!(matches!(svc.add_review(review).await, Err(ServiceError::Validation(_))));

        assert!(store.list_collection_names().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn store_status_reports_both_states() -> Result<(), anyhow::Error> {
        let (svc, store) = service_with_store();
        svc.seed().await?;
        let ok = svc.store_status().await;
        assert_eq!(ok.database, "ok");
        assert_eq!(ok.connection_status, Some("connected"));
        assert_eq!(
            ok.collections,
            Some(vec!["category".to_string(), "provider".to_string(), "service".to_string()])
        );

        store.set_online(false);
        let down = svc.store_status().await;
        assert_eq!(down.backend, "ok");
        assert_eq!(down.database, "error");
        assert!(down.error.is_some());
        assert!(matches!(svc.list_categories().await, Err(ServiceError::StoreUnavailable(_))));
        Ok(())
    }
}
