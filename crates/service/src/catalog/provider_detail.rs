//! Provider detail view: the provider record joined with its reviews and
//! services.

use models::{Document, Provider, Review, Service};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::errors::ServiceError;
use crate::storage::{DocumentStore, Filter, Record, ID_FIELD};

pub const REVIEW_LIMIT: usize = 50;
pub const SERVICE_LIMIT: usize = 100;

/// Look a provider up by id or name and attach `reviews` and `services`.
///
/// The lookup first asks for `_id == key OR name == key`, then retries with
/// `name == key` alone. The retry is redundant for a store with plain string
/// ids but covers stores whose id field does not compare equal to the raw
/// lookup key. Both lists are always present (possibly empty) and silently
/// capped at [`REVIEW_LIMIT`] and [`SERVICE_LIMIT`].
#[instrument(skip(store))]
pub async fn provider_detail(store: &dyn DocumentStore, key: &str) -> Result<Record, ServiceError> {
    let by_id_or_name = Filter::or([Filter::eq(ID_FIELD, key), Filter::eq("name", key)]);
    let mut found = store.get_documents(Provider::COLLECTION, &by_id_or_name, 1).await?;
    if found.is_empty() {
        debug!("id-or-name lookup empty; retrying by name");
        found = store.get_documents(Provider::COLLECTION, &Filter::eq("name", key), 1).await?;
    }
    let mut provider = found
        .into_iter()
        .next()
        .ok_or_else(|| ServiceError::not_found("Provider"))?;

    let (reviews, services) = match correlation_filter(&provider) {
        Some(join) => (
            store.get_documents(Review::COLLECTION, &join, REVIEW_LIMIT).await?,
            store.get_documents(Service::COLLECTION, &join, SERVICE_LIMIT).await?,
        ),
        None => (Vec::new(), Vec::new()),
    };
    debug!(reviews = reviews.len(), services = services.len(), "provider detail assembled");

    provider.insert("reviews".into(), into_array(reviews));
    provider.insert("services".into(), into_array(services));
    Ok(provider)
}

/// The provider's `_id` if present, else its `name`.
pub fn correlating_key(provider: &Record) -> Option<String> {
    present(provider, ID_FIELD)
        .or_else(|| present(provider, "name"))
        .map(key_text)
}

/// `provider_id == key`, widened to also accept the provider's name when the
/// key is the id, so references written by name still join.
fn correlation_filter(provider: &Record) -> Option<Filter> {
    let key = correlating_key(provider)?;
    match present(provider, "name").map(key_text) {
        Some(name) if name != key => Some(Filter::or([
            Filter::eq("provider_id", key),
            Filter::eq("provider_id", name),
        ])),
        _ => Some(Filter::eq("provider_id", key)),
    }
}

fn present<'a>(record: &'a Record, field: &str) -> Option<&'a Value> {
    record.get(field).filter(|v| !v.is_null())
}

fn key_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn into_array(records: Vec<Record>) -> Value {
    Value::Array(records.into_iter().map(Value::Object).collect())
}
