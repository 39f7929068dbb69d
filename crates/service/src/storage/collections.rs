//! In-memory collection set shared by the store backends.
//!
//! Holds records per collection in insertion order and implements payload
//! checks, id/timestamp stamping and filtered reads. Backends add locking,
//! availability and persistence around it.

use std::collections::HashMap;

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use super::{Filter, Record, StoreError, CREATED_AT_FIELD, ID_FIELD, UPDATED_AT_FIELD};

#[derive(Debug, Default)]
pub struct Collections {
    inner: HashMap<String, Vec<Record>>,
}

impl Collections {
    pub fn from_map(inner: HashMap<String, Vec<Record>>) -> Self {
        Self { inner }
    }

    /// Check `payload` and turn it into the record that will be stored:
    /// `_id` first (generated unless a fresh string id was supplied), then the
    /// payload fields in order, then `created_at`/`updated_at`.
    pub fn prepare(&self, collection: &str, payload: Record) -> Result<Record, StoreError> {
        validate_collection_name(collection)?;
        validate_fields(&payload)?;

        let id = match payload.get(ID_FIELD) {
            None | Some(Value::Null) => Uuid::new_v4().to_string(),
            Some(Value::String(id)) if !id.is_empty() => {
                if self.contains_id(collection, id) {
                    return Err(StoreError::WriteRejected(format!("duplicate {ID_FIELD} {id} in {collection}")));
                }
                id.clone()
            }
            Some(other) => {
                return Err(StoreError::WriteRejected(format!("{ID_FIELD} must be a non-empty string, got {other}")));
            }
        };

        let now = Value::String(Utc::now().to_rfc3339());
        let mut record = Record::new();
        record.insert(ID_FIELD.to_string(), Value::String(id));
        for (k, v) in payload {
            if k == ID_FIELD || k == CREATED_AT_FIELD || k == UPDATED_AT_FIELD {
                continue;
            }
            record.insert(k, v);
        }
        record.insert(CREATED_AT_FIELD.to_string(), now.clone());
        record.insert(UPDATED_AT_FIELD.to_string(), now);
        Ok(record)
    }

    pub fn push(&mut self, collection: &str, record: Record) {
        self.inner.entry(collection.to_string()).or_default().push(record);
    }

    /// Undo the latest `push` into `collection`.
    pub fn pop(&mut self, collection: &str) -> Option<Record> {
        let records = self.inner.get_mut(collection)?;
        let popped = records.pop();
        if records.is_empty() {
            self.inner.remove(collection);
        }
        popped
    }

    pub fn records(&self, collection: &str) -> &[Record] {
        self.inner.get(collection).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn find(&self, collection: &str, filter: &Filter, limit: usize) -> Vec<Record> {
        self.records(collection)
            .iter()
            .filter(|r| filter.matches(r))
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .inner
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    fn contains_id(&self, collection: &str, id: &str) -> bool {
        self.records(collection)
            .iter()
            .any(|r| r.get(ID_FIELD).and_then(Value::as_str) == Some(id))
    }
}

/// Collection names double as file stems, so they are kept to a safe alphabet.
pub fn validate_collection_name(name: &str) -> Result<(), StoreError> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !ok {
        return Err(StoreError::WriteRejected(format!("invalid collection name {name:?}")));
    }
    Ok(())
}

fn validate_fields(record: &Record) -> Result<(), StoreError> {
    for (key, value) in record {
        if key.is_empty() {
            return Err(StoreError::WriteRejected("empty field name".into()));
        }
        if key.starts_with('$') {
            return Err(StoreError::WriteRejected(format!("field name {key} must not start with '$'")));
        }
        validate_value(value)?;
    }
    Ok(())
}

fn validate_value(value: &Value) -> Result<(), StoreError> {
    match value {
        Value::Object(nested) => validate_fields(nested),
        Value::Array(items) => items.iter().try_for_each(validate_value),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: Value) -> Record {
        v.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn prepare_stamps_id_and_timestamps_in_order() -> Result<(), StoreError> {
        let c = Collections::default();
        let rec = c.prepare("category", payload(json!({"name": "Plumbing", "icon": "🚰"})))?;
        let keys: Vec<&str> = rec.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["_id", "name", "icon", "created_at", "updated_at"]);
        assert!(Uuid::parse_str(rec["_id"].as_str().unwrap_or_default()).is_ok());
        assert_eq!(rec["created_at"], rec["updated_at"]);
        Ok(())
    }

    #[test]
    fn supplied_string_id_is_kept_once() -> Result<(), StoreError> {
        let mut c = Collections::default();
        let rec = c.prepare("provider", payload(json!({"_id": "p-1", "name": "A"})))?;
        assert_eq!(rec["_id"], "p-1");
        c.push("provider", rec);

        let dup = c.prepare("provider", payload(json!({"_id": "p-1", "name": "B"})));
        assert!(matches!(dup, Err(StoreError::WriteRejected(_))));
        // same id in another collection is fine
        assert!(c.prepare("review", payload(json!({"_id": "p-1"}))).is_ok());
        Ok(())
    }

    #[test]
    fn malformed_payloads_are_rejected() {
        let c = Collections::default();
        for bad in [
            json!({"": 1}),
            json!({"$set": {"a": 1}}),
            json!({"nested": {"$where": "x"}}),
            json!({"list": [{"ok": 1}, {"$bad": 2}]}),
            json!({"_id": 42}),
            json!({"_id": ""}),
        ] {
            let res = c.prepare("service", payload(bad.clone()));
            assert!(matches!(res, Err(StoreError::WriteRejected(_))), "expected rejection for {bad}");
        }
        assert!(c.prepare("", Record::new()).is_err());
        assert!(c.prepare("../escape", Record::new()).is_err());
    }

    #[test]
    fn find_respects_filter_limit_and_order() -> Result<(), StoreError> {
        let mut c = Collections::default();
        for i in 0..5 {
            let cat = if i % 2 == 0 { "Plumbing" } else { "Electrical" };
            let rec = c.prepare("service", payload(json!({"n": i, "category": cat})))?;
            c.push("service", rec);
        }
        let found = c.find("service", &Filter::eq("category", "Plumbing"), 10);
        let ns: Vec<i64> = found.iter().filter_map(|r| r["n"].as_i64()).collect();
        assert_eq!(ns, vec![0, 2, 4]);
        assert_eq!(c.find("service", &Filter::All, 2).len(), 2);
        assert!(c.find("missing", &Filter::All, 10).is_empty());
        Ok(())
    }

    #[test]
    fn pop_drops_empty_collection_from_names() -> Result<(), StoreError> {
        let mut c = Collections::default();
        let rec = c.prepare("review", Record::new())?;
        c.push("review", rec);
        assert_eq!(c.names(), vec!["review".to_string()]);
        assert!(c.pop("review").is_some());
        assert!(c.names().is_empty());
        Ok(())
    }
}
