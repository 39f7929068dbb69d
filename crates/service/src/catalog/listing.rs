use std::cmp::Ordering;

use serde_json::Value;

use crate::storage::Record;

/// Keep the `top` records with the highest numeric `field`, highest first.
///
/// `None` or `Some(0)` leaves the records untouched. Missing or non-numeric
/// values rank as `0`; ties keep store order.
pub fn top_by(mut records: Vec<Record>, field: &str, top: Option<usize>) -> Vec<Record> {
    let Some(n) = top.filter(|n| *n > 0) else {
        return records;
    };
    let score = |r: &Record| r.get(field).and_then(Value::as_f64).unwrap_or(0.0);
    records.sort_by(|a, b| score(b).partial_cmp(&score(a)).unwrap_or(Ordering::Equal));
    records.truncate(n);
    records
}
