//! Equality/logical filters over records.

use serde_json::Value;

use super::Record;

/// Query predicate for [`super::DocumentStore::get_documents`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Filter {
    /// Matches every record (`{}`).
    #[default]
    All,
    /// Field equals value. `null` also matches a missing field.
    Eq(String, Value),
    And(Vec<Filter>),
    /// Any clause matches; an empty `Or` matches nothing.
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq(field.into(), value.into())
    }

    pub fn or(clauses: impl IntoIterator<Item = Filter>) -> Self {
        Self::Or(clauses.into_iter().collect())
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::Eq(field, expected) => match record.get(field) {
                Some(actual) => values_equal(actual, expected),
                None => expected.is_null(),
            },
            Self::And(clauses) => clauses.iter().all(|c| c.matches(record)),
            Self::Or(clauses) => clauses.iter().any(|c| c.matches(record)),
        }
    }
}

/// Exact equality, except that numbers compare by value (`4 == 4.0`).
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                return x == y;
            }
            if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                return x == y;
            }
            match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs.iter().all(|(k, x)| ys.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}
