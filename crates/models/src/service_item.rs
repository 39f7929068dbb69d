use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validation::require;
use crate::Document;

/// A bookable service offering. `provider_id` is a plain string reference and
/// is never checked against the provider collection.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub title: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub popularity: i64,
}

impl Service {
    pub fn new(title: &str, category: &str, price: f64, description: &str, popularity: i64) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            price,
            description: Some(description.into()),
            provider_id: None,
            popularity,
        }
    }
}

impl Document for Service {
    const COLLECTION: &'static str = "service";

    fn validate(&self) -> Result<(), ModelError> {
        require("title", &self.title)?;
        require("category", &self.category)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ModelError::Validation("price must be >= 0".into()));
        }
        Ok(())
    }
}
