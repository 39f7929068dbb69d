use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validation::require;
use crate::Document;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Review {
    /// Provider id or name; joined as-is by the provider detail view.
    pub provider_id: String,
    pub rating: i64,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
}

impl Document for Review {
    const COLLECTION: &'static str = "review";

    fn validate(&self) -> Result<(), ModelError> {
        require("provider_id", &self.provider_id)?;
        if !(1..=5).contains(&self.rating) {
            return Err(ModelError::Validation("rating must be between 1 and 5".into()));
        }
        Ok(())
    }
}
