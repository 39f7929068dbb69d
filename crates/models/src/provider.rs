use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::service_item::Service;
use crate::validation::{require, validate_range};
use crate::Document;

fn default_rating() -> f64 { 4.8 }

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Provider {
    pub name: String,
    /// Category name; not checked against the category collection.
    pub category: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default = "default_rating")]
    pub rating: f64,
    #[serde(default)]
    pub jobs_completed: i64,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<Service>>,
}

impl Provider {
    pub fn new(name: &str, category: &str, city: &str, bio: &str, rating: f64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            city: Some(city.into()),
            rating,
            jobs_completed: 0,
            phone: None,
            bio: Some(bio.into()),
            services: None,
        }
    }
}

impl Document for Provider {
    const COLLECTION: &'static str = "provider";

    fn validate(&self) -> Result<(), ModelError> {
        require("name", &self.name)?;
        require("category", &self.category)?;
        validate_range("rating", self.rating, 0.0, 5.0)?;
        if self.jobs_completed < 0 {
            return Err(ModelError::Validation("jobs_completed must be >= 0".into()));
        }
        if let Some(services) = &self.services {
            for s in services {
                s.validate()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_fields_missing() {
        let p: Provider = serde_json::from_str(r#"{"name":"Spark Electric Co.","category":"Electrical"}"#)
            .expect("deserialize");
        assert_eq!(p.rating, 4.8);
        assert_eq!(p.jobs_completed, 0);
        assert!(p.services.is_none());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn rating_and_jobs_are_bounded() {
        let mut p = Provider::new("BlueWave Plumbing", "Plumbing", "Portland", "24/7", 5.5);
        assert!(matches!(p.validate(), Err(ModelError::Validation(_))));
        p.rating = 4.7;
        p.jobs_completed = -1;
        assert!(p.validate().is_err());
        p.jobs_completed = 12;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn embedded_services_are_validated() {
        let mut p = Provider::new("ProClean Team", "Cleaning", "San Francisco", "Eco-friendly", 4.6);
        p.services = Some(vec![Service {
            title: " ".into(),
            category: "Cleaning".into(),
            price: 10.0,
            description: None,
            provider_id: None,
            popularity: 0,
        }]);
        assert!(p.validate().is_err());
    }
}
