use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validation::require;
use crate::Document;

/// A service category, e.g. `Plumbing`. `name` is the identifier by convention.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Category {
    pub fn new(name: &str, description: &str, icon: &str) -> Self {
        Self { name: name.into(), icon: Some(icon.into()), description: Some(description.into()) }
    }
}

impl Document for Category {
    const COLLECTION: &'static str = "category";

    fn validate(&self) -> Result<(), ModelError> {
        require("name", &self.name)
    }
}
