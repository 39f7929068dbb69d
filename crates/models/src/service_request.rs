use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validation::{require, validate_date, validate_email};
use crate::Document;

/// Lifecycle of a request. Only the initial value is ever written; nothing
/// transitions it afterwards.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Scheduled,
    Completed,
    Cancelled,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ServiceRequest {
    pub customer_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub address: String,
    pub category: String,
    #[serde(default)]
    pub provider_id: Option<String>,
    pub description: String,
    #[serde(default)]
    pub preferred_date: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
}

impl Document for ServiceRequest {
    const COLLECTION: &'static str = "servicerequest";

    fn validate(&self) -> Result<(), ModelError> {
        require("customer_name", &self.customer_name)?;
        validate_email(&self.email)?;
        require("address", &self.address)?;
        require("category", &self.category)?;
        require("description", &self.description)?;
        if let Some(date) = &self.preferred_date {
            validate_date("preferred_date", date)?;
        }
        Ok(())
    }
}
