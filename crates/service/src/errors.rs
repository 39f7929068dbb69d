use thiserror::Error;

use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("write rejected: {0}")]
    WriteRejected(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(msg) => Self::StoreUnavailable(msg),
            StoreError::WriteRejected(msg) => Self::WriteRejected(msg),
        }
    }
}

impl From<models::ModelError> for ServiceError {
    fn from(e: models::ModelError) -> Self {
        match e {
            models::ModelError::Validation(msg) => Self::Validation(msg),
        }
    }
}
