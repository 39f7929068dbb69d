//! Typed boundary shapes for the marketplace collections.
//!
//! The store itself is schema-less; these structs are only used to validate
//! request bodies and seed data before they are turned into records.

use serde::Serialize;

pub mod category;
pub mod errors;
pub mod provider;
pub mod review;
pub mod service_item;
pub mod service_request;
pub mod validation;

pub use category::Category;
pub use errors::ModelError;
pub use provider::Provider;
pub use review::Review;
pub use service_item::Service;
pub use service_request::{RequestStatus, ServiceRequest};

/// An entity that lives in its own named collection.
///
/// Collection names are the lowercased entity name (`ServiceRequest` ->
/// `servicerequest`).
pub trait Document: Serialize {
    const COLLECTION: &'static str;

    fn validate(&self) -> Result<(), ModelError>;
}
