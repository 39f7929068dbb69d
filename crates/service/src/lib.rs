//! Service layer for the home services marketplace.
//! - `storage`: schema-less document store adapter and its backends.
//! - `catalog`: listing, creation and provider detail operations on top of it.

pub mod catalog;
pub mod errors;
pub mod storage;
