//! API clients for external services
//!
//! - Catalog: CRUD over the Digitalflix `/movies` REST resource

pub mod catalog;

pub use catalog::{CatalogClient, CatalogError};
