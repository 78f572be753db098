//! Layered error types for the generator.
//!
//! - [`SpecError`] - Top-level error for a full generate run
//! - [`ConnectivityError`] - Probing the CouchDB server failed
//! - [`PersistenceError`] - Writing the output document failed
//! - [`CatalogError`] - The static endpoint/schema catalogs are inconsistent

mod catalog_error;
mod connectivity_error;
mod persistence_error;
mod spec_error;

pub use catalog_error::CatalogError;
pub use connectivity_error::ConnectivityError;
pub use persistence_error::PersistenceError;
pub use spec_error::SpecError;
