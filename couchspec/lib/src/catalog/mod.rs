//! Static catalogs of CouchDB schemas and endpoints.
//!
//! Both catalogs are plain data with no runtime input; the server probe
//! only contributes the version string.

pub mod paths;
pub mod schemas;

pub use paths::{endpoints, paths};
pub use schemas::schemas;
