//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod fixture_source;
mod http_client;
mod response_verifier;

pub use fixture_source::{FixtureError, FixtureSource};
pub use http_client::{HttpClient, HttpClientError};
pub use response_verifier::ResponseVerifier;
