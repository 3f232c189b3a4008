//! Postprobe Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for HTTP, fixtures and response verification)
//! - Use case orchestration
//! - Application-level error handling

pub mod error;
pub mod execute_request;
pub mod ports;
pub mod run_case;

pub use error::{ApplicationError, ApplicationResult};
pub use execute_request::{ExecuteRequest, ExecuteRequestError, ExecuteResult};
pub use ports::{FixtureError, FixtureSource, HttpClient, HttpClientError, ResponseVerifier};
pub use run_case::RunCase;
