//! Postprobe Domain - Core types
//!
//! This crate defines the model for checking the placeholder blog API:
//! requests, responses, declarative assertions and fixture payloads.
//! All types here are pure Rust with no I/O dependencies.

pub mod case;
pub mod error;
pub mod fixture;
pub mod request;
pub mod response;
pub mod testing;

pub use case::{ApiCase, CaseReport};
pub use error::{DomainError, DomainResult};
pub use fixture::FixturePayload;
pub use testing::{Assertion, AssertionResult, StatusExpectation, TestResults};
