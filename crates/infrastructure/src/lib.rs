//! Postprobe Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus run configuration.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;
pub mod testing;

pub use adapters::ReqwestHttpClient;
pub use config::{ConfigError, SuiteConfig};
pub use persistence::FileFixtureSource;
pub use telemetry::init_test_tracing;
pub use testing::TestRunner;
