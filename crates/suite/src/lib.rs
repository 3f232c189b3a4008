//! Postprobe Suite - Contract checks for the placeholder blog API
//!
//! [`setup`] provides the shared per-test fixture and [`catalog`] the
//! individual checks. The checks themselves run from `tests/`.

pub mod catalog;
pub mod setup;

pub use catalog::{CatalogEntry, ENTRIES};
pub use setup::{ApiSetup, api_setup};
