//! Response verification.

mod runner;

pub use runner::TestRunner;
