//! File-based persistence adapters.

mod fixture_file;

pub use fixture_file::FileFixtureSource;
