//! Shared test utilities used across wavecast crates.
//!
//! Fixtures are plain edge lists so that crates under test build their own
//! graph types from them.

pub mod profile;
pub mod topology;
pub mod tracing;
