//! Benchmark support crate for wavecast.
//!
//! Provides parameter labels and a setup error type shared by the Criterion
//! benchmarks for network generation, propagation, and structural analysis.

pub mod error;
pub mod params;
