//! Benchmark setup error type.

use wavecast_core::WavecastError;

/// Errors that may occur while preparing benchmark inputs.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Building or running the pipeline failed.
    #[error("wavecast setup failed: {0}")]
    Wavecast(#[from] WavecastError),
}
