//! Result schema handed to external report writers.
//!
//! Field names are a stable contract: comparison tables and persistence
//! tooling key on them directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    analysis::{NetworkProperties, PropagationPerformance},
    propagation::StepRecord,
};

/// Complete outcome of one generate-simulate-analyse run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Number of nodes in the generated network.
    pub network_size: usize,
    /// Wall time of the whole run, in seconds.
    pub analysis_time: f64,
    /// Structural statistics of the network.
    pub network_properties: NetworkProperties,
    /// Performance statistics of the broadcast.
    pub propagation_performance: PropagationPerformance,
    /// Per-round broadcast records.
    pub propagation_steps: Vec<StepRecord>,
    /// When the run finished (RFC 3339, UTC).
    pub timestamp: DateTime<Utc>,
    /// Ids informed in each round, present only when capture was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wavefronts: Option<Vec<Vec<usize>>>,
}
