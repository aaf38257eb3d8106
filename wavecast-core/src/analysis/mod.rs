//! Structural and performance statistics for generated networks and the
//! broadcasts run over them.

mod performance;
mod structure;
mod union_find;

pub use self::{
    performance::PropagationPerformance,
    structure::{
        DEFAULT_EXACT_METRICS_LIMIT, ExactMetric, NetworkMetrics, NetworkProperties,
        NotApplicable,
    },
};

#[cfg(test)]
mod tests;
