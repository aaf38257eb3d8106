//! Performance statistics of a broadcast trace.

use serde::{Deserialize, Serialize};

use crate::propagation::PropagationTrace;

/// Summary of how a broadcast performed.
///
/// # Examples
/// ```
/// use wavecast_core::{Graph, PropagationPerformance, PropagationSimulator};
///
/// let path = Graph::from_edges(3, &[(0, 1), (1, 2)]).expect("valid edges");
/// let trace = PropagationSimulator::new(&path, 0)
///     .expect("origin is in range")
///     .run()
///     .expect("simulation must terminate");
/// let performance = PropagationPerformance::from_trace(&trace);
/// assert_eq!(performance.total_steps, 2);
/// assert_eq!(performance.coverage_percentage, 100.0);
/// assert_eq!(performance.max_propagating_nodes, 1);
/// assert_eq!(performance.propagation_efficiency, 1.5);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropagationPerformance {
    /// Number of recorded rounds.
    pub total_steps: usize,
    /// Cumulative wall time at the final round, in seconds.
    pub total_time: f64,
    /// Final received count as a percentage of all nodes.
    pub coverage_percentage: f64,
    /// Mean wall time per round, in seconds.
    pub average_step_time: f64,
    /// Mean wavefront size across rounds.
    pub average_propagating_nodes: f64,
    /// Largest wavefront observed.
    pub max_propagating_nodes: usize,
    /// Final received count divided by the number of rounds.
    pub propagation_efficiency: f64,
}

impl PropagationPerformance {
    /// Derives the summary from a completed trace.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "round and node counts stay far below 2^52"
    )]
    pub fn from_trace(trace: &PropagationTrace) -> Self {
        let steps = trace.steps();
        let total_steps = steps.len();
        let received = trace.received_count() as f64;
        let rounds = total_steps as f64;

        let total_time = steps.last().map_or(0.0, |step| step.total_time);
        let (average_step_time, average_propagating_nodes, propagation_efficiency) =
            if total_steps == 0 {
                (0.0, 0.0, 0.0)
            } else {
                let step_time: f64 = steps.iter().map(|step| step.step_time).sum();
                let propagating: usize = steps.iter().map(|step| step.propagating_count).sum();
                (step_time / rounds, propagating as f64 / rounds, received / rounds)
            };

        Self {
            total_steps,
            total_time,
            coverage_percentage: trace.coverage_fraction() * 100.0,
            average_step_time,
            average_propagating_nodes,
            max_propagating_nodes: steps
                .iter()
                .map(|step| step.propagating_count)
                .max()
                .unwrap_or(0),
            propagation_efficiency,
        }
    }
}
