//! Step records and the full trace produced by a broadcast.

use serde::{Deserialize, Serialize};

use super::state::NodeState;

/// Snapshot recorded once per round, after informing and before advancing.
///
/// `propagating_count` is the number of nodes newly informed this round,
/// which is also the size of the next round's wavefront. The timing fields
/// are wall-clock instrumentation in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Zero-based round index.
    pub round: usize,
    /// Nodes holding the message after this round.
    pub received_count: usize,
    /// Nodes informed this round.
    pub propagating_count: usize,
    /// Nodes still waiting for the message.
    pub pending_count: usize,
    /// Wall time spent on this round.
    pub step_time: f64,
    /// Wall time since the simulation started.
    pub total_time: f64,
}

/// Everything a broadcast produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropagationTrace {
    origin: usize,
    node_count: usize,
    steps: Vec<StepRecord>,
    states: Vec<NodeState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wavefronts: Option<Vec<Vec<usize>>>,
}

impl PropagationTrace {
    pub(crate) const fn new(
        origin: usize,
        node_count: usize,
        steps: Vec<StepRecord>,
        states: Vec<NodeState>,
        wavefronts: Option<Vec<Vec<usize>>>,
    ) -> Self {
        Self {
            origin,
            node_count,
            steps,
            states,
            wavefronts,
        }
    }

    /// Origin node of the broadcast.
    #[must_use]
    pub const fn origin(&self) -> usize {
        self.origin
    }

    /// Number of nodes in the simulated graph.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// Per-round records in round order.
    #[must_use]
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Final state of every node, indexed by node id.
    #[must_use]
    pub fn states(&self) -> &[NodeState] {
        &self.states
    }

    /// Ids informed in each round, sorted ascending, when capture was enabled.
    #[must_use]
    pub fn wavefronts(&self) -> Option<&[Vec<usize>]> {
        self.wavefronts.as_deref()
    }

    /// Nodes holding the message when the broadcast ended.
    #[must_use]
    pub fn received_count(&self) -> usize {
        self.steps.last().map_or(1, |step| step.received_count)
    }

    /// Fraction of nodes reached, in `[0, 1]`.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "node counts stay far below 2^52"
    )]
    pub fn coverage_fraction(&self) -> f64 {
        self.received_count() as f64 / self.node_count.max(1) as f64
    }

    /// Ids of nodes the message never reached, ascending.
    pub fn unreached(&self) -> impl Iterator<Item = usize> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, state)| state.is_pending())
            .map(|(node, _)| node)
    }
}
