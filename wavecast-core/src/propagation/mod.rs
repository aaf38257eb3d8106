//! Send-once broadcast simulation.
//!
//! The simulator advances a wavefront round by round. Each round, every
//! propagating node informs its pending neighbours; those neighbours form the
//! next wavefront and the current wavefront retires. A node relays at most
//! once, so a correct run never needs more rounds than there are nodes.

mod state;
mod trace;

pub use self::{
    state::NodeState,
    trace::{PropagationTrace, StepRecord},
};

use std::time::Instant;

use tracing::{debug, error, info, instrument};

use crate::{error::PropagationError, graph::Graph};

/// Simulates a single broadcast from one origin node.
///
/// # Examples
/// ```
/// use wavecast_core::{Graph, PropagationSimulator};
///
/// let cycle = Graph::from_edges(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)])
///     .expect("cycle edges are valid");
/// let trace = PropagationSimulator::new(&cycle, 0)
///     .expect("origin is in range")
///     .run()
///     .expect("simulation must terminate");
/// let received: Vec<usize> = trace.steps().iter().map(|s| s.received_count).collect();
/// assert_eq!(received, vec![3, 5, 6]);
/// ```
#[derive(Clone, Debug)]
pub struct PropagationSimulator<'g> {
    graph: &'g Graph,
    origin: usize,
    capture_wavefronts: bool,
}

impl<'g> PropagationSimulator<'g> {
    /// Prepares a simulation over `graph` starting at `origin`.
    ///
    /// # Errors
    /// Returns [`PropagationError::EmptyGraph`] when the graph has no nodes and
    /// [`PropagationError::OriginOutOfRange`] when `origin` is not a node.
    pub fn new(graph: &'g Graph, origin: usize) -> Result<Self, PropagationError> {
        let node_count = graph.node_count();
        if node_count == 0 {
            return Err(PropagationError::EmptyGraph);
        }
        if origin >= node_count {
            return Err(PropagationError::OriginOutOfRange { origin, node_count });
        }
        Ok(Self {
            graph,
            origin,
            capture_wavefronts: false,
        })
    }

    /// Records the ids informed in each round alongside the step records.
    #[must_use]
    pub const fn with_wavefront_capture(mut self, capture: bool) -> Self {
        self.capture_wavefronts = capture;
        self
    }

    /// Origin node of the broadcast.
    #[must_use]
    pub const fn origin(&self) -> usize {
        self.origin
    }

    /// Runs the broadcast to completion.
    ///
    /// Partial coverage is a legitimate outcome on disconnected graphs.
    ///
    /// # Errors
    /// Returns [`PropagationError::Runaway`] if the round count would exceed
    /// the node count, which indicates a node relayed more than once.
    #[instrument(
        name = "propagation.run",
        err,
        skip(self),
        fields(nodes = self.graph.node_count(), origin = self.origin),
    )]
    pub fn run(&self) -> Result<PropagationTrace, PropagationError> {
        self.run_with_round_limit(self.graph.node_count())
    }

    fn run_with_round_limit(
        &self,
        round_limit: usize,
    ) -> Result<PropagationTrace, PropagationError> {
        let node_count = self.graph.node_count();
        let mut states = vec![NodeState::Pending; node_count];
        states[self.origin] = NodeState::Propagating;

        let mut wavefront = vec![self.origin];
        let mut received = 1_usize;
        let mut steps = Vec::new();
        let mut wavefronts = self.capture_wavefronts.then(Vec::new);
        let started = Instant::now();

        for round in 0.. {
            if round >= round_limit {
                error!(
                    rounds = round,
                    node_count, "propagation exceeded the node count; aborting"
                );
                return Err(PropagationError::Runaway {
                    rounds: round,
                    node_count,
                });
            }

            let round_started = Instant::now();
            let mut informed = Vec::new();
            for &sender in &wavefront {
                for &neighbour in self.graph.neighbours(sender) {
                    if states[neighbour].is_pending() {
                        states[neighbour] = NodeState::Propagating;
                        informed.push(neighbour);
                    }
                }
            }
            for &sender in &wavefront {
                states[sender] = NodeState::Received;
            }
            received += informed.len();

            let step = StepRecord {
                round,
                received_count: received,
                propagating_count: informed.len(),
                pending_count: node_count - received,
                step_time: round_started.elapsed().as_secs_f64(),
                total_time: started.elapsed().as_secs_f64(),
            };
            debug!(
                round,
                received = step.received_count,
                propagating = step.propagating_count,
                pending = step.pending_count,
                "completed round"
            );
            steps.push(step);

            if let Some(captured) = wavefronts.as_mut() {
                let mut frame = informed.clone();
                frame.sort_unstable();
                captured.push(frame);
            }

            if informed.is_empty() || received == node_count {
                for &node in &informed {
                    states[node] = NodeState::Received;
                }
                break;
            }
            wavefront = informed;
        }

        let trace = PropagationTrace::new(self.origin, node_count, steps, states, wavefronts);
        info!(
            rounds = trace.steps().len(),
            received = trace.received_count(),
            coverage = trace.coverage_fraction(),
            "propagation finished"
        );
        Ok(trace)
    }
}
