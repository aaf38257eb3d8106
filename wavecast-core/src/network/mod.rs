//! Geographically constrained random network generation.
//!
//! Every node scans the nodes within `max_distance`, admits each with a
//! probability that decays with distance, caps the admitted set at
//! `connections_per_node`, and links to the survivors. Nodes are processed in
//! fixed-size batches to bound the working set. Within a batch the scans are
//! independent and run on rayon when the `parallel` feature is enabled; edge
//! insertion always happens sequentially in node order.

mod params;
mod rng;

pub use self::params::{DEFAULT_BATCH_SIZE, GRID_SEARCH_THRESHOLD, NeighbourSearch, NetworkParams};

use std::ops::Range;

use rand::{Rng, distributions::Standard, seq::index};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::{
    Result,
    graph::{GeoNetwork, Graph},
    grid::SpatialGrid,
    positions::Position,
};

use self::rng::node_rng;

/// Probability of admitting a candidate at `distance`.
///
/// Computes `(1 - distance / max_distance) ^ distance_weight`, clamped to
/// `[0, 1]`. Candidates beyond `max_distance`, and every candidate when
/// `max_distance` is zero, get probability zero.
///
/// # Examples
/// ```
/// use wavecast_core::connection_probability;
///
/// assert_eq!(connection_probability(0.0, 0.3, 0.7), 1.0);
/// assert_eq!(connection_probability(0.3, 0.3, 0.7), 0.0);
/// assert_eq!(connection_probability(0.4, 0.3, 0.7), 0.0);
/// assert!(connection_probability(0.1, 0.3, 0.7) > connection_probability(0.2, 0.3, 0.7));
/// ```
#[must_use]
pub fn connection_probability(distance: f64, max_distance: f64, distance_weight: f64) -> f64 {
    if max_distance <= 0.0 || distance > max_distance || distance.is_nan() {
        return 0.0;
    }
    let closeness = (1.0 - distance / max_distance).clamp(0.0, 1.0);
    closeness.powf(distance_weight).clamp(0.0, 1.0)
}

/// Candidate enumeration resolved for one build.
enum CandidateIndex {
    Exhaustive,
    Grid(SpatialGrid),
}

/// Builds [`GeoNetwork`]s from sampled positions.
///
/// # Examples
/// ```
/// use wavecast_core::{GeoNetworkBuilder, NetworkParams, sample_positions};
///
/// let params = NetworkParams::new(4, 0.4, 1.0).expect("parameters must be valid");
/// let positions = sample_positions(50, 7).expect("node count is positive");
/// let network = GeoNetworkBuilder::new(params)
///     .build(positions)
///     .expect("generation must succeed");
/// assert_eq!(network.graph().node_count(), 50);
/// assert!(network.graph().edges().all(|(a, b)| a < b));
/// ```
#[derive(Clone, Debug)]
pub struct GeoNetworkBuilder {
    params: NetworkParams,
}

impl GeoNetworkBuilder {
    /// Creates a builder for the supplied parameters.
    #[must_use]
    pub const fn new(params: NetworkParams) -> Self {
        Self { params }
    }

    /// Parameters used by this builder.
    #[must_use]
    pub const fn params(&self) -> &NetworkParams {
        &self.params
    }

    /// Generates the network over `positions`.
    ///
    /// Per-node candidate searches that find nothing in range simply yield no
    /// edges.
    ///
    /// # Errors
    /// Returns [`crate::WavecastError::Graph`] when `positions` is empty.
    #[instrument(
        name = "network.build",
        err,
        skip(self, positions),
        fields(
            nodes = positions.len(),
            connections_per_node = self.params.connections_per_node().get(),
            max_distance = self.params.max_distance(),
            distance_weight = self.params.distance_weight(),
            batch_size = self.params.batch_size().get(),
        ),
    )]
    pub fn build(&self, positions: Vec<Position>) -> Result<GeoNetwork> {
        let total_nodes = positions.len();
        let mut graph = Graph::with_nodes(total_nodes)?;

        if self.params.max_distance() <= 0.0 {
            info!(edges = 0, "max_distance is zero; network has no edges");
            return Ok(GeoNetwork::new(graph, positions));
        }

        let search = self.params.search().resolve(total_nodes);
        let candidates = match search {
            NeighbourSearch::Grid => {
                let grid = SpatialGrid::new(&positions, self.params.max_distance());
                debug!(cells_per_axis = grid.cells_per_axis(), "built spatial grid");
                CandidateIndex::Grid(grid)
            }
            NeighbourSearch::Exhaustive | NeighbourSearch::Auto => CandidateIndex::Exhaustive,
        };
        debug!(?search, "resolved candidate search");

        let batch_size = self.params.batch_size().get();
        let mut admitted_total = 0_usize;
        for batch_start in (0..total_nodes).step_by(batch_size) {
            let batch = batch_start..(batch_start + batch_size).min(total_nodes);
            let selections = self.scan_batch(batch.clone(), &positions, &candidates);
            let before = graph.edge_count();
            for (node, neighbours) in batch.clone().zip(selections) {
                admitted_total += neighbours.len();
                for neighbour in neighbours {
                    graph.insert_edge(node, neighbour)?;
                }
            }
            record_edges_inserted(graph.edge_count() - before);
            debug!(
                batch_start = batch.start,
                batch_end = batch.end,
                edges = graph.edge_count(),
                "processed batch"
            );
        }
        graph.finalise();
        record_candidates_admitted(admitted_total);

        info!(
            edges = graph.edge_count(),
            admitted = admitted_total,
            "generated geographic network"
        );
        Ok(GeoNetwork::new(graph, positions))
    }

    #[cfg(feature = "parallel")]
    fn scan_batch(
        &self,
        batch: Range<usize>,
        positions: &[Position],
        candidates: &CandidateIndex,
    ) -> Vec<Vec<usize>> {
        batch
            .into_par_iter()
            .map(|node| self.select_neighbours(node, positions, candidates))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn scan_batch(
        &self,
        batch: Range<usize>,
        positions: &[Position],
        candidates: &CandidateIndex,
    ) -> Vec<Vec<usize>> {
        batch
            .map(|node| self.select_neighbours(node, positions, candidates))
            .collect()
    }

    /// Chooses the neighbours `node` links to, in ascending id order.
    fn select_neighbours(
        &self,
        node: usize,
        positions: &[Position],
        candidates: &CandidateIndex,
    ) -> Vec<usize> {
        let in_range = self.candidates_in_range(node, positions, candidates);
        if in_range.is_empty() {
            return Vec::new();
        }

        let max_distance = self.params.max_distance();
        let distance_weight = self.params.distance_weight();
        let mut rng = node_rng(self.params.seed(), node);
        let admitted: Vec<usize> = in_range
            .into_iter()
            .filter(|&(_, distance)| {
                let draw: f64 = rng.sample(Standard);
                draw < connection_probability(distance, max_distance, distance_weight)
            })
            .map(|(candidate, _)| candidate)
            .collect();

        let cap = self.params.connections_per_node().get();
        if admitted.len() <= cap {
            return admitted;
        }
        let mut picks = index::sample(&mut rng, admitted.len(), cap).into_vec();
        picks.sort_unstable();
        picks.into_iter().map(|pick| admitted[pick]).collect()
    }

    /// Nodes other than `node` within `max_distance`, ascending by id.
    fn candidates_in_range(
        &self,
        node: usize,
        positions: &[Position],
        candidates: &CandidateIndex,
    ) -> Vec<(usize, f64)> {
        let origin = positions[node];
        let max_distance = self.params.max_distance();
        let limit = max_distance * max_distance;
        let mut in_range = Vec::new();
        let mut consider = |other: usize| {
            if other == node {
                return;
            }
            let squared = origin.distance_squared(positions[other]);
            if squared <= limit {
                in_range.push((other, squared.sqrt()));
            }
        };

        match candidates {
            CandidateIndex::Exhaustive => (0..positions.len()).for_each(&mut consider),
            CandidateIndex::Grid(grid) => {
                grid.for_each_nearby(origin, &mut consider);
                in_range.sort_unstable_by_key(|&(candidate, _)| candidate);
            }
        }
        in_range
    }
}

#[cfg(feature = "metrics")]
fn record_edges_inserted(count: usize) {
    metrics::counter!("wavecast_edges_inserted").increment(count as u64);
}

#[cfg(not(feature = "metrics"))]
const fn record_edges_inserted(_count: usize) {}

#[cfg(feature = "metrics")]
fn record_candidates_admitted(count: usize) {
    metrics::counter!("wavecast_candidates_admitted").increment(count as u64);
}

#[cfg(not(feature = "metrics"))]
const fn record_candidates_admitted(_count: usize) {}
