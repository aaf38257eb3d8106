//! Structural statistics of a graph.

use std::collections::VecDeque;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::graph::Graph;

use super::union_find::DisjointSet;

/// Largest graph for which clustering and path length are computed exactly.
pub const DEFAULT_EXACT_METRICS_LIMIT: usize = 10_000;

/// Why an exact metric was not computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotApplicable {
    /// The graph has more than one component.
    Disconnected,
    /// The graph exceeds the exact-computation limit.
    TooLarge,
}

/// A metric that is only defined for connected, tractable graphs.
///
/// Serializes as a number when measured and as `"disconnected"` or
/// `"too_large"` otherwise, so an undefined value is never mistaken for zero.
///
/// # Examples
/// ```
/// use wavecast_core::{ExactMetric, NotApplicable};
///
/// let measured = ExactMetric::Measured(0.5);
/// assert_eq!(measured.value(), Some(0.5));
/// let skipped = ExactMetric::NotApplicable(NotApplicable::Disconnected);
/// assert_eq!(skipped.value(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExactMetric {
    /// The computed value.
    Measured(f64),
    /// The metric is undefined for this graph.
    NotApplicable(NotApplicable),
}

impl ExactMetric {
    /// The measured value, if any.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Measured(value) => Some(value),
            Self::NotApplicable(_) => None,
        }
    }
}

/// Structural summary of a graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkProperties {
    /// Number of nodes.
    pub total_nodes: usize,
    /// Number of undirected edges.
    pub total_edges: usize,
    /// `2|E| / N`.
    pub average_degree: f64,
    /// `2|E| / (N (N - 1))`; zero for fewer than two nodes.
    pub density: f64,
    /// Whether every node is reachable from every other.
    pub is_connected: bool,
    /// Number of connected components.
    pub number_of_components: usize,
    /// Node count of the largest component.
    pub largest_component_size: usize,
    /// Mean local clustering coefficient.
    pub average_clustering: ExactMetric,
    /// Mean shortest-path length over ordered node pairs.
    pub average_path_length: ExactMetric,
}

/// Computes [`NetworkProperties`] for graphs.
///
/// # Examples
/// ```
/// use wavecast_core::{ExactMetric, Graph, NetworkMetrics};
///
/// let triangle = Graph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).expect("valid edges");
/// let properties = NetworkMetrics::default().network_properties(&triangle);
/// assert_eq!(properties.total_edges, 3);
/// assert_eq!(properties.density, 1.0);
/// assert_eq!(properties.average_clustering, ExactMetric::Measured(1.0));
/// assert_eq!(properties.average_path_length, ExactMetric::Measured(1.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkMetrics {
    exact_metrics_limit: usize,
}

impl Default for NetworkMetrics {
    fn default() -> Self {
        Self::new(DEFAULT_EXACT_METRICS_LIMIT)
    }
}

impl NetworkMetrics {
    /// Creates a calculator that computes exact metrics up to
    /// `exact_metrics_limit` nodes.
    #[must_use]
    pub const fn new(exact_metrics_limit: usize) -> Self {
        Self {
            exact_metrics_limit,
        }
    }

    /// Largest node count for which exact metrics are computed.
    #[must_use]
    pub const fn exact_metrics_limit(&self) -> usize {
        self.exact_metrics_limit
    }

    /// Computes the structural summary of `graph`.
    #[instrument(
        name = "analysis.network_properties",
        skip(self, graph),
        fields(nodes = graph.node_count(), edges = graph.edge_count()),
    )]
    #[expect(
        clippy::cast_precision_loss,
        reason = "node and edge counts stay far below 2^52"
    )]
    pub fn network_properties(&self, graph: &Graph) -> NetworkProperties {
        let total_nodes = graph.node_count();
        let total_edges = graph.edge_count();
        let nodes = total_nodes as f64;
        let edges = total_edges as f64;

        let average_degree = if total_nodes == 0 {
            0.0
        } else {
            2.0 * edges / nodes
        };
        let density = if total_nodes < 2 {
            0.0
        } else {
            2.0 * edges / (nodes * (nodes - 1.0))
        };

        let mut components = DisjointSet::new(total_nodes);
        for (left, right) in graph.edges() {
            components.union(left, right);
        }
        let number_of_components = components.components();
        let largest_component_size = components
            .component_sizes()
            .first()
            .copied()
            .unwrap_or(0);
        let is_connected = number_of_components == 1;

        let (average_clustering, average_path_length) = if !is_connected {
            let reason = ExactMetric::NotApplicable(NotApplicable::Disconnected);
            (reason, reason)
        } else if total_nodes > self.exact_metrics_limit {
            debug!(
                limit = self.exact_metrics_limit,
                "graph exceeds exact metric limit"
            );
            let reason = ExactMetric::NotApplicable(NotApplicable::TooLarge);
            (reason, reason)
        } else {
            (
                ExactMetric::Measured(average_clustering(graph)),
                ExactMetric::Measured(average_path_length(graph)),
            )
        };

        NetworkProperties {
            total_nodes,
            total_edges,
            average_degree,
            density,
            is_connected,
            number_of_components,
            largest_component_size,
            average_clustering,
            average_path_length,
        }
    }
}

/// Mean over all nodes of `2T / (k (k - 1))`, counting zero for `k < 2`.
#[expect(
    clippy::cast_precision_loss,
    reason = "triangle and node counts stay far below 2^52"
)]
fn average_clustering(graph: &Graph) -> f64 {
    let node_count = graph.node_count();
    if node_count == 0 {
        return 0.0;
    }
    let local = |node: usize| -> f64 {
        let neighbours = graph.neighbours(node);
        let degree = neighbours.len();
        if degree < 2 {
            return 0.0;
        }
        let twice_triangles: usize = neighbours
            .iter()
            .map(|&other| sorted_intersection_len(neighbours, graph.neighbours(other)))
            .sum();
        twice_triangles as f64 / (degree * (degree - 1)) as f64
    };

    #[cfg(feature = "parallel")]
    let total: f64 = (0..node_count).into_par_iter().map(local).sum();
    #[cfg(not(feature = "parallel"))]
    let total: f64 = (0..node_count).map(local).sum();

    total / node_count as f64
}

/// Mean BFS distance over ordered pairs of distinct nodes of a connected graph.
#[expect(
    clippy::cast_precision_loss,
    reason = "distance sums stay far below 2^52 for tractable graphs"
)]
fn average_path_length(graph: &Graph) -> f64 {
    let node_count = graph.node_count();
    if node_count < 2 {
        return 0.0;
    }

    #[cfg(feature = "parallel")]
    let total: u64 = (0..node_count)
        .into_par_iter()
        .map(|source| distance_sum_from(graph, source))
        .sum();
    #[cfg(not(feature = "parallel"))]
    let total: u64 = (0..node_count)
        .map(|source| distance_sum_from(graph, source))
        .sum();

    total as f64 / (node_count * (node_count - 1)) as f64
}

fn distance_sum_from(graph: &Graph, source: usize) -> u64 {
    let mut distance = vec![u64::MAX; graph.node_count()];
    distance[source] = 0;
    let mut queue = VecDeque::from([source]);
    let mut sum = 0_u64;
    while let Some(node) = queue.pop_front() {
        let next = distance[node] + 1;
        for &neighbour in graph.neighbours(node) {
            if distance[neighbour] == u64::MAX {
                distance[neighbour] = next;
                sum += next;
                queue.push_back(neighbour);
            }
        }
    }
    sum
}

fn sorted_intersection_len(left: &[usize], right: &[usize]) -> usize {
    let (mut i, mut j, mut shared) = (0, 0, 0);
    while i < left.len() && j < right.len() {
        match left[i].cmp(&right[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                shared += 1;
                i += 1;
                j += 1;
            }
        }
    }
    shared
}
