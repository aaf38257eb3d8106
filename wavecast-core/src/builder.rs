//! Builder utilities for configuring Wavecast runs.
//!
//! Collects the configuration surface and validates it before constructing
//! [`Wavecast`] instances, so invalid runs are rejected before generation
//! begins.

use std::num::NonZeroUsize;

use crate::{
    Result,
    analysis::DEFAULT_EXACT_METRICS_LIMIT,
    error::WavecastError,
    network::{DEFAULT_BATCH_SIZE, NeighbourSearch, NetworkParams},
    wavecast::Wavecast,
};

/// Configures and constructs [`Wavecast`] instances.
///
/// # Examples
/// ```
/// use wavecast_core::{NeighbourSearch, WavecastBuilder};
///
/// let wavecast = WavecastBuilder::new()
///     .with_total_nodes(200)
///     .with_connections_per_node(8)
///     .with_search(NeighbourSearch::Grid)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(wavecast.total_nodes().get(), 200);
/// assert_eq!(wavecast.network_params().search(), NeighbourSearch::Grid);
/// ```
#[derive(Debug, Clone)]
pub struct WavecastBuilder {
    total_nodes: usize,
    connections_per_node: usize,
    max_distance: f64,
    distance_weight: f64,
    seed: u64,
    origin_node: usize,
    batch_size: usize,
    search: NeighbourSearch,
    exact_metrics_limit: usize,
    capture_wavefronts: bool,
}

impl Default for WavecastBuilder {
    fn default() -> Self {
        Self {
            total_nodes: 10_000,
            connections_per_node: 20,
            max_distance: 0.3,
            distance_weight: 0.7,
            seed: 42,
            origin_node: 0,
            batch_size: DEFAULT_BATCH_SIZE,
            search: NeighbourSearch::Auto,
            exact_metrics_limit: DEFAULT_EXACT_METRICS_LIMIT,
            capture_wavefronts: false,
        }
    }
}

impl WavecastBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use wavecast_core::WavecastBuilder;
    ///
    /// let builder = WavecastBuilder::new();
    /// assert_eq!(builder.total_nodes(), 10_000);
    /// assert_eq!(builder.connections_per_node(), 20);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of nodes to generate.
    #[must_use]
    pub const fn with_total_nodes(mut self, total_nodes: usize) -> Self {
        self.total_nodes = total_nodes;
        self
    }

    /// Returns the configured node count.
    #[must_use]
    pub const fn total_nodes(&self) -> usize {
        self.total_nodes
    }

    /// Overrides the per-node connection target.
    #[must_use]
    pub const fn with_connections_per_node(mut self, connections: usize) -> Self {
        self.connections_per_node = connections;
        self
    }

    /// Returns the configured per-node connection target.
    #[must_use]
    pub const fn connections_per_node(&self) -> usize {
        self.connections_per_node
    }

    /// Overrides the connection radius.
    #[must_use]
    pub const fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Returns the configured connection radius.
    #[must_use]
    pub const fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Overrides the distance decay exponent.
    #[must_use]
    pub const fn with_distance_weight(mut self, distance_weight: f64) -> Self {
        self.distance_weight = distance_weight;
        self
    }

    /// Returns the configured distance decay exponent.
    #[must_use]
    pub const fn distance_weight(&self) -> f64 {
        self.distance_weight
    }

    /// Seeds position sampling and edge admission.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Overrides the broadcast origin.
    #[must_use]
    pub const fn with_origin_node(mut self, origin_node: usize) -> Self {
        self.origin_node = origin_node;
        self
    }

    /// Returns the configured broadcast origin.
    #[must_use]
    pub const fn origin_node(&self) -> usize {
        self.origin_node
    }

    /// Overrides how many nodes are scanned per batch.
    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Overrides the candidate search strategy.
    #[must_use]
    pub const fn with_search(mut self, search: NeighbourSearch) -> Self {
        self.search = search;
        self
    }

    /// Overrides the node count up to which exact metrics are computed.
    #[must_use]
    pub const fn with_exact_metrics_limit(mut self, limit: usize) -> Self {
        self.exact_metrics_limit = limit;
        self
    }

    /// Records the ids informed in each round.
    #[must_use]
    pub const fn with_wavefront_capture(mut self, capture: bool) -> Self {
        self.capture_wavefronts = capture;
        self
    }

    /// Validates the configuration and constructs a [`Wavecast`] instance.
    ///
    /// # Errors
    /// Returns [`WavecastError::InvalidNodeCount`],
    /// [`WavecastError::InvalidConnectionsPerNode`],
    /// [`WavecastError::InvalidMaxDistance`],
    /// [`WavecastError::InvalidDistanceWeight`],
    /// [`WavecastError::InvalidBatchSize`] or
    /// [`WavecastError::OriginOutOfRange`] naming the offending parameter.
    ///
    /// # Examples
    /// ```
    /// use wavecast_core::{WavecastBuilder, WavecastError};
    ///
    /// let err = WavecastBuilder::new()
    ///     .with_total_nodes(10)
    ///     .with_origin_node(10)
    ///     .build()
    ///     .expect_err("origin must be a node");
    /// assert!(matches!(err, WavecastError::OriginOutOfRange { origin: 10, total_nodes: 10 }));
    /// ```
    pub fn build(self) -> Result<Wavecast> {
        let total_nodes = NonZeroUsize::new(self.total_nodes).ok_or(
            WavecastError::InvalidNodeCount {
                got: self.total_nodes,
            },
        )?;
        let batch_size = NonZeroUsize::new(self.batch_size).ok_or(
            WavecastError::InvalidBatchSize {
                got: self.batch_size,
            },
        )?;
        let params = NetworkParams::new(
            self.connections_per_node,
            self.max_distance,
            self.distance_weight,
        )?
        .with_seed(self.seed)
        .with_batch_size(batch_size)
        .with_search(self.search);

        if self.origin_node >= total_nodes.get() {
            return Err(WavecastError::OriginOutOfRange {
                origin: self.origin_node,
                total_nodes: total_nodes.get(),
            });
        }

        Ok(Wavecast::new(
            total_nodes,
            params,
            self.origin_node,
            self.exact_metrics_limit,
            self.capture_wavefronts,
        ))
    }
}
