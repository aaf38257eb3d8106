//! Parameter handling for the geographic network generator.

use std::num::NonZeroUsize;

use crate::{Result, error::WavecastError};

/// Default number of nodes scanned per batch.
pub const DEFAULT_BATCH_SIZE: usize = 1_000;

/// Node count at which [`NeighbourSearch::Auto`] switches to the grid.
pub const GRID_SEARCH_THRESHOLD: usize = 4_096;

/// Strategy used to enumerate candidate neighbours within `max_distance`.
///
/// Both concrete strategies visit candidates in ascending id order, so the
/// choice never changes the generated graph; it only changes the cost.
///
/// # Examples
/// ```
/// use wavecast_core::NeighbourSearch;
///
/// assert_eq!(NeighbourSearch::Auto.resolve(100), NeighbourSearch::Exhaustive);
/// assert_eq!(NeighbourSearch::Auto.resolve(1_000_000), NeighbourSearch::Grid);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NeighbourSearch {
    /// Pick [`Self::Exhaustive`] for small networks and [`Self::Grid`] otherwise.
    #[default]
    Auto,
    /// Compare every pair of nodes. Quadratic in the node count.
    Exhaustive,
    /// Restrict comparisons to a uniform bucket grid sized by `max_distance`.
    Grid,
}

impl NeighbourSearch {
    /// Resolves [`Self::Auto`] against the network size.
    #[must_use]
    pub const fn resolve(self, total_nodes: usize) -> Self {
        match self {
            Self::Auto if total_nodes < GRID_SEARCH_THRESHOLD => Self::Exhaustive,
            Self::Auto => Self::Grid,
            other => other,
        }
    }
}

/// Configuration for [`crate::GeoNetworkBuilder`].
///
/// # Examples
/// ```
/// use wavecast_core::NetworkParams;
///
/// let params = NetworkParams::new(20, 0.3, 0.7)
///     .expect("parameters must be valid")
///     .with_seed(42);
/// assert_eq!(params.connections_per_node().get(), 20);
/// assert_eq!(params.seed(), 42);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkParams {
    connections_per_node: NonZeroUsize,
    max_distance: f64,
    distance_weight: f64,
    seed: u64,
    batch_size: NonZeroUsize,
    search: NeighbourSearch,
}

impl NetworkParams {
    /// Creates a parameter set with the default seed, batch size and search.
    ///
    /// `max_distance` may be zero, which yields a graph without edges.
    ///
    /// # Errors
    /// Returns [`WavecastError::InvalidConnectionsPerNode`] when
    /// `connections_per_node` is zero, [`WavecastError::InvalidMaxDistance`]
    /// when `max_distance` is not a finite value in `[0, 1]`, and
    /// [`WavecastError::InvalidDistanceWeight`] when `distance_weight` is
    /// negative or not finite.
    pub fn new(
        connections_per_node: usize,
        max_distance: f64,
        distance_weight: f64,
    ) -> Result<Self> {
        let connections = NonZeroUsize::new(connections_per_node).ok_or(
            WavecastError::InvalidConnectionsPerNode {
                got: connections_per_node,
            },
        )?;
        if !max_distance.is_finite() || !(0.0..=1.0).contains(&max_distance) {
            return Err(WavecastError::InvalidMaxDistance { got: max_distance });
        }
        if !distance_weight.is_finite() || distance_weight < 0.0 {
            return Err(WavecastError::InvalidDistanceWeight {
                got: distance_weight,
            });
        }
        Ok(Self {
            connections_per_node: connections,
            max_distance,
            distance_weight,
            seed: 42,
            batch_size: NonZeroUsize::new(DEFAULT_BATCH_SIZE).unwrap_or(NonZeroUsize::MIN),
            search: NeighbourSearch::Auto,
        })
    }

    /// Seeds the per-node admission streams.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Overrides how many nodes are scanned per batch.
    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: NonZeroUsize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Overrides the candidate search strategy.
    #[must_use]
    pub const fn with_search(mut self, search: NeighbourSearch) -> Self {
        self.search = search;
        self
    }

    /// Per-node cap on admitted candidates.
    #[must_use]
    pub const fn connections_per_node(&self) -> NonZeroUsize {
        self.connections_per_node
    }

    /// Radius beyond which no edge is considered.
    #[must_use]
    pub const fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Exponent controlling how sharply admission decays with distance.
    #[must_use]
    pub const fn distance_weight(&self) -> f64 {
        self.distance_weight
    }

    /// Seed for the per-node admission streams.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of nodes scanned per batch.
    #[must_use]
    pub const fn batch_size(&self) -> NonZeroUsize {
        self.batch_size
    }

    /// Configured candidate search strategy.
    #[must_use]
    pub const fn search(&self) -> NeighbourSearch {
        self.search
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::zero_connections(0, 0.3, 0.7, WavecastError::InvalidConnectionsPerNode { got: 0 })]
    #[case::negative_radius(5, -0.1, 0.7, WavecastError::InvalidMaxDistance { got: -0.1 })]
    #[case::radius_above_one(5, 1.5, 0.7, WavecastError::InvalidMaxDistance { got: 1.5 })]
    #[case::negative_weight(5, 0.3, -1.0, WavecastError::InvalidDistanceWeight { got: -1.0 })]
    #[case::infinite_weight(
        5,
        0.3,
        f64::INFINITY,
        WavecastError::InvalidDistanceWeight { got: f64::INFINITY }
    )]
    fn rejects_invalid_parameters(
        #[case] connections: usize,
        #[case] max_distance: f64,
        #[case] distance_weight: f64,
        #[case] expected: WavecastError,
    ) {
        let err = NetworkParams::new(connections, max_distance, distance_weight)
            .expect_err("parameters must be rejected");
        assert_eq!(err, expected);
    }

    #[test]
    fn rejects_nan_radius() {
        let err = NetworkParams::new(5, f64::NAN, 0.7).expect_err("NaN must be rejected");
        assert!(matches!(err, WavecastError::InvalidMaxDistance { .. }));
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.0)]
    fn accepts_radius_bounds(#[case] max_distance: f64) {
        let params = NetworkParams::new(1, max_distance, 0.0).expect("bounds are inclusive");
        assert_eq!(params.max_distance(), max_distance);
    }

    #[test]
    fn defaults_are_applied() {
        let params = NetworkParams::new(3, 0.2, 1.0).expect("parameters must be valid");
        assert_eq!(params.batch_size().get(), DEFAULT_BATCH_SIZE);
        assert_eq!(params.search(), NeighbourSearch::Auto);
    }

    #[rstest]
    #[case(NeighbourSearch::Auto, GRID_SEARCH_THRESHOLD - 1, NeighbourSearch::Exhaustive)]
    #[case(NeighbourSearch::Auto, GRID_SEARCH_THRESHOLD, NeighbourSearch::Grid)]
    #[case(NeighbourSearch::Grid, 10, NeighbourSearch::Grid)]
    #[case(NeighbourSearch::Exhaustive, 1_000_000, NeighbourSearch::Exhaustive)]
    fn auto_search_resolves_by_size(
        #[case] search: NeighbourSearch,
        #[case] total_nodes: usize,
        #[case] expected: NeighbourSearch,
    ) {
        assert_eq!(search.resolve(total_nodes), expected);
    }
}
