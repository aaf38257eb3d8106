//! Run orchestration for the Wavecast library.
//!
//! Provides the [`Wavecast`] entry point, which samples positions, generates
//! the network, broadcasts from the origin, and assembles the analysis report.

use std::{num::NonZeroUsize, time::Instant};

use chrono::Utc;
use tracing::{info, instrument};

use crate::{
    Result,
    analysis::{NetworkMetrics, PropagationPerformance},
    graph::{GeoNetwork, Graph},
    network::{GeoNetworkBuilder, NetworkParams},
    positions::sample_positions,
    propagation::{PropagationSimulator, PropagationTrace},
    report::AnalysisReport,
};

/// Entry point for a generate-simulate-analyse run.
///
/// # Examples
/// ```
/// use wavecast_core::WavecastBuilder;
///
/// let wavecast = WavecastBuilder::new()
///     .with_total_nodes(120)
///     .with_connections_per_node(6)
///     .with_max_distance(0.3)
///     .build()
///     .expect("builder must succeed");
/// let report = wavecast.run().expect("run must succeed");
/// assert_eq!(report.network_size, 120);
/// assert!(report.propagation_performance.coverage_percentage > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Wavecast {
    total_nodes: NonZeroUsize,
    params: NetworkParams,
    origin_node: usize,
    exact_metrics_limit: usize,
    capture_wavefronts: bool,
}

impl Wavecast {
    pub(crate) const fn new(
        total_nodes: NonZeroUsize,
        params: NetworkParams,
        origin_node: usize,
        exact_metrics_limit: usize,
        capture_wavefronts: bool,
    ) -> Self {
        Self {
            total_nodes,
            params,
            origin_node,
            exact_metrics_limit,
            capture_wavefronts,
        }
    }

    /// Number of nodes generated per run.
    #[must_use]
    pub const fn total_nodes(&self) -> NonZeroUsize {
        self.total_nodes
    }

    /// Network generation parameters.
    #[must_use]
    pub const fn network_params(&self) -> &NetworkParams {
        &self.params
    }

    /// Node the broadcast starts from.
    #[must_use]
    pub const fn origin_node(&self) -> usize {
        self.origin_node
    }

    /// Node count up to which exact metrics are computed.
    #[must_use]
    pub const fn exact_metrics_limit(&self) -> usize {
        self.exact_metrics_limit
    }

    /// Whether runs record the ids informed in each round.
    #[must_use]
    pub const fn captures_wavefronts(&self) -> bool {
        self.capture_wavefronts
    }

    /// Samples positions and generates the network.
    ///
    /// # Errors
    /// Propagates failures from position sampling or network construction.
    pub fn generate(&self) -> Result<GeoNetwork> {
        let positions = sample_positions(self.total_nodes.get(), self.params.seed())?;
        GeoNetworkBuilder::new(self.params.clone()).build(positions)
    }

    /// Broadcasts over `graph` from the configured origin.
    ///
    /// # Errors
    /// Returns [`crate::WavecastError::Propagation`] when the origin is not a
    /// node of `graph` or the simulation runs away.
    pub fn simulate(&self, graph: &Graph) -> Result<PropagationTrace> {
        let trace = PropagationSimulator::new(graph, self.origin_node)?
            .with_wavefront_capture(self.capture_wavefronts)
            .run()?;
        Ok(trace)
    }

    /// Runs the full pipeline and returns the report.
    ///
    /// # Errors
    /// Propagates failures from generation and simulation.
    #[instrument(
        name = "wavecast.run",
        err,
        skip(self),
        fields(
            nodes = self.total_nodes.get(),
            origin = self.origin_node,
            seed = self.params.seed(),
        ),
    )]
    pub fn run(&self) -> Result<AnalysisReport> {
        let started = Instant::now();
        let network = self.generate()?;
        let trace = self.simulate(network.graph())?;
        let network_properties =
            NetworkMetrics::new(self.exact_metrics_limit).network_properties(network.graph());
        let propagation_performance = PropagationPerformance::from_trace(&trace);
        let analysis_time = started.elapsed().as_secs_f64();

        info!(
            edges = network_properties.total_edges,
            rounds = propagation_performance.total_steps,
            coverage = propagation_performance.coverage_percentage,
            analysis_time,
            "analysis complete"
        );

        Ok(AnalysisReport {
            network_size: self.total_nodes.get(),
            analysis_time,
            network_properties,
            propagation_performance,
            propagation_steps: trace.steps().to_vec(),
            timestamp: Utc::now(),
            wavefronts: trace.wavefronts().map(<[Vec<usize>]>::to_vec),
        })
    }
}
