//! Wavecast core library.
//!
//! Generates random geometric networks over the unit square, simulates a
//! send-once broadcast across them, and summarises both the structure and the
//! broadcast.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod analysis;
mod builder;
mod error;
mod graph;
mod grid;
mod network;
mod positions;
mod propagation;
mod report;
mod wavecast;

pub use crate::{
    analysis::{
        DEFAULT_EXACT_METRICS_LIMIT, ExactMetric, NetworkMetrics, NetworkProperties,
        NotApplicable, PropagationPerformance,
    },
    builder::WavecastBuilder,
    error::{
        GraphError, GraphErrorCode, PropagationError, PropagationErrorCode, Result,
        WavecastError, WavecastErrorCode,
    },
    graph::{GeoNetwork, Graph},
    network::{
        DEFAULT_BATCH_SIZE, GRID_SEARCH_THRESHOLD, GeoNetworkBuilder, NeighbourSearch,
        NetworkParams, connection_probability,
    },
    positions::{Position, sample_positions},
    propagation::{NodeState, PropagationSimulator, PropagationTrace, StepRecord},
    report::AnalysisReport,
    wavecast::Wavecast,
};
