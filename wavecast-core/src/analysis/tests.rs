//! Tests for structural and performance statistics.

use rstest::rstest;
use wavecast_test_support::topology;

use super::*;
use crate::{graph::Graph, propagation::PropagationSimulator};

fn graph(node_count: usize, edges: &[(usize, usize)]) -> Graph {
    Graph::from_edges(node_count, edges).expect("fixture edges are valid")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn cycle_properties() {
    let properties = NetworkMetrics::default().network_properties(&graph(6, &topology::cycle(6)));
    assert_eq!(properties.total_nodes, 6);
    assert_eq!(properties.total_edges, 6);
    assert_close(properties.average_degree, 2.0);
    assert_close(properties.density, 0.4);
    assert!(properties.is_connected);
    assert_eq!(properties.number_of_components, 1);
    assert_eq!(properties.largest_component_size, 6);
    assert_eq!(properties.average_clustering, ExactMetric::Measured(0.0));
    let path_length = properties
        .average_path_length
        .value()
        .expect("connected graph has a path length");
    assert_close(path_length, 1.8);
}

#[test]
fn star_path_length_and_clustering() {
    let properties = NetworkMetrics::default().network_properties(&graph(5, &topology::star(5)));
    assert_eq!(properties.average_clustering, ExactMetric::Measured(0.0));
    assert_close(
        properties.average_path_length.value().expect("connected"),
        1.6,
    );
}

#[rstest]
#[case(3)]
#[case(4)]
#[case(7)]
fn complete_graphs_are_fully_clustered(#[case] node_count: usize) {
    let complete = graph(node_count, &topology::complete(node_count));
    let properties = NetworkMetrics::default().network_properties(&complete);
    assert_close(properties.density, 1.0);
    assert_close(properties.average_clustering.value().expect("connected"), 1.0);
    assert_close(properties.average_path_length.value().expect("connected"), 1.0);
}

#[test]
fn disconnected_graph_reports_sentinels_not_zero() {
    let (node_count, edges) = topology::disjoint_cliques(&[3, 3]);
    let properties = NetworkMetrics::default().network_properties(&graph(node_count, &edges));
    assert!(!properties.is_connected);
    assert_eq!(properties.number_of_components, 2);
    assert_eq!(properties.largest_component_size, 3);
    assert_close(properties.density, 0.2);
    let sentinel = ExactMetric::NotApplicable(NotApplicable::Disconnected);
    assert_eq!(properties.average_clustering, sentinel);
    assert_eq!(properties.average_path_length, sentinel);
}

#[test]
fn oversized_graph_skips_exact_metrics() {
    let properties = NetworkMetrics::new(5).network_properties(&graph(6, &topology::cycle(6)));
    let sentinel = ExactMetric::NotApplicable(NotApplicable::TooLarge);
    assert_eq!(properties.average_clustering, sentinel);
    assert_eq!(properties.average_path_length, sentinel);
    assert!(properties.is_connected);
}

#[test]
fn single_node_graph_is_connected() {
    let properties = NetworkMetrics::default().network_properties(&graph(1, &[]));
    assert!(properties.is_connected);
    assert_close(properties.density, 0.0);
    assert_close(properties.average_degree, 0.0);
    assert_eq!(properties.average_clustering, ExactMetric::Measured(0.0));
    assert_eq!(properties.average_path_length, ExactMetric::Measured(0.0));
}

#[test]
fn isolated_nodes_count_as_components() {
    let properties = NetworkMetrics::default().network_properties(&graph(4, &[]));
    assert_eq!(properties.number_of_components, 4);
    assert_eq!(properties.largest_component_size, 1);
}

#[rstest]
#[case(ExactMetric::Measured(1.5), "1.5")]
#[case(ExactMetric::NotApplicable(NotApplicable::Disconnected), "\"disconnected\"")]
#[case(ExactMetric::NotApplicable(NotApplicable::TooLarge), "\"too_large\"")]
fn exact_metric_serializes_as_value_or_marker(#[case] metric: ExactMetric, #[case] json: &str) {
    let encoded = serde_json::to_string(&metric).expect("metric must serialize");
    assert_eq!(encoded, json);
}

#[test]
fn cycle_performance() {
    let cycle = graph(6, &topology::cycle(6));
    let trace = PropagationSimulator::new(&cycle, 0)
        .expect("origin is in range")
        .run()
        .expect("simulation must terminate");
    let performance = PropagationPerformance::from_trace(&trace);
    assert_eq!(performance.total_steps, 3);
    assert_close(performance.coverage_percentage, 100.0);
    assert_eq!(performance.max_propagating_nodes, 2);
    assert_close(performance.average_propagating_nodes, 5.0 / 3.0);
    assert_close(performance.propagation_efficiency, 2.0);
    assert!(performance.total_time >= 0.0);
    assert_close(
        performance.total_time,
        trace.steps().last().expect("at least one round").total_time,
    );
}

#[test]
fn partial_coverage_is_reported_as_a_percentage() {
    let (node_count, edges) = topology::disjoint_cliques(&[3, 3]);
    let triangles = graph(node_count, &edges);
    let trace = PropagationSimulator::new(&triangles, 4)
        .expect("origin is in range")
        .run()
        .expect("simulation must terminate");
    let performance = PropagationPerformance::from_trace(&trace);
    assert_close(performance.coverage_percentage, 50.0);
    assert!(performance.total_steps <= 2);
}
