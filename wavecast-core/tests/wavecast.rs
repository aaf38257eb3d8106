//! Tests for the `Wavecast` orchestration API.

use rstest::{fixture, rstest};
use tracing_subscriber::layer::SubscriberExt;
use wavecast_core::{
    ExactMetric, NeighbourSearch, NotApplicable, PropagationError, WavecastBuilder,
    WavecastError, WavecastErrorCode,
};
use wavecast_test_support::tracing::RecordingLayer;

#[fixture]
fn small() -> WavecastBuilder {
    WavecastBuilder::new()
        .with_total_nodes(300)
        .with_connections_per_node(10)
        .with_max_distance(0.2)
        .with_distance_weight(0.7)
        .with_seed(42)
}

#[rstest]
fn builder_defaults() {
    let builder = WavecastBuilder::new();
    assert_eq!(builder.total_nodes(), 10_000);
    assert_eq!(builder.connections_per_node(), 20);
    assert_eq!(builder.max_distance(), 0.3);
    assert_eq!(builder.distance_weight(), 0.7);
    assert_eq!(builder.seed(), 42);
    assert_eq!(builder.origin_node(), 0);

    let wavecast = builder.build().expect("defaults valid");
    assert_eq!(wavecast.network_params().batch_size().get(), 1000);
    assert_eq!(wavecast.network_params().search(), NeighbourSearch::Auto);
}

#[rstest]
#[case::no_nodes(WavecastBuilder::new().with_total_nodes(0), WavecastErrorCode::InvalidNodeCount)]
#[case::no_connections(
    WavecastBuilder::new().with_connections_per_node(0),
    WavecastErrorCode::InvalidConnectionsPerNode
)]
#[case::radius_above_one(
    WavecastBuilder::new().with_max_distance(1.5),
    WavecastErrorCode::InvalidMaxDistance
)]
#[case::negative_radius(
    WavecastBuilder::new().with_max_distance(-0.1),
    WavecastErrorCode::InvalidMaxDistance
)]
#[case::nan_radius(
    WavecastBuilder::new().with_max_distance(f64::NAN),
    WavecastErrorCode::InvalidMaxDistance
)]
#[case::negative_weight(
    WavecastBuilder::new().with_distance_weight(-1.0),
    WavecastErrorCode::InvalidDistanceWeight
)]
#[case::infinite_weight(
    WavecastBuilder::new().with_distance_weight(f64::INFINITY),
    WavecastErrorCode::InvalidDistanceWeight
)]
#[case::no_batch(WavecastBuilder::new().with_batch_size(0), WavecastErrorCode::InvalidBatchSize)]
#[case::origin(
    WavecastBuilder::new().with_total_nodes(5).with_origin_node(5),
    WavecastErrorCode::OriginOutOfRange
)]
fn builder_rejects_invalid_configuration(
    #[case] builder: WavecastBuilder,
    #[case] expected: WavecastErrorCode,
) {
    let err = builder.build().expect_err("configuration must be rejected");
    assert_eq!(err.code(), expected);
}

#[rstest]
fn run_produces_consistent_report(small: WavecastBuilder) {
    let report = small.build().expect("valid").run().expect("run must succeed");
    let properties = &report.network_properties;
    let performance = &report.propagation_performance;

    assert_eq!(report.network_size, 300);
    assert_eq!(properties.total_nodes, 300);
    assert!(properties.total_edges > 0);
    assert_eq!(performance.total_steps, report.propagation_steps.len());
    assert!(report.analysis_time >= 0.0);

    let last = report.propagation_steps.last().expect("at least one round");
    assert_eq!(last.received_count + last.pending_count, 300);
    if properties.is_connected {
        assert_eq!(last.received_count, 300);
        assert_eq!(performance.coverage_percentage, 100.0);
    } else {
        assert!(last.received_count <= properties.largest_component_size);
    }
}

#[rstest]
fn identical_configuration_reproduces_counts(small: WavecastBuilder) {
    let wavecast = small.build().expect("valid");
    let first = wavecast.run().expect("run must succeed");
    let second = wavecast.run().expect("run must succeed");
    let counts = |report: &wavecast_core::AnalysisReport| {
        report
            .propagation_steps
            .iter()
            .map(|step| (step.received_count, step.propagating_count, step.pending_count))
            .collect::<Vec<_>>()
    };
    assert_eq!(first.network_properties, second.network_properties);
    assert_eq!(counts(&first), counts(&second));
}

#[rstest]
fn generation_is_independent_of_search_and_batching(small: WavecastBuilder) {
    let reference = small
        .clone()
        .build()
        .expect("valid")
        .generate()
        .expect("generation must succeed");
    for builder in [
        small.clone().with_search(NeighbourSearch::Grid),
        small.clone().with_search(NeighbourSearch::Exhaustive).with_batch_size(17),
        small.clone().with_batch_size(1),
    ] {
        let network = builder.build().expect("valid").generate().expect("generation");
        assert_eq!(network.graph(), reference.graph());
    }
}

#[rstest]
fn zero_radius_isolates_the_origin() {
    let report = WavecastBuilder::new()
        .with_total_nodes(50)
        .with_max_distance(0.0)
        .build()
        .expect("zero radius is valid")
        .run()
        .expect("run must succeed");
    assert_eq!(report.network_properties.total_edges, 0);
    assert_eq!(report.network_properties.number_of_components, 50);
    assert_eq!(
        report.network_properties.average_path_length,
        ExactMetric::NotApplicable(NotApplicable::Disconnected)
    );
    assert_eq!(report.propagation_steps.len(), 1);
    assert!((report.propagation_performance.coverage_percentage - 2.0).abs() < 1e-9);
}

#[rstest]
fn single_node_network_completes_immediately() {
    let report = WavecastBuilder::new()
        .with_total_nodes(1)
        .build()
        .expect("valid")
        .run()
        .expect("run must succeed");
    assert_eq!(report.propagation_performance.coverage_percentage, 100.0);
    assert!(report.network_properties.is_connected);
}

#[rstest]
fn simulate_rejects_origin_outside_a_foreign_graph(small: WavecastBuilder) {
    let wavecast = small.with_origin_node(200).build().expect("valid");
    let tiny = wavecast_core::Graph::with_nodes(10).expect("non-empty");
    let err = wavecast.simulate(&tiny).expect_err("origin 200 is not in a 10-node graph");
    assert_eq!(
        err,
        WavecastError::Propagation(PropagationError::OriginOutOfRange {
            origin: 200,
            node_count: 10
        })
    );
}

#[rstest]
fn exact_metric_limit_is_honoured(small: WavecastBuilder) {
    let report = small
        .with_exact_metrics_limit(10)
        .build()
        .expect("valid")
        .run()
        .expect("run must succeed");
    let properties = &report.network_properties;
    let expected = if properties.is_connected {
        NotApplicable::TooLarge
    } else {
        NotApplicable::Disconnected
    };
    assert_eq!(properties.average_clustering, ExactMetric::NotApplicable(expected));
    assert_eq!(properties.average_path_length, ExactMetric::NotApplicable(expected));
}

#[rstest]
fn report_serializes_with_stable_field_names(small: WavecastBuilder) {
    let report = small.build().expect("valid").run().expect("run must succeed");
    let json = serde_json::to_value(&report).expect("report must serialize");
    for key in [
        "network_size",
        "analysis_time",
        "network_properties",
        "propagation_performance",
        "propagation_steps",
        "timestamp",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    for key in [
        "total_nodes",
        "total_edges",
        "average_degree",
        "density",
        "is_connected",
        "number_of_components",
        "largest_component_size",
        "average_clustering",
        "average_path_length",
    ] {
        assert!(json["network_properties"].get(key).is_some(), "missing {key}");
    }
    for key in [
        "total_steps",
        "total_time",
        "coverage_percentage",
        "average_step_time",
        "average_propagating_nodes",
        "max_propagating_nodes",
        "propagation_efficiency",
    ] {
        assert!(json["propagation_performance"].get(key).is_some(), "missing {key}");
    }
    let timestamp = json["timestamp"].as_str().expect("timestamp is a string");
    chrono::DateTime::parse_from_rfc3339(timestamp).expect("timestamp is RFC 3339");

    let decoded: wavecast_core::AnalysisReport =
        serde_json::from_value(json).expect("report must round-trip");
    assert_eq!(decoded.propagation_steps.len(), report.propagation_steps.len());
}

#[rstest]
fn run_emits_pipeline_spans(small: WavecastBuilder) {
    let wavecast = small.build().expect("valid");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || wavecast.run()).expect("run must succeed");

    let run_span = layer.span("wavecast.run").expect("wavecast.run span must exist");
    assert_eq!(run_span.fields.get("nodes"), Some(&"300".to_owned()));
    assert_eq!(run_span.fields.get("seed"), Some(&"42".to_owned()));
    let build_span = layer.span("network.build").expect("network.build span must exist");
    assert_eq!(build_span.fields.get("connections_per_node"), Some(&"10".to_owned()));
    assert!(layer.span("propagation.run").is_some());
    assert!(layer.span("analysis.network_properties").is_some());
    assert_eq!(layer.events_with_message("analysis complete").len(), 1);
}

#[rstest]
fn wavefronts_are_reported_only_when_captured(small: WavecastBuilder) {
    let plain = small.clone().build().expect("valid").run().expect("run");
    assert!(plain.wavefronts.is_none());
    let json = serde_json::to_value(&plain).expect("report must serialize");
    assert!(json.get("wavefronts").is_none());

    let captured = small
        .with_wavefront_capture(true)
        .build()
        .expect("valid")
        .run()
        .expect("run");
    let wavefronts = captured.wavefronts.expect("capture was requested");
    assert_eq!(wavefronts.len(), captured.propagation_steps.len());
    for (frame, step) in wavefronts.iter().zip(&captured.propagation_steps) {
        assert_eq!(frame.len(), step.propagating_count);
    }
}
