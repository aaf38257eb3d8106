//! Command implementations and argument parsing for the wavecast CLI.

use std::io::{self, Write};

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{Span, field, info, instrument};
use wavecast_core::{
    AnalysisReport, DEFAULT_BATCH_SIZE, DEFAULT_EXACT_METRICS_LIMIT, ExactMetric,
    NeighbourSearch, NotApplicable, WavecastBuilder, WavecastError,
};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "wavecast",
    about = "Simulate broadcast propagation over random geographic networks."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate a network, broadcast across it, and report the outcome.
    Simulate(SimulateCommand),
}

/// Options accepted by the `simulate` command.
#[derive(Debug, Args, Clone)]
pub struct SimulateCommand {
    /// Number of nodes to place in the unit square.
    #[arg(long = "nodes", default_value_t = 10_000)]
    pub nodes: usize,

    /// Upper bound on the neighbours each node chooses.
    #[arg(long = "connections", default_value_t = 20)]
    pub connections: usize,

    /// Connection radius, in unit-square units.
    #[arg(long = "max-distance", default_value_t = 0.3)]
    pub max_distance: f64,

    /// Exponent of the distance decay.
    #[arg(long = "distance-weight", default_value_t = 0.7)]
    pub distance_weight: f64,

    /// Seed for position sampling and edge admission.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Node the broadcast starts from.
    #[arg(long, default_value_t = 0)]
    pub origin: usize,

    /// Nodes scanned per generation batch.
    #[arg(long = "batch-size", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Candidate search strategy.
    #[arg(long, value_enum, default_value_t = SearchArg::Auto)]
    pub search: SearchArg,

    /// Largest node count for exact clustering and path length.
    #[arg(long = "exact-metrics-limit", default_value_t = DEFAULT_EXACT_METRICS_LIMIT)]
    pub exact_metrics_limit: usize,

    /// Include the ids informed in each round in the report.
    #[arg(long = "capture-wavefronts")]
    pub capture_wavefronts: bool,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Candidate search strategies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchArg {
    /// Pick by network size.
    Auto,
    /// Compare every pair.
    Exhaustive,
    /// Bucket nodes on a uniform grid.
    Grid,
}

impl From<SearchArg> for NeighbourSearch {
    fn from(value: SearchArg) -> Self {
        match value {
            SearchArg::Auto => Self::Auto,
            SearchArg::Exhaustive => Self::Exhaustive,
            SearchArg::Grid => Self::Grid,
        }
    }
}

/// Report renderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON report.
    Json,
    /// Short human-readable summary.
    Summary,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core orchestration failed.
    #[error(transparent)]
    Core(#[from] WavecastError),
    /// The report could not be encoded as JSON.
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
    /// Writing the rendered report failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Requested rendering.
    pub format: OutputFormat,
    /// Analysis produced by the run.
    pub report: AnalysisReport,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError::Core`] when the configuration is invalid or the run
/// fails.
///
/// # Examples
/// ```
/// use clap::Parser;
/// use wavecast_cli::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["wavecast", "simulate", "--nodes", "60", "--connections", "4"]);
/// let summary = run_cli(cli).expect("run must succeed");
/// assert_eq!(summary.report.network_size, 60);
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Simulate(simulate) => {
            Span::current().record("command", field::display("simulate"));
            run_simulate(simulate)
        }
    }
}

#[instrument(
    name = "cli.simulate",
    err,
    skip(command),
    fields(nodes = command.nodes, search = field::Empty),
)]
pub(super) fn run_simulate(command: SimulateCommand) -> Result<ExecutionSummary, CliError> {
    Span::current().record("search", field::debug(command.search));
    let wavecast = WavecastBuilder::new()
        .with_total_nodes(command.nodes)
        .with_connections_per_node(command.connections)
        .with_max_distance(command.max_distance)
        .with_distance_weight(command.distance_weight)
        .with_seed(command.seed)
        .with_origin_node(command.origin)
        .with_batch_size(command.batch_size)
        .with_search(command.search.into())
        .with_exact_metrics_limit(command.exact_metrics_limit)
        .with_wavefront_capture(command.capture_wavefronts)
        .build()?;

    let report = wavecast.run()?;
    info!(
        edges = report.network_properties.total_edges,
        rounds = report.propagation_performance.total_steps,
        coverage = report.propagation_performance.coverage_percentage,
        "command completed"
    );
    Ok(ExecutionSummary {
        format: command.format,
        report,
    })
}

/// Renders `summary` to `writer` in the requested format.
///
/// # Errors
/// Returns [`CliError::Encode`] if JSON encoding fails and [`CliError::Io`]
/// if writing fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> Result<(), CliError> {
    match summary.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &summary.report)?;
            writeln!(writer)?;
        }
        OutputFormat::Summary => write_text_summary(&summary.report, writer)?,
    }
    Ok(())
}

fn write_text_summary(report: &AnalysisReport, mut writer: impl Write) -> io::Result<()> {
    let properties = &report.network_properties;
    let performance = &report.propagation_performance;
    writeln!(writer, "nodes: {}", report.network_size)?;
    writeln!(writer, "edges: {}", properties.total_edges)?;
    writeln!(writer, "average degree: {:.2}", properties.average_degree)?;
    writeln!(writer, "density: {:.6}", properties.density)?;
    writeln!(
        writer,
        "components: {} (largest {})",
        properties.number_of_components, properties.largest_component_size
    )?;
    writeln!(
        writer,
        "average clustering: {}",
        format_metric(properties.average_clustering)
    )?;
    writeln!(
        writer,
        "average path length: {}",
        format_metric(properties.average_path_length)
    )?;
    writeln!(writer, "rounds: {}", performance.total_steps)?;
    writeln!(writer, "coverage: {:.2}%", performance.coverage_percentage)?;
    writeln!(
        writer,
        "peak wavefront: {} nodes",
        performance.max_propagating_nodes
    )?;
    writeln!(
        writer,
        "efficiency: {:.2} nodes/round",
        performance.propagation_efficiency
    )?;
    writeln!(writer, "analysis time: {:.3}s", report.analysis_time)?;
    writeln!(writer, "timestamp: {}", report.timestamp.to_rfc3339())
}

pub(super) fn format_metric(metric: ExactMetric) -> String {
    match metric {
        ExactMetric::Measured(value) => format!("{value:.4}"),
        ExactMetric::NotApplicable(NotApplicable::Disconnected) => {
            "n/a (disconnected)".to_owned()
        }
        ExactMetric::NotApplicable(NotApplicable::TooLarge) => "n/a (too large)".to_owned(),
    }
}
