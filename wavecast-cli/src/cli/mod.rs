//! Command-line interface for single wavecast runs.
//!
//! The `simulate` command generates one network, broadcasts across it, and
//! renders the analysis report as JSON or as a short text summary.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, OutputFormat, SearchArg, SimulateCommand,
    render_summary, run_cli,
};
