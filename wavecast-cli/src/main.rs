//! `wavecast` binary.
//!
//! Generates one network, broadcasts across it and prints the report. A
//! failed run exits with status 1 after logging the stable error codes.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;
use wavecast_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging,
};

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        write_startup_failure(&err);
        return ExitCode::FAILURE;
    }

    match simulate_and_print(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_failure(&err);
            ExitCode::FAILURE
        }
    }
}

fn simulate_and_print(cli: Cli) -> Result<()> {
    let summary = run_cli(cli).context("simulation did not complete")?;
    let mut out = BufWriter::new(io::stdout().lock());
    render_summary(&summary, &mut out).context("report could not be rendered")?;
    out.flush().context("stdout could not be flushed")
}

fn log_failure(err: &anyhow::Error) {
    let Some(CliError::Core(core)) = err.downcast_ref::<CliError>() else {
        error!(error = %err, "wavecast run failed");
        return;
    };
    match core.propagation_code() {
        Some(propagation_code) => error!(
            error = %err,
            code = core.code().as_str(),
            propagation_code = propagation_code.as_str(),
            "wavecast run failed"
        ),
        None => error!(error = %err, code = core.code().as_str(), "wavecast run failed"),
    }
}

#[expect(clippy::print_stderr, reason = "no subscriber exists yet to carry this")]
fn write_startup_failure(err: &logging::LoggingError) {
    eprintln!("wavecast: logging setup failed: {err}");
}
