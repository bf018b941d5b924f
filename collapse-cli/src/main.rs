//! Entry point for the `collapse` binary.
//!
//! Initialises logging, parses arguments with clap, runs the requested
//! command against a buffered `stdout` and maps failures to a non-zero exit
//! code. Usage errors are reported by clap itself.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, field, info};

use collapse_cli::{
    cli::{Cli, CliError, run_cli},
    logging::{self, LoggingError},
};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    let summary = run_cli(cli, &mut writer).context("failed to execute command")?;
    writer.flush().context("failed to flush output")?;
    info!(?summary, "command completed");
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let (code, oracle_code) = err
            .downcast_ref::<CliError>()
            .map_or((None, None), |cli_error| {
                (cli_error.code(), cli_error.oracle_code())
            });

        let message = format!("{err:#}");
        error!(
            error = %message,
            code = code.map(field::display),
            oracle_code = oracle_code.map(field::display),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialised"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
