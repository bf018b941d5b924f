//! Command implementations and argument parsing for the collapse CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, SystemTimeError, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand, ValueEnum};
use collapse_core::{
    AnalyticError, CollapseError, FitError, LinearFit, SweepBuilder, asymptotic_edges_to_collapse,
    exact_edges_to_collapse,
};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
///
/// Without a subcommand the binary runs the collapse sweep and requires
/// `--maxNodes`.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "collapse",
    about = "Count the random edges needed to connect a graph, for a sweep of node counts.",
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
pub struct Cli {
    /// Inclusive upper bound of the node-count sweep.
    #[arg(
        long = "maxNodes",
        short = 'a',
        visible_alias = "max-nodes",
        value_name = "N",
        required = true,
        value_parser = clap::value_parser!(usize),
    )]
    pub max_nodes: Option<usize>,

    /// Command to execute instead of the sweep.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Auxiliary commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print closed-form estimates of the edges needed to connect `G(n, p)`.
    Estimate(EstimateArgs),
    /// Fit a line through `<nodes> <edges>` lines printed by a sweep.
    Fit(FitArgs),
}

/// Options accepted by the `estimate` command.
#[derive(Debug, Args, Clone)]
pub struct EstimateArgs {
    /// Largest node count to estimate, starting from 1.
    ///
    /// Inclusive: `--max-nodes 5` prints rows for `n = 1..=5`. The upstream
    /// analysis script stopped one short of its bound.
    #[arg(long = "max-nodes", visible_alias = "nMax", value_name = "N")]
    pub max_nodes: usize,

    /// Probability with which the graph must be connected.
    #[arg(long)]
    pub threshold: f64,

    /// Estimation method.
    #[arg(long, value_enum, default_value_t = EstimateMethod::Asymptotic)]
    pub method: EstimateMethod,
}

/// Supported estimation methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EstimateMethod {
    /// Exact connectivity probability via Gilbert's recurrence.
    Exact,
    /// Large-`n` isolated-node approximation.
    Asymptotic,
}

impl EstimateMethod {
    const fn label(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Asymptotic => "asymptotic",
        }
    }
}

/// Options accepted by the `fit` command.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Sweep output to read; standard input when omitted.
    pub path: Option<PathBuf>,

    /// Amount added to the fitted intercept.
    #[arg(long = "intercept-offset", default_value_t = 0.0, allow_negative_numbers = true)]
    pub intercept_offset: f64,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The sweep was requested without its upper bound.
    ///
    /// Parsed command lines never reach this; clap reports the missing flag
    /// as a usage error first.
    #[error("missing required `--maxNodes <N>` (or `-a <N>`) argument")]
    MissingMaxNodes,
    /// The system clock reported a time before the Unix epoch.
    #[error("cannot seed the random number generator from the system clock: {source}")]
    Clock {
        /// Underlying clock error.
        #[source]
        source: SystemTimeError,
    },
    /// Opening an input file failed.
    #[error("failed to open `{path}`: {source}")]
    Open {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Reading input or writing output failed.
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),
    /// A two-field input line did not hold two numbers.
    #[error("line {line}: expected `<nodes> <edges>` numbers, found `{content}`")]
    MalformedPoint {
        /// One-based line number.
        line: usize,
        /// Offending line.
        content: String,
    },
    /// A collapse trial or sweep failed.
    #[error(transparent)]
    Collapse(#[from] CollapseError),
    /// Analytic estimation rejected its input.
    #[error(transparent)]
    Analytic(#[from] AnalyticError),
    /// Fitting a line failed.
    #[error(transparent)]
    Fit(#[from] FitError),
}

impl CliError {
    /// Stable machine-readable code of the underlying core error, if any.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Collapse(err) => Some(err.code().as_str()),
            Self::Analytic(err) => Some(err.code().as_str()),
            Self::Fit(err) => Some(err.code().as_str()),
            _ => None,
        }
    }

    /// Code of the oracle error behind a failed trial, if any.
    #[must_use]
    pub const fn oracle_code(&self) -> Option<&'static str> {
        match self {
            Self::Collapse(err) => match err.oracle_code() {
                Some(code) => Some(code.as_str()),
                None => None,
            },
            _ => None,
        }
    }
}

/// Summarises what a command produced, for the completion log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExecutionSummary {
    /// The sweep printed one line per sampled node count.
    Sweep {
        /// Inclusive upper bound of the sweep.
        max_nodes: usize,
        /// Lines printed.
        points: usize,
    },
    /// Estimates printed for `1..=max_nodes`.
    Estimate {
        /// Method used.
        method: EstimateMethod,
        /// Lines printed.
        rows: usize,
    },
    /// Line fitted through sweep output.
    Fit(LinearFit),
}

/// Executes `cli`, writing results to `writer`, with a generator seeded once
/// from the wall clock.
///
/// # Errors
/// Returns [`CliError`] when validation, execution or output fails.
///
/// # Examples
/// ```
/// use collapse_cli::cli::{Cli, ExecutionSummary, run_cli};
///
/// let cli = Cli { max_nodes: Some(20), command: None };
/// let mut output = Vec::new();
/// let summary = run_cli(cli, &mut output)?;
/// assert_eq!(summary, ExecutionSummary::Sweep { max_nodes: 20, points: 3 });
/// assert!(String::from_utf8(output)?.starts_with("0 0\n10 "));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn run_cli(cli: Cli, writer: impl Write) -> Result<ExecutionSummary, CliError> {
    let mut rng = SmallRng::seed_from_u64(clock_seed()?);
    run_cli_with_rng(cli, &mut rng, writer)
}

/// Executes `cli` with an explicit random source.
///
/// # Errors
/// Returns [`CliError`] when validation, execution or output fails.
#[instrument(
    name = "cli.run",
    err,
    skip(cli, rng, writer),
    fields(command = field::Empty),
)]
pub fn run_cli_with_rng<R>(
    cli: Cli,
    rng: &mut R,
    writer: impl Write,
) -> Result<ExecutionSummary, CliError>
where
    R: Rng + ?Sized,
{
    let span = Span::current();
    match cli.command {
        Some(Command::Estimate(args)) => {
            span.record("command", field::display("estimate"));
            run_estimate(&args, writer)
        }
        Some(Command::Fit(args)) => {
            span.record("command", field::display("fit"));
            run_fit(&args, writer)
        }
        None => {
            span.record("command", field::display("sweep"));
            let max_nodes = cli.max_nodes.ok_or(CliError::MissingMaxNodes)?;
            run_sweep(max_nodes, rng, writer)
        }
    }
}

fn clock_seed() -> Result<u64, CliError> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|source| CliError::Clock { source })?;
    // Fold the high bits in so seeds differ beyond 2^64 nanoseconds.
    let nanos = elapsed.as_nanos();
    Ok((nanos as u64) ^ ((nanos >> 64) as u64))
}

#[instrument(name = "cli.sweep", err, skip(rng, writer))]
pub(super) fn run_sweep<R>(
    max_nodes: usize,
    rng: &mut R,
    mut writer: impl Write,
) -> Result<ExecutionSummary, CliError>
where
    R: Rng + ?Sized,
{
    let plan = SweepBuilder::new(max_nodes).build()?;
    let mut points = 0;
    for point in plan.run(rng) {
        let point = point?;
        writeln!(writer, "{} {}", point.nodes, point.edges)?;
        writer.flush()?;
        points += 1;
    }
    info!(max_nodes, points, "sweep completed");
    Ok(ExecutionSummary::Sweep { max_nodes, points })
}

#[instrument(
    name = "cli.estimate",
    err,
    skip(args, writer),
    fields(max_nodes = args.max_nodes, threshold = args.threshold, method = args.method.label()),
)]
pub(super) fn run_estimate(
    args: &EstimateArgs,
    mut writer: impl Write,
) -> Result<ExecutionSummary, CliError> {
    for nodes in 1..=args.max_nodes {
        match args.method {
            EstimateMethod::Exact => {
                let edges = exact_edges_to_collapse(nodes, args.threshold)?;
                writeln!(writer, "{nodes} {edges}")?;
            }
            EstimateMethod::Asymptotic => {
                let edges = asymptotic_edges_to_collapse(nodes, args.threshold)?;
                writeln!(writer, "{nodes} {edges:.3}")?;
            }
        }
    }
    info!(rows = args.max_nodes, "estimates completed");
    Ok(ExecutionSummary::Estimate {
        method: args.method,
        rows: args.max_nodes,
    })
}

#[instrument(name = "cli.fit", err, skip(args, writer), fields(path = field::Empty))]
pub(super) fn run_fit(args: &FitArgs, mut writer: impl Write) -> Result<ExecutionSummary, CliError> {
    let points = match &args.path {
        Some(path) => {
            Span::current().record("path", field::display(path.display()));
            parse_sweep_points(open_input(path)?)?
        }
        None => parse_sweep_points(io::stdin().lock())?,
    };
    let fit = LinearFit::least_squares(&points)?.with_intercept_offset(args.intercept_offset);
    writeln!(writer, "a = {:.6}, b = {:.6}", fit.slope(), fit.intercept())?;
    info!(points = points.len(), slope = fit.slope(), intercept = fit.intercept(), "fit completed");
    Ok(ExecutionSummary::Fit(fit))
}

pub(super) fn open_input(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Parses `<nodes> <edges>` lines, skipping lines that do not have exactly
/// two fields.
pub(super) fn parse_sweep_points(reader: impl BufRead) -> Result<Vec<(f64, f64)>, CliError> {
    let mut points = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [nodes, edges] = fields.as_slice() else {
            continue;
        };
        let malformed = || CliError::MalformedPoint {
            line: index + 1,
            content: line.clone(),
        };
        let nodes = nodes.parse::<f64>().map_err(|_| malformed())?;
        let edges = edges.parse::<f64>().map_err(|_| malformed())?;
        points.push((nodes, edges));
    }
    Ok(points)
}
