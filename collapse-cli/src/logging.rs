//! Logging initialisation for the collapse CLI.
//!
//! Installs a global `tracing` subscriber writing to `stderr`, so the sweep
//! output on `stdout` stays machine-readable, and bridges the `log` facade.

use std::{env, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

const LOG_FORMAT_ENV: &str = "COLLAPSE_LOG_FORMAT";
const DEFAULT_FILTER: &str = "info";

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Output format of the diagnostic stream.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    /// Human-readable lines.
    Human,
    /// One JSON object per event.
    Json,
}

/// How [`init_logging`] left the global subscriber.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoggingInit {
    /// This call installed the subscriber.
    Installed,
    /// An earlier call already installed it.
    AlreadyInitialised,
    /// Another subscriber owned the global slot; it was left in place.
    ExternalSubscriber,
}

/// Errors raised while initialising structured logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Environment variable contained invalid UTF-8 data.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Underlying parse failure.
        #[source]
        source: env::VarError,
    },
    /// Unsupported log format requested via `COLLAPSE_LOG_FORMAT`.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Raw value supplied by the user.
        provided: String,
    },
    /// Failed to install the global tracing subscriber.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Error raised by `tracing_subscriber`.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Install global structured logging unless it is already configured.
///
/// `COLLAPSE_LOG_FORMAT=json` switches to JSON lines; the filter comes from
/// `RUST_LOG` and defaults to `info`.
///
/// # Errors
/// Returns [`LoggingError`] if the format variable is not Unicode or names
/// an unsupported format. A subscriber installed elsewhere is reported on
/// `stderr` and otherwise tolerated.
pub fn init_logging() -> Result<LoggingInit, LoggingError> {
    if INITIALISED.get().is_some() {
        return Ok(LoggingInit::AlreadyInitialised);
    }

    let outcome = match install_subscriber(log_format_from_env()?) {
        Ok(()) => LoggingInit::Installed,
        Err(LoggingError::InstallFailed { source }) => {
            report_existing_subscriber(&source);
            LoggingInit::ExternalSubscriber
        }
        Err(err) => return Err(err),
    };
    let _ = INITIALISED.set(());
    Ok(outcome)
}

fn log_format_from_env() -> Result<LogFormat, LoggingError> {
    match env::var(LOG_FORMAT_ENV) {
        Ok(raw) => parse_log_format(&raw),
        Err(env::VarError::NotPresent) => Ok(LogFormat::Human),
        Err(err @ env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode {
            name: LOG_FORMAT_ENV,
            source: err,
        }),
    }
}

fn install_subscriber(format: LogFormat) -> Result<(), LoggingError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let fmt_layer = match format {
        LogFormat::Json => fmt_layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
        LogFormat::Human => fmt_layer.boxed(),
    };

    // Best-effort: another logger may already own the `log` slot.
    let _ = LogTracer::init();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|source| LoggingError::InstallFailed { source })
}

fn parse_log_format(raw: &str) -> Result<LogFormat, LoggingError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "human" => Ok(LogFormat::Human),
        "json" => Ok(LogFormat::Json),
        other => Err(LoggingError::UnsupportedFormat {
            provided: other.to_owned(),
        }),
    }
}

#[expect(
    clippy::print_stderr,
    reason = "tracing is not available when another subscriber owns the global slot"
)]
fn report_existing_subscriber(source: &tracing_subscriber::util::TryInitError) {
    eprintln!("structured logging already configured elsewhere: {source}");
}
