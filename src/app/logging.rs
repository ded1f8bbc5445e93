use super::config::{LogFormat, LogLevel};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Transport crates that are far too chatty below `warn`.
const QUIET_TARGETS: [&str; 5] = ["hyper", "hyper_util", "reqwest", "h2", "rustls"];

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {source}")]
    InvalidFilter {
        filter: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("Failed to set global tracing subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Filter directives for `level`, with the transport crates pinned to `warn`.
pub fn build_filter_string(level: LogLevel) -> String {
    let mut parts = Vec::with_capacity(QUIET_TARGETS.len() + 1);
    parts.push(level.as_str().to_string());
    parts.extend(QUIET_TARGETS.iter().map(|target| format!("{target}=warn")));
    parts.join(",")
}

/// Installs the global subscriber. Events go to stderr; stdout is left to command output.
///
/// `RUST_LOG`, when set, replaces the configured filter.
pub fn init_tracing(level: LogLevel, format: LogFormat) -> Result<(), LoggingError> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| build_filter_string(level));
    let env_filter = EnvFilter::try_new(&filter).map_err(|source| LoggingError::InvalidFilter {
        filter: filter.clone(),
        source,
    })?;

    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}
