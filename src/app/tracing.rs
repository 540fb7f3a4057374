use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "info";

/// Output format of the log lines, from `RUST_LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Json,
    Plain,
}

impl LogFormat {
    /// JSON unless the variable is set to something other than `json`.
    fn from_env_value(value: Option<&str>) -> Self {
        match value {
            None | Some("json") => LogFormat::Json,
            Some(_) => LogFormat::Plain,
        }
    }
}

/// Filter from a `RUST_LOG` value; `info` when unset, blank or unparsable.
fn build_filter(value: Option<&str>) -> EnvFilter {
    match value {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        _ => EnvFilter::new(DEFAULT_FILTER),
    }
}

/// Initialize the tracing subscriber.
///
/// Logs are written to stderr: `invoke` answers on stdout.
pub fn init_tracing() {
    let format = LogFormat::from_env_value(std::env::var("RUST_LOG_FORMAT").ok().as_deref());
    let filter = build_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Plain => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
