//! Structured logging initialization via `tracing`.

use tracing_subscriber::EnvFilter;

/// Output format for log lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Human,
    Json,
}

impl LogFormat {
    /// Parse `"human"` or `"json"`; anything else falls back to human.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Human
        }
    }
}

/// Initialize tracing with an explicit format and a default level.
///
/// `RUST_LOG` still takes precedence over `default_level` when set.
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing_with(format: LogFormat, default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let result = match format {
        LogFormat::Human => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
    };
    if let Err(e) = result {
        tracing::debug!("tracing already initialised: {e}");
    }
}
