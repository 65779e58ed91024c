//! Global `tracing` subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::{LogFormat, LogLevel, ObservabilityError};

/// Environment variable holding an env-filter directive that overrides the level.
pub const LOG_ENV: &str = "MUNO_LOG";

/// Filter from `MUNO_LOG` when set, otherwise `level` for every target.
pub fn build_filter(level: LogLevel) -> Result<EnvFilter, ObservabilityError> {
    match std::env::var(LOG_ENV) {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::try_new(directive.trim())
            .map_err(|e| ObservabilityError::InvalidFilter(e.to_string())),
        _ => Ok(EnvFilter::new(level.as_str())),
    }
}

/// Install a stderr fmt subscriber. Fails if one is already installed.
pub fn init_tracing(level: LogLevel, format: LogFormat) -> Result<(), ObservabilityError> {
    let filter = build_filter(level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Human => builder.compact().try_init(),
    };
    result.map_err(|e| ObservabilityError::SubscriberInit(e.to_string()))
}
