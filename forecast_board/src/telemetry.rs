//! Log subscriber setup for the binaries

use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &BoardConfig) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|err| {
            BoardError::Telemetry(format!("invalid log level '{}': {}", config.log_level, err))
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| BoardError::Telemetry(err.to_string()))
}
