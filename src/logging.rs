//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Overrides the `--log-level` flag when set.
pub const LOG_ENV_VAR: &str = "SLIPPAGELAB_LOG";

pub fn build_filter(log_level: &str) -> Result<EnvFilter, String> {
    let filter = std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| log_level.to_string());
    EnvFilter::try_new(filter).map_err(|err| format!("invalid log filter: {err}"))
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for results.
pub fn init_tracing(log_level: &str) -> Result<(), String> {
    let env_filter = build_filter(log_level)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| format!("failed to install tracing subscriber: {err}"))
}
