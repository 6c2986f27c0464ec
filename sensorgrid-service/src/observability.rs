//! Tracing initialization

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Initialize the global tracing subscriber
///
/// Emits JSON-formatted log lines; the filter comes from the configured log
/// level and can be refined per target (e.g. `info,sqlx=warn`).
pub fn init_tracing(config: &Config) {
    let log_level = config.service.log_level.clone();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Tracing initialized for service: {}", config.service.name);
}
