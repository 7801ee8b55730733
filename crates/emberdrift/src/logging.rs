//! File logging setup.
//!
//! The terminal belongs to the UI, so logs only go to a file, and only when
//! one is configured.

use std::fs::OpenOptions;
use std::sync::Mutex;

use color_eyre::eyre::eyre;
use emberdrift_config::Config;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter.
const LOG_ENV: &str = "EMBERDRIFT_LOG";

/// Install the global subscriber if `config.log_file` is set.
pub fn init(config: &Config) -> color_eyre::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| eyre!("failed to install logger: {e}"))?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}
