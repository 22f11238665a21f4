//! Diagnostic logging.
//!
//! The screen owns stdout and stderr while a session runs, so events go to a
//! file or nowhere. `DANDY_LOG` takes an `EnvFilter` directive.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use dandy_foundation::{Error, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "DANDY_LOG";

/// Installs a global subscriber appending to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a subscriber is
/// already installed.
pub fn init_file_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| Error::config(format!("cannot start logging: {e}")))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging started");
    Ok(())
}
