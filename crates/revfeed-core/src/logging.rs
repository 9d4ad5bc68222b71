//! File logging for the headless runner
//!
//! stdout carries NDJSON events, so log output goes to a daily-rotated file.
//! `REVFEED_LOG` sets the filter and `REVFEED_LOG_DIR` moves the directory.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

pub const LOG_FILTER_ENV: &str = "REVFEED_LOG";
pub const LOG_DIR_ENV: &str = "REVFEED_LOG_DIR";

const LOG_FILE_PREFIX: &str = "revfeed.log";
const DEFAULT_FILTER: &str = "revfeed=info,revfeed_app=info,revfeed_fetch=info,warn";

/// Install the global subscriber writing to [`log_directory`].
///
/// Keep the returned guard alive for the whole run; dropping it flushes and
/// stops the background writer.
///
/// ```bash
/// REVFEED_LOG=revfeed_app=trace revfeed --fixture reviews.json
/// ```
pub fn init() -> Result<WorkerGuard> {
    init_in(&log_directory())
}

/// Install the global subscriber writing under `dir`
pub fn init_in(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX));
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_timer(ChronoLocal::new("%H:%M:%S%.3f".to_string())),
        )
        .try_init()
        .map_err(|e| Error::config(format!("Logging already initialised: {}", e)))?;

    tracing::info!(
        dir = %dir.display(),
        version = env!("CARGO_PKG_VERSION"),
        "File logging enabled"
    );
    Ok(guard)
}

/// `REVFEED_LOG_DIR`, else `<data-local>/revfeed/logs`
pub fn log_directory() -> PathBuf {
    match std::env::var_os(LOG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("revfeed")
            .join("logs"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_honours_override() {
        std::env::set_var(LOG_DIR_ENV, "/tmp/revfeed-logs");
        assert_eq!(log_directory(), PathBuf::from("/tmp/revfeed-logs"));

        std::env::remove_var(LOG_DIR_ENV);
        assert!(log_directory().ends_with("revfeed/logs"));
    }
}
