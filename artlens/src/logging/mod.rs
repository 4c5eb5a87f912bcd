//! Logging setup.
//!
//! Installs a global `tracing` subscriber with an `EnvFilter` (so
//! `RUST_LOG` wins over the configured level), a human-readable stderr
//! layer and, optionally, a daily rolling log file written from a
//! background thread. Timestamps use the local UTC offset when it can be
//! determined and fall back to UTC.

use std::path::PathBuf;

use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::UtcOffset;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::{self, time::OffsetTime};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// File name prefix for rolling log files.
pub const LOG_FILE_NAME: &str = "artlens.log";

/// Errors from logging initialization.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to install subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// What to log and where.
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
    /// Directory for rolling log files; stderr only when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl LogOptions {
    /// Options with the given default level.
    pub fn with_level(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Self::default()
        }
    }

    /// Also write to a rolling file in `dir`.
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }
}

/// Keeps the file writer alive. Buffered lines are flushed on drop.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber.
pub fn init_logging(options: &LogOptions) -> Result<LoggingGuard, LoggingError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&options.level));
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let timer = OffsetTime::new(offset, Rfc3339);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(timer.clone());

    let (file_layer, file_guard) = match &options.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
                path: dir.clone(),
                source,
            })?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(timer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    tracing::debug!(
        level = %options.level,
        log_dir = ?options.log_dir,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = LogOptions::default();
        assert_eq!(options.level, "info");
        assert!(options.log_dir.is_none());
    }

    #[test]
    fn test_builder() {
        let options = LogOptions::with_level("debug").with_log_dir("/var/log/artlens");
        assert_eq!(options.level, "debug");
        assert_eq!(options.log_dir, Some(PathBuf::from("/var/log/artlens")));
    }

    // The only test in this crate that installs a global subscriber
    #[test]
    fn test_init_writes_file_and_rejects_second_init() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let options = LogOptions::with_level("info").with_log_dir(&log_dir);

        let guard = init_logging(&options).unwrap();
        tracing::info!("hello from the test");
        drop(guard);

        let written: Vec<_> = std::fs::read_dir(&log_dir).unwrap().collect();
        assert_eq!(written.len(), 1);

        assert!(matches!(
            init_logging(&LogOptions::default()),
            Err(LoggingError::Init(_))
        ));
    }
}
