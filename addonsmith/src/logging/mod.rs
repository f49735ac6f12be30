//! Logging initialization.
//!
//! Wires up `tracing` for the CLI: a stderr layer with local-time
//! stamps, plus an optional non-blocking file layer. The level comes
//! from the standard env filter when set (`RUST_LOG`), otherwise from
//! the configured level.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, time::LocalTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Logging configuration.
///
/// # Example
///
/// ```
/// use addonsmith::logging::LogConfig;
///
/// let config = LogConfig::default().with_level("debug");
/// assert_eq!(config.level, "debug");
/// ```
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level when `RUST_LOG` is not set.
    pub level: String,

    /// Log file path. When set, log lines are also appended here.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LogConfig {
    /// Set the log level.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Set the log file path.
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Logging errors.
#[derive(Debug, Error)]
pub enum LogError {
    /// Subscriber registration failed (usually: already initialized).
    #[error("failed to initialize logging: {0}")]
    Init(String),

    /// Log file could not be prepared.
    #[error("failed to open log file: {0}")]
    File(#[from] io::Error),
}

/// Initialize the global tracing subscriber.
///
/// Returns the appender guard when file logging is enabled; the caller
/// must keep it alive for the duration of the process, or buffered log
/// lines are lost.
///
/// # Errors
///
/// Returns [`LogError::Init`] if a subscriber is already installed and
/// [`LogError::File`] if the log file cannot be created.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>, LogError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_timer(LocalTime::rfc_3339());

    match &config.file {
        Some(path) => {
            let directory = path.parent().unwrap_or_else(|| Path::new("."));
            let file_name = path.file_name().ok_or_else(|| {
                LogError::Init(format!("log path {} has no file name", path.display()))
            })?;
            std::fs::create_dir_all(directory)?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(LocalTime::rfc_3339());

            registry
                .with(stderr_layer)
                .with(file_layer)
                .try_init()
                .map_err(|e| LogError::Init(e.to_string()))?;

            Ok(Some(guard))
        }
        None => {
            registry
                .with(stderr_layer)
                .try_init()
                .map_err(|e| LogError::Init(e.to_string()))?;

            Ok(None)
        }
    }
}
