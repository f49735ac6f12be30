//! CLI error type.
//!
//! Library errors are converted at the command boundary and mapped to a
//! non-zero exit code in `main`.

use std::fmt;

use addonsmith::config::ConfigError;
use addonsmith::logging::LogError;
use addonsmith::PackageError;

/// Errors surfaced to the CLI user.
#[derive(Debug)]
pub enum CliError {
    /// Packaging pipeline failure.
    Package(PackageError),

    /// Tool configuration problem.
    Config(String),

    /// The addon layout failed validation.
    Validation(String),

    /// Scaffolding a new addon failed.
    Init(String),

    /// Logging could not be set up.
    Logging(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Package(e) => write!(f, "{}", e),
            CliError::Config(msg) => write!(f, "{}", msg),
            CliError::Validation(msg) => write!(f, "{}", msg),
            CliError::Init(msg) => write!(f, "{}", msg),
            CliError::Logging(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Package(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PackageError> for CliError {
    fn from(e: PackageError) -> Self {
        CliError::Package(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<LogError> for CliError {
    fn from(e: LogError) -> Self {
        CliError::Logging(e.to_string())
    }
}
