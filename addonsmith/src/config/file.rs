//! Tool configuration file handling.
//!
//! Settings live in an INI file under the user's configuration
//! directory (e.g. `~/.config/addonsmith/config.ini` on Linux):
//!
//! ```ini
//! [package]
//! output_dir = /home/me/builds
//! skip_archive = false
//!
//! [logging]
//! level = info
//! file = /home/me/.local/state/addonsmith.log
//! ```
//!
//! CLI arguments override config file values when specified.

use std::fs;
use std::io;
use std::path::PathBuf;

use ini::Ini;
use thiserror::Error;

/// Errors from loading or saving the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read config {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// Failed to write the config file.
    #[error("failed to write config {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    /// Config file is not valid INI.
    #[error("invalid config {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// A value does not parse for its key.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Packaging defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageFileConfig {
    /// Default output directory for assembled packages.
    pub output_dir: Option<PathBuf>,

    /// Skip building the client archive by default.
    pub skip_archive: bool,
}

/// Logging defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingFileConfig {
    /// Default log level.
    pub level: String,

    /// Log file path, if file logging is enabled.
    pub file: Option<PathBuf>,
}

impl Default for LoggingFileConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// The tool configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    /// `[package]` section.
    pub package: PackageFileConfig,

    /// `[logging]` section.
    pub logging: LoggingFileConfig,
}

impl ConfigFile {
    /// Load the configuration from the default location.
    ///
    /// A missing file yields the defaults; only unreadable or malformed
    /// files produce an error.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load the configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let ini = Ini::load_from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut config = Self::default();

        if let Some(value) = ini.get_from(Some("package"), "output_dir") {
            if !value.is_empty() {
                config.package.output_dir = Some(PathBuf::from(value));
            }
        }
        if let Some(value) = ini.get_from(Some("package"), "skip_archive") {
            config.package.skip_archive = parse_bool("package.skip_archive", value)?;
        }
        if let Some(value) = ini.get_from(Some("logging"), "level") {
            if !value.is_empty() {
                config.logging.level = value.to_string();
            }
        }
        if let Some(value) = ini.get_from(Some("logging"), "file") {
            if !value.is_empty() {
                config.logging.file = Some(PathBuf::from(value));
            }
        }

        Ok(config)
    }

    /// Save the configuration to the default location.
    ///
    /// Parent directories are created as needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save the configuration to a specific path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let ini = self.to_ini();
        ini.write_to_file(path).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();

        if let Some(ref dir) = self.package.output_dir {
            ini.with_section(Some("package"))
                .set("output_dir", dir.to_string_lossy());
        }
        ini.with_section(Some("package")).set(
            "skip_archive",
            if self.package.skip_archive {
                "true"
            } else {
                "false"
            },
        );

        ini.with_section(Some("logging"))
            .set("level", self.logging.level.clone());
        if let Some(ref file) = self.logging.file {
            ini.with_section(Some("logging"))
                .set("file", file.to_string_lossy());
        }

        ini
    }
}

/// Parse a boolean config value.
fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

/// Path of the configuration file.
///
/// `{config_dir}/addonsmith/config.ini`, where `{config_dir}` is the
/// platform configuration directory. Falls back to the current
/// directory when no configuration directory is known.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("addonsmith")
        .join("config.ini")
}
