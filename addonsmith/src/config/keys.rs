//! Typed access to configuration keys.
//!
//! [`ConfigKey`] names every setting the `config get`/`config set`
//! commands can touch, in `section.key` form, and maps between the
//! string surface and the typed [`ConfigFile`] fields.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::file::{ConfigError, ConfigFile};

/// A known configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// `package.output_dir`
    PackageOutputDir,
    /// `package.skip_archive`
    PackageSkipArchive,
    /// `logging.level`
    LoggingLevel,
    /// `logging.file`
    LoggingFile,
}

impl ConfigKey {
    /// All keys, grouped by section.
    pub fn all() -> [ConfigKey; 4] {
        [
            ConfigKey::PackageOutputDir,
            ConfigKey::PackageSkipArchive,
            ConfigKey::LoggingLevel,
            ConfigKey::LoggingFile,
        ]
    }

    /// Full key name in `section.key` form.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::PackageOutputDir => "package.output_dir",
            ConfigKey::PackageSkipArchive => "package.skip_archive",
            ConfigKey::LoggingLevel => "logging.level",
            ConfigKey::LoggingFile => "logging.file",
        }
    }

    /// INI section this key lives in.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::PackageOutputDir | ConfigKey::PackageSkipArchive => "package",
            ConfigKey::LoggingLevel | ConfigKey::LoggingFile => "logging",
        }
    }

    /// Key name within its section.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::PackageOutputDir => "output_dir",
            ConfigKey::PackageSkipArchive => "skip_archive",
            ConfigKey::LoggingLevel => "level",
            ConfigKey::LoggingFile => "file",
        }
    }

    /// Read this key's value as a display string. Unset keys yield an
    /// empty string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::PackageOutputDir => config
                .package
                .output_dir
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
            ConfigKey::PackageSkipArchive => config.package.skip_archive.to_string(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
            ConfigKey::LoggingFile => config
                .logging
                .file
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    /// Set this key from a string value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the value does not
    /// parse for the key's type.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        match self {
            ConfigKey::PackageOutputDir => {
                config.package.output_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            ConfigKey::PackageSkipArchive => {
                config.package.skip_archive = match value.to_lowercase().as_str() {
                    "true" | "1" | "yes" => true,
                    "false" | "0" | "no" => false,
                    _ => {
                        return Err(ConfigError::InvalidValue {
                            key: self.name().to_string(),
                            value: value.to_string(),
                            reason: "expected true or false".to_string(),
                        })
                    }
                };
            }
            ConfigKey::LoggingLevel => {
                let level = value.to_lowercase();
                match level.as_str() {
                    "trace" | "debug" | "info" | "warn" | "error" => {
                        config.logging.level = level;
                    }
                    _ => {
                        return Err(ConfigError::InvalidValue {
                            key: self.name().to_string(),
                            value: value.to_string(),
                            reason: "expected trace, debug, info, warn or error".to_string(),
                        })
                    }
                }
            }
            ConfigKey::LoggingFile => {
                config.logging.file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
        }

        Ok(())
    }
}

impl FromStr for ConfigKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or(())
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_keys_parse_by_name() {
        for key in ConfigKey::all() {
            let parsed: ConfigKey = key.name().parse().unwrap();
            assert_eq!(parsed, key);
        }
    }

    #[test]
    fn test_unknown_key_fails() {
        assert!("package.unknown".parse::<ConfigKey>().is_err());
        assert!("".parse::<ConfigKey>().is_err());
        assert!("output_dir".parse::<ConfigKey>().is_err());
    }

    #[test]
    fn test_name_is_section_dot_key() {
        for key in ConfigKey::all() {
            assert_eq!(key.name(), format!("{}.{}", key.section(), key.key_name()));
        }
    }

    #[test]
    fn test_get_unset_output_dir() {
        let config = ConfigFile::default();
        assert_eq!(ConfigKey::PackageOutputDir.get(&config), "");
    }

    #[test]
    fn test_set_and_get_output_dir() {
        let mut config = ConfigFile::default();
        ConfigKey::PackageOutputDir.set(&mut config, "/builds").unwrap();

        assert_eq!(config.package.output_dir, Some(PathBuf::from("/builds")));
        assert_eq!(ConfigKey::PackageOutputDir.get(&config), "/builds");
    }

    #[test]
    fn test_set_empty_clears_output_dir() {
        let mut config = ConfigFile::default();
        ConfigKey::PackageOutputDir.set(&mut config, "/builds").unwrap();
        ConfigKey::PackageOutputDir.set(&mut config, "").unwrap();

        assert!(config.package.output_dir.is_none());
    }

    #[test]
    fn test_set_skip_archive() {
        let mut config = ConfigFile::default();

        ConfigKey::PackageSkipArchive.set(&mut config, "true").unwrap();
        assert!(config.package.skip_archive);

        ConfigKey::PackageSkipArchive.set(&mut config, "no").unwrap();
        assert!(!config.package.skip_archive);
    }

    #[test]
    fn test_set_skip_archive_invalid() {
        let mut config = ConfigFile::default();
        let err = ConfigKey::PackageSkipArchive
            .set(&mut config, "maybe")
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_set_logging_level() {
        let mut config = ConfigFile::default();
        ConfigKey::LoggingLevel.set(&mut config, "DEBUG").unwrap();

        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_set_logging_level_invalid() {
        let mut config = ConfigFile::default();
        let err = ConfigKey::LoggingLevel
            .set(&mut config, "verbose")
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_display_matches_name() {
        assert_eq!(
            ConfigKey::PackageOutputDir.to_string(),
            "package.output_dir"
        );
    }
}
