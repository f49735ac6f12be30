//! Tool configuration.
//!
//! Persistent settings for the packaging tool: default output
//! directory, archive behavior, and logging. Stored as an INI file in
//! the user's configuration directory and surfaced on the command line
//! through the `config` subcommands.
//!
//! Resolution order for any setting: CLI argument, then config file,
//! then built-in default.

mod file;
mod format;
mod keys;

pub use file::{
    config_file_path, ConfigError, ConfigFile, LoggingFileConfig, PackageFileConfig,
};
pub use format::format_size;
pub use keys::ConfigKey;
