//! Common utilities shared across CLI commands.

use std::path::PathBuf;

use addonsmith::config::ConfigFile;
use console::style;

/// Load the tool configuration, falling back to defaults.
pub fn load_config() -> ConfigFile {
    ConfigFile::load().unwrap_or_default()
}

/// Resolve the package output directory.
///
/// CLI argument takes precedence, then the config file; `None` leaves the
/// packager's default (`package/` under the addon root) in effect.
pub fn resolve_output_dir(cli_output: Option<PathBuf>, config: &ConfigFile) -> Option<PathBuf> {
    cli_output.or_else(|| config.package.output_dir.clone())
}

/// Resolve whether to skip the client archive.
///
/// The CLI flag can only enable skipping; the config file provides the
/// default.
pub fn resolve_skip_archive(cli_skip: bool, config: &ConfigFile) -> bool {
    cli_skip || config.package.skip_archive
}

/// Green check mark for success lines. Plain when not a terminal.
pub fn ok_mark() -> String {
    style("✓").green().to_string()
}

/// Yellow exclamation mark for warning lines.
pub fn warn_mark() -> String {
    style("!").yellow().to_string()
}

/// Red cross for failure lines.
pub fn fail_mark() -> String {
    style("✗").red().to_string()
}
