//! Addonsmith CLI - package pipeline-server addons from a conventional
//! source layout.

mod commands;
mod error;

use std::path::PathBuf;
use std::process;

use addonsmith::logging::{self, LogConfig};
use clap::{Parser, Subcommand};
use tracing::debug;

use commands::{config, init, pack, validate, version};
use error::CliError;

/// Packaging toolkit for pipeline-server addons.
#[derive(Debug, Parser)]
#[command(name = "addonsmith", version, about, long_about = None)]
struct Cli {
    /// Log level when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Also append log lines to this file
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Assemble a distributable package from an addon source tree
    Pack(pack::PackArgs),

    /// Check an addon source tree against the layout conventions
    Validate(validate::ValidateArgs),

    /// Scaffold a new addon source tree
    Init(init::InitArgs),

    /// Show or bump the addon version
    Version(version::VersionArgs),

    /// Manage tool configuration
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    // Keep the appender guard alive for the whole run, or buffered file
    // log lines are dropped on exit
    let _guard = match init_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = dispatch(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Initialize logging from CLI arguments and the config file.
fn init_logging(cli: &Cli) -> Result<Option<logging::WorkerGuard>, CliError> {
    let config = commands::common::load_config();

    let mut log_config = LogConfig::default().with_level(
        cli.log_level
            .clone()
            .unwrap_or_else(|| config.logging.level.clone()),
    );
    if let Some(file) = cli.log_file.clone().or_else(|| config.logging.file.clone()) {
        log_config = log_config.with_file(file);
    }

    Ok(logging::init(&log_config)?)
}

/// Dispatch to the selected command.
fn dispatch(command: Commands) -> Result<(), CliError> {
    debug!(?command, "dispatching command");

    match command {
        Commands::Pack(args) => pack::run(args),
        Commands::Validate(args) => validate::run(args),
        Commands::Init(args) => init::run(args),
        Commands::Version(args) => version::run(args),
        Commands::Config { command } => config::run(command),
    }
}
