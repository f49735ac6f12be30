//! Init command - scaffold a new addon source tree following the layout
//! conventions.

use std::fs;
use std::path::{Path, PathBuf};

use addonsmith::addon::is_valid_name;
use addonsmith::version::{write_version, VERSION_FILENAME};
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};
use semver::Version;

use super::common;
use crate::error::CliError;

/// Version written into a freshly scaffolded addon.
const INITIAL_VERSION: Version = Version::new(0, 1, 0);

/// Arguments for the init command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory to scaffold the addon in
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Addon name (defaults to the root directory name)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Scaffold a desktop client folder
    #[arg(long)]
    pub with_client: bool,

    /// Scaffold a frontend folder with a dist placeholder
    #[arg(long)]
    pub with_frontend: bool,

    /// Scaffold a public static files folder
    #[arg(long)]
    pub with_public: bool,

    /// Scaffold a private static files folder
    #[arg(long)]
    pub with_private: bool,
}

/// Run the init command.
pub fn run(args: InitArgs) -> Result<(), CliError> {
    let name = resolve_name(&args)?;

    let created = scaffold(&args, &name)?;
    for path in &created {
        println!("{} {}", common::ok_mark(), path.display());
    }

    write_version_file(&args.root)?;

    println!();
    println!("Addon '{}' scaffolded at {}", name, args.root.display());
    println!("Run 'addonsmith pack' from that directory to build a package.");
    Ok(())
}

/// Resolve and validate the addon name.
fn resolve_name(args: &InitArgs) -> Result<String, CliError> {
    let name = match &args.name {
        Some(name) => name.to_lowercase(),
        None => args
            .root
            .canonicalize()
            .ok()
            .as_deref()
            .unwrap_or(&args.root)
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .ok_or_else(|| {
                CliError::Init(format!(
                    "cannot derive an addon name from {}; use --name",
                    args.root.display()
                ))
            })?,
    };

    if !is_valid_name(&name) {
        return Err(CliError::Init(format!(
            "invalid addon name '{}': use lowercase letters, digits and \
             underscores, starting with a letter (or pass --name)",
            name
        )));
    }

    Ok(name)
}

/// Create the addon folders and starter files. Existing files are left
/// untouched; returns the paths actually created.
fn scaffold(args: &InitArgs, name: &str) -> Result<Vec<PathBuf>, CliError> {
    let mut created = Vec::new();

    create_file(
        &args.root.join("server").join("__init__.py"),
        format!(
            "\"\"\"Server-side entry point for the {} addon.\"\"\"\n",
            name
        )
        .as_bytes(),
        &mut created,
    )?;

    if args.with_client {
        create_file(
            &args.root.join("client").join("__init__.py"),
            format!(
                "\"\"\"Desktop client entry point for the {} addon.\"\"\"\n",
                name
            )
            .as_bytes(),
            &mut created,
        )?;
    }

    if args.with_frontend {
        create_file(
            &args.root.join("frontend").join("dist").join("index.html"),
            format!(
                "<!doctype html>\n<html>\n<head><title>{}</title></head>\n\
                 <body></body>\n</html>\n",
                name
            )
            .as_bytes(),
            &mut created,
        )?;
    }

    if args.with_public {
        create_dir(&args.root.join("public"), &mut created)?;
    }

    if args.with_private {
        create_dir(&args.root.join("private"), &mut created)?;
    }

    Ok(created)
}

/// Write the initial VERSION file, asking before resetting an existing one.
fn write_version_file(root: &Path) -> Result<(), CliError> {
    let version_path = root.join(VERSION_FILENAME);

    if version_path.exists() {
        if !confirm_version_reset(&version_path) {
            println!("  {} kept as-is", version_path.display());
            return Ok(());
        }
    }

    write_version(root, &INITIAL_VERSION)
        .map_err(|e| CliError::Init(e.to_string()))?;
    println!(
        "{} {} ({})",
        common::ok_mark(),
        version_path.display(),
        INITIAL_VERSION
    );
    Ok(())
}

/// Ask whether to reset an existing VERSION file. Never resets without a
/// terminal to ask on.
fn confirm_version_reset(path: &Path) -> bool {
    if !atty::is(atty::Stream::Stdin) {
        return false;
    }

    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "{} exists; reset it to {}?",
            path.display(),
            INITIAL_VERSION
        ))
        .default(false)
        .interact()
        .unwrap_or(false)
}

/// Write a file unless it already exists, creating parent directories.
fn create_file(path: &Path, content: &[u8], created: &mut Vec<PathBuf>) -> Result<(), CliError> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CliError::Init(format!("creating {}: {}", parent.display(), e)))?;
    }
    fs::write(path, content)
        .map_err(|e| CliError::Init(format!("writing {}: {}", path.display(), e)))?;

    created.push(path.to_path_buf());
    Ok(())
}

/// Create a directory unless it already exists.
fn create_dir(path: &Path, created: &mut Vec<PathBuf>) -> Result<(), CliError> {
    if path.is_dir() {
        return Ok(());
    }

    fs::create_dir_all(path)
        .map_err(|e| CliError::Init(format!("creating {}: {}", path.display(), e)))?;
    created.push(path.to_path_buf());
    Ok(())
}
