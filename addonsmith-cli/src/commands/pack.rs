//! Pack command - assemble a distributable package from an addon source
//! tree.

use std::path::PathBuf;

use addonsmith::config::format_size;
use addonsmith::packager::{assemble, PackageOptions, PackageSummary};
use clap::Args;

use super::common;
use crate::error::CliError;

/// Arguments for the pack command.
#[derive(Debug, Args)]
pub struct PackArgs {
    /// Addon source root
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Output directory for the assembled package
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Do not build the client archive
    #[arg(long)]
    pub skip_archive: bool,

    /// Addon name (defaults to the root directory name)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,
}

/// Run the pack command.
pub fn run(args: PackArgs) -> Result<(), CliError> {
    let config = common::load_config();

    let mut options = PackageOptions::default()
        .with_skip_archive(common::resolve_skip_archive(args.skip_archive, &config));
    if let Some(name) = args.name {
        options = options.with_name(name);
    }
    if let Some(output) = common::resolve_output_dir(args.output, &config) {
        options = options.with_output_dir(output);
    }

    let summary = assemble(&args.root, &options)?;
    print_summary(&summary);

    Ok(())
}

/// Print the packaging summary.
fn print_summary(summary: &PackageSummary) {
    let folders: Vec<String> = summary
        .folders
        .iter()
        .map(|folder| folder.to_string())
        .collect();

    println!(
        "{} Packaged {} -> {}",
        common::ok_mark(),
        summary.addon,
        summary.package_dir.display()
    );
    println!("  Folders: {}", folders.join(", "));
    println!(
        "  Files:   {} ({})",
        summary.file_count,
        format_size(summary.total_size as usize)
    );
    if summary.skipped > 0 {
        println!("  Skipped: {} build/VCS entries", summary.skipped);
    }

    match &summary.archive {
        Some(archive) => {
            println!(
                "  Archive: {} ({}, {} entries)",
                archive.path.display(),
                format_size(archive.size as usize),
                archive.entry_count
            );
            println!("  SHA-256: {}", archive.checksum);
        }
        None => println!("  Archive: none"),
    }

    println!("  Mount:   {}", summary.addon.mount_path());

    for warning in &summary.warnings {
        println!("{} {}", common::warn_mark(), warning);
    }
}
