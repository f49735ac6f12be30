//! Validate command - check an addon source tree against the layout
//! conventions without packaging anything.

use std::path::PathBuf;

use addonsmith::layout::{self, LayoutReport};
use clap::Args;

use super::common;
use crate::error::CliError;

/// Arguments for the validate command.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Addon source root
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,
}

/// Run the validate command.
pub fn run(args: ValidateArgs) -> Result<(), CliError> {
    let report = layout::inspect(&args.root);
    print_report(&report);

    if report.is_valid {
        Ok(())
    } else {
        Err(CliError::Validation(format!(
            "layout at {} cannot be packaged",
            args.root.display()
        )))
    }
}

/// Print the layout presence report.
fn print_report(report: &LayoutReport) {
    println!("Addon layout: {}", report.root.display());
    println!();

    for entry in &report.folders {
        let required = if entry.folder.is_required() {
            " (required)"
        } else {
            ""
        };

        if entry.present {
            let files = if entry.file_count == 1 {
                "1 file".to_string()
            } else {
                format!("{} files", entry.file_count)
            };
            println!(
                "  {} {:<14} {}{}",
                common::ok_mark(),
                entry.folder.to_string(),
                files,
                required
            );
        } else {
            println!(
                "  - {:<14} absent{}",
                entry.folder.to_string(),
                required
            );
        }
    }

    if !report.warnings.is_empty() {
        println!();
        for warning in &report.warnings {
            println!("{} {}", common::warn_mark(), warning);
        }
    }

    if !report.issues.is_empty() {
        println!();
        for issue in &report.issues {
            println!("{} {}", common::fail_mark(), issue);
        }
    }
}
