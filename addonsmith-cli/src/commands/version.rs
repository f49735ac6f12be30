//! Version command - show or bump the addon version file.

use std::path::PathBuf;

use addonsmith::version::{bump_version, read_version, write_version, VersionBump};
use clap::{Args, ValueEnum};

use super::common;
use crate::error::CliError;

/// Version part selection for the `--bump` argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BumpPart {
    /// Increment the major version (1.2.3 -> 2.0.0)
    Major,
    /// Increment the minor version (1.2.3 -> 1.3.0)
    Minor,
    /// Increment the patch version (1.2.3 -> 1.2.4)
    Patch,
}

impl From<BumpPart> for VersionBump {
    fn from(part: BumpPart) -> Self {
        match part {
            BumpPart::Major => VersionBump::Major,
            BumpPart::Minor => VersionBump::Minor,
            BumpPart::Patch => VersionBump::Patch,
        }
    }
}

/// Arguments for the version command.
#[derive(Debug, Args)]
pub struct VersionArgs {
    /// Addon source root
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Bump part of the version and write it back
    #[arg(long, value_enum, value_name = "PART")]
    pub bump: Option<BumpPart>,
}

/// Run the version command.
pub fn run(args: VersionArgs) -> Result<(), CliError> {
    let current = read_version(&args.root)?;

    match args.bump {
        Some(part) => {
            let next = bump_version(&current, part.into());
            write_version(&args.root, &next)?;
            println!("{} {} -> {}", common::ok_mark(), current, next);
        }
        None => println!("{}", current),
    }

    Ok(())
}
