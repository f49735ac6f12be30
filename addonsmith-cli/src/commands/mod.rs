//! CLI command implementations.
//!
//! Each command lives in its own module with a `run` function taking its
//! clap-derived arguments and returning `Result<(), CliError>`.

pub mod common;
pub mod config;
pub mod init;
pub mod pack;
pub mod validate;
pub mod version;
