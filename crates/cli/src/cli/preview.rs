//! Preview command.

use std::path::PathBuf;

use clap::Args;

/// Arguments for `calprint preview`.
#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Calendar request JSON file.
    #[arg(long, short)]
    pub input: PathBuf,

    /// Only show this month (1-12).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
}
