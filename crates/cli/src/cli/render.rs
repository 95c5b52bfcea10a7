//! Render command.

use std::path::PathBuf;

use clap::Args;

/// Arguments for `calprint render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Calendar request JSON file.
    #[arg(long, short)]
    pub input: PathBuf,

    /// Directory the PDF is written to.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Directory holding calendar.png, cake.png and heart.png.
    #[arg(long)]
    pub assets_dir: Option<PathBuf>,

    /// Base directory for relative month photo paths.
    #[arg(long)]
    pub image_dir: Option<PathBuf>,

    /// JSON file overriding template geometry fields.
    #[arg(long)]
    pub geometry: Option<PathBuf>,
}
