//! CLI command definitions.

pub mod holidays;
pub mod preview;
pub mod render;

use clap::{Parser, Subcommand, ValueEnum};

/// Render personalized 12-month print calendars.
#[derive(Debug, Parser)]
#[command(name = "calprint")]
#[command(version, about = "Render personalized 12-month print calendars", long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, env = "CALPRINT_FORMAT", default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a calendar request to PDF.
    Render(render::RenderArgs),
    /// Show the resolved calendar grid without rendering.
    Preview(preview::PreviewArgs),
    /// List catalog holidays for a year.
    Holidays(holidays::HolidaysArgs),
    /// List holiday categories.
    Categories,
}
