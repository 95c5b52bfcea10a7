//! calprint CLI entry point.

use anyhow::Result;
use calprint::cli::Cli;
use calprint::commands::run;
use calprint::Config;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();

    init_tracing(&config, cli.quiet);

    if let Some(output) = run(&cli, &config).await? {
        println!("{output}");
    }

    Ok(())
}

/// Logs go to stderr so JSON output on stdout stays parseable.
fn init_tracing(config: &Config, quiet: bool) {
    let default_filter = if quiet {
        "calprint=warn,calprint_render=warn"
    } else {
        "calprint=info,calprint_render=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
