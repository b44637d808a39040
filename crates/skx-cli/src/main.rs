#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

use anyhow::Context;
use clap::Parser;
use skx_config::SkxConfig;

mod cli;
mod commands;
mod context;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("skx error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();

    let config = load_config(&flags)?;
    if let cli::Commands::Config = &cli.command {
        return commands::config::handle(&config, &flags);
    }

    let ctx = context::AppContext::init(&config)
        .await
        .context("failed to initialize skx application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn load_config(flags: &cli::GlobalFlags) -> anyhow::Result<SkxConfig> {
    let mut config = SkxConfig::load_with_dotenv().context("failed to load skx configuration")?;
    if let Some(path) = &flags.database {
        config.database.path.clone_from(path);
    }
    Ok(config)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SKX_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
