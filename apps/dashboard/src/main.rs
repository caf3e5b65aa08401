mod app;
mod cli;
mod config;
mod launch;
mod server;
mod view;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::Config;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,gameshelf=debug")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?
        .with_env(|key| std::env::var(key).ok())
        .with_cli(&cli);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "gameshelf starting");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run(cli.command(), config))
}
