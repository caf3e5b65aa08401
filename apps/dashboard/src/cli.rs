use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Browse the games in a local folder, enriched with Steam metadata.
#[derive(Debug, Parser)]
#[command(name = "gameshelf", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration file (defaults to the per-user location)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory whose top-level entries are the games
    #[arg(long, global = true, value_name = "PATH")]
    pub games_dir: Option<PathBuf>,

    /// Only process the first N entries, sorted by name
    #[arg(long, global = true, value_name = "N")]
    pub limit: Option<usize>,

    /// Use the record cache as-is, without scanning or fetching
    #[arg(long, global = true)]
    pub cache_only: bool,

    /// Dashboard port
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Do not open the dashboard in a browser
    #[arg(long, global = true)]
    pub no_browser: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Serve the dashboard (default)
    Serve,
    /// Run one scan and print the records
    Scan,
    /// Launch the installer of a cached game
    Install {
        /// Game name as shown in the dashboard
        name: String,
    },
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}
