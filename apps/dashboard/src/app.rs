//! Command dispatch.

use std::sync::Arc;

use gameshelf_library::{ArtworkSource, GameRecord, Library, RecordCache, ScanReport};
use tracing::{info, warn};

use crate::cli::Command;
use crate::config::Config;
use crate::launch::{self, LaunchOutcome};
use crate::server::{self, AppState};

pub async fn run(command: Command, config: Config) -> anyhow::Result<()> {
    let library = Library::new(config.scan_config(), RecordCache::new(&config.cache_file));
    info!(
        games_dir = %library.config().games_dir.display(),
        cache = %library.cache().path().display(),
        cache_only = library.config().cache_only,
        "library configured"
    );

    match command {
        Command::Serve => {
            let (steam, artwork) = clients(&config)?;
            let state = Arc::new(AppState::new(library, steam, artwork));
            server::serve(state, config.port, config.open_browser).await
        }
        Command::Scan => {
            let (steam, artwork) = clients(&config)?;
            let artwork = artwork.as_ref().map(|c| c as &dyn ArtworkSource);
            let report = library.records(&steam, artwork).await?;
            print_report(&report);
            Ok(())
        }
        Command::Install { name } => {
            let outcome = launch::launch_by_name(library.cache(), &name, launch::open_with_system);
            let response = outcome.response();
            match outcome {
                LaunchOutcome::Launched { .. } => {
                    println!("{}", response.message);
                    Ok(())
                }
                _ => anyhow::bail!(response.message),
            }
        }
    }
}

fn clients(
    config: &Config,
) -> anyhow::Result<(gameshelf_steam::Client, Option<gameshelf_steamgriddb::Client>)> {
    let steam = gameshelf_steam::Client::new()?;
    let artwork = match config.api_key() {
        Some(key) => Some(gameshelf_steamgriddb::Client::new(key)?),
        None => {
            warn!("no SteamGridDB API key configured, cover fallback disabled");
            None
        }
    };
    Ok((steam, artwork))
}

fn print_report(report: &ScanReport) {
    for record in &report.records {
        println!("{}", summary_line(record));
    }
    println!(
        "{} games ({} cached, {} fetched)",
        report.records.len(),
        report.reused,
        report.fetched
    );
}

fn summary_line(record: &GameRecord) -> String {
    let details = &record.details;
    format!(
        "{} | {} ({}) | {} | {} | installer: {}",
        record.name,
        record.review.label(),
        record.review.total(),
        details.release_date.as_deref().unwrap_or("N/A"),
        if details.genres.is_empty() {
            "-".to_string()
        } else {
            details.genres.join(", ")
        },
        record
            .installer_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".into()),
    )
}
