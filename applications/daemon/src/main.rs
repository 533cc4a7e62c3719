/// Chord daemon - scan sources through the decoder plugins
use anyhow::Context;
use chord_daemon::{
    config::DaemonConfig, discover_sources, logging, scan_sources, Daemon, ScanStats,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chord-daemon")]
#[command(about = "Scan music sources through the chord decoder plugins", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CHORD_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan files or directories and print one JSON descriptor per source
    Scan {
        /// Files or directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List the decoder plugins and whether they are active
    Plugins,
    /// Validate the configuration and exit
    CheckConfig,
}

#[derive(Serialize)]
struct PluginSummary {
    name: &'static str,
    suffixes: &'static [&'static str],
    mime_types: &'static [&'static str],
    active: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = DaemonConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    logging::init(&config.log.level);

    if let Some(source) = &config.source {
        tracing::info!(config = %source.display(), "Loaded configuration");
    }

    let daemon = Daemon::start(config).context("Failed to start daemon")?;

    match cli.command {
        Commands::Scan { paths, pretty } => {
            let sources = discover_sources(&daemon.registry, &paths);
            let outcomes = scan_sources(daemon.registry.clone(), sources).await;

            for outcome in &outcomes {
                let line = if pretty {
                    serde_json::to_string_pretty(outcome)?
                } else {
                    serde_json::to_string(outcome)?
                };
                println!("{line}");
            }

            let stats = ScanStats::from_outcomes(&outcomes);
            eprintln!(
                "Scanned {} of {} sources ({} failed)",
                stats.scanned, stats.sources, stats.failed
            );
        }
        Commands::Plugins => {
            let summaries: Vec<_> = daemon
                .registry
                .plugins()
                .map(|plugin| PluginSummary {
                    name: plugin.name,
                    suffixes: plugin.suffixes,
                    mime_types: plugin.mime_types,
                    active: daemon.registry.is_active(plugin.name),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        Commands::CheckConfig => {
            println!("{}", serde_json::to_string_pretty(&daemon.replay_gain)?);
            eprintln!("Configuration OK");
        }
    }

    daemon.shutdown().context("Failed to stop daemon")?;
    Ok(())
}
