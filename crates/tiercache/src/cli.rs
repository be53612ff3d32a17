//! Command line interface
//!
//! | Command | Description |
//! |---------|-------------|
//! | `tiercache run` | Build the cache, start cleanup, wait for Ctrl-C |
//! | `tiercache check` | Probe the tiers, print health and stats as JSON |
//! | `tiercache providers` | List registered distributed store providers |
//! | `tiercache config` | Print the effective configuration as TOML |
//!
//! `check` exits with status 2 when the cache is degraded.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;
use tiercache_application::CacheCoordinator;
use tiercache_application::ports::registry::list_distributed_providers;
use tiercache_infrastructure::bootstrap::{build_cache, init_cache, probe_cache};
use tiercache_infrastructure::config::loader::to_toml;
use tiercache_infrastructure::config::{AppConfig, ConfigLoader};
use tiercache_infrastructure::logging::init_logging;
use tracing::info;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const EXIT_DEGRADED: u8 = 2;

/// Command line interface for tiercache
#[derive(Parser, Debug)]
#[command(name = "tiercache")]
#[command(about = "Multi-tier cache coordinator")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the cache with its cleanup scheduler until interrupted
    Run,
    /// Probe the tiers and print health and statistics as JSON
    Check,
    /// List registered distributed store providers
    Providers,
    /// Print the effective configuration as TOML
    Config,
}

/// Dispatch a parsed command line
pub async fn run(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Run => {
            let config = load_config(cli.config.as_deref())?;
            serve(&config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check => {
            let config = load_config(cli.config.as_deref())?;
            check(&config).await
        }
        Command::Providers => {
            println!("{}", providers_table());
            Ok(ExitCode::SUCCESS)
        }
        Command::Config => {
            let config = load_config(cli.config.as_deref())?;
            print!("{}", to_toml(&config)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Load configuration from optional path
fn load_config(config_path: Option<&Path>) -> CliResult<AppConfig> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    Ok(loader.load()?)
}

async fn serve(config: &AppConfig) -> CliResult<()> {
    init_logging(&config.logging)?;

    let runtime = init_cache(config).await?;
    runtime.scheduler.start();
    info!(
        cleanup_interval_secs = runtime.scheduler.interval().as_secs(),
        "tiercache running, press Ctrl-C to stop"
    );

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    runtime.scheduler.stop().await;

    let stats = runtime.cache.stats();
    info!(
        hits = stats.hits,
        misses = stats.misses,
        hit_rate = stats.hit_rate,
        evictions = stats.evictions,
        "tiercache stopped"
    );
    Ok(())
}

async fn check(config: &AppConfig) -> CliResult<ExitCode> {
    init_logging(&config.logging)?;

    let cache = build_cache(&config.cache)?;
    let (healthy, report) = check_report(&cache).await;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(if healthy {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_DEGRADED)
    })
}

/// Health and statistics of a cache as one JSON document
pub async fn check_report(cache: &CacheCoordinator) -> (bool, serde_json::Value) {
    let health = probe_cache(cache).await;
    let report = json!({
        "health": health,
        "stats": cache.stats(),
    });
    (health.is_healthy(), report)
}

/// Registered providers, one `name  description` line each, sorted by name
pub fn providers_table() -> String {
    let mut providers = list_distributed_providers();
    providers.sort_unstable_by_key(|(name, _)| *name);
    providers
        .into_iter()
        .map(|(name, description)| format!("{name:<10}{description}"))
        .collect::<Vec<_>>()
        .join("\n")
}
