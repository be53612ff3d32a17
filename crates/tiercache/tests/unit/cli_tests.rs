//! Tests for the command line interface

use std::path::Path;

use clap::{CommandFactory, Parser};
use tiercache::cli::{Cli, Command, check_report, providers_table};
use tiercache::{CacheConfig, CacheEntryConfig, build_cache};

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_subcommands() {
    let cli = Cli::try_parse_from(["tiercache", "check"]).unwrap();
    assert_eq!(cli.command, Command::Check);
    assert!(cli.config.is_none());

    let cli = Cli::try_parse_from(["tiercache", "run", "--config", "cache.toml"]).unwrap();
    assert_eq!(cli.command, Command::Run);
    assert_eq!(cli.config.as_deref(), Some(Path::new("cache.toml")));

    let cli = Cli::try_parse_from(["tiercache", "-c", "cache.toml", "config"]).unwrap();
    assert_eq!(cli.command, Command::Config);
}

#[test]
fn test_subcommand_is_required() {
    assert!(Cli::try_parse_from(["tiercache"]).is_err());
    assert!(Cli::try_parse_from(["tiercache", "serve"]).is_err());
}

#[test]
fn test_providers_table_lists_builtin_stores() {
    let table = providers_table();
    let names: Vec<&str> = table
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();

    assert_eq!(names, ["moka", "redis"]);
}

#[tokio::test]
async fn test_check_report_for_memory_only_cache() {
    let cache = build_cache(&CacheConfig::default()).unwrap();
    cache.set("a", 1_u8, CacheEntryConfig::new()).await;
    let _ = cache.get::<u8>("a").await;
    let _ = cache.get::<u8>("b").await;

    let (healthy, report) = check_report(&cache).await;

    assert!(healthy);
    assert_eq!(report["health"]["status"], "healthy");
    assert_eq!(report["health"]["distributed_enabled"], false);
    assert_eq!(report["stats"]["hits"], 1);
    assert_eq!(report["stats"]["misses"], 1);
    assert_eq!(report["stats"]["memory_entries"], 1);
}

#[tokio::test]
async fn test_check_report_for_unreachable_store() {
    let config = CacheConfig {
        distributed_enabled: true,
        distributed_endpoint: Some("redis://127.0.0.1:1".to_string()),
        connect_timeout_ms: 200,
        ..CacheConfig::default()
    };
    let cache = build_cache(&config).unwrap();

    let (healthy, report) = check_report(&cache).await;

    assert!(!healthy);
    assert_eq!(report["health"]["status"], "degraded");
    assert_eq!(report["health"]["provider"], "redis");
    assert_eq!(report["stats"]["distributed_connected"], false);
}
