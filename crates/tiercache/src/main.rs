//! tiercache - Entry Point
//!
//! Binary entry point for the `tiercache` command. See [`tiercache::cli`].

// Force-link tiercache-providers so the linkme registrations are included
extern crate tiercache_providers;

use std::process::ExitCode;

use clap::Parser;
use tiercache::cli::{Cli, run};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("tiercache: {e}");
            ExitCode::FAILURE
        }
    }
}
