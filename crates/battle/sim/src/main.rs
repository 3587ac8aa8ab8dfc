//! Battle simulator for content authors.
//!
//! Resolves one battle from a data directory and writes its encoded log, or
//! inspects a previously written log.
//!
//! ```bash
//! battle-sim run --encounter "Goblin Raid" --seed 42
//! battle-sim inspect battle-logs/battle_3f2a9c01.bin --format json
//! ```

mod commands;
mod config;
mod report;

use anyhow::Result;
use clap::Parser;
use commands::{Inspect, Run};

/// Deterministic battle simulator
#[derive(Parser)]
#[command(name = "battle-sim")]
#[command(about = "Run and inspect deterministic battles", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Resolve one battle and write its log
    Run(Run),

    /// Decode and display a written battle log
    Inspect(Inspect),
}

fn main() -> Result<()> {
    // Load .env file if it exists (BATTLE_SEED, BATTLE_LOG_DIR, ...)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(cmd) => cmd.execute(),
        Command::Inspect(cmd) => cmd.execute(),
    }
}
