//! Decode and display a written battle log.

use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_core::BattleLog;
use clap::Parser;

use crate::report::{self, OutputFormat};

/// Decode and display a written battle log
#[derive(Parser)]
pub struct Inspect {
    /// Path of the encoded log
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        if !self.path.exists() {
            anyhow::bail!("Log file not found: {}", self.path.display());
        }
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("Failed to read log file: {}", self.path.display()))?;
        let log = BattleLog::decode(&bytes)
            .with_context(|| format!("Failed to decode log file: {}", self.path.display()))?;

        if self.format == OutputFormat::Summary {
            println!("Log File:  {}", self.path.display());
            println!("File Size: {} bytes", bytes.len());
            println!("Digest:    {}", hex::encode(log.digest()?));
            println!();
        }
        report::print_log(&log, self.format)
    }
}
