//! Resolve one battle from a content directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_content::ContentFactory;
use battle_core::{BattleEngine, BattleRequest, RandomSource, RngState};
use clap::Parser;

use crate::config::SimConfig;
use crate::report::{self, OutputFormat};

const DEFAULT_LOG_DIR: &str = "battle-logs";

/// Resolve one battle and write its log
#[derive(Parser)]
pub struct Run {
    /// Encounter name from roster.ron (case-insensitive)
    #[arg(short, long, value_name = "NAME")]
    encounter: String,

    /// Seed of the random source (env: BATTLE_SEED, default 0)
    #[arg(short, long, value_name = "SEED", conflicts_with = "resume")]
    seed: Option<u64>,

    /// Continue a random sequence from the state printed by an earlier run
    #[arg(long, value_name = "STATE")]
    resume: Option<u64>,

    /// Turn cap overriding battle.toml (env: BATTLE_MAX_TURNS)
    #[arg(long, value_name = "TURNS")]
    max_turns: Option<u32>,

    /// Content directory (env: BATTLE_DATA_DIR, defaults to the bundled data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Directory receiving the encoded log (env: BATTLE_LOG_DIR)
    #[arg(short, long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Do not write the encoded log
    #[arg(long)]
    no_write: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Run {
    pub fn execute(self) -> Result<()> {
        let env = SimConfig::from_env();

        let factory = match self.data_dir.or(env.data_dir) {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        };
        tracing::info!(data_dir = %factory.data_dir().display(), "loading content");

        let mut config = factory.load_config()?;
        if let Some(max_turns) = self.max_turns.or(env.max_turns) {
            anyhow::ensure!(max_turns > 0, "--max-turns must be at least 1");
            config.max_turns = max_turns;
        }
        let catalog = factory.load_catalog()?;
        tracing::info!(
            statuses = catalog.status_count(),
            spells = catalog.spell_count(),
            enemy_skills = catalog.enemy_skill_count(),
            "catalog loaded"
        );
        let roster = factory.load_roster(&catalog)?;

        let Some(encounter) = roster.encounter(&self.encounter) else {
            let known: Vec<&str> = roster
                .encounters
                .iter()
                .map(|encounter| encounter.name.as_str())
                .collect();
            anyhow::bail!(
                "Unknown encounter '{}'\n\nAvailable encounters: {}",
                self.encounter,
                known.join(", ")
            );
        };

        let random = match self.resume {
            Some(bits) => RandomSource::Resume(RngState::from_bits(bits)),
            None => RandomSource::Seed(self.seed.or(env.seed).unwrap_or(0)),
        };
        let request = BattleRequest::new(roster.party.clone(), encounter.enemies.clone(), random);

        let engine = BattleEngine::new(&catalog, &config);
        let result = engine
            .resolve(request)
            .with_context(|| format!("Failed to resolve encounter '{}'", encounter.name))?;

        let bytes = result.log.encode().context("Failed to encode battle log")?;
        let digest = hex::encode(result.log.digest().context("Failed to hash battle log")?);

        report::print_log(&result.log, self.format)?;
        if self.format == OutputFormat::Summary {
            report::print_standings(&result, &result.log);
            println!();
            println!("Digest:    {}", digest);
            println!("RNG state: {} (pass to --resume)", result.rng_state.to_bits());
        }

        if !self.no_write {
            let log_dir = self
                .log_dir
                .or(env.log_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
            std::fs::create_dir_all(&log_dir)
                .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
            let path = log_dir.join(format!("battle_{}.bin", &digest[..8]));
            std::fs::write(&path, &bytes)
                .with_context(|| format!("Failed to write battle log: {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = bytes.len(), "battle log written");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn run(args: &[&str]) -> Result<()> {
        let mut argv = vec!["run"];
        argv.extend_from_slice(args);
        Run::try_parse_from(argv)?.execute()
    }

    #[test]
    fn writes_a_decodable_log() {
        let dir = TempDir::new().unwrap();
        let log_dir = dir.path().to_str().unwrap();
        run(&["--encounter", "goblin raid", "--seed", "3", "--log-dir", log_dir]).unwrap();

        let written: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(written.len(), 1);
        let bytes = std::fs::read(written[0].as_ref().unwrap().path()).unwrap();
        assert!(battle_core::BattleLog::decode(&bytes).is_ok());
    }

    #[test]
    fn unknown_encounter_lists_the_known_ones() {
        let err = run(&["--encounter", "Moon Base", "--no-write"]).unwrap_err();
        assert!(err.to_string().contains("Goblin Raid"));
    }

    #[test]
    fn seed_and_resume_are_exclusive() {
        assert!(Run::try_parse_from(["run", "-e", "x", "--seed", "1", "--resume", "2"]).is_err());
    }
}
