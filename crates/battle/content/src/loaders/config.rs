//! Battle rules loader.

use std::path::Path;

use anyhow::Context;
use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their [`BattleConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid battle config {}", path.display()))
    }

    /// Parse config TOML text.
    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig =
            toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        anyhow::ensure!(config.max_turns > 0, "max_turns must be at least 1");
        anyhow::ensure!(config.front_row_size > 0, "front_row_size must be at least 1");
        anyhow::ensure!(config.sweep_targets > 0, "sweep_targets must be at least 1");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("max_turns = 30\nparry_chance_percent = 35.0\n").unwrap();
        assert_eq!(config.max_turns, 30);
        assert_eq!(config.parry_chance_percent, 35.0);
        assert_eq!(config.front_row_size, BattleConfig::DEFAULT_FRONT_ROW_SIZE);
        assert_eq!(config.drain_ratio, BattleConfig::default().drain_ratio);
    }

    #[test]
    fn zero_turn_cap_is_rejected() {
        assert!(ConfigLoader::parse("max_turns = 0").is_err());
    }
}
