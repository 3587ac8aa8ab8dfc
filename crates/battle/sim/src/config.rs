//! Simulator defaults read from the environment.
use std::env;
use std::path::PathBuf;

/// Defaults for `run`, overridable by command-line flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimConfig {
    pub seed: Option<u64>,
    pub max_turns: Option<u32>,
    pub log_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_SEED` - Seed of the random source (default: 0)
    /// - `BATTLE_MAX_TURNS` - Turn cap overriding `battle.toml`
    /// - `BATTLE_LOG_DIR` - Directory receiving encoded logs (default: `battle-logs`)
    /// - `BATTLE_DATA_DIR` - Content directory (default: the bundled sample data)
    pub fn from_env() -> Self {
        Self {
            seed: read_env::<u64>("BATTLE_SEED"),
            max_turns: read_env::<u32>("BATTLE_MAX_TURNS").map(|turns| turns.max(1)),
            log_dir: env::var("BATTLE_LOG_DIR").ok().map(PathBuf::from),
            data_dir: env::var("BATTLE_DATA_DIR").ok().map(PathBuf::from),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
