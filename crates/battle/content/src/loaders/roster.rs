//! Party and encounter roster loader.

use std::path::Path;

use anyhow::Context;
use battle_core::{CatalogOracle, CombatantSpec, Side, validate_combatant};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// A named enemy group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub name: String,
    pub enemies: Vec<CombatantSpec>,
}

/// Roster structure for RON files: one party and the encounters it can face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub party: Vec<CombatantSpec>,
    #[serde(default)]
    pub encounters: Vec<Encounter>,
}

impl Roster {
    /// Looks up an encounter by name, ignoring ASCII case.
    pub fn encounter(&self, name: &str) -> Option<&Encounter> {
        self.encounters
            .iter()
            .find(|encounter| encounter.name.eq_ignore_ascii_case(name))
    }

    /// Checks every combatant against `catalog` with the engine's own
    /// construction rules.
    pub fn validate(&self, catalog: &dyn CatalogOracle) -> LoadResult<()> {
        for spec in &self.party {
            validate_combatant(spec, Side::Player, catalog)
                .with_context(|| format!("Party member '{}' is invalid", spec.name))?;
        }
        for encounter in &self.encounters {
            anyhow::ensure!(
                !encounter.enemies.is_empty(),
                "Encounter '{}' has no enemies",
                encounter.name
            );
            for spec in &encounter.enemies {
                validate_combatant(spec, Side::Enemy, catalog).with_context(|| {
                    format!("Enemy '{}' of encounter '{}' is invalid", spec.name, encounter.name)
                })?;
            }
        }
        Ok(())
    }
}

/// Loader for rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file and vet it against `catalog`.
    pub fn load(path: &Path, catalog: &dyn CatalogOracle) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content, catalog).with_context(|| format!("Invalid roster {}", path.display()))
    }

    /// Parse roster RON text and vet it against `catalog`.
    pub fn parse(content: &str, catalog: &dyn CatalogOracle) -> LoadResult<Roster> {
        let roster: Roster =
            ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;
        anyhow::ensure!(!roster.party.is_empty(), "Roster has an empty party");
        roster.validate(catalog)?;

        tracing::debug!(
            party = roster.party.len(),
            encounters = roster.encounters.len(),
            "roster loaded"
        );
        Ok(roster)
    }
}
