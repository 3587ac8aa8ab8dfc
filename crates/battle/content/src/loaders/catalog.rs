//! Combat catalog loader.

use std::path::Path;

use anyhow::Context;
use battle_core::{CatalogSnapshot, EnemySkillDefinition, SpellDefinition, StatusDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFile {
    pub statuses: Vec<StatusDefinition>,
    pub spells: Vec<SpellDefinition>,
    pub enemy_skills: Vec<EnemySkillDefinition>,
}

/// Loader for the combat catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load the catalog from a RON file.
    ///
    /// Duplicate ids and references to statuses the file does not define are
    /// rejected here rather than at battle time.
    pub fn load(path: &Path) -> LoadResult<CatalogSnapshot> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid catalog {}", path.display()))
    }

    /// Parse catalog RON text.
    pub fn parse(content: &str) -> LoadResult<CatalogSnapshot> {
        let file: CatalogFile =
            ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;

        tracing::debug!(
            statuses = file.statuses.len(),
            spells = file.spells.len(),
            enemy_skills = file.enemy_skills.len(),
            "catalog parsed"
        );

        let catalog = CatalogSnapshot::from_definitions(file.statuses, file.spells, file.enemy_skills)?;
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use battle_core::{CatalogOracle, SpellId, StatusId, StatusTags};

    use super::*;

    #[test]
    fn parses_minimal_catalog() {
        let catalog = CatalogLoader::parse(
            r#"(
                statuses: [
                    (id: 1, name: "Poison", duration: Some(3), tick_damage_percent: 5.0, tags: "DEBUFF | POISON"),
                ],
                spells: [
                    (id: 7, name: "Spark", school: Mage, tier: 1, category: Damage,
                     targeting: SingleEnemy, base_charges: 2),
                ],
            )"#,
        )
        .unwrap();

        let poison = catalog.status(StatusId(1)).unwrap();
        assert_eq!(poison.tags, StatusTags::DEBUFF | StatusTags::POISON);
        assert_eq!(poison.base_chance_percent, 100.0);
        assert_eq!(catalog.spell(SpellId(7)).unwrap().multiplier, 1.0);
    }

    #[test]
    fn dangling_status_reference_is_rejected() {
        let result = CatalogLoader::parse(
            r#"(
                spells: [
                    (id: 1, name: "Hex", school: Mage, tier: 1, category: Status,
                     targeting: SingleEnemy, base_charges: 1, status: Some(9)),
                ],
            )"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn malformed_ron_reports_parse_failure() {
        let err = CatalogLoader::parse("(statuses: [").unwrap_err();
        assert!(err.to_string().contains("Failed to parse catalog RON"));
    }
}
