//! In-memory catalog backed by ordered maps.

use std::collections::BTreeMap;
use std::fmt::Display;

use super::{
    CatalogOracle, EnemySkillDefinition, OracleError, SpellDefinition, StatusDefinition,
};
use crate::state::{EnemySkillId, SpellId, StatusId};
use crate::targeting::TargetingMode;

/// Owned catalog of every definition a battle may reference.
///
/// `BTreeMap` keeps iteration order stable, so anything derived from a walk
/// over the catalog is deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogSnapshot {
    statuses: BTreeMap<StatusId, StatusDefinition>,
    spells: BTreeMap<SpellId, SpellDefinition>,
    enemy_skills: BTreeMap<EnemySkillId, EnemySkillDefinition>,
}

impl CatalogSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting duplicate ids, definitions that point at
    /// statuses the catalog does not contain, and definitions aimed at the
    /// wrong side.
    pub fn from_definitions(
        statuses: impl IntoIterator<Item = StatusDefinition>,
        spells: impl IntoIterator<Item = SpellDefinition>,
        enemy_skills: impl IntoIterator<Item = EnemySkillDefinition>,
    ) -> Result<Self, OracleError> {
        let mut catalog = Self::new();
        for status in statuses {
            catalog.insert_status(status)?;
        }
        for spell in spells {
            catalog.insert_spell(spell)?;
        }
        for skill in enemy_skills {
            catalog.insert_enemy_skill(skill)?;
        }
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn insert_status(&mut self, definition: StatusDefinition) -> Result<(), OracleError> {
        let id = definition.id;
        if self.statuses.insert(id, definition).is_some() {
            return Err(OracleError::DuplicateEntry(id.to_string()));
        }
        Ok(())
    }

    pub fn insert_spell(&mut self, definition: SpellDefinition) -> Result<(), OracleError> {
        let id = definition.id;
        if self.spells.insert(id, definition).is_some() {
            return Err(OracleError::DuplicateEntry(id.to_string()));
        }
        Ok(())
    }

    pub fn insert_enemy_skill(
        &mut self,
        definition: EnemySkillDefinition,
    ) -> Result<(), OracleError> {
        let id = definition.id;
        if self.enemy_skills.insert(id, definition).is_some() {
            return Err(OracleError::DuplicateEntry(id.to_string()));
        }
        Ok(())
    }

    /// Checks cross references between definitions, and that supportive
    /// effects aim at the caster's side while hostile ones aim at opponents.
    pub fn validate(&self) -> Result<(), OracleError> {
        for spell in self.spells.values() {
            if let Some(status) = spell.status {
                self.require_status(status)?;
            }
            check_targeting(spell.id, spell.targets_allies(), spell.targeting)?;
        }
        for skill in self.enemy_skills.values() {
            if let Some(status) = skill.kind.referenced_status() {
                self.require_status(status)?;
            }
            check_targeting(skill.id, skill.kind.targets_allies(), skill.targeting)?;
        }
        Ok(())
    }

    pub fn status_count(&self) -> usize {
        self.statuses.len()
    }

    pub fn spell_count(&self) -> usize {
        self.spells.len()
    }

    pub fn enemy_skill_count(&self) -> usize {
        self.enemy_skills.len()
    }
}

fn check_targeting(entry: impl Display, allies: bool, targeting: TargetingMode) -> Result<(), OracleError> {
    if allies == targeting.is_offensive() {
        return Err(OracleError::TargetingMismatch {
            entry: entry.to_string(),
            targeting,
        });
    }
    Ok(())
}

impl CatalogOracle for CatalogSnapshot {
    fn status(&self, id: StatusId) -> Option<&StatusDefinition> {
        self.statuses.get(&id)
    }

    fn spell(&self, id: SpellId) -> Option<&SpellDefinition> {
        self.spells.get(&id)
    }

    fn enemy_skill(&self, id: EnemySkillId) -> Option<&EnemySkillDefinition> {
        self.enemy_skills.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{EnemySkillKind, SpellCategory, SpellSchool};
    use crate::targeting::TargetingMode;

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = CatalogSnapshot::from_definitions(
            [
                StatusDefinition::new(StatusId(1), "Poison", Some(3)),
                StatusDefinition::new(StatusId(1), "Venom", Some(5)),
            ],
            [],
            [],
        );
        assert_eq!(
            result.unwrap_err(),
            OracleError::DuplicateEntry("status:1".into())
        );
    }

    #[test]
    fn dangling_status_references_are_rejected() {
        let spell = SpellDefinition::new(
            SpellId(2),
            "Sleep Cloud",
            SpellSchool::Mage,
            1,
            SpellCategory::Status,
            TargetingMode::All,
            2,
        )
        .with_status(StatusId(9), 60.0);
        let result = CatalogSnapshot::from_definitions([], [spell], []);
        assert_eq!(result.unwrap_err(), OracleError::StatusNotFound(StatusId(9)));

        let skill = EnemySkillDefinition::new(
            EnemySkillId(41),
            "Lullaby",
            EnemySkillKind::Status {
                status: StatusId(4),
                chance_percent: 50.0,
            },
            TargetingMode::SingleEnemy,
            30.0,
        );
        let result = CatalogSnapshot::from_definitions([], [], [skill]);
        assert_eq!(result.unwrap_err(), OracleError::StatusNotFound(StatusId(4)));
    }

    #[test]
    fn lookups_return_inserted_definitions() {
        let catalog = CatalogSnapshot::from_definitions(
            [StatusDefinition::new(StatusId(1), "Poison", Some(3))],
            [],
            [],
        )
        .unwrap();
        assert_eq!(catalog.status(StatusId(1)).unwrap().name, "Poison");
        assert_eq!(catalog.status_count(), 1);
        assert_eq!(catalog.spell_count(), 0);
        assert_eq!(catalog.enemy_skill_count(), 0);
        assert!(catalog.spell(SpellId(1)).is_none());
        assert_eq!(
            catalog.require_spell(SpellId(1)).unwrap_err(),
            OracleError::SpellNotFound(SpellId(1))
        );
    }

    #[test]
    fn supportive_effects_must_aim_at_allies() {
        let heal = EnemySkillDefinition::new(
            EnemySkillId(51),
            "Regenerate",
            EnemySkillKind::Heal { percent: 100.0 },
            TargetingMode::SingleEnemy,
            20.0,
        );
        let result = CatalogSnapshot::from_definitions([], [], [heal]);
        assert_eq!(
            result.unwrap_err(),
            OracleError::TargetingMismatch {
                entry: "enemy-skill:51".into(),
                targeting: TargetingMode::SingleEnemy,
            }
        );

        let buff = SpellDefinition::new(
            SpellId(5),
            "Attack Up",
            SpellSchool::Priest,
            2,
            SpellCategory::Buff,
            TargetingMode::All,
            1,
        )
        .with_status(StatusId(1), 100.0);
        let result = CatalogSnapshot::from_definitions(
            [StatusDefinition::new(StatusId(1), "Attack Up", Some(3))],
            [buff],
            [],
        );
        assert!(matches!(result, Err(OracleError::TargetingMismatch { .. })));
    }

    #[test]
    fn hostile_effects_must_aim_at_opponents() {
        let arrow = SpellDefinition::new(
            SpellId(1),
            "Magic Arrow",
            SpellSchool::Mage,
            1,
            SpellCategory::Damage,
            TargetingMode::SingleAlly,
            3,
        );
        let result = CatalogSnapshot::from_definitions([], [arrow], []);
        assert_eq!(
            result.unwrap_err(),
            OracleError::TargetingMismatch {
                entry: "spell:1".into(),
                targeting: TargetingMode::SingleAlly,
            }
        );

        let guard = EnemySkillDefinition::new(
            EnemySkillId(62),
            "Harden",
            EnemySkillKind::Guard,
            TargetingMode::SelfOnly,
            15.0,
        );
        assert!(CatalogSnapshot::from_definitions([], [], [guard]).is_ok());
    }
}
