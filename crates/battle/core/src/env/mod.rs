//! Read-only combat definitions.
//!
//! The catalog holds status effects, spells, and enemy skills keyed by small
//! integer ids. The engine only reads it through [`CatalogOracle`], so content
//! can come from loaded files, fixtures, or any other store.
mod enemy_skills;
mod error;
mod snapshot;
mod spells;
mod status;

pub use enemy_skills::{EnemySkillDefinition, EnemySkillKind};
pub use error::OracleError;
pub use snapshot::CatalogSnapshot;
pub use spells::{CastCondition, SpellCategory, SpellDefinition, SpellSchool};
pub use status::{StatusDefinition, StatusTags};

use crate::state::{EnemySkillId, SpellId, StatusId};

/// Lookup of combat definitions by id.
pub trait CatalogOracle {
    fn status(&self, id: StatusId) -> Option<&StatusDefinition>;

    fn spell(&self, id: SpellId) -> Option<&SpellDefinition>;

    fn enemy_skill(&self, id: EnemySkillId) -> Option<&EnemySkillDefinition>;

    /// Returns the status definition, or an error if it is missing.
    fn require_status(&self, id: StatusId) -> Result<&StatusDefinition, OracleError> {
        self.status(id).ok_or(OracleError::StatusNotFound(id))
    }

    fn require_spell(&self, id: SpellId) -> Result<&SpellDefinition, OracleError> {
        self.spell(id).ok_or(OracleError::SpellNotFound(id))
    }

    fn require_enemy_skill(&self, id: EnemySkillId) -> Result<&EnemySkillDefinition, OracleError> {
        self.enemy_skill(id).ok_or(OracleError::EnemySkillNotFound(id))
    }
}
