//! Catalog access errors.

use crate::error::{CombatError, ErrorSeverity};
use crate::state::{EnemySkillId, SpellId, StatusId};
use crate::targeting::TargetingMode;

/// Errors raised when a catalog lookup or catalog construction fails.
///
/// Every variant is an authoring bug in the catalog itself, so all of them are
/// configuration errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("status definition {0} not found")]
    StatusNotFound(StatusId),

    #[error("spell definition {0} not found")]
    SpellNotFound(SpellId),

    #[error("enemy skill definition {0} not found")]
    EnemySkillNotFound(EnemySkillId),

    #[error("duplicate catalog entry {0}")]
    DuplicateEntry(String),

    #[error("{entry} aims {targeting:?} at the wrong side for its effect")]
    TargetingMismatch {
        entry: String,
        targeting: TargetingMode,
    },
}

impl CombatError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Configuration
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            StatusNotFound(_) => "ORACLE_STATUS_NOT_FOUND",
            SpellNotFound(_) => "ORACLE_SPELL_NOT_FOUND",
            EnemySkillNotFound(_) => "ORACLE_ENEMY_SKILL_NOT_FOUND",
            DuplicateEntry(_) => "ORACLE_DUPLICATE_ENTRY",
            TargetingMismatch { .. } => "ORACLE_TARGETING_MISMATCH",
        }
    }
}
