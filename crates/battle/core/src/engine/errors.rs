//! Errors that abort a battle before or during resolution.

use crate::env::OracleError;
use crate::error::{CombatError, ErrorSeverity};
use crate::skill::SkillCompileError;
use crate::state::{ActorIndex, Side, SpellId};

/// Configuration error that prevents a battle from being resolved.
///
/// All of these are detected while the battle is set up, before the first
/// random draw or log entry, except `ZeroTargetWeights` (raised by a weighted
/// pick whose candidates all weigh zero) and `MissingDefinition`, which can
/// only surface if a catalog changes underneath a running battle.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BattleError {
    #[error("{0} roster is empty")]
    EmptyRoster(Side),

    #[error("{count} combatants exceed the limit of {limit}")]
    TooManyCombatants { count: usize, limit: usize },

    #[error("combatant '{name}' has invalid formation slot {slot}")]
    InvalidFormation { name: String, slot: u8 },

    #[error("combatant '{name}' has zero max HP")]
    ZeroMaxHp { name: String },

    #[error("combatant '{name}' has no positive action weight")]
    ZeroActionWeights { name: String },

    #[error("combatant '{name}' has no positive targeting weight")]
    ZeroTargetingWeight { name: String },

    #[error("every candidate target of {actor} has zero targeting weight")]
    ZeroTargetWeights { actor: ActorIndex },

    #[error("combatant '{name}' carries enemy skills but fights for the players")]
    EnemySkillsOnPlayer { name: String },

    #[error("combatant '{name}': {source}")]
    SkillCompile {
        name: String,
        #[source]
        source: SkillCompileError,
    },

    #[error("combatant '{name}': {source}")]
    UnknownDefinition {
        name: String,
        #[source]
        source: OracleError,
    },

    #[error("{spell} is unusable: {reason}")]
    InvalidSpell { spell: SpellId, reason: &'static str },

    #[error("definition vanished during resolution: {0}")]
    MissingDefinition(#[from] OracleError),
}

impl CombatError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingDefinition(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Configuration,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyRoster(_) => "BATTLE_EMPTY_ROSTER",
            Self::TooManyCombatants { .. } => "BATTLE_TOO_MANY_COMBATANTS",
            Self::InvalidFormation { .. } => "BATTLE_INVALID_FORMATION",
            Self::ZeroMaxHp { .. } => "BATTLE_ZERO_MAX_HP",
            Self::ZeroActionWeights { .. } => "BATTLE_ZERO_ACTION_WEIGHTS",
            Self::ZeroTargetingWeight { .. } => "BATTLE_ZERO_TARGETING_WEIGHT",
            Self::ZeroTargetWeights { .. } => "BATTLE_ZERO_TARGET_WEIGHTS",
            Self::EnemySkillsOnPlayer { .. } => "BATTLE_ENEMY_SKILLS_ON_PLAYER",
            Self::SkillCompile { .. } => "BATTLE_SKILL_COMPILE",
            Self::UnknownDefinition { .. } => "BATTLE_UNKNOWN_DEFINITION",
            Self::InvalidSpell { .. } => "BATTLE_INVALID_SPELL",
            Self::MissingDefinition(_) => "BATTLE_MISSING_DEFINITION",
        }
    }
}
