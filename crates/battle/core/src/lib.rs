//! Deterministic turn-based party-versus-enemy combat.
//!
//! `battle-core` resolves one battle from two rosters, a read-only catalog of
//! spells, statuses, and enemy skills, a rule config, and a seed. The result is
//! an append-only [`log::BattleLog`] that replays bit for bit from the same
//! inputs. All resolution flows through [`engine::BattleEngine`]; the crate does
//! no I/O and holds no global state.
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod log;
pub mod result;
pub mod rng;
pub mod skill;
pub mod state;
pub mod stats;
pub mod targeting;

pub use config::BattleConfig;
pub use engine::{
    BattleEngine, BattleError, BattleRequest, RandomSource, resolve_battle, validate_combatant,
};
pub use env::{
    CastCondition, CatalogOracle, CatalogSnapshot, EnemySkillDefinition, EnemySkillKind,
    OracleError, SpellCategory, SpellDefinition, SpellSchool, StatusDefinition, StatusTags,
};
pub use error::{CombatError, ErrorSeverity};
#[cfg(feature = "serde")]
pub use log::LogCodecError;
pub use log::{
    ActionKind, BattleAction, BattleLog, BattleOutcome, EffectFlags, EffectKind, EffectRecord,
};
pub use result::{BattleResult, CombatantOutcome};
pub use rng::{BattleRandom, RngState};
pub use skill::{SkillEffectBundle, SkillEffectRecord, SkillCompileError, compile_skill_effects};
pub use state::{
    ActorIndex, BattleActor, BattleState, CombatantSpec, EnemySkillId, FormationSlot, Side,
    SkillId, SpellId, StatusId, Turn,
};
pub use stats::{
    ActionRates, CombatSnapshot, CoreAttributes, DamageCategory, Element, Resistances, StatKind,
};
pub use targeting::TargetingMode;
