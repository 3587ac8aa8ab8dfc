//! Skill-effect compilation.
//!
//! Skills arrive as generic [`SkillEffectRecord`]s. Before a battle starts,
//! each combatant's records are compiled once into a [`SkillEffectBundle`];
//! handlers only ever read the bundle.
mod compiler;
mod effects;
mod error;
mod record;

pub use compiler::{SkillEffectKind, compile_skill_effects};
pub use effects::{
    NecromancerEffect, ResurrectionEffect, SkillEffectBundle, SpecialAttack,
    SpecialAttackVariant, SpellChargeModifier,
};
pub use error::SkillCompileError;
pub use record::SkillEffectRecord;
