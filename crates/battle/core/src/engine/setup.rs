//! Battle construction: validates rosters and builds the initial state.
//!
//! Everything that could make resolution fail is checked here, so the turn
//! loop never meets a configuration error after the first draw.

use super::errors::BattleError;
use crate::config::BattleConfig;
use crate::env::{CatalogOracle, SpellCategory};
use crate::skill::{SkillEffectBundle, compile_skill_effects};
use crate::state::{ActorIndex, BattleActor, BattleState, CombatantSpec, ResourcePool, Side, SpellCharges};

/// Builds the battle state, players first.
pub fn build_state(
    players: Vec<CombatantSpec>,
    enemies: Vec<CombatantSpec>,
    catalog: &dyn CatalogOracle,
) -> Result<BattleState, BattleError> {
    if players.is_empty() {
        return Err(BattleError::EmptyRoster(Side::Player));
    }
    if enemies.is_empty() {
        return Err(BattleError::EmptyRoster(Side::Enemy));
    }
    let count = players.len() + enemies.len();
    if count > BattleConfig::MAX_COMBATANTS {
        return Err(BattleError::TooManyCombatants {
            count,
            limit: BattleConfig::MAX_COMBATANTS,
        });
    }

    let roster = players
        .into_iter()
        .map(|spec| (Side::Player, spec))
        .chain(enemies.into_iter().map(|spec| (Side::Enemy, spec)));

    let mut actors = Vec::with_capacity(count);
    for (position, (side, spec)) in roster.enumerate() {
        let bundle = validate_combatant(&spec, side, catalog)?;
        let resources = initial_resources(&spec, &bundle, catalog)?;
        actors.push(BattleActor::new(ActorIndex(position as u16), side, spec, bundle, resources));
    }
    Ok(BattleState::new(actors))
}

/// Runs the per-combatant checks of battle construction and returns the
/// compiled skill bundle. Content tooling uses this to vet rosters up front.
pub fn validate_combatant(
    spec: &CombatantSpec,
    side: Side,
    catalog: &dyn CatalogOracle,
) -> Result<SkillEffectBundle, BattleError> {
    validate_spec(spec, side, catalog)?;
    let bundle = compile_skill_effects(&spec.skills, catalog).map_err(|source| BattleError::SkillCompile {
        name: spec.name.clone(),
        source,
    })?;
    if bundle.weight() <= 0.0 {
        return Err(BattleError::ZeroTargetingWeight {
            name: spec.name.clone(),
        });
    }
    Ok(bundle)
}

fn validate_spec(spec: &CombatantSpec, side: Side, catalog: &dyn CatalogOracle) -> Result<(), BattleError> {
    if spec.slot.0 == 0 {
        return Err(BattleError::InvalidFormation {
            name: spec.name.clone(),
            slot: spec.slot.0,
        });
    }
    if spec.stats.max_hp == 0 {
        return Err(BattleError::ZeroMaxHp {
            name: spec.name.clone(),
        });
    }
    if !spec.rates.has_choice() {
        return Err(BattleError::ZeroActionWeights {
            name: spec.name.clone(),
        });
    }
    if side == Side::Player && !spec.enemy_skills.is_empty() {
        return Err(BattleError::EnemySkillsOnPlayer {
            name: spec.name.clone(),
        });
    }

    let unknown = |source| BattleError::UnknownDefinition {
        name: spec.name.clone(),
        source,
    };
    for &spell in &spec.spells {
        let definition = catalog.require_spell(spell).map_err(unknown)?;
        let needs_status = matches!(definition.category, SpellCategory::Buff | SpellCategory::Status);
        if needs_status && definition.status.is_none() {
            return Err(BattleError::InvalidSpell {
                spell,
                reason: "buff and status spells need a status",
            });
        }
        if let Some(status) = definition.status {
            catalog.require_status(status).map_err(unknown)?;
        }
    }
    for &skill in &spec.enemy_skills {
        let definition = catalog.require_enemy_skill(skill).map_err(unknown)?;
        if let Some(status) = definition.kind.referenced_status() {
            catalog.require_status(status).map_err(unknown)?;
        }
    }
    Ok(())
}

/// Starting charges: base charges plus the bundle's initial bonus; the
/// restorable maximum adds the extra bonus on top.
fn initial_resources(
    spec: &CombatantSpec,
    bundle: &SkillEffectBundle,
    catalog: &dyn CatalogOracle,
) -> Result<ResourcePool, BattleError> {
    let mut resources = ResourcePool::default();
    for &spell in &spec.spells {
        let definition = catalog.require_spell(spell)?;
        let current = definition.base_charges.saturating_add(bundle.spell_charges.initial);
        let max = current.saturating_add(bundle.spell_charges.extra);
        resources.spells.insert(spell, SpellCharges { current, max });
    }
    resources.breath_charges = spec.breath_charges.saturating_add(bundle.breath_extra_charges);
    Ok(resources)
}
