//! Enemy special skills.

use super::physical::strike_targets;
use super::{breath, log_redirects, magic, reaction, restore, status};
use crate::combat::heal_amount;
use crate::engine::context::BattleContext;
use crate::engine::errors::BattleError;
use crate::env::{EnemySkillDefinition, EnemySkillKind};
use crate::log::{ActionKind, BattleAction, EffectFlags, EffectKind, EffectRecord};
use crate::state::ActorIndex;
use crate::targeting::AllyPreference;

/// Tries the actor's skills in pool order; the first that passes its gate runs.
///
/// # Draw order
///
/// One `next_bool` per skill with uses left, until one succeeds. Returns
/// `Ok(true)` when a skill consumed the turn.
pub fn try_skills(ctx: &mut BattleContext<'_>, actor: ActorIndex) -> Result<bool, BattleError> {
    let catalog = ctx.catalog;
    let pool = ctx.state.actor(actor).enemy_skills.clone();

    for skill in pool {
        let definition = catalog.require_enemy_skill(skill)?;
        let used = ctx.state.actor(actor).resources.enemy_skill_uses(skill);
        if definition.uses_per_battle > 0 && used >= definition.uses_per_battle {
            continue;
        }
        if !ctx.rng.next_bool(definition.chance_percent / 100.0) {
            continue;
        }
        if !has_target(ctx, actor, definition) {
            tracing::trace!(actor = %actor, skill = %skill, "enemy skill has no target");
            continue;
        }
        execute(ctx, actor, definition)?;
        return Ok(true);
    }
    Ok(false)
}

fn has_target(ctx: &BattleContext<'_>, actor: ActorIndex, definition: &EnemySkillDefinition) -> bool {
    match definition.kind {
        EnemySkillKind::Heal { .. } => {
            let side = ctx.state.actor(actor).side;
            ctx.state
                .living(side)
                .into_iter()
                .any(|ally| ctx.state.actor(ally).hp() < ctx.state.actor(ally).max_hp())
        }
        EnemySkillKind::Guard => ctx.state.is_alive(actor),
        _ => ctx.has_candidates(actor, definition.targeting),
    }
}

fn execute(
    ctx: &mut BattleContext<'_>,
    actor: ActorIndex,
    definition: &EnemySkillDefinition,
) -> Result<(), BattleError> {
    ctx.state
        .actor_mut(actor)
        .resources
        .record_enemy_skill_use(definition.id);
    tracing::debug!(actor = %actor, skill = %definition.id, name = %definition.name, "enemy skill triggered");

    let mut entry = BattleAction::by(ctx.turn(), actor, ActionKind::EnemySkill)
        .with_skill(definition.id.0)
        .with_flags(EffectFlags::SKILL);

    if let EnemySkillKind::Guard = definition.kind {
        ctx.state.actor_mut(actor).resources.guard = true;
        entry.push(EffectRecord::new(EffectKind::GuardRaised, actor));
        ctx.record(entry);
        return Ok(());
    }

    let preference = match definition.kind {
        EnemySkillKind::Heal { .. } => AllyPreference::MostWounded,
        _ => AllyPreference::Weighted,
    };
    let resolved = ctx.resolve_targets(actor, definition.targeting, preference)?;

    match definition.kind {
        EnemySkillKind::Physical { multiplier, hits } => {
            let (counters, killed_any) = strike_targets(
                ctx,
                actor,
                &resolved,
                u32::from(hits.max(1)),
                multiplier,
                EffectFlags::SKILL,
                &mut entry,
            )?;
            ctx.record(entry);
            reaction::counter_attacks(ctx, actor, counters.as_slice())?;
            if killed_any {
                reaction::pursuit(ctx, actor)?;
            }
            return Ok(());
        }
        EnemySkillKind::Magical { multiplier } => {
            log_redirects(&mut entry, &resolved.redirects);
            let mut survivors = Vec::new();
            for &target in &resolved.targets {
                if !ctx.state.is_alive(target) {
                    continue;
                }
                let inflicted = magic::magic_hit(
                    ctx,
                    actor,
                    target,
                    multiplier,
                    definition.element,
                    EffectFlags::SKILL,
                    &mut entry,
                )?;
                if !inflicted.killed && !survivors.contains(&target) {
                    survivors.push(target);
                }
            }
            ctx.record(entry);
            return reaction::magic_counters(ctx, actor, &survivors);
        }
        EnemySkillKind::Breath { multiplier } => {
            log_redirects(&mut entry, &resolved.redirects);
            for &target in &resolved.targets {
                if ctx.state.is_alive(target) {
                    breath::breath_hit(
                        ctx,
                        actor,
                        target,
                        multiplier,
                        definition.element,
                        EffectFlags::SKILL,
                        &mut entry,
                    )?;
                }
            }
        }
        EnemySkillKind::Status { status: applied, chance_percent } => {
            log_redirects(&mut entry, &resolved.redirects);
            for &target in &resolved.targets {
                status::apply_status(ctx, actor, target, applied, chance_percent, &mut entry)?;
            }
        }
        EnemySkillKind::Heal { percent } => {
            for &target in &resolved.targets {
                let max_hp = f64::from(ctx.state.actor(target).max_hp());
                let amount = heal_amount(max_hp * percent / 100.0, 1.0, ctx.healing_penalty(target));
                restore(ctx, target, amount, EffectFlags::SKILL, &mut entry);
            }
        }
        EnemySkillKind::Buff { status: applied } => {
            for &target in &resolved.targets {
                status::apply_status(ctx, actor, target, applied, 100.0, &mut entry)?;
            }
        }
        EnemySkillKind::Guard => {}
    }
    ctx.record(entry);
    Ok(())
}

