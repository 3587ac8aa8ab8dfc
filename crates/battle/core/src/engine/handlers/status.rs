//! Status application and the end-of-turn tick.

use super::{inflict, resurrection};
use crate::combat::tick_damage;
use crate::engine::context::BattleContext;
use crate::engine::errors::BattleError;
use crate::env::StatusTags;
use crate::log::{ActionKind, BattleAction, EffectFlags, EffectKind, EffectRecord};
use crate::state::{ActorIndex, ApplyOutcome, StatusId, StatusInstance};

/// Tries to put `status` on `target`. Returns whether it took hold.
///
/// # Draw order
///
/// Immune or dead targets consume nothing. Otherwise exactly one luck gate
/// with the source's luck.
///
/// # Formula
///
/// ```text
/// chance = base_chance * source_chance / 100 * (1 - resistance)
/// ```
pub fn apply_status(
    ctx: &mut BattleContext<'_>,
    source: ActorIndex,
    target: ActorIndex,
    status: StatusId,
    source_chance_percent: f64,
    entry: &mut BattleAction,
) -> Result<bool, BattleError> {
    let catalog = ctx.catalog;
    let definition = catalog.require_status(status)?;
    let defender = ctx.state.actor(target);
    if !defender.is_alive() {
        return Ok(false);
    }
    if defender.bundle.is_immune(status, definition.tags) {
        entry.push(
            EffectRecord::new(EffectKind::StatusResisted, target)
                .with_status(status)
                .with_flags(EffectFlags::IMMUNE),
        );
        return Ok(false);
    }

    let resistance = defender.bundle.resistance_to(status).clamp(0.0, 1.0);
    let chance = definition.base_chance_percent * source_chance_percent / 100.0 * (1.0 - resistance);
    let luck = ctx.state.actor(source).luck();
    if !ctx.rng.luck_gate(chance, luck) {
        entry.push(EffectRecord::new(EffectKind::StatusResisted, target).with_status(status));
        return Ok(false);
    }

    if definition.tags.contains(StatusTags::INSTANT_DEATH) {
        entry.push(
            EffectRecord::new(EffectKind::StatusApplied, target)
                .with_status(status)
                .with_flags(EffectFlags::INSTANT_DEATH),
        );
        let hp = ctx.state.actor(target).hp();
        inflict(ctx, target, hp, EffectFlags::INSTANT_DEATH, entry)?;
        return Ok(true);
    }

    let instance = StatusInstance::from_definition(definition);
    let remaining = instance.remaining.map_or(0, u32::from);
    let effect = match ctx.state.actor_mut(target).statuses.apply(instance) {
        ApplyOutcome::Applied => EffectRecord::new(EffectKind::StatusApplied, target).with_value(remaining),
        ApplyOutcome::Refreshed => EffectRecord::new(EffectKind::StatusApplied, target)
            .with_value(remaining)
            .with_flags(EffectFlags::REFRESHED),
        ApplyOutcome::Full => EffectRecord::new(EffectKind::StatusResisted, target).with_flags(EffectFlags::LIST_FULL),
    };
    let took_hold = effect.kind == EffectKind::StatusApplied;
    entry.push(effect.with_status(status));
    Ok(took_hold)
}

/// End-of-turn phase: status damage and countdown, auto-repair, necromancy.
///
/// Ticks and repairs share one system entry, recorded only when something
/// happened.
pub fn end_of_turn(ctx: &mut BattleContext<'_>) -> Result<(), BattleError> {
    let mut entry = BattleAction::new(ctx.turn(), None, ActionKind::StatusTick);

    for position in 0..ctx.state.len() {
        let index = ActorIndex(position as u16);
        tick_actor(ctx, index, &mut entry)?;
    }

    for position in 0..ctx.state.len() {
        let index = ActorIndex(position as u16);
        let actor = ctx.state.actor_mut(index);
        if !actor.is_alive() || !actor.bundle.auto_repair {
            continue;
        }
        if let Some(debuff) = actor.statuses.oldest_debuff() {
            actor.statuses.remove(debuff);
            entry.push(
                EffectRecord::new(EffectKind::StatusCleansed, index)
                    .with_status(debuff)
                    .with_flags(EffectFlags::AUTO_REPAIR),
            );
        }
    }

    if !entry.effects.is_empty() {
        ctx.record(entry);
    }
    resurrection::necromancy(ctx)
}

fn tick_actor(ctx: &mut BattleContext<'_>, index: ActorIndex, entry: &mut BattleAction) -> Result<(), BattleError> {
    if !ctx.state.is_alive(index) {
        return Ok(());
    }
    let ticking: Vec<(StatusId, f64)> = ctx
        .state
        .actor(index)
        .statuses
        .iter()
        .map(|instance| (instance.id, instance.tick_damage_percent))
        .collect();

    for (status, percent) in ticking {
        // Revival may have stripped statuses collected above.
        if !ctx.state.actor(index).statuses.contains(status) {
            continue;
        }
        let actor = ctx.state.actor_mut(index);
        let damage = tick_damage(actor.max_hp(), percent);
        if damage > 0 {
            actor.take_damage(damage);
            entry.push(
                EffectRecord::new(EffectKind::StatusTick, index)
                    .with_value(damage)
                    .with_status(status),
            );
            if !ctx.state.is_alive(index) {
                entry.push(EffectRecord::new(EffectKind::Death, index));
                resurrection::on_death(ctx, index, entry)?;
                if !ctx.state.is_alive(index) {
                    return Ok(());
                }
            }
        }
        if ctx.state.actor_mut(index).statuses.count_down(status) {
            entry.push(EffectRecord::new(EffectKind::StatusExpired, index).with_status(status));
        }
    }
    Ok(())
}
