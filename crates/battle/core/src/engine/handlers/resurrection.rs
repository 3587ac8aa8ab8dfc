//! Revival triggers from compiled skill effects.
//!
//! | Variant     | Trigger                        | Restores                          |
//! |-------------|--------------------------------|-----------------------------------|
//! | forced      | on death, luck gate            | HP                                |
//! | vitalize    | on death, luck gate            | HP, spell charges, debuff removal |
//! | necromancer | end of every N-th turn         | HP of the lowest-index fallen ally|
//! | active      | owner's turn, luck gate        | HP of the lowest-index fallen ally|
//!
//! Each variant counts its own triggers against its per-battle cap.

use crate::combat::percent_of_max;
use crate::engine::context::BattleContext;
use crate::engine::errors::BattleError;
use crate::log::{ActionKind, BattleAction, EffectFlags, EffectKind, EffectRecord};
use crate::state::ActorIndex;

/// Runs the on-death variants for a combatant that just fell.
///
/// Forced is tried first; vitalize only when forced did not fire. Each
/// attempted gate consumes one draw.
pub fn on_death(ctx: &mut BattleContext<'_>, fallen: ActorIndex, entry: &mut BattleAction) -> Result<(), BattleError> {
    let actor = ctx.state.actor(fallen);
    let luck = actor.luck();
    let counters = actor.resources.resurrections;
    let forced = actor.bundle.forced_resurrection.filter(|effect| counters.forced < effect.cap);
    let vitalize = actor.bundle.vitalize.filter(|effect| counters.vitalize < effect.cap);

    if let Some(effect) = forced {
        if ctx.rng.luck_gate(effect.chance_percent, luck) {
            ctx.state.actor_mut(fallen).resources.resurrections.forced += 1;
            let hp = revive(ctx, fallen, effect.hp_percent);
            entry.push(
                EffectRecord::new(EffectKind::Revive, fallen)
                    .with_value(hp)
                    .with_flags(EffectFlags::FORCED),
            );
            return Ok(());
        }
    }

    if let Some(effect) = vitalize {
        if ctx.rng.luck_gate(effect.chance_percent, luck) {
            let hp = revive(ctx, fallen, effect.hp_percent);
            let actor = ctx.state.actor_mut(fallen);
            actor.resources.resurrections.vitalize += 1;
            actor.resources.restore_spells();
            let cleansed = actor.statuses.remove_debuffs();
            entry.push(
                EffectRecord::new(EffectKind::Revive, fallen)
                    .with_value(hp)
                    .with_flags(EffectFlags::VITALIZE),
            );
            for status in cleansed {
                entry.push(
                    EffectRecord::new(EffectKind::StatusCleansed, fallen)
                        .with_status(status)
                        .with_flags(EffectFlags::VITALIZE),
                );
            }
        }
    }
    Ok(())
}

/// End-of-turn necromancy. No draws.
pub fn necromancy(ctx: &mut BattleContext<'_>) -> Result<(), BattleError> {
    let turn = ctx.turn();
    for position in 0..ctx.state.len() {
        let necromancer = ActorIndex(position as u16);
        let actor = ctx.state.actor(necromancer);
        if !actor.is_alive() {
            continue;
        }
        let Some(effect) = actor.bundle.necromancer else {
            continue;
        };
        if effect.interval == 0
            || turn % effect.interval != 0
            || actor.resources.resurrections.necromancer >= effect.cap
        {
            continue;
        }
        let Some(&raised) = ctx.state.fallen(actor.side).first() else {
            continue;
        };

        ctx.state.actor_mut(necromancer).resources.resurrections.necromancer += 1;
        let hp = revive(ctx, raised, effect.hp_percent);
        let mut entry = BattleAction::by(turn, necromancer, ActionKind::Resurrection);
        entry.push(
            EffectRecord::new(EffectKind::Revive, raised)
                .with_value(hp)
                .with_flags(EffectFlags::NECROMANCER),
        );
        ctx.record(entry);
    }
    Ok(())
}

/// Active resurrection on the owner's turn. Returns whether the turn was spent.
///
/// Draws one gate only when a fallen ally exists and the cap allows it.
pub fn active(ctx: &mut BattleContext<'_>, reviver: ActorIndex) -> Result<bool, BattleError> {
    let actor = ctx.state.actor(reviver);
    let Some(effect) = actor.bundle.active_resurrection else {
        return Ok(false);
    };
    if actor.resources.resurrections.active >= effect.cap {
        return Ok(false);
    }
    let Some(&raised) = ctx.state.fallen(actor.side).first() else {
        return Ok(false);
    };
    if !ctx.rng.luck_gate(effect.chance_percent, actor.luck()) {
        return Ok(false);
    }

    ctx.state.actor_mut(reviver).resources.resurrections.active += 1;
    let hp = revive(ctx, raised, effect.hp_percent);
    let mut entry = BattleAction::by(ctx.turn(), reviver, ActionKind::Resurrection);
    entry.push(
        EffectRecord::new(EffectKind::Revive, raised)
            .with_value(hp)
            .with_flags(EffectFlags::ACTIVE),
    );
    ctx.record(entry);
    Ok(true)
}

fn revive(ctx: &mut BattleContext<'_>, target: ActorIndex, hp_percent: f64) -> u32 {
    let actor = ctx.state.actor_mut(target);
    actor.revive(percent_of_max(actor.max_hp(), hp_percent))
}
