//! Counter-attacks, magic counters, and pursuit.
//!
//! Reactions are logged as their own entries right after the action that
//! provoked them and never provoke further reactions.

use super::{log_redirects, magic, physical};
use crate::engine::context::BattleContext;
use crate::engine::errors::BattleError;
use crate::log::{ActionKind, BattleAction, EffectFlags};
use crate::state::ActorIndex;
use crate::stats::Element;

/// Defenders that survived a landed physical hit strike back once each.
pub fn counter_attacks(
    ctx: &mut BattleContext<'_>,
    attacker: ActorIndex,
    defenders: &[ActorIndex],
) -> Result<(), BattleError> {
    for &defender in defenders {
        if !ctx.state.is_alive(attacker) {
            break;
        }
        let reactor = ctx.state.actor(defender);
        if !reactor.is_alive() {
            continue;
        }
        let Some(chance) = reactor.bundle.counter_attack else {
            continue;
        };
        let luck = reactor.luck();
        if !ctx.rng.luck_gate(chance, luck) {
            continue;
        }

        let mut entry = BattleAction::by(ctx.turn(), defender, ActionKind::Counter);
        let multiplier = ctx.config.counter_multiplier;
        physical::strike(ctx, defender, attacker, multiplier, EffectFlags::empty(), &mut entry)?;
        ctx.record(entry);
    }
    Ok(())
}

/// Targets that survived a damaging spell answer with magic once each.
pub fn magic_counters(
    ctx: &mut BattleContext<'_>,
    caster: ActorIndex,
    targets: &[ActorIndex],
) -> Result<(), BattleError> {
    for &target in targets {
        if !ctx.state.is_alive(caster) {
            break;
        }
        let reactor = ctx.state.actor(target);
        if !reactor.is_alive() {
            continue;
        }
        let Some(chance) = reactor.bundle.magic_counter else {
            continue;
        };
        let luck = reactor.luck();
        if !ctx.rng.luck_gate(chance, luck) {
            continue;
        }

        let mut entry = BattleAction::by(ctx.turn(), target, ActionKind::MagicCounter);
        let multiplier = ctx.config.counter_multiplier;
        magic::magic_hit(ctx, target, caster, multiplier, Element::Neutral, EffectFlags::empty(), &mut entry)?;
        ctx.record(entry);
    }
    Ok(())
}

/// One follow-up strike after the attacker felled someone.
pub fn pursuit(ctx: &mut BattleContext<'_>, attacker: ActorIndex) -> Result<(), BattleError> {
    let pursuer = ctx.state.actor(attacker);
    if !pursuer.is_alive() || ctx.state.is_wiped(pursuer.side.opponent()) {
        return Ok(());
    }
    let Some(chance) = pursuer.bundle.pursuit else {
        return Ok(());
    };
    let luck = pursuer.luck();
    if !ctx.rng.luck_gate(chance, luck) {
        return Ok(());
    }

    let resolved = ctx.single_enemy(attacker)?;
    let Some(&target) = resolved.targets.first() else {
        return Ok(());
    };
    let mut entry = BattleAction::by(ctx.turn(), attacker, ActionKind::Pursuit);
    log_redirects(&mut entry, &resolved.redirects);
    physical::strike(ctx, attacker, target, 1.0, EffectFlags::empty(), &mut entry)?;
    ctx.record(entry);
    Ok(())
}
