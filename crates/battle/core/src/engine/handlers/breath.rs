//! Breath attacks.

use super::{Inflicted, inflict};
use crate::combat::{DamageScaling, finalize_damage};
use crate::engine::context::BattleContext;
use crate::engine::errors::BattleError;
use crate::log::{ActionKind, BattleAction, EffectFlags, EffectKind, EffectRecord};
use crate::state::ActorIndex;
use crate::stats::{DamageCategory, Element};

/// Breathes on every living enemy.
///
/// Needs a breath charge and a positive breath score; otherwise returns
/// `Ok(false)` without drawing.
pub fn execute(ctx: &mut BattleContext<'_>, actor: ActorIndex) -> Result<bool, BattleError> {
    let breather = ctx.state.actor(actor);
    if breather.resources.breath_charges == 0 || breather.stats.breath_damage <= 0.0 {
        return Ok(false);
    }
    let targets = ctx.state.living(breather.side.opponent());
    if targets.is_empty() {
        return Ok(false);
    }
    let Some(remaining) = ctx.state.actor_mut(actor).resources.consume_breath() else {
        return Ok(false);
    };

    let mut entry = BattleAction::by(ctx.turn(), actor, ActionKind::Breath);
    entry.push(EffectRecord::new(EffectKind::ChargeConsumed, actor).with_value(remaining));
    for target in targets {
        if !ctx.state.is_alive(target) {
            continue;
        }
        breath_hit(ctx, actor, target, 1.0, Element::Neutral, EffectFlags::empty(), &mut entry)?;
    }
    ctx.record(entry);
    Ok(true)
}

/// Breath damage ignores defense.
///
/// # Formula
///
/// ```text
/// damage = breath_damage * multiplier * luck_roll(att) * resistance(element) * dealt * taken * barrier
/// ```
pub fn breath_hit(
    ctx: &mut BattleContext<'_>,
    actor: ActorIndex,
    target: ActorIndex,
    multiplier: f64,
    element: Element,
    flags: EffectFlags,
    entry: &mut BattleAction,
) -> Result<Inflicted, BattleError> {
    let config = ctx.config;
    let breather = ctx.state.actor(actor);
    let defender = ctx.state.actor(target);

    let attack = breather.stats.breath_damage * multiplier * ctx.rng.next_luck_random(breather.luck());
    let mut scaling = DamageScaling {
        resistance: defender.resistances.multiplier(DamageCategory::Breath, element),
        dealt: breather.bundle.damage_dealt,
        taken: defender.bundle.damage_taken,
        ..DamageScaling::default()
    };
    if ctx.state.actor_mut(target).resources.barriers.consume(DamageCategory::Breath) {
        scaling.barrier = config.barrier_reduction;
        entry.push(
            EffectRecord::new(EffectKind::BarrierAbsorb, target)
                .with_extra(u32::from(DamageCategory::Breath.as_u8())),
        );
    }

    let damage = finalize_damage(
        scaling.apply(attack.max(0.0)),
        config.minimum_damage,
        attack > 0.0 && scaling.total() > 0.0,
    );
    inflict(ctx, target, damage, flags, entry)
}
