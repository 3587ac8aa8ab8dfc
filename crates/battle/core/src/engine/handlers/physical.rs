//! Basic attack and the shared physical strike.

use super::{Inflicted, Reactors, inflict, log_redirects, reaction};
use crate::combat::{DamageScaling, check_hit, finalize_damage, heal_amount, mitigate, roll_hit_count};
use crate::engine::context::BattleContext;
use crate::engine::errors::BattleError;
use crate::log::{ActionKind, BattleAction, EffectFlags, EffectKind, EffectRecord};
use crate::skill::SpecialAttack;
use crate::state::ActorIndex;
use crate::stats::{DamageCategory, Element, StatKind};
use crate::targeting::{AllyPreference, ResolvedTargets, TargetingMode};

/// Result of one physical strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrikeOutcome {
    Missed,
    /// Parried or shield-blocked.
    Negated,
    Landed(Inflicted),
}

impl StrikeOutcome {
    /// The hit connected and the target is still standing.
    pub fn target_survived(self) -> bool {
        matches!(self, Self::Landed(inflicted) if !inflicted.killed)
    }

    pub fn killed(self) -> bool {
        matches!(self, Self::Landed(inflicted) if inflicted.killed)
    }
}

/// Basic attack: resolve targets, roll the hit count, strike, then reactions.
///
/// Returns `Ok(false)` only when no enemy is left to target.
pub fn execute(
    ctx: &mut BattleContext<'_>,
    actor: ActorIndex,
    flags: EffectFlags,
) -> Result<bool, BattleError> {
    let sweep = ctx.state.actor(actor).bundle.has(SpecialAttack::SWEEP);
    let resolved = if sweep {
        let mode = TargetingMode::RandomEnemies {
            count: ctx.config.sweep_targets,
            distinct: true,
        };
        ctx.resolve_targets(actor, mode, AllyPreference::Weighted)?
    } else {
        ctx.single_enemy(actor)?
    };
    if resolved.is_empty() {
        return Ok(false);
    }

    let mut entry_flags = flags;
    if sweep {
        entry_flags |= EffectFlags::SWEEP;
    }
    let mut entry = BattleAction::by(ctx.turn(), actor, ActionKind::PhysicalAttack).with_flags(entry_flags);
    let attack_count = ctx.state.actor(actor).stats.attack_count;
    let hits = roll_hit_count(attack_count, &mut ctx.rng);

    let (counters, killed_any) = strike_targets(ctx, actor, &resolved, hits, 1.0, EffectFlags::empty(), &mut entry)?;
    ctx.record(entry);

    reaction::counter_attacks(ctx, actor, counters.as_slice())?;
    if killed_any {
        reaction::pursuit(ctx, actor)?;
    }
    Ok(true)
}

/// Strikes every resolved target up to `hits` times each.
///
/// Returns the defenders eligible to counter and whether anyone fell.
pub(crate) fn strike_targets(
    ctx: &mut BattleContext<'_>,
    actor: ActorIndex,
    resolved: &ResolvedTargets,
    hits: u32,
    multiplier: f64,
    flags: EffectFlags,
    entry: &mut BattleAction,
) -> Result<(Reactors, bool), BattleError> {
    log_redirects(entry, &resolved.redirects);

    let mut counters = Reactors::default();
    let mut killed_any = false;
    for &target in &resolved.targets {
        for _ in 0..hits {
            if !ctx.state.is_alive(actor) || !ctx.state.is_alive(target) {
                break;
            }
            let outcome = strike(ctx, actor, target, multiplier, flags, entry)?;
            killed_any |= outcome.killed();
            if outcome.target_survived() {
                counters.push(target);
            }
        }
    }
    Ok((counters, killed_any))
}

/// One physical hit from `attacker` on `target`.
///
/// # Draw order
///
/// hit roll, evasion roll, parry gate (if enabled), shield gate (if enabled),
/// attack roll, defense roll (unless piercing), critical gate.
///
/// # Formula
///
/// ```text
/// attack  = physical_attack * luck_roll(att) * multiplier
/// defense = physical_defense * luck_roll(def) * physical_defense_factor
/// damage  = max(attack - defense, attack * floor) * crit * resistance * dealt * taken * guard * barrier
/// ```
pub fn strike(
    ctx: &mut BattleContext<'_>,
    attacker: ActorIndex,
    target: ActorIndex,
    multiplier: f64,
    flags: EffectFlags,
    entry: &mut BattleAction,
) -> Result<StrikeOutcome, BattleError> {
    let config = ctx.config;
    let offense = ctx.state.actor(attacker);
    let defense = ctx.state.actor(target);

    let hit_roll = ctx.rng.next_luck_random(offense.luck());
    let evasion_roll = ctx.rng.next_luck_random(defense.luck());
    if !check_hit(
        offense.stat(StatKind::HitRate),
        hit_roll,
        defense.stat(StatKind::EvasionRate),
        evasion_roll,
    ) {
        entry.push(EffectRecord::new(EffectKind::Miss, target).with_flags(flags));
        return Ok(StrikeOutcome::Missed);
    }

    if defense.bundle.parry && ctx.rng.luck_gate(config.parry_chance_percent, defense.luck()) {
        entry.push(EffectRecord::new(EffectKind::Parry, target));
        return Ok(StrikeOutcome::Negated);
    }
    if defense.bundle.shield_block
        && ctx
            .rng
            .luck_gate(config.shield_block_chance_percent, defense.luck())
    {
        entry.push(EffectRecord::new(EffectKind::ShieldBlock, target));
        return Ok(StrikeOutcome::Negated);
    }

    let special = offense.bundle.special_attack;
    let attack = offense.stat(StatKind::PhysicalAttack)
        * ctx.rng.next_luck_random(offense.luck())
        * multiplier;
    let defense_score = if special.contains(SpecialAttack::PIERCING) {
        0.0
    } else {
        defense.stat(StatKind::PhysicalDefense)
            * ctx.rng.next_luck_random(defense.luck())
            * config.physical_defense_factor
    };
    let raw = mitigate(attack, defense_score, config.damage_floor_ratio) + offense.stats.additional_damage;

    let mut critical_rate = offense.stat(StatKind::CriticalRate);
    if special.contains(SpecialAttack::ASSASSINATE) {
        critical_rate *= 2.0;
    }
    let critical = ctx.rng.luck_gate(critical_rate, offense.luck());

    let mut scaling = DamageScaling {
        critical: if critical {
            config.critical_multiplier * offense.bundle.critical_damage
        } else {
            1.0
        },
        resistance: defense.resistances.multiplier(DamageCategory::Physical, Element::Neutral),
        dealt: offense.bundle.damage_dealt,
        taken: defense.bundle.damage_taken,
        ..DamageScaling::default()
    };
    let drains = special.contains(SpecialAttack::DRAIN);

    let shield = ctx.state.actor_mut(target);
    if shield.resources.take_guard() {
        scaling.guard = config.guard_reduction;
        entry.push(EffectRecord::new(EffectKind::GuardAbsorb, target));
    }
    if shield.resources.barriers.consume(DamageCategory::Physical) {
        scaling.barrier = config.barrier_reduction;
        entry.push(
            EffectRecord::new(EffectKind::BarrierAbsorb, target)
                .with_extra(u32::from(DamageCategory::Physical.as_u8())),
        );
    }

    let damage = finalize_damage(
        scaling.apply(raw),
        config.minimum_damage,
        attack > 0.0 && scaling.total() > 0.0,
    );
    let mut damage_flags = flags;
    if critical {
        damage_flags |= EffectFlags::CRITICAL;
    }
    let inflicted = inflict(ctx, target, damage, damage_flags, entry)?;

    if drains && inflicted.lost > 0 && ctx.state.is_alive(attacker) {
        let amount = heal_amount(
            f64::from(inflicted.lost) * config.drain_ratio,
            1.0,
            ctx.healing_penalty(attacker),
        );
        super::restore(ctx, attacker, amount, EffectFlags::DRAIN, entry);
    }
    Ok(StrikeOutcome::Landed(inflicted))
}
