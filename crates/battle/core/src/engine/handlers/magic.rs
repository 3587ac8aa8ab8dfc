//! Mage and priest spells.

use super::{Inflicted, inflict, log_redirects, reaction, restore, status};
use crate::combat::{DamageScaling, finalize_damage, heal_amount, mitigate, percent_of_max, round_half_up};
use crate::engine::context::BattleContext;
use crate::engine::errors::BattleError;
use crate::env::{CastCondition, SpellCategory, SpellDefinition, SpellSchool};
use crate::log::{ActionKind, BattleAction, EffectFlags, EffectKind, EffectRecord};
use crate::state::{ActorIndex, BattleActor, SpellId, StatusId};
use crate::stats::{DamageCategory, Element, StatKind};
use crate::targeting::{AllyPreference, ResolvedTargets, TargetingMode};

/// Casts the best available spell of `school`.
///
/// Returns `Ok(false)` without drawing when no spell is castable.
pub fn execute(
    ctx: &mut BattleContext<'_>,
    actor: ActorIndex,
    school: SpellSchool,
) -> Result<bool, BattleError> {
    let catalog = ctx.catalog;
    let Some(spell) = choose_spell(ctx, actor, school)? else {
        return Ok(false);
    };
    let definition = catalog.require_spell(spell)?;

    let resolved = spell_targets(ctx, actor, definition)?;
    if resolved.is_empty() {
        return Ok(false);
    }
    let Some(remaining) = ctx.state.actor_mut(actor).resources.consume_spell(spell) else {
        return Ok(false);
    };

    let kind = match school {
        SpellSchool::Mage => ActionKind::MageMagic,
        SpellSchool::Priest => ActionKind::PriestMagic,
    };
    let mut entry = BattleAction::by(ctx.turn(), actor, kind).with_skill(spell.0);
    entry.push(
        EffectRecord::new(EffectKind::ChargeConsumed, actor)
            .with_value(remaining)
            .with_flags(EffectFlags::SPELL),
    );
    log_redirects(&mut entry, &resolved.redirects);

    let survivors = cast(ctx, actor, definition, &resolved.targets, &mut entry)?;
    ctx.record(entry);

    if !survivors.is_empty() {
        reaction::magic_counters(ctx, actor, &survivors)?;
    }
    Ok(true)
}

/// Applies the spell category to every target. Returns damaged targets that
/// survived, in target order.
fn cast(
    ctx: &mut BattleContext<'_>,
    caster: ActorIndex,
    definition: &SpellDefinition,
    targets: &[ActorIndex],
    entry: &mut BattleAction,
) -> Result<Vec<ActorIndex>, BattleError> {
    let mut survivors = Vec::new();
    for &target in targets {
        match definition.category {
            SpellCategory::Damage => {
                if !ctx.state.is_alive(target) {
                    continue;
                }
                let inflicted = magic_hit(
                    ctx,
                    caster,
                    target,
                    definition.multiplier,
                    definition.element,
                    EffectFlags::empty(),
                    entry,
                )?;
                if inflicted.killed {
                    continue;
                }
                if let Some(rider) = definition.status {
                    status::apply_status(ctx, caster, target, rider, definition.status_chance_percent, entry)?;
                }
                if ctx.state.is_alive(target) && !survivors.contains(&target) {
                    survivors.push(target);
                }
            }
            SpellCategory::Heal => {
                let amount = spell_heal(ctx, caster, target, definition);
                restore(ctx, target, amount, EffectFlags::empty(), entry);
            }
            SpellCategory::Buff | SpellCategory::Status => {
                if let Some(applied) = definition.status {
                    status::apply_status(ctx, caster, target, applied, definition.status_chance_percent, entry)?;
                }
            }
            SpellCategory::Cleanse => cleanse(ctx, target, definition.status, entry),
            SpellCategory::Barrier(category) => {
                let charges = round_half_up(definition.multiplier).clamp(1, u32::from(u8::MAX)) as u8;
                let total = ctx.state.actor_mut(target).resources.barriers.grant(category, charges);
                entry.push(
                    EffectRecord::new(EffectKind::BarrierGranted, target)
                        .with_value(total)
                        .with_extra(u32::from(category.as_u8())),
                );
            }
            SpellCategory::Revive => {
                if ctx.state.is_alive(target) {
                    continue;
                }
                let percent = definition.heal_percent.unwrap_or(100.0);
                let fallen = ctx.state.actor_mut(target);
                let hp = fallen.revive(percent_of_max(fallen.max_hp(), percent));
                entry.push(
                    EffectRecord::new(EffectKind::Revive, target)
                        .with_value(hp)
                        .with_flags(EffectFlags::SPELL),
                );
            }
        }
    }
    Ok(survivors)
}

/// Heal amount for one target. Roll-based heals draw once.
fn spell_heal(
    ctx: &mut BattleContext<'_>,
    caster: ActorIndex,
    target: ActorIndex,
    definition: &SpellDefinition,
) -> u32 {
    let penalty = ctx.healing_penalty(target);
    match definition.heal_percent {
        Some(percent) => {
            let max_hp = f64::from(ctx.state.actor(target).max_hp());
            heal_amount(max_hp * percent / 100.0, 1.0, penalty)
        }
        None => {
            let healer = ctx.state.actor(caster);
            let base = healer.stats.magical_healing * definition.multiplier;
            let roll = ctx.rng.next_luck_random(healer.luck());
            heal_amount(base, roll, penalty)
        }
    }
}

fn cleanse(ctx: &mut BattleContext<'_>, target: ActorIndex, only: Option<StatusId>, entry: &mut BattleAction) {
    let statuses = &mut ctx.state.actor_mut(target).statuses;
    let removed = match only {
        Some(id) => statuses.remove(id).map(|instance| vec![instance.id]).unwrap_or_default(),
        None => statuses.remove_debuffs(),
    };
    for id in removed {
        entry.push(EffectRecord::new(EffectKind::StatusCleansed, target).with_status(id));
    }
}

/// Magical damage: always lands, no critical.
///
/// # Formula
///
/// ```text
/// attack  = magical_attack * multiplier * luck_roll(caster)
/// defense = magical_defense * luck_roll(target) * magical_defense_factor
/// damage  = max(attack - defense, attack * floor) * resistance(element) * dealt * taken * barrier
/// ```
pub fn magic_hit(
    ctx: &mut BattleContext<'_>,
    caster: ActorIndex,
    target: ActorIndex,
    multiplier: f64,
    element: Element,
    flags: EffectFlags,
    entry: &mut BattleAction,
) -> Result<Inflicted, BattleError> {
    let config = ctx.config;
    let offense = ctx.state.actor(caster);
    let defense = ctx.state.actor(target);

    let attack = offense.stat(StatKind::MagicalAttack) * multiplier * ctx.rng.next_luck_random(offense.luck());
    let defense_score = defense.stat(StatKind::MagicalDefense)
        * ctx.rng.next_luck_random(defense.luck())
        * config.magical_defense_factor;
    let raw = mitigate(attack, defense_score, config.damage_floor_ratio);

    let mut scaling = DamageScaling {
        resistance: defense.resistances.multiplier(DamageCategory::Magical, element),
        dealt: offense.bundle.damage_dealt,
        taken: defense.bundle.damage_taken,
        ..DamageScaling::default()
    };
    if ctx.state.actor_mut(target).resources.barriers.consume(DamageCategory::Magical) {
        scaling.barrier = config.barrier_reduction;
        entry.push(
            EffectRecord::new(EffectKind::BarrierAbsorb, target)
                .with_extra(u32::from(DamageCategory::Magical.as_u8())),
        );
    }

    let damage = finalize_damage(
        scaling.apply(raw),
        config.minimum_damage,
        attack > 0.0 && scaling.total() > 0.0,
    );
    inflict(ctx, target, damage, flags, entry)
}

/// Highest-tier castable spell of `school`, ties by lowest id. No draws.
fn choose_spell(
    ctx: &BattleContext<'_>,
    actor: ActorIndex,
    school: SpellSchool,
) -> Result<Option<SpellId>, BattleError> {
    let caster = ctx.state.actor(actor);
    let mut best: Option<&SpellDefinition> = None;
    for &spell in &caster.spells {
        let definition = ctx.catalog.require_spell(spell)?;
        if definition.school != school
            || caster.resources.spell_charges(spell) == 0
            || !condition_met(ctx, caster, definition.condition)
            || !has_target(ctx, caster, definition)
        {
            continue;
        }
        let better = match best {
            None => true,
            Some(current) => {
                definition.tier > current.tier || (definition.tier == current.tier && definition.id < current.id)
            }
        };
        if better {
            best = Some(definition);
        }
    }
    Ok(best.map(|definition| definition.id))
}

fn condition_met(ctx: &BattleContext<'_>, caster: &BattleActor, condition: CastCondition) -> bool {
    let state = &ctx.state;
    match condition {
        CastCondition::Always => true,
        CastCondition::AllyHpBelow(percent) => state
            .living(caster.side)
            .into_iter()
            .any(|ally| state.actor(ally).hp_ratio() * 100.0 < percent),
        CastCondition::AllyDead => !state.fallen(caster.side).is_empty(),
        CastCondition::EnemyCountAtLeast(count) => {
            state.living_count(caster.side.opponent()) >= usize::from(count)
        }
    }
}

fn needs_cleanse(actor: &BattleActor, only: Option<StatusId>) -> bool {
    match only {
        Some(id) => actor.statuses.contains(id),
        None => actor.statuses.has_debuff(),
    }
}

fn has_target(ctx: &BattleContext<'_>, caster: &BattleActor, definition: &SpellDefinition) -> bool {
    let state = &ctx.state;
    match definition.category {
        SpellCategory::Heal => state
            .living(caster.side)
            .into_iter()
            .any(|ally| state.actor(ally).hp() < state.actor(ally).max_hp()),
        SpellCategory::Cleanse => state
            .living(caster.side)
            .into_iter()
            .any(|ally| needs_cleanse(state.actor(ally), definition.status)),
        SpellCategory::Revive => !state.fallen(caster.side).is_empty(),
        _ => ctx.has_candidates(caster.index, definition.targeting),
    }
}

/// Targets for a chosen spell. Only weighted picks draw.
fn spell_targets(
    ctx: &mut BattleContext<'_>,
    actor: ActorIndex,
    definition: &SpellDefinition,
) -> Result<ResolvedTargets, BattleError> {
    let side = ctx.state.actor(actor).side;
    let single = definition.targeting == TargetingMode::SingleAlly;
    let resolved = match definition.category {
        SpellCategory::Heal => ctx.resolve_targets(actor, definition.targeting, AllyPreference::MostWounded)?,
        SpellCategory::Cleanse if single => {
            let state = &ctx.state;
            let first = state
                .living(side)
                .into_iter()
                .find(|&ally| needs_cleanse(state.actor(ally), definition.status));
            ResolvedTargets {
                targets: first.into_iter().collect(),
                redirects: Vec::new(),
            }
        }
        SpellCategory::Revive => {
            let mut fallen = ctx.state.fallen(side);
            if single {
                fallen.truncate(1);
            }
            ResolvedTargets {
                targets: fallen,
                redirects: Vec::new(),
            }
        }
        _ => ctx.resolve_targets(actor, definition.targeting, AllyPreference::Weighted)?,
    };
    Ok(resolved)
}
