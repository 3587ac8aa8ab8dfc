mod common;

use battle_core::{
    ActionKind, ActionRates, BattleConfig, BattleEngine, BattleLog, BattleRandom, BattleRequest, BattleResult,
    CombatantSpec, EffectFlags, EffectKind, RandomSource,
};
use common::*;

fn party() -> Vec<CombatantSpec> {
    vec![
        fighter("Knight"),
        mage("Wizard").with_spells([MAGIC_ARROW, FIREBALL, SLEEP_CLOUD]).with_slot(4),
        fighter("Cleric")
            .with_rates(ActionRates::new(1.0, 1.0, 0.0, 0.0))
            .with_spells([HEAL])
            .with_slot(5),
    ]
}

fn horde() -> Vec<CombatantSpec> {
    vec![
        fighter("Orc").with_enemy_skills([CRUSHING_BLOW, HARDEN]),
        fighter("Naga").with_enemy_skills([VENOM_SPIT]),
        fighter("Wolf"),
    ]
}

fn run(random: RandomSource) -> BattleResult {
    let catalog = catalog();
    let config = BattleConfig::default();
    BattleEngine::new(&catalog, &config)
        .resolve(BattleRequest::new(party(), horde(), random))
        .expect("valid battle")
}

#[test]
fn same_seed_produces_identical_bytes() {
    for seed in [0, 1, 42, 9_001, u64::MAX] {
        let first = run(RandomSource::Seed(seed));
        let second = run(RandomSource::Seed(seed));
        assert_eq!(first, second);
        assert_eq!(first.log.encode().unwrap(), second.log.encode().unwrap());
        assert_eq!(first.log.digest().unwrap(), second.log.digest().unwrap());
    }
}

#[test]
fn seeding_matches_resuming_the_seeded_state() {
    let seeded = run(RandomSource::Seed(314));
    let resumed = run(RandomSource::Resume(BattleRandom::new(314).state()));
    assert_eq!(seeded, resumed);
    assert_ne!(seeded.rng_state, BattleRandom::new(314).state());
}

#[test]
fn session_continues_from_the_returned_state() {
    let first = run(RandomSource::Seed(8));
    let second = run(RandomSource::Resume(first.rng_state));
    let replayed = run(RandomSource::Resume(first.rng_state));
    assert_eq!(second, replayed);
}

#[test]
fn logs_survive_the_binary_codec() {
    for seed in [3, 17, 256] {
        let log = run(RandomSource::Seed(seed)).log;
        let bytes = log.encode().unwrap();
        assert_eq!(BattleLog::decode(&bytes).unwrap(), log);
    }
}

#[test]
fn every_log_ends_with_exactly_one_outcome_declaration() {
    for seed in 0..20 {
        let result = run(RandomSource::Seed(seed));
        let log = &result.log;
        let last = log.last_entry().unwrap();
        assert!(last.kind().is_outcome());
        assert_eq!(last.actor, None);
        assert_eq!(log.entries.iter().filter(|e| e.kind().is_outcome()).count(), 1);
        assert_eq!(ActionKind::from(result.outcome), last.kind());
        assert!(result.turns <= BattleConfig::DEFAULT_MAX_TURNS);
    }
}

/// Replays every HP change in the log and checks it against bounds and the
/// final combatant states.
fn replay_hp(result: &BattleResult) -> Vec<u32> {
    let log = &result.log;
    let max: Vec<u32> = result.combatants.iter().map(|c| c.max_hp).collect();
    let mut hp: Vec<u32> = log.initial_hp.iter().map(|entry| entry.hp).collect();

    for entry in &log.entries {
        for effect in &entry.effects {
            let Some(target) = effect.target else { continue };
            let slot = target.get();
            match effect.kind {
                EffectKind::Damage | EffectKind::StatusTick => {
                    hp[slot] = hp[slot].saturating_sub(effect.value as u32);
                }
                EffectKind::Heal => hp[slot] += effect.value as u32,
                EffectKind::Revive => hp[slot] = effect.value as u32,
                _ => {}
            }
            assert!(hp[slot] <= max[slot], "actor {slot} above max HP in {entry:?}");
        }
    }
    hp
}

#[test]
fn hp_stays_within_bounds_and_matches_the_log() {
    for seed in 0..25 {
        let result = run(RandomSource::Seed(seed));
        let replayed = replay_hp(&result);
        let reported: Vec<u32> = result.combatants.iter().map(|c| c.hp).collect();
        assert_eq!(replayed, reported, "seed {seed}");
    }
}

#[test]
fn spell_charges_are_spent_one_at_a_time() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let result = BattleEngine::new(&catalog, &config)
        .resolve(BattleRequest::seeded(vec![mage("Wizard")], vec![immortal("Golem")], 21))
        .unwrap();

    let casts: Vec<_> = result.log.entries_of(ActionKind::MageMagic).collect();
    assert_eq!(casts.len(), 3);
    let remaining: Vec<f64> = result
        .log
        .effects_of(EffectKind::ChargeConsumed)
        .map(|effect| {
            assert!(effect.flags().contains(EffectFlags::SPELL));
            effect.value
        })
        .collect();
    assert_eq!(remaining, vec![2.0, 1.0, 0.0]);

    let fallbacks = result
        .log
        .entries_of(ActionKind::PhysicalAttack)
        .filter(|entry| entry.actor == Some(battle_core::ActorIndex(0)))
        .filter(|entry| entry.flags().contains(EffectFlags::FALLBACK))
        .count();
    assert_eq!(fallbacks, BattleConfig::DEFAULT_MAX_TURNS as usize - 3);
}

#[test]
fn breath_charges_are_spent_one_at_a_time() {
    let mut dragon = fighter("Drake")
        .with_rates(ActionRates::new(0.0, 0.0, 0.0, 1.0))
        .with_breath_charges(2);
    dragon.stats.breath_damage = 50.0;

    let catalog = catalog();
    let config = BattleConfig::default();
    let result = BattleEngine::new(&catalog, &config)
        .resolve(BattleRequest::seeded(vec![dragon], vec![immortal("Golem")], 4))
        .unwrap();

    assert_eq!(result.log.entries_of(ActionKind::Breath).count(), 2);
    let remaining: Vec<f64> = result
        .log
        .effects_of(EffectKind::ChargeConsumed)
        .inspect(|effect| assert!(!effect.flags().contains(EffectFlags::SPELL)))
        .map(|effect| effect.value)
        .collect();
    assert_eq!(remaining, vec![1.0, 0.0]);
}

#[test]
fn spellless_casters_never_log_charge_use() {
    let catalog = catalog();
    let config = BattleConfig::default();
    let hedge_mage = fighter("Hedge").with_rates(ActionRates::new(0.0, 0.0, 1.0, 0.0));
    let result = BattleEngine::new(&catalog, &config)
        .resolve(BattleRequest::seeded(vec![hedge_mage], vec![immortal("Golem")], 4))
        .unwrap();
    assert_eq!(result.log.effects_of(EffectKind::ChargeConsumed).count(), 0);
    assert!(
        result
            .log
            .entries_of(ActionKind::PhysicalAttack)
            .filter(|entry| entry.actor == Some(battle_core::ActorIndex(0)))
            .all(|entry| entry.flags().contains(EffectFlags::FALLBACK))
    );
}
