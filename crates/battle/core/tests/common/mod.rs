#![allow(dead_code)]

use battle_core::{
    ActionRates, CastCondition, CatalogSnapshot, CombatSnapshot, CombatantSpec, CoreAttributes, DamageCategory,
    EnemySkillDefinition, EnemySkillId, EnemySkillKind, SpellCategory, SpellDefinition, SpellId, SpellSchool,
    StatKind, StatusDefinition, StatusId, StatusTags, TargetingMode,
};

pub const POISON: StatusId = StatusId(1);
pub const SLEEP: StatusId = StatusId(2);
pub const STONE: StatusId = StatusId(3);
pub const ATTACK_UP: StatusId = StatusId(4);

pub const MAGIC_ARROW: SpellId = SpellId(1);
pub const FIREBALL: SpellId = SpellId(2);
pub const HEAL: SpellId = SpellId(3);
pub const SLEEP_CLOUD: SpellId = SpellId(4);
pub const CHAIN_LIGHTNING: SpellId = SpellId(5);
pub const MEND: SpellId = SpellId(6);
pub const CURE: SpellId = SpellId(7);
pub const STONESKIN: SpellId = SpellId(8);
pub const RAISE: SpellId = SpellId(9);

pub const CRUSHING_BLOW: EnemySkillId = EnemySkillId(1);
pub const VENOM_SPIT: EnemySkillId = EnemySkillId(2);
pub const HARDEN: EnemySkillId = EnemySkillId(3);
pub const GAZE_OF_STONE: EnemySkillId = EnemySkillId(4);
pub const SCORCH: EnemySkillId = EnemySkillId(5);

pub fn catalog() -> CatalogSnapshot {
    CatalogSnapshot::from_definitions(
        [
            StatusDefinition::new(POISON, "Poison", Some(3))
                .with_tags(StatusTags::DEBUFF | StatusTags::POISON)
                .with_tick_damage(10.0),
            StatusDefinition::new(SLEEP, "Sleep", Some(2))
                .with_tags(StatusTags::DEBUFF | StatusTags::SLEEP)
                .locking(),
            StatusDefinition::new(STONE, "Stone", None)
                .with_tags(StatusTags::DEBUFF | StatusTags::PETRIFY | StatusTags::INSTANT_DEATH),
            StatusDefinition::new(ATTACK_UP, "Attack Up", Some(3))
                .with_tags(StatusTags::BUFF)
                .with_modifier(StatKind::PhysicalAttack, 1.5),
        ],
        [
            SpellDefinition::new(
                MAGIC_ARROW,
                "Magic Arrow",
                SpellSchool::Mage,
                1,
                SpellCategory::Damage,
                TargetingMode::SingleEnemy,
                3,
            ),
            SpellDefinition::new(
                FIREBALL,
                "Fireball",
                SpellSchool::Mage,
                2,
                SpellCategory::Damage,
                TargetingMode::All,
                1,
            )
            .with_multiplier(1.5),
            SpellDefinition::new(
                HEAL,
                "Heal",
                SpellSchool::Priest,
                1,
                SpellCategory::Heal,
                TargetingMode::SingleAlly,
                2,
            )
            .with_heal_percent(30.0),
            SpellDefinition::new(
                SLEEP_CLOUD,
                "Sleep Cloud",
                SpellSchool::Mage,
                1,
                SpellCategory::Status,
                TargetingMode::All,
                2,
            )
            .with_status(SLEEP, 100.0),
            SpellDefinition::new(
                CHAIN_LIGHTNING,
                "Chain Lightning",
                SpellSchool::Mage,
                2,
                SpellCategory::Damage,
                TargetingMode::All,
                1,
            )
            .with_condition(CastCondition::EnemyCountAtLeast(2)),
            SpellDefinition::new(MEND, "Mend", SpellSchool::Priest, 2, SpellCategory::Heal, TargetingMode::SingleAlly, 1)
                .with_heal_percent(10.0)
                .with_condition(CastCondition::AllyHpBelow(50.0)),
            SpellDefinition::new(CURE, "Cure", SpellSchool::Priest, 1, SpellCategory::Cleanse, TargetingMode::SingleAlly, 2),
            SpellDefinition::new(
                STONESKIN,
                "Stoneskin",
                SpellSchool::Priest,
                1,
                SpellCategory::Barrier(DamageCategory::Physical),
                TargetingMode::AllAllies,
                1,
            )
            .with_multiplier(2.0),
            SpellDefinition::new(RAISE, "Raise", SpellSchool::Priest, 3, SpellCategory::Revive, TargetingMode::SingleAlly, 1)
                .with_heal_percent(50.0)
                .with_condition(CastCondition::AllyDead),
        ],
        [
            EnemySkillDefinition::new(
                CRUSHING_BLOW,
                "Crushing Blow",
                EnemySkillKind::Physical {
                    multiplier: 2.0,
                    hits: 1,
                },
                TargetingMode::SingleEnemy,
                100.0,
            )
            .with_uses(1),
            EnemySkillDefinition::new(
                VENOM_SPIT,
                "Venom Spit",
                EnemySkillKind::Status {
                    status: POISON,
                    chance_percent: 100.0,
                },
                TargetingMode::SingleEnemy,
                100.0,
            )
            .with_uses(1),
            EnemySkillDefinition::new(HARDEN, "Harden", EnemySkillKind::Guard, TargetingMode::SelfOnly, 100.0)
                .with_uses(1),
            EnemySkillDefinition::new(
                GAZE_OF_STONE,
                "Gaze of Stone",
                EnemySkillKind::Status {
                    status: STONE,
                    chance_percent: 100.0,
                },
                TargetingMode::SingleEnemy,
                100.0,
            )
            .with_uses(1),
            EnemySkillDefinition::new(
                SCORCH,
                "Scorch",
                EnemySkillKind::Breath { multiplier: 1.0 },
                TargetingMode::SingleEnemy,
                100.0,
            ),
        ],
    )
    .expect("fixture catalog is consistent")
}

/// Reliable hitter: always hits, moderate damage.
pub fn fighter(name: &str) -> CombatantSpec {
    CombatantSpec::new(
        name,
        CombatSnapshot {
            max_hp: 500,
            physical_attack: 100.0,
            physical_defense: 20.0,
            magical_attack: 60.0,
            magical_defense: 20.0,
            hit_rate: 100.0,
            ..CombatSnapshot::default()
        },
    )
    .with_attributes(CoreAttributes::with_speed_and_luck(20, 10))
}

/// Deals no damage and cannot be worn down within a battle.
pub fn immortal(name: &str) -> CombatantSpec {
    CombatantSpec::new(
        name,
        CombatSnapshot {
            max_hp: 1_000_000,
            physical_attack: 0.0,
            physical_defense: 1_000_000.0,
            magical_defense: 1_000_000.0,
            hit_rate: 100.0,
            ..CombatSnapshot::default()
        },
    )
}

/// Dies to the first landed hit of a [`fighter`].
pub fn fodder(name: &str) -> CombatantSpec {
    CombatantSpec::new(
        name,
        CombatSnapshot {
            max_hp: 10,
            hit_rate: 1.0,
            ..CombatSnapshot::default()
        },
    )
}

pub fn mage(name: &str) -> CombatantSpec {
    fighter(name)
        .with_rates(ActionRates::new(0.0, 0.0, 1.0, 0.0))
        .with_spells([MAGIC_ARROW])
}

pub fn priest(name: &str) -> CombatantSpec {
    fighter(name).with_rates(ActionRates::new(0.0, 1.0, 0.0, 0.0))
}
