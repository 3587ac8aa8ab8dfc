//! Combatant input description and in-battle actor.

use super::{ActorIndex, FormationSlot, ResourcePool, Side, StatusList};
use crate::skill::{SkillEffectBundle, SkillEffectRecord};
use crate::state::{EnemySkillId, SpellId};
use crate::stats::{ActionRates, CombatSnapshot, CoreAttributes, Resistances, StatKind};

/// Fully stat-computed combatant as handed to the engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub slot: FormationSlot,
    #[cfg_attr(feature = "serde", serde(default))]
    pub level: u16,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: CoreAttributes,
    pub stats: CombatSnapshot,
    /// Starting HP; full health when absent. Clamped to max HP.
    #[cfg_attr(feature = "serde", serde(default))]
    pub current_hp: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rates: ActionRates,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistances: Resistances,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: Vec<SpellId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemy_skills: Vec<EnemySkillId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub breath_charges: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<SkillEffectRecord>,
    /// Owning player character, for log attribution only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub character_id: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub avatar_id: Option<u32>,
    /// Enemy master record, for log attribution only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemy_id: Option<u32>,
}

impl CombatantSpec {
    pub fn new(name: impl Into<String>, stats: CombatSnapshot) -> Self {
        Self {
            name: name.into(),
            slot: FormationSlot::FRONT,
            level: 1,
            attributes: CoreAttributes::default(),
            stats,
            current_hp: None,
            rates: ActionRates::ATTACK_ONLY,
            resistances: Resistances::default(),
            spells: Vec::new(),
            enemy_skills: Vec::new(),
            breath_charges: 0,
            skills: Vec::new(),
            character_id: None,
            avatar_id: None,
            enemy_id: None,
        }
    }

    pub fn with_attributes(mut self, attributes: CoreAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_slot(mut self, slot: u8) -> Self {
        self.slot = FormationSlot(slot);
        self
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn with_rates(mut self, rates: ActionRates) -> Self {
        self.rates = rates;
        self
    }

    pub fn with_resistances(mut self, resistances: Resistances) -> Self {
        self.resistances = resistances;
        self
    }

    pub fn with_spells(mut self, spells: impl IntoIterator<Item = SpellId>) -> Self {
        self.spells = spells.into_iter().collect();
        self
    }

    pub fn with_enemy_skills(mut self, skills: impl IntoIterator<Item = EnemySkillId>) -> Self {
        self.enemy_skills = skills.into_iter().collect();
        self
    }

    pub fn with_breath_charges(mut self, charges: u8) -> Self {
        self.breath_charges = charges;
        self
    }

    pub fn with_skill(mut self, record: SkillEffectRecord) -> Self {
        self.skills.push(record);
        self
    }
}

/// A combatant during battle resolution.
///
/// Actors live in one flat array and refer to each other only through
/// [`ActorIndex`]. Dead actors stay in place.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleActor {
    pub index: ActorIndex,
    pub side: Side,
    pub name: String,
    pub slot: FormationSlot,
    pub level: u16,
    pub attributes: CoreAttributes,
    pub stats: CombatSnapshot,
    hp: u32,
    pub rates: ActionRates,
    pub resistances: Resistances,
    pub spells: Vec<SpellId>,
    pub enemy_skills: Vec<EnemySkillId>,
    pub bundle: SkillEffectBundle,
    pub resources: ResourcePool,
    pub statuses: StatusList,
    pub character_id: Option<u32>,
    pub avatar_id: Option<u32>,
    pub enemy_id: Option<u32>,
}

impl BattleActor {
    /// Builds the actor from an already validated spec and compiled bundle.
    pub fn new(
        index: ActorIndex,
        side: Side,
        spec: CombatantSpec,
        bundle: SkillEffectBundle,
        resources: ResourcePool,
    ) -> Self {
        let max_hp = spec.stats.max_hp;
        Self {
            index,
            side,
            name: spec.name,
            slot: spec.slot,
            level: spec.level,
            attributes: spec.attributes,
            hp: spec.current_hp.unwrap_or(max_hp).min(max_hp),
            stats: spec.stats,
            rates: spec.rates,
            resistances: spec.resistances,
            spells: spec.spells,
            enemy_skills: spec.enemy_skills,
            bundle,
            resources,
            statuses: StatusList::new(),
            character_id: spec.character_id,
            avatar_id: spec.avatar_id,
            enemy_id: spec.enemy_id,
        }
    }

    #[inline]
    pub fn hp(&self) -> u32 {
        self.hp
    }

    #[inline]
    pub fn max_hp(&self) -> u32 {
        self.stats.max_hp
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Current HP as a share of max HP.
    pub fn hp_ratio(&self) -> f64 {
        if self.stats.max_hp == 0 {
            0.0
        } else {
            f64::from(self.hp) / f64::from(self.stats.max_hp)
        }
    }

    pub fn luck(&self) -> u32 {
        self.attributes.luck
    }

    /// Subtracts HP, never below zero. Returns the HP actually lost.
    ///
    /// A fallen actor keeps its statuses; only a vitalizing revival strips
    /// debuffs. Guard is dropped.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        if self.hp == 0 {
            self.resources.guard = false;
        }
        lost
    }

    /// Adds HP up to max HP on a living actor. Returns the HP actually gained.
    pub fn restore_hp(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let gained = amount.min(self.stats.max_hp - self.hp);
        self.hp += gained;
        gained
    }

    /// Brings a dead actor back with the given HP, at least one.
    pub fn revive(&mut self, hp: u32) -> u32 {
        self.hp = hp.max(1).min(self.stats.max_hp);
        self.hp
    }

    /// Stat value with active status modifiers applied.
    pub fn stat(&self, stat: StatKind) -> f64 {
        let base = match stat {
            StatKind::PhysicalAttack => self.stats.physical_attack,
            StatKind::MagicalAttack => self.stats.magical_attack,
            StatKind::PhysicalDefense => self.stats.physical_defense,
            StatKind::MagicalDefense => self.stats.magical_defense,
            StatKind::HitRate => self.stats.hit_rate,
            StatKind::EvasionRate => self.stats.evasion_rate,
            StatKind::CriticalRate => self.stats.critical_rate,
            StatKind::Agility => f64::from(self.attributes.agility),
        };
        base * self.statuses.multiplier(stat)
    }

    pub fn is_front_row(&self, front_row_size: u8) -> bool {
        self.slot.is_front_row(front_row_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::StatusDefinition;
    use crate::state::{StatusId, StatusInstance};

    fn actor(max_hp: u32, hp: Option<u32>) -> BattleActor {
        let mut spec = CombatantSpec::new(
            "Knight",
            CombatSnapshot {
                max_hp,
                physical_attack: 100.0,
                ..CombatSnapshot::default()
            },
        );
        spec.current_hp = hp;
        BattleActor::new(
            ActorIndex(0),
            Side::Player,
            spec,
            SkillEffectBundle::default(),
            ResourcePool::default(),
        )
    }

    #[test]
    fn starting_hp_is_clamped() {
        assert_eq!(actor(100, None).hp(), 100);
        assert_eq!(actor(100, Some(250)).hp(), 100);
        assert!(!actor(100, Some(0)).is_alive());
    }

    #[test]
    fn damage_and_healing_respect_bounds() {
        let mut knight = actor(100, Some(40));
        assert_eq!(knight.restore_hp(500), 60);
        assert_eq!(knight.hp(), 100);
        assert_eq!(knight.take_damage(250), 100);
        assert_eq!(knight.hp(), 0);
        assert_eq!(knight.restore_hp(10), 0);
        assert_eq!(knight.revive(0), 1);
    }

    #[test]
    fn death_keeps_statuses_but_drops_guard() {
        let mut knight = actor(100, None);
        knight.statuses.apply(StatusInstance::from_definition(&StatusDefinition::new(
            StatusId(1),
            "Poison",
            Some(3),
        )));
        knight.resources.guard = true;
        knight.take_damage(100);
        assert!(knight.statuses.contains(StatusId(1)));
        assert!(!knight.resources.guard);
    }

    #[test]
    fn status_modifiers_scale_stats() {
        let mut knight = actor(100, None);
        knight.statuses.apply(StatusInstance::from_definition(
            &StatusDefinition::new(StatusId(2), "Attack Up", Some(3))
                .with_modifier(StatKind::PhysicalAttack, 1.5),
        ));
        assert_eq!(knight.stat(StatKind::PhysicalAttack), 150.0);
        assert_eq!(knight.stat(StatKind::MagicalAttack), 0.0);
    }
}
