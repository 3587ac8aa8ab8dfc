//! Derived combat stats and the temporary modifiers layered on top of them.
use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use strum::EnumCount;

/// Pre-computed combat stats of a combatant.
///
/// Produced outside the battle from attributes, level, and equipment; the
/// battle never recomputes it. Scores are `f64` because authored content uses
/// fractional rates (attack count `1.5` means a second hit half the time).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatSnapshot {
    pub max_hp: u32,
    pub physical_attack: f64,
    pub magical_attack: f64,
    pub physical_defense: f64,
    pub magical_defense: f64,
    pub hit_rate: f64,
    pub evasion_rate: f64,
    /// Critical chance in percent.
    pub critical_rate: f64,
    /// Hits per physical attack; the fractional part is a chance for one more.
    pub attack_count: f64,
    pub magical_healing: f64,
    pub trap_removal: f64,
    pub additional_damage: f64,
    pub breath_damage: f64,
    /// Eligible for martial-arts damage scaling (unarmed fighters).
    pub martial_arts: bool,
}

impl Default for CombatSnapshot {
    fn default() -> Self {
        Self {
            max_hp: 1,
            physical_attack: 0.0,
            magical_attack: 0.0,
            physical_defense: 0.0,
            magical_defense: 0.0,
            hit_rate: 0.0,
            evasion_rate: 0.0,
            critical_rate: 0.0,
            attack_count: 1.0,
            magical_healing: 0.0,
            trap_removal: 0.0,
            additional_damage: 0.0,
            breath_damage: 0.0,
            martial_arts: false,
        }
    }
}

/// Stats a status effect may scale while it is active.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    PhysicalAttack,
    MagicalAttack,
    PhysicalDefense,
    MagicalDefense,
    HitRate,
    EvasionRate,
    CriticalRate,
    Agility,
}

/// One multiplicative modifier.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub stat: StatKind,
    pub multiplier: f64,
}

/// Modifier set carried by one status instance. At most one entry per stat.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifiers(ArrayVec<StatModifier, { <StatKind as EnumCount>::COUNT }>);

impl StatModifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set from a definition's modifier map. Map keys are unique, so
    /// the capacity of one slot per stat is never exceeded.
    pub fn from_map(map: &BTreeMap<StatKind, f64>) -> Self {
        let mut modifiers = ArrayVec::new();
        for (&stat, &multiplier) in map {
            modifiers.push(StatModifier { stat, multiplier });
        }
        Self(modifiers)
    }

    /// Multiplier for one stat, `1.0` when absent.
    pub fn multiplier(&self, stat: StatKind) -> f64 {
        self.0
            .iter()
            .find(|modifier| modifier.stat == stat)
            .map_or(1.0, |modifier| modifier.multiplier)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_stats_are_neutral() {
        let mut map = BTreeMap::new();
        map.insert(StatKind::PhysicalAttack, 1.5);
        map.insert(StatKind::Agility, 0.5);
        let modifiers = StatModifiers::from_map(&map);

        assert_eq!(modifiers.multiplier(StatKind::PhysicalAttack), 1.5);
        assert_eq!(modifiers.multiplier(StatKind::Agility), 0.5);
        assert_eq!(modifiers.multiplier(StatKind::HitRate), 1.0);
    }

    #[test]
    fn one_slot_per_stat_kind() {
        let map: BTreeMap<_, _> = [
            StatKind::PhysicalAttack,
            StatKind::MagicalAttack,
            StatKind::PhysicalDefense,
            StatKind::MagicalDefense,
            StatKind::HitRate,
            StatKind::EvasionRate,
            StatKind::CriticalRate,
            StatKind::Agility,
        ]
        .into_iter()
        .map(|stat| (stat, 2.0))
        .collect();
        assert_eq!(map.len(), StatKind::COUNT);
        assert!(!StatModifiers::from_map(&map).is_empty());
    }
}
