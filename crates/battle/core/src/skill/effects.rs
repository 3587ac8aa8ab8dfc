//! Strongly-typed, pre-resolved skill modifiers.

use std::collections::{BTreeMap, BTreeSet};

use bitflags::bitflags;

use crate::env::StatusTags;
use crate::state::StatusId;

bitflags! {
    /// Special physical-attack variants.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct SpecialAttack: u8 {
        /// Ignores the defender's physical defense.
        const PIERCING = 1 << 0;
        /// Doubles the critical chance.
        const ASSASSINATE = 1 << 1;
        /// Strikes several distinct enemies per attack.
        const SWEEP = 1 << 2;
        /// Returns part of the dealt damage as healing.
        const DRAIN = 1 << 3;
    }
}

/// Tag values accepted by the `specialAttack` effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum SpecialAttackVariant {
    Piercing,
    Assassinate,
    Sweep,
    Drain,
}

impl From<SpecialAttackVariant> for SpecialAttack {
    fn from(variant: SpecialAttackVariant) -> Self {
        match variant {
            SpecialAttackVariant::Piercing => SpecialAttack::PIERCING,
            SpecialAttackVariant::Assassinate => SpecialAttack::ASSASSINATE,
            SpecialAttackVariant::Sweep => SpecialAttack::SWEEP,
            SpecialAttackVariant::Drain => SpecialAttack::DRAIN,
        }
    }
}

/// Bonus charges granted to every spell the actor knows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellChargeModifier {
    /// Added to the starting charges.
    pub initial: u8,
    /// Added on top of the starting charges to form the restorable maximum.
    pub extra: u8,
}

/// Chance-gated resurrection that restores a share of max HP.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResurrectionEffect {
    pub chance_percent: f64,
    pub hp_percent: f64,
    /// Triggers allowed per battle.
    pub cap: u8,
}

/// Periodic revival of a fallen ally.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NecromancerEffect {
    /// Triggers at the end of every turn divisible by this value.
    pub interval: u32,
    pub hp_percent: f64,
    pub cap: u8,
}

/// Compiled, immutable modifier bundle of one combatant for one battle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillEffectBundle {
    pub special_attack: SpecialAttack,
    /// Living opponents of the bearer receive reduced healing.
    pub anti_healing: bool,
    pub breath_extra_charges: u8,
    /// Forces targets every `n` turns.
    pub sacrifice_interval: Option<u32>,
    /// Removes the oldest debuff at the end of each turn.
    pub auto_repair: bool,
    pub parry: bool,
    pub shield_block: bool,
    pub spell_charges: SpellChargeModifier,
    pub forced_resurrection: Option<ResurrectionEffect>,
    pub vitalize: Option<ResurrectionEffect>,
    pub necromancer: Option<NecromancerEffect>,
    pub active_resurrection: Option<ResurrectionEffect>,
    /// Counter-attack chance in percent.
    pub counter_attack: Option<f64>,
    pub magic_counter: Option<f64>,
    pub pursuit: Option<f64>,
    /// Front-row bearer may intercept attacks aimed at back-row allies.
    pub cover: bool,
    pub targeting_weight: f64,
    pub damage_dealt: f64,
    pub damage_taken: f64,
    pub critical_damage: f64,
    pub immune_tags: StatusTags,
    pub immune_statuses: BTreeSet<StatusId>,
    /// Resistance in `[0, 1]` applied to every status.
    pub status_resistance: f64,
    /// Per-status resistance; the higher of this and the general value applies.
    pub status_resistances: BTreeMap<StatusId, f64>,
}

impl Default for SkillEffectBundle {
    fn default() -> Self {
        Self {
            special_attack: SpecialAttack::empty(),
            anti_healing: false,
            breath_extra_charges: 0,
            sacrifice_interval: None,
            auto_repair: false,
            parry: false,
            shield_block: false,
            spell_charges: SpellChargeModifier::default(),
            forced_resurrection: None,
            vitalize: None,
            necromancer: None,
            active_resurrection: None,
            counter_attack: None,
            magic_counter: None,
            pursuit: None,
            cover: false,
            targeting_weight: 1.0,
            damage_dealt: 1.0,
            damage_taken: 1.0,
            critical_damage: 1.0,
            immune_tags: StatusTags::empty(),
            immune_statuses: BTreeSet::new(),
            status_resistance: 0.0,
            status_resistances: BTreeMap::new(),
        }
    }
}

impl SkillEffectBundle {
    pub fn has(&self, special: SpecialAttack) -> bool {
        self.special_attack.contains(special)
    }

    /// Immune when the status is listed or shares a tag with the immunity set.
    pub fn is_immune(&self, status: StatusId, tags: StatusTags) -> bool {
        self.immune_statuses.contains(&status) || self.immune_tags.intersects(tags)
    }

    pub fn resistance_to(&self, status: StatusId) -> f64 {
        let specific = self.status_resistances.get(&status).copied().unwrap_or(0.0);
        self.status_resistance.max(specific).clamp(0.0, 1.0)
    }

    /// Targeting weight used by weighted enemy selection; never negative.
    pub fn weight(&self) -> f64 {
        if self.targeting_weight.is_finite() {
            self.targeting_weight.max(0.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bundle_is_neutral() {
        let bundle = SkillEffectBundle::default();
        assert!(!bundle.has(SpecialAttack::PIERCING));
        assert_eq!(bundle.weight(), 1.0);
        assert_eq!(bundle.resistance_to(StatusId(1)), 0.0);
        assert!(!bundle.is_immune(StatusId(1), StatusTags::SLEEP));
    }

    #[test]
    fn specific_resistance_wins_when_higher() {
        let mut bundle = SkillEffectBundle {
            status_resistance: 0.25,
            ..SkillEffectBundle::default()
        };
        bundle.status_resistances.insert(StatusId(3), 0.75);
        assert_eq!(bundle.resistance_to(StatusId(3)), 0.75);
        assert_eq!(bundle.resistance_to(StatusId(4)), 0.25);
    }

    #[test]
    fn immunity_by_tag_or_id() {
        let mut bundle = SkillEffectBundle {
            immune_tags: StatusTags::SLEEP,
            ..SkillEffectBundle::default()
        };
        bundle.immune_statuses.insert(StatusId(7));
        assert!(bundle.is_immune(StatusId(1), StatusTags::SLEEP | StatusTags::DEBUFF));
        assert!(bundle.is_immune(StatusId(7), StatusTags::empty()));
        assert!(!bundle.is_immune(StatusId(2), StatusTags::POISON));
    }
}
