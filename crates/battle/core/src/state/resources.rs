//! Consumable per-battle resources.

use std::collections::BTreeMap;

use crate::state::{EnemySkillId, SpellId};
use crate::stats::DamageCategory;

/// Remaining and restorable casts of one spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellCharges {
    pub current: u8,
    pub max: u8,
}

/// Barrier charges per damage category. Each charge absorbs part of one hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarrierCharges {
    pub physical: u8,
    pub magical: u8,
    pub breath: u8,
}

impl BarrierCharges {
    fn slot(&mut self, category: DamageCategory) -> &mut u8 {
        match category {
            DamageCategory::Physical => &mut self.physical,
            DamageCategory::Magical => &mut self.magical,
            DamageCategory::Breath => &mut self.breath,
        }
    }

    pub fn get(&self, category: DamageCategory) -> u8 {
        match category {
            DamageCategory::Physical => self.physical,
            DamageCategory::Magical => self.magical,
            DamageCategory::Breath => self.breath,
        }
    }

    pub fn grant(&mut self, category: DamageCategory, charges: u8) -> u8 {
        let slot = self.slot(category);
        *slot = slot.saturating_add(charges);
        *slot
    }

    /// Spends one charge if available.
    pub fn consume(&mut self, category: DamageCategory) -> bool {
        let slot = self.slot(category);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}

/// Resurrection triggers spent so far, one counter per variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResurrectionCounters {
    pub forced: u8,
    pub vitalize: u8,
    pub necromancer: u8,
    pub active: u8,
}

/// Resource pool of one combatant.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePool {
    pub spells: BTreeMap<SpellId, SpellCharges>,
    pub breath_charges: u8,
    pub barriers: BarrierCharges,
    /// Halves the next physical hit, then drops.
    pub guard: bool,
    /// Uses spent per enemy skill.
    pub enemy_skill_uses: BTreeMap<EnemySkillId, u8>,
    pub resurrections: ResurrectionCounters,
}

impl ResourcePool {
    pub fn spell_charges(&self, spell: SpellId) -> u8 {
        self.spells.get(&spell).map_or(0, |charges| charges.current)
    }

    /// Spends one charge. Returns the charges left, or `None` without touching
    /// the pool when none remain.
    pub fn consume_spell(&mut self, spell: SpellId) -> Option<u8> {
        let charges = self.spells.get_mut(&spell)?;
        if charges.current == 0 {
            return None;
        }
        charges.current -= 1;
        Some(charges.current)
    }

    /// Refills every spell to its maximum.
    pub fn restore_spells(&mut self) {
        for charges in self.spells.values_mut() {
            charges.current = charges.current.max(charges.max);
        }
    }

    pub fn consume_breath(&mut self) -> Option<u8> {
        if self.breath_charges == 0 {
            return None;
        }
        self.breath_charges -= 1;
        Some(self.breath_charges)
    }

    /// Drops the guard flag, reporting whether it was raised.
    pub fn take_guard(&mut self) -> bool {
        std::mem::take(&mut self.guard)
    }

    pub fn enemy_skill_uses(&self, skill: EnemySkillId) -> u8 {
        self.enemy_skill_uses.get(&skill).copied().unwrap_or(0)
    }

    pub fn record_enemy_skill_use(&mut self, skill: EnemySkillId) {
        let uses = self.enemy_skill_uses.entry(skill).or_insert(0);
        *uses = uses.saturating_add(1);
    }
}
