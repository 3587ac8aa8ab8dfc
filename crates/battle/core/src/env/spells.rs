use crate::state::{SpellId, StatusId};
use crate::stats::{DamageCategory, Element};
use crate::targeting::TargetingMode;

/// Which action category may cast a spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SpellSchool {
    Mage,
    Priest,
}

/// What a spell does to each resolved target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellCategory {
    Damage,
    Heal,
    /// Applies the spell's status to allies.
    Buff,
    /// Applies the spell's status to enemies.
    Status,
    /// Removes debuffs (or only the spell's status, when set).
    Cleanse,
    /// Grants barrier charges against one damage category.
    Barrier(DamageCategory),
    /// Brings back one fallen ally.
    Revive,
}

/// Battle situation required before a spell may be chosen.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastCondition {
    #[default]
    Always,
    /// Some living ally is below this HP percentage.
    AllyHpBelow(f64),
    /// Some ally has fallen.
    AllyDead,
    /// At least this many enemies are alive.
    EnemyCountAtLeast(u8),
}

/// Catalog entry of a mage or priest spell.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellDefinition {
    pub id: SpellId,
    pub name: String,
    pub school: SpellSchool,
    /// Higher tiers are preferred when several spells are castable.
    pub tier: u8,
    pub category: SpellCategory,
    pub targeting: TargetingMode,
    /// Damage or heal multiplier; number of charges for barrier spells.
    #[cfg_attr(feature = "serde", serde(default = "unit_multiplier"))]
    pub multiplier: f64,
    /// Heals this percentage of max HP instead of using magical healing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub heal_percent: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: Option<StatusId>,
    #[cfg_attr(feature = "serde", serde(default = "full_chance"))]
    pub status_chance_percent: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Element,
    pub base_charges: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: CastCondition,
}

#[cfg(feature = "serde")]
fn unit_multiplier() -> f64 {
    1.0
}

#[cfg(feature = "serde")]
fn full_chance() -> f64 {
    100.0
}

impl SpellDefinition {
    pub fn new(
        id: SpellId,
        name: impl Into<String>,
        school: SpellSchool,
        tier: u8,
        category: SpellCategory,
        targeting: TargetingMode,
        base_charges: u8,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            school,
            tier,
            category,
            targeting,
            multiplier: 1.0,
            heal_percent: None,
            status: None,
            status_chance_percent: 100.0,
            element: Element::Neutral,
            base_charges,
            condition: CastCondition::Always,
        }
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_heal_percent(mut self, percent: f64) -> Self {
        self.heal_percent = Some(percent);
        self
    }

    pub fn with_status(mut self, status: StatusId, chance_percent: f64) -> Self {
        self.status = Some(status);
        self.status_chance_percent = chance_percent;
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    pub fn with_condition(mut self, condition: CastCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Spells whose targets are the caster's own side.
    pub fn targets_allies(&self) -> bool {
        matches!(
            self.category,
            SpellCategory::Heal
                | SpellCategory::Buff
                | SpellCategory::Cleanse
                | SpellCategory::Barrier(_)
                | SpellCategory::Revive
        )
    }
}
