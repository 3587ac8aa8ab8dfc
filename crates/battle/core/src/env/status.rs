use std::collections::BTreeMap;

use bitflags::bitflags;

use crate::state::StatusId;
use crate::stats::StatKind;

bitflags! {
    /// Semantic tags of a status effect. Immunities and cleanses match on these.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct StatusTags: u16 {
        const DEBUFF = 1 << 0;
        const BUFF = 1 << 1;
        const SLEEP = 1 << 2;
        const CONFUSION = 1 << 3;
        const PETRIFY = 1 << 4;
        const INSTANT_DEATH = 1 << 5;
        const POISON = 1 << 6;
        const PARALYSIS = 1 << 7;
        const SILENCE = 1 << 8;
    }
}

impl StatusTags {
    /// Parses a single tag name, case-insensitively (`"sleep"`, `"DEBUFF"`).
    pub fn parse_name(name: &str) -> Option<Self> {
        Self::from_name(&name.trim().to_ascii_uppercase())
    }
}

/// Catalog entry of a status effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusDefinition {
    pub id: StatusId,
    pub name: String,
    /// Turns the status lasts; `None` lasts until cleansed or the battle ends.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<u8>,
    /// Percentage of max HP lost at every end-of-turn tick.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tick_damage_percent: f64,
    /// The bearer skips its turns while this status is active.
    #[cfg_attr(feature = "serde", serde(default))]
    pub locks_action: bool,
    /// Intrinsic application chance in percent, before source and resistance scaling.
    #[cfg_attr(feature = "serde", serde(default = "full_chance"))]
    pub base_chance_percent: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub apply_message: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub expire_message: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: StatusTags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stat_modifiers: BTreeMap<StatKind, f64>,
}

#[cfg(feature = "serde")]
fn full_chance() -> f64 {
    100.0
}

impl StatusDefinition {
    /// A status with no tick damage, no lock, and a guaranteed base chance.
    pub fn new(id: StatusId, name: impl Into<String>, duration: Option<u8>) -> Self {
        Self {
            id,
            name: name.into(),
            duration,
            tick_damage_percent: 0.0,
            locks_action: false,
            base_chance_percent: 100.0,
            apply_message: String::new(),
            expire_message: String::new(),
            tags: StatusTags::empty(),
            stat_modifiers: BTreeMap::new(),
        }
    }

    pub fn with_tags(mut self, tags: StatusTags) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_tick_damage(mut self, percent: f64) -> Self {
        self.tick_damage_percent = percent;
        self
    }

    pub fn locking(mut self) -> Self {
        self.locks_action = true;
        self
    }

    pub fn with_base_chance(mut self, percent: f64) -> Self {
        self.base_chance_percent = percent;
        self
    }

    pub fn with_modifier(mut self, stat: StatKind, multiplier: f64) -> Self {
        self.stat_modifiers.insert(stat, multiplier);
        self
    }

    pub fn is_debuff(&self) -> bool {
        self.tags.contains(StatusTags::DEBUFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_names_parse_case_insensitively() {
        assert_eq!(StatusTags::parse_name("sleep"), Some(StatusTags::SLEEP));
        assert_eq!(
            StatusTags::parse_name(" Instant_Death "),
            Some(StatusTags::INSTANT_DEATH)
        );
        assert_eq!(StatusTags::parse_name("burning"), None);
    }
}
