//! Damage resistance tables.
//!
//! Every entry is a multiplier on incoming damage: `1.0` is neutral, `0.5`
//! halves, `0.0` nullifies, values above one are weaknesses. Category and
//! element multipliers stack multiplicatively.

/// Delivery channel of damage. Also keys barrier charges.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageCategory {
    Physical,
    Magical,
    Breath,
}

impl DamageCategory {
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Physical => 0,
            Self::Magical => 1,
            Self::Breath => 2,
        }
    }
}

/// Elemental affinity of a spell, breath, or enemy skill.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Element {
    #[default]
    Neutral,
    Fire,
    Ice,
    Thunder,
    Holy,
    Dark,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ElementResistances {
    pub fire: f64,
    pub ice: f64,
    pub thunder: f64,
    pub holy: f64,
    pub dark: f64,
}

impl Default for ElementResistances {
    fn default() -> Self {
        Self {
            fire: 1.0,
            ice: 1.0,
            thunder: 1.0,
            holy: 1.0,
            dark: 1.0,
        }
    }
}

/// Resistance table of one combatant.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Resistances {
    pub physical: f64,
    pub magical: f64,
    pub breath: f64,
    pub elements: ElementResistances,
}

impl Default for Resistances {
    fn default() -> Self {
        Self {
            physical: 1.0,
            magical: 1.0,
            breath: 1.0,
            elements: ElementResistances::default(),
        }
    }
}

impl Resistances {
    pub fn category(&self, category: DamageCategory) -> f64 {
        match category {
            DamageCategory::Physical => self.physical,
            DamageCategory::Magical => self.magical,
            DamageCategory::Breath => self.breath,
        }
    }

    pub fn element(&self, element: Element) -> f64 {
        match element {
            Element::Neutral => 1.0,
            Element::Fire => self.elements.fire,
            Element::Ice => self.elements.ice,
            Element::Thunder => self.elements.thunder,
            Element::Holy => self.elements.holy,
            Element::Dark => self.elements.dark,
        }
    }

    /// Combined multiplier, clamped at zero so a negative entry cannot heal.
    pub fn multiplier(&self, category: DamageCategory, element: Element) -> f64 {
        (self.category(category) * self.element(element)).max(0.0)
    }
}
