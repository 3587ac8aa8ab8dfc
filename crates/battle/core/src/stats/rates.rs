//! Per-turn action category weights.

/// Action category chosen once per actor per turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ActionCategory {
    Attack,
    PriestMagic,
    MageMagic,
    Breath,
}

impl ActionCategory {
    /// Category order matching [`ActionRates::weights`].
    pub const ALL: [ActionCategory; 4] = [
        ActionCategory::Attack,
        ActionCategory::PriestMagic,
        ActionCategory::MageMagic,
        ActionCategory::Breath,
    ];
}

/// Relative likelihood of each action category.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionRates {
    pub attack: f64,
    pub priest_magic: f64,
    pub mage_magic: f64,
    pub breath: f64,
}

impl ActionRates {
    /// Always attack.
    pub const ATTACK_ONLY: Self = Self {
        attack: 1.0,
        priest_magic: 0.0,
        mage_magic: 0.0,
        breath: 0.0,
    };

    pub fn new(attack: f64, priest_magic: f64, mage_magic: f64, breath: f64) -> Self {
        Self {
            attack,
            priest_magic,
            mage_magic,
            breath,
        }
    }

    /// Weights in [`ActionCategory::ALL`] order.
    pub fn weights(&self) -> [f64; 4] {
        [self.attack, self.priest_magic, self.mage_magic, self.breath]
    }

    /// True when at least one category has a positive, finite weight.
    pub fn has_choice(&self) -> bool {
        self.weights().iter().any(|w| w.is_finite() && *w > 0.0)
    }
}

impl Default for ActionRates {
    fn default() -> Self {
        Self::ATTACK_ONLY
    }
}
