/// The six core attributes of a combatant.
///
/// Only agility (turn order) and luck (every luck-biased draw) are read during
/// battle; the others are carried for log attribution and derived-stat tooling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CoreAttributes {
    pub strength: u32,
    pub wisdom: u32,
    pub spirit: u32,
    pub vitality: u32,
    pub agility: u32,
    pub luck: u32,
}

impl CoreAttributes {
    pub fn new(
        strength: u32,
        wisdom: u32,
        spirit: u32,
        vitality: u32,
        agility: u32,
        luck: u32,
    ) -> Self {
        Self {
            strength,
            wisdom,
            spirit,
            vitality,
            agility,
            luck,
        }
    }

    /// Attributes where only agility and luck matter.
    pub fn with_speed_and_luck(agility: u32, luck: u32) -> Self {
        Self {
            agility,
            luck,
            ..Self::default()
        }
    }
}
