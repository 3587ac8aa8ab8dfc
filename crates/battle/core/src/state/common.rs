use std::fmt;

/// Stable position of a combatant inside the battle's actor array.
///
/// Indices never change during a battle: dead combatants stay in place so that
/// log entries, cover links, and forced targets keep pointing at the same unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActorIndex(pub u16);

impl ActorIndex {
    #[inline]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ActorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u16);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

catalog_id!(
    /// Catalog key of a status-effect definition.
    StatusId,
    "status:"
);
catalog_id!(
    /// Catalog key of a mage or priest spell.
    SpellId,
    "spell:"
);
catalog_id!(
    /// Catalog key of an enemy-only special skill.
    EnemySkillId,
    "enemy-skill:"
);
catalog_id!(
    /// Identifier of a learned/equipped skill whose effect records feed the compiler.
    SkillId,
    "skill:"
);

/// Which party a combatant fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// The side this side fights against.
    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Formation slot, 1-based. Slots up to the configured row size form the front row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FormationSlot(pub u8);

impl FormationSlot {
    pub const FRONT: Self = Self(1);

    #[inline]
    pub const fn is_front_row(self, front_row_size: u8) -> bool {
        self.0 >= 1 && self.0 <= front_row_size
    }
}

impl Default for FormationSlot {
    fn default() -> Self {
        Self::FRONT
    }
}

/// Battle turn counter. Turn 0 is the pre-battle evaluation.
pub type Turn = u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn front_row_membership_depends_on_row_size() {
        assert!(FormationSlot(1).is_front_row(3));
        assert!(FormationSlot(3).is_front_row(3));
        assert!(!FormationSlot(4).is_front_row(3));
        assert!(!FormationSlot(0).is_front_row(3));
    }

    #[test]
    fn sides_are_mutual_opponents() {
        assert_eq!(Side::Player.opponent(), Side::Enemy);
        assert_eq!(Side::Enemy.opponent().opponent(), Side::Enemy);
        assert_eq!("ENEMY".parse::<Side>().unwrap(), Side::Enemy);
    }
}
