//! Single-byte kind codes of the battle log.

use bitflags::bitflags;

/// A kind byte that does not name any variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} byte {value}")]
pub struct UnknownKindByte {
    pub kind: &'static str,
    pub value: u8,
}

/// Declares a `#[repr(u8)]` enum persisted as its discriminant byte.
macro_rules! byte_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(into = "u8", try_from = "u8"))]
        #[strum(serialize_all = "snake_case")]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value,)+
        }

        impl From<$name> for u8 {
            fn from(kind: $name) -> u8 {
                kind as u8
            }
        }

        impl TryFrom<u8> for $name {
            type Error = UnknownKindByte;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    other => Err(UnknownKindByte {
                        kind: stringify!($name),
                        value: other,
                    }),
                }
            }
        }
    };
}

byte_enum! {
    /// Terminal state of a battle.
    pub enum BattleOutcome {
        Victory = 0,
        Defeat = 1,
        Retreat = 2,
    }
}

byte_enum! {
    /// What an action entry declares.
    pub enum ActionKind {
        PhysicalAttack = 0,
        PriestMagic = 1,
        MageMagic = 2,
        Breath = 3,
        EnemySkill = 4,
        Counter = 5,
        MagicCounter = 6,
        Pursuit = 7,
        Resurrection = 8,
        ActionLocked = 9,
        StatusTick = 10,
        SacrificeRitual = 11,
        Victory = 12,
        Defeat = 13,
        Retreat = 14,
    }
}

byte_enum! {
    /// What one effect record did to its target.
    pub enum EffectKind {
        Damage = 0,
        Heal = 1,
        Miss = 2,
        StatusApplied = 3,
        StatusResisted = 4,
        StatusExpired = 5,
        StatusCleansed = 6,
        StatusTick = 7,
        Death = 8,
        Revive = 9,
        CoverRedirect = 10,
        Parry = 11,
        ShieldBlock = 12,
        BarrierAbsorb = 13,
        GuardAbsorb = 14,
        ChargeConsumed = 15,
        SacrificeMark = 16,
        BarrierGranted = 17,
        GuardRaised = 18,
    }
}

impl From<BattleOutcome> for ActionKind {
    fn from(outcome: BattleOutcome) -> Self {
        match outcome {
            BattleOutcome::Victory => ActionKind::Victory,
            BattleOutcome::Defeat => ActionKind::Defeat,
            BattleOutcome::Retreat => ActionKind::Retreat,
        }
    }
}

impl ActionKind {
    /// Outcome declarations close every log.
    pub fn is_outcome(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat | Self::Retreat)
    }
}

bitflags! {
    /// Bits stored in the `extra` word of declarations and effects.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct EffectFlags: u32 {
        const CRITICAL = 1 << 0;
        /// The chosen category could not run; this is the basic-attack fallback.
        const FALLBACK = 1 << 1;
        const AUTO_REPAIR = 1 << 2;
        const DRAIN = 1 << 3;
        const SWEEP = 1 << 4;
        /// Charge effects: a spell charge (otherwise breath). Revive effects: a revive spell.
        const SPELL = 1 << 5;
        const FORCED = 1 << 6;
        const VITALIZE = 1 << 7;
        const NECROMANCER = 1 << 8;
        const ACTIVE = 1 << 9;
        /// Status effects: an already active status was refreshed.
        const REFRESHED = 1 << 10;
        /// Status effects: resisted through immunity rather than a failed roll.
        const IMMUNE = 1 << 11;
        /// Status effects: resisted because the status list was full.
        const LIST_FULL = 1 << 12;
        const INSTANT_DEATH = 1 << 13;
        /// Sacrifice marks: the forced ally (otherwise the forced enemy).
        const ALLY = 1 << 14;
        /// Set on effects of an enemy skill's physical/magical/breath strike.
        const SKILL = 1 << 15;
    }
}

impl From<EffectFlags> for u32 {
    fn from(flags: EffectFlags) -> u32 {
        flags.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_round_trip_through_bytes() {
        for byte in 0..=18u8 {
            let kind = EffectKind::try_from(byte).unwrap();
            assert_eq!(u8::from(kind), byte);
        }
        assert_eq!(ActionKind::try_from(12), Ok(ActionKind::Victory));
        assert_eq!(
            ActionKind::try_from(15),
            Err(UnknownKindByte {
                kind: "ActionKind",
                value: 15,
            })
        );
    }

    #[test]
    fn outcomes_map_to_declarations() {
        assert_eq!(ActionKind::from(BattleOutcome::Retreat), ActionKind::Retreat);
        assert!(ActionKind::Defeat.is_outcome());
        assert!(!ActionKind::Breath.is_outcome());
        assert_eq!(BattleOutcome::Victory.to_string(), "victory");
    }
}
