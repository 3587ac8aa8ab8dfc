//! Battle log.
//!
//! The log is the single record of a battle: who started with how much HP,
//! every resolved action with its effects, and who took part. It is built
//! append-only during resolution, frozen when the battle ends, and persisted
//! through the binary codec in [`codec`].
#[cfg(feature = "serde")]
pub mod codec;
mod entry;
mod kinds;

#[cfg(feature = "serde")]
pub use codec::LogCodecError;
pub use entry::{ActionDeclaration, BattleAction, EffectRecord};
pub use kinds::{ActionKind, BattleOutcome, EffectFlags, EffectKind, UnknownKindByte};

use crate::state::{ActorIndex, Turn};

/// HP of one combatant when the battle started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitialHp {
    pub actor: ActorIndex,
    pub hp: u32,
}

/// Identity of a combatant for replay and reward attribution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantSnapshot {
    pub actor: ActorIndex,
    pub character_id: Option<u32>,
    pub name: String,
    pub avatar_id: Option<u32>,
    pub level: Option<u16>,
    pub max_hp: u32,
}

/// Complete, immutable record of one battle.
///
/// Field order is the persisted order: header, initial HP table, entries,
/// player snapshots, enemy snapshots.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLog {
    pub outcome: BattleOutcome,
    pub turns: Turn,
    pub initial_hp: Vec<InitialHp>,
    pub entries: Vec<BattleAction>,
    pub players: Vec<ParticipantSnapshot>,
    pub enemies: Vec<ParticipantSnapshot>,
}

impl BattleLog {
    /// The closing outcome declaration.
    pub fn last_entry(&self) -> Option<&BattleAction> {
        self.entries.last()
    }

    /// Entries that are not the outcome declaration.
    pub fn action_entries(&self) -> impl Iterator<Item = &BattleAction> {
        self.entries
            .iter()
            .filter(|entry| !entry.declaration.kind.is_outcome())
    }

    pub fn entries_of(&self, kind: ActionKind) -> impl Iterator<Item = &BattleAction> {
        self.entries
            .iter()
            .filter(move |entry| entry.declaration.kind == kind)
    }

    pub fn effects_of(&self, kind: EffectKind) -> impl Iterator<Item = &EffectRecord> {
        self.entries
            .iter()
            .flat_map(move |entry| entry.effects_of(kind))
    }

    pub fn initial_hp_of(&self, actor: ActorIndex) -> Option<u32> {
        self.initial_hp
            .iter()
            .find(|entry| entry.actor == actor)
            .map(|entry| entry.hp)
    }
}
