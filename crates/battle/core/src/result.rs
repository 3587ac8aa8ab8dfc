//! What a resolved battle hands back to its caller.

use crate::log::{BattleLog, BattleOutcome};
use crate::rng::RngState;
use crate::state::{ActorIndex, Side, StatusId, Turn};

/// Final condition of one combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantOutcome {
    pub index: ActorIndex,
    pub side: Side,
    pub hp: u32,
    pub max_hp: u32,
    /// Active statuses, oldest first.
    pub statuses: Vec<StatusId>,
}

impl CombatantOutcome {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// Result of [`BattleEngine::resolve`](crate::engine::BattleEngine::resolve).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleResult {
    pub outcome: BattleOutcome,
    pub turns: Turn,
    pub log: BattleLog,
    /// Every combatant in actor-index order.
    pub combatants: Vec<CombatantOutcome>,
    /// Random state after the battle; resume from it to continue the session.
    pub rng_state: RngState,
}

impl BattleResult {
    pub fn is_victory(&self) -> bool {
        self.outcome == BattleOutcome::Victory
    }

    pub fn combatant(&self, index: ActorIndex) -> Option<&CombatantOutcome> {
        self.combatants.get(index.get())
    }

    pub fn survivors(&self, side: Side) -> impl Iterator<Item = &CombatantOutcome> {
        self.combatants
            .iter()
            .filter(move |combatant| combatant.side == side && combatant.is_alive())
    }
}
