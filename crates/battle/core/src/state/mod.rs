//! Mutable battle state.
//!
//! [`BattleState`] owns the flat actor array for the duration of one battle.
//! Handlers receive it through a unique borrow and address actors by
//! [`ActorIndex`]; nothing else may observe or mutate it mid-resolution.
mod actor;
mod common;
mod resources;
mod status;

pub use actor::{BattleActor, CombatantSpec};
pub use common::{
    ActorIndex, EnemySkillId, FormationSlot, Side, SkillId, SpellId, StatusId, Turn,
};
pub use resources::{BarrierCharges, ResourcePool, ResurrectionCounters, SpellCharges};
pub use status::{ApplyOutcome, StatusInstance, StatusList};

use crate::stats::StatKind;

/// All combatants plus the turn counter.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleState {
    actors: Vec<BattleActor>,
    pub turn: Turn,
}

impl BattleState {
    /// Players are expected first, so ties in turn order favour them.
    pub fn new(actors: Vec<BattleActor>) -> Self {
        Self { actors, turn: 0 }
    }

    pub fn actors(&self) -> &[BattleActor] {
        &self.actors
    }

    /// Indices are only minted by the state itself, so lookups cannot miss.
    pub fn actor(&self, index: ActorIndex) -> &BattleActor {
        &self.actors[index.get()]
    }

    pub fn actor_mut(&mut self, index: ActorIndex) -> &mut BattleActor {
        &mut self.actors[index.get()]
    }

    pub(crate) fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_alive(&self, index: ActorIndex) -> bool {
        self.actor(index).is_alive()
    }

    /// Living members of `side` in index order.
    pub fn living(&self, side: Side) -> Vec<ActorIndex> {
        self.actors
            .iter()
            .filter(|actor| actor.side == side && actor.is_alive())
            .map(|actor| actor.index)
            .collect()
    }

    /// Fallen members of `side` in index order.
    pub fn fallen(&self, side: Side) -> Vec<ActorIndex> {
        self.actors
            .iter()
            .filter(|actor| actor.side == side && !actor.is_alive())
            .map(|actor| actor.index)
            .collect()
    }

    pub fn living_count(&self, side: Side) -> usize {
        self.actors
            .iter()
            .filter(|actor| actor.side == side && actor.is_alive())
            .count()
    }

    pub fn is_wiped(&self, side: Side) -> bool {
        self.living_count(side) == 0
    }

    /// Living actors of `side` bearing the anti-healing effect.
    pub fn has_anti_healing(&self, side: Side) -> bool {
        self.actors
            .iter()
            .any(|actor| actor.side == side && actor.is_alive() && actor.bundle.anti_healing)
    }

    /// Living actors ordered by descending effective agility, ties by index.
    pub fn turn_order(&self) -> Vec<ActorIndex> {
        let mut order: Vec<(f64, ActorIndex)> = self
            .actors
            .iter()
            .filter(|actor| actor.is_alive())
            .map(|actor| (actor.stat(StatKind::Agility), actor.index))
            .collect();
        order.sort_by(|(agility_a, index_a), (agility_b, index_b)| {
            agility_b
                .total_cmp(agility_a)
                .then_with(|| index_a.cmp(index_b))
        });
        order.into_iter().map(|(_, index)| index).collect()
    }
}
