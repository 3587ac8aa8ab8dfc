//! Mutable resolution context threaded through the turn loop and handlers.

use super::errors::BattleError;
use crate::config::BattleConfig;
use crate::env::CatalogOracle;
use crate::log::BattleAction;
use crate::rng::BattleRandom;
use crate::state::{ActorIndex, BattleState, Side, Turn};
use crate::targeting::{AllyPreference, ForcedTargets, ResolvedTargets, TargetingMode, Targeting};

/// Everything one battle mutates, owned by the call that resolves it.
///
/// Handlers get `&mut BattleContext` and nothing else; there is no shared or
/// global state.
pub struct BattleContext<'a> {
    pub state: BattleState,
    pub rng: BattleRandom,
    pub catalog: &'a dyn CatalogOracle,
    pub config: &'a BattleConfig,
    entries: Vec<BattleAction>,
    forced: [Option<ForcedTargets>; 2],
}

const fn side_slot(side: Side) -> usize {
    match side {
        Side::Player => 0,
        Side::Enemy => 1,
    }
}

/// Borrows only the state so callers can keep `rng` mutably borrowed.
fn targeting_for(
    state: &BattleState,
    forced: [Option<ForcedTargets>; 2],
    front_row_size: u8,
    actor: ActorIndex,
) -> Targeting<'_> {
    Targeting {
        state,
        actor,
        forced: forced[side_slot(state.actor(actor).side)],
        front_row_size,
    }
}

impl<'a> BattleContext<'a> {
    pub fn new(
        state: BattleState,
        rng: BattleRandom,
        catalog: &'a dyn CatalogOracle,
        config: &'a BattleConfig,
    ) -> Self {
        Self {
            state,
            rng,
            catalog,
            config,
            entries: Vec::new(),
            forced: [None, None],
        }
    }

    #[inline]
    pub fn turn(&self) -> Turn {
        self.state.turn
    }

    /// Appends a finished entry to the log.
    pub fn record(&mut self, entry: BattleAction) {
        tracing::debug!(
            turn = entry.turn,
            actor = ?entry.actor,
            kind = %entry.declaration.kind,
            effects = entry.effects.len(),
            "action resolved"
        );
        self.entries.push(entry);
    }

    pub fn into_parts(self) -> (BattleState, BattleRandom, Vec<BattleAction>) {
        (self.state, self.rng, self.entries)
    }

    pub fn set_forced(&mut self, side: Side, targets: ForcedTargets) {
        self.forced[side_slot(side)] = Some(targets);
    }

    pub fn clear_forced(&mut self) {
        self.forced = [None, None];
    }

    fn targeting(&self, actor: ActorIndex) -> Targeting<'_> {
        targeting_for(&self.state, self.forced, self.config.front_row_size, actor)
    }

    pub fn resolve_targets(
        &mut self,
        actor: ActorIndex,
        mode: TargetingMode,
        preference: AllyPreference,
    ) -> Result<ResolvedTargets, BattleError> {
        let targeting = targeting_for(&self.state, self.forced, self.config.front_row_size, actor);
        targeting.resolve(mode, preference, &mut self.rng)
    }

    pub fn single_enemy(&mut self, actor: ActorIndex) -> Result<ResolvedTargets, BattleError> {
        self.resolve_targets(actor, TargetingMode::SingleEnemy, AllyPreference::Weighted)
    }

    pub fn has_candidates(&self, actor: ActorIndex, mode: TargetingMode) -> bool {
        self.targeting(actor).has_candidates(mode)
    }

    /// Healing multiplier for `receiver`: reduced while a living opponent
    /// carries anti-healing.
    pub fn healing_penalty(&self, receiver: ActorIndex) -> Option<f64> {
        let side = self.state.actor(receiver).side;
        self.state
            .has_anti_healing(side.opponent())
            .then_some(self.config.anti_healing_ratio)
    }
}
