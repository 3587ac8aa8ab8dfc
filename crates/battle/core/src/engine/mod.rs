//! Battle resolution pipeline.
//!
//! [`BattleEngine`] is the single entry point: it validates the request,
//! builds the [`BattleState`](crate::state::BattleState), runs the turn loop,
//! and closes the log with the outcome declaration. Resolution is a pure
//! function of the request, the catalog, and the config; every random
//! decision goes through the one [`BattleRandom`] owned by the call.
mod context;
mod errors;
mod handlers;
mod outcome;
mod setup;
mod turns;

pub use errors::BattleError;
pub use outcome::evaluate;
pub use setup::validate_combatant;

use context::BattleContext;
use crate::config::BattleConfig;
use crate::env::CatalogOracle;
use crate::log::{BattleAction, BattleLog, InitialHp, ParticipantSnapshot};
use crate::result::{BattleResult, CombatantOutcome};
use crate::rng::{BattleRandom, RngState};
use crate::state::{BattleState, CombatantSpec, Side};

/// Where the random sequence of a battle starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RandomSource {
    /// Fresh sequence derived from a seed.
    Seed(u64),
    /// Continue a sequence saved from an earlier battle.
    Resume(RngState),
}

impl RandomSource {
    fn into_random(self) -> BattleRandom {
        match self {
            Self::Seed(seed) => BattleRandom::new(seed),
            Self::Resume(state) => BattleRandom::from_state(state),
        }
    }
}

/// Everything one battle needs besides the catalog and config.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleRequest {
    pub players: Vec<CombatantSpec>,
    pub enemies: Vec<CombatantSpec>,
    pub random: RandomSource,
}

impl BattleRequest {
    pub fn new(players: Vec<CombatantSpec>, enemies: Vec<CombatantSpec>, random: RandomSource) -> Self {
        Self {
            players,
            enemies,
            random,
        }
    }

    pub fn seeded(players: Vec<CombatantSpec>, enemies: Vec<CombatantSpec>, seed: u64) -> Self {
        Self::new(players, enemies, RandomSource::Seed(seed))
    }
}

/// Resolves battles against a catalog under one rule set.
#[derive(Clone, Copy)]
pub struct BattleEngine<'a> {
    catalog: &'a dyn CatalogOracle,
    config: &'a BattleConfig,
}

impl<'a> BattleEngine<'a> {
    pub fn new(catalog: &'a dyn CatalogOracle, config: &'a BattleConfig) -> Self {
        Self { catalog, config }
    }

    /// Resolves one battle to completion.
    ///
    /// Fails only on invalid input, before anything is drawn or logged.
    pub fn resolve(&self, request: BattleRequest) -> Result<BattleResult, BattleError> {
        let BattleRequest {
            players,
            enemies,
            random,
        } = request;
        let state = setup::build_state(players, enemies, self.catalog)?;

        let initial_hp = state
            .actors()
            .iter()
            .map(|actor| InitialHp {
                actor: actor.index,
                hp: actor.hp(),
            })
            .collect();
        let (player_roster, enemy_roster) = participants(&state);

        tracing::info!(
            players = player_roster.len(),
            enemies = enemy_roster.len(),
            max_turns = self.config.max_turns,
            "battle started"
        );

        let mut ctx = BattleContext::new(state, random.into_random(), self.catalog, self.config);
        let (outcome, turns) = turns::run(&mut ctx)?;
        ctx.record(BattleAction::new(turns, None, outcome.into()));

        let (state, rng, entries) = ctx.into_parts();
        tracing::info!(%outcome, turns, entries = entries.len(), "battle resolved");

        let combatants = state
            .actors()
            .iter()
            .map(|actor| CombatantOutcome {
                index: actor.index,
                side: actor.side,
                hp: actor.hp(),
                max_hp: actor.max_hp(),
                statuses: actor.statuses.ids(),
            })
            .collect();

        Ok(BattleResult {
            outcome,
            turns,
            log: BattleLog {
                outcome,
                turns,
                initial_hp,
                entries,
                players: player_roster,
                enemies: enemy_roster,
            },
            combatants,
            rng_state: rng.state(),
        })
    }
}

/// Display snapshots per side. Enemies carry no level.
fn participants(state: &BattleState) -> (Vec<ParticipantSnapshot>, Vec<ParticipantSnapshot>) {
    let snapshot = |side: Side| {
        state
            .actors()
            .iter()
            .filter(|actor| actor.side == side)
            .map(|actor| ParticipantSnapshot {
                actor: actor.index,
                character_id: match side {
                    Side::Player => actor.character_id,
                    Side::Enemy => actor.enemy_id,
                },
                name: actor.name.clone(),
                avatar_id: actor.avatar_id,
                level: (side == Side::Player).then_some(actor.level),
                max_hp: actor.max_hp(),
            })
            .collect::<Vec<_>>()
    };
    (snapshot(Side::Player), snapshot(Side::Enemy))
}

/// Convenience wrapper around [`BattleEngine::resolve`].
pub fn resolve_battle(
    catalog: &dyn CatalogOracle,
    config: &BattleConfig,
    request: BattleRequest,
) -> Result<BattleResult, BattleError> {
    BattleEngine::new(catalog, config).resolve(request)
}
