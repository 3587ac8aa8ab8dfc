//! The turn loop.

use super::context::BattleContext;
use super::errors::BattleError;
use super::handlers::{breath, enemy_skill, magic, physical, resurrection, sacrifice, status};
use super::outcome::evaluate;
use crate::env::SpellSchool;
use crate::log::{ActionKind, BattleAction, BattleOutcome, EffectFlags};
use crate::state::{ActorIndex, Side, Turn};
use crate::stats::ActionCategory;

/// Runs turns until one side is wiped out or the turn cap is reached.
///
/// Returns the outcome and the turn it was reached on (0 when decided before
/// the first turn).
pub fn run(ctx: &mut BattleContext<'_>) -> Result<(BattleOutcome, Turn), BattleError> {
    if let Some(outcome) = evaluate(&ctx.state) {
        return Ok((outcome, 0));
    }

    for turn in 1..=ctx.config.max_turns {
        ctx.state.turn = turn;
        sacrifice::begin_turn(ctx);

        for actor in ctx.state.turn_order() {
            if !ctx.state.is_alive(actor) {
                continue;
            }
            take_turn(ctx, actor)?;
            if let Some(outcome) = evaluate(&ctx.state) {
                return Ok((outcome, turn));
            }
        }

        status::end_of_turn(ctx)?;
        if let Some(outcome) = evaluate(&ctx.state) {
            return Ok((outcome, turn));
        }
    }
    Ok((BattleOutcome::Retreat, ctx.config.max_turns))
}

fn take_turn(ctx: &mut BattleContext<'_>, actor: ActorIndex) -> Result<(), BattleError> {
    let combatant = ctx.state.actor(actor);
    if combatant.statuses.locks_action() {
        let entry = BattleAction::by(ctx.turn(), actor, ActionKind::ActionLocked);
        ctx.record(entry);
        return Ok(());
    }
    let side = combatant.side;

    if resurrection::active(ctx, actor)? {
        return Ok(());
    }
    if side == Side::Enemy && enemy_skill::try_skills(ctx, actor)? {
        return Ok(());
    }

    let combatant = ctx.state.actor(actor);
    let weights = combatant.rates.weights();
    let Some(choice) = ctx.rng.next_index(&weights) else {
        return Err(BattleError::ZeroActionWeights {
            name: combatant.name.clone(),
        });
    };
    let category = ActionCategory::ALL[choice];

    let executed = match category {
        ActionCategory::Attack => physical::execute(ctx, actor, EffectFlags::empty())?,
        ActionCategory::PriestMagic => magic::execute(ctx, actor, SpellSchool::Priest)?,
        ActionCategory::MageMagic => magic::execute(ctx, actor, SpellSchool::Mage)?,
        ActionCategory::Breath => breath::execute(ctx, actor)?,
    };
    if !executed {
        tracing::warn!(
            actor = %actor,
            category = %category,
            "action category unavailable, falling back to attack"
        );
        physical::execute(ctx, actor, EffectFlags::FALLBACK)?;
    }
    Ok(())
}
