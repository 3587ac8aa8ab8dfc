//! Sacrifice ritual: turn-start forced targets.

use crate::engine::context::BattleContext;
use crate::log::{ActionKind, BattleAction, EffectFlags, EffectKind, EffectRecord};
use crate::state::Side;
use crate::targeting::ForcedTargets;

/// Clears last turn's marks and performs this turn's rituals.
///
/// For each side, the lowest-index living ritualist whose interval divides the
/// turn picks one living ally and one living enemy (one `pick` each). Single
/// target selection for that whole side then prefers the marks while they live.
pub fn begin_turn(ctx: &mut BattleContext<'_>) {
    ctx.clear_forced();
    let turn = ctx.turn();

    for side in [Side::Player, Side::Enemy] {
        let state = &ctx.state;
        let ritualist = state.living(side).into_iter().find(|&index| {
            state
                .actor(index)
                .bundle
                .sacrifice_interval
                .is_some_and(|interval| interval > 0 && turn % interval == 0)
        });
        let Some(ritualist) = ritualist else {
            continue;
        };

        let allies = ctx.state.living(side);
        let enemies = ctx.state.living(side.opponent());
        let (Some(ally), Some(enemy)) = (ctx.rng.pick(&allies), ctx.rng.pick(&enemies)) else {
            continue;
        };
        ctx.set_forced(side, ForcedTargets { ally, enemy });

        let mut entry = BattleAction::by(turn, ritualist, ActionKind::SacrificeRitual);
        entry.push(EffectRecord::new(EffectKind::SacrificeMark, ally).with_flags(EffectFlags::ALLY));
        entry.push(EffectRecord::new(EffectKind::SacrificeMark, enemy));
        ctx.record(entry);
    }
}
