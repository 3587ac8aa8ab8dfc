//! Action handlers.
//!
//! A handler returns `Ok(false)` when its action cannot run (no charge, no
//! castable spell, no target) and has then neither drawn from the random
//! source nor touched the log. `Err` is reserved for catalog inconsistencies.

pub mod breath;
pub mod enemy_skill;
pub mod magic;
pub mod physical;
pub mod reaction;
pub mod resurrection;
pub mod sacrifice;
pub mod status;

use super::context::BattleContext;
use super::errors::BattleError;
use crate::log::{BattleAction, EffectFlags, EffectKind, EffectRecord};
use crate::state::ActorIndex;
use crate::targeting::Redirect;

/// What a damaging effect did to its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Inflicted {
    /// HP actually removed.
    pub lost: u32,
    /// The target fell to this effect (it may have been revived right after).
    pub killed: bool,
}

/// Applies `amount` damage and logs it, with death and on-death revival.
pub(crate) fn inflict(
    ctx: &mut BattleContext<'_>,
    target: ActorIndex,
    amount: u32,
    flags: EffectFlags,
    entry: &mut BattleAction,
) -> Result<Inflicted, BattleError> {
    let was_alive = ctx.state.is_alive(target);
    let lost = ctx.state.actor_mut(target).take_damage(amount);
    entry.push(
        EffectRecord::new(EffectKind::Damage, target)
            .with_value(amount)
            .with_flags(flags),
    );

    let killed = was_alive && !ctx.state.is_alive(target);
    if killed {
        entry.push(EffectRecord::new(EffectKind::Death, target));
        resurrection::on_death(ctx, target, entry)?;
    }
    Ok(Inflicted { lost, killed })
}

/// Restores HP on a living target and logs the amount actually gained.
pub(crate) fn restore(
    ctx: &mut BattleContext<'_>,
    target: ActorIndex,
    amount: u32,
    flags: EffectFlags,
    entry: &mut BattleAction,
) -> u32 {
    let gained = ctx.state.actor_mut(target).restore_hp(amount);
    entry.push(
        EffectRecord::new(EffectKind::Heal, target)
            .with_value(gained)
            .with_flags(flags),
    );
    gained
}

pub(crate) fn log_redirects(entry: &mut BattleAction, redirects: &[Redirect]) {
    for redirect in redirects {
        entry.push(
            EffectRecord::new(EffectKind::CoverRedirect, redirect.cover)
                .with_extra(u32::from(redirect.original.0)),
        );
    }
}

/// Deduplicated list of actors that may react once to an action.
#[derive(Debug, Default)]
pub(crate) struct Reactors(Vec<ActorIndex>);

impl Reactors {
    pub fn push(&mut self, actor: ActorIndex) {
        if !self.0.contains(&actor) {
            self.0.push(actor);
        }
    }

    pub fn as_slice(&self) -> &[ActorIndex] {
        &self.0
    }
}
