use crate::log::BattleOutcome;
use crate::state::{BattleState, Side};

/// Decisive outcome of the current state, if any.
///
/// Enemy wipe-out is checked first, so a mutual wipe-out counts as a victory.
pub fn evaluate(state: &BattleState) -> Option<BattleOutcome> {
    if state.is_wiped(Side::Enemy) {
        Some(BattleOutcome::Victory)
    } else if state.is_wiped(Side::Player) {
        Some(BattleOutcome::Defeat)
    } else {
        None
    }
}
