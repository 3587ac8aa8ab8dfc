/// Battle rule constants and tunable parameters.
///
/// Capacity limits are compile-time constants; everything that shapes the
/// numeric rules of a fight is a runtime field so content can rebalance without
/// a rebuild. Two battles produce identical logs only when their configs match.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Turn cap; reaching it without a decisive result ends the battle in a retreat.
    pub max_turns: u32,

    /// Formation slots `1..=front_row_size` form the front row.
    pub front_row_size: u8,

    /// Damage multiplier applied on a critical hit (before skill bonuses).
    pub critical_multiplier: f64,

    /// Share of the rolled physical defense subtracted from the rolled attack.
    pub physical_defense_factor: f64,

    /// Share of the rolled magical defense subtracted from the rolled attack.
    pub magical_defense_factor: f64,

    /// Damage never drops below `attack * damage_floor_ratio` while attack is positive.
    pub damage_floor_ratio: f64,

    /// Minimum damage of a landed hit with positive attack.
    pub minimum_damage: u32,

    /// Multiplier applied when a barrier charge absorbs a hit.
    pub barrier_reduction: f64,

    /// Multiplier applied to the next physical hit on a guarding actor.
    pub guard_reduction: f64,

    /// Chance (percent) that an actor with parry enabled negates a physical hit.
    pub parry_chance_percent: f64,

    /// Chance (percent) that an actor with shield block enabled negates a physical hit.
    pub shield_block_chance_percent: f64,

    /// Multiplier on healing received while a living opponent carries anti-healing.
    pub anti_healing_ratio: f64,

    /// Share of dealt damage returned to an attacker with the drain special attack.
    pub drain_ratio: f64,

    /// Damage multiplier of counter-attacks and magic counters.
    pub counter_multiplier: f64,

    /// Maximum number of distinct enemies hit by the sweep special attack.
    pub sweep_targets: u8,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of combatants on both sides together.
    pub const MAX_COMBATANTS: usize = 24;
    /// Maximum simultaneously active status effects per combatant.
    pub const MAX_STATUS_EFFECTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_TURNS: u32 = 20;
    pub const DEFAULT_FRONT_ROW_SIZE: u8 = 3;

    pub fn new() -> Self {
        Self {
            max_turns: Self::DEFAULT_MAX_TURNS,
            front_row_size: Self::DEFAULT_FRONT_ROW_SIZE,
            critical_multiplier: 1.5,
            physical_defense_factor: 1.0,
            magical_defense_factor: 0.5,
            damage_floor_ratio: 0.1,
            minimum_damage: 1,
            barrier_reduction: 0.5,
            guard_reduction: 0.5,
            parry_chance_percent: 20.0,
            shield_block_chance_percent: 25.0,
            anti_healing_ratio: 0.5,
            drain_ratio: 0.2,
            counter_multiplier: 0.5,
            sweep_targets: 3,
        }
    }

    pub fn with_max_turns(max_turns: u32) -> Self {
        Self {
            max_turns,
            ..Self::new()
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
