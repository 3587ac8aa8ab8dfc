//! Damage calculation.

/// Attack minus defense with a floor.
///
/// # Formula
///
/// ```text
/// raw = max(attack - defense, attack * floor_ratio, 0)
/// ```
///
/// `attack` and `defense` are the luck-rolled values; the defense factor of
/// the damage category is already folded into `defense`.
pub fn mitigate(attack: f64, defense: f64, floor_ratio: f64) -> f64 {
    let attack = attack.max(0.0);
    (attack - defense.max(0.0))
        .max(attack * floor_ratio.max(0.0))
        .max(0.0)
}

/// Multipliers applied after mitigation, in application order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageScaling {
    pub critical: f64,
    pub resistance: f64,
    pub dealt: f64,
    pub taken: f64,
    pub guard: f64,
    pub barrier: f64,
}

impl Default for DamageScaling {
    fn default() -> Self {
        Self {
            critical: 1.0,
            resistance: 1.0,
            dealt: 1.0,
            taken: 1.0,
            guard: 1.0,
            barrier: 1.0,
        }
    }
}

impl DamageScaling {
    pub fn total(&self) -> f64 {
        self.critical * self.resistance * self.dealt * self.taken * self.guard * self.barrier
    }

    pub fn apply(&self, raw: f64) -> f64 {
        raw * self.total()
    }
}

/// Rounds half up, saturating into `u32`. Non-finite and negative input is 0.
pub fn round_half_up(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let rounded = (value + 0.5).floor();
    if rounded >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        rounded as u32
    }
}

/// Final integer damage of one hit.
///
/// `minimum` applies only when `enforce_minimum` is set, which callers do for
/// a positive attack that was not fully nullified by resistance.
pub fn finalize_damage(scaled: f64, minimum: u32, enforce_minimum: bool) -> u32 {
    let damage = round_half_up(scaled);
    if enforce_minimum {
        damage.max(minimum)
    } else {
        damage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defense_cannot_push_below_floor() {
        assert_eq!(mitigate(1000.0, 300.0, 0.1), 700.0);
        assert_eq!(mitigate(1000.0, 5000.0, 0.1), 100.0);
        assert_eq!(mitigate(0.0, 50.0, 0.1), 0.0);
        assert_eq!(mitigate(-10.0, 0.0, 0.1), 0.0);
    }

    #[test]
    fn scaling_multiplies_every_factor() {
        let scaling = DamageScaling {
            critical: 1.5,
            resistance: 0.5,
            guard: 0.5,
            ..DamageScaling::default()
        };
        assert_eq!(scaling.apply(100.0), 37.5);
    }

    #[test]
    fn rounding_is_half_up_and_saturating() {
        assert_eq!(round_half_up(37.5), 38);
        assert_eq!(round_half_up(37.49), 37);
        assert_eq!(round_half_up(-3.0), 0);
        assert_eq!(round_half_up(f64::INFINITY), 0);
        assert_eq!(round_half_up(1e20), u32::MAX);
    }

    #[test]
    fn minimum_damage_only_when_enforced() {
        assert_eq!(finalize_damage(0.2, 1, true), 1);
        assert_eq!(finalize_damage(0.2, 1, false), 0);
        assert_eq!(finalize_damage(12.6, 1, true), 13);
    }
}
