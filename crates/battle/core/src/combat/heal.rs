//! Healing and percentage-based HP changes.

use super::round_half_up;

/// Rolled heal from the caster's healing score.
///
/// Anti-healing scales the result by `anti_healing_ratio` when active.
pub fn heal_amount(base: f64, roll: f64, anti_healing_ratio: Option<f64>) -> u32 {
    let ratio = anti_healing_ratio.unwrap_or(1.0).max(0.0);
    round_half_up(base * roll * ratio)
}

/// `percent` of `max_hp`, rounded half up.
pub fn percent_of_max(max_hp: u32, percent: f64) -> u32 {
    round_half_up(f64::from(max_hp) * percent / 100.0)
}

/// End-of-turn status damage: `ceil(max_hp * percent / 100)`.
pub fn tick_damage(max_hp: u32, percent: f64) -> u32 {
    if !percent.is_finite() || percent <= 0.0 {
        return 0;
    }
    let damage = (f64::from(max_hp) * percent / 100.0).ceil();
    if damage >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        damage as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_damage_rounds_up() {
        assert_eq!(tick_damage(1000, 5.0), 50);
        assert_eq!(tick_damage(15, 10.0), 2);
        assert_eq!(tick_damage(15, 0.0), 0);
    }

    #[test]
    fn anti_healing_scales_heals() {
        assert_eq!(heal_amount(100.0, 0.8, None), 80);
        assert_eq!(heal_amount(100.0, 0.8, Some(0.5)), 40);
        assert_eq!(percent_of_max(250, 30.0), 75);
    }
}
