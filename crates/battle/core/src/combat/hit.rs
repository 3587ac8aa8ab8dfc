//! Accuracy and multi-hit resolution.

use crate::rng::BattleRandom;

/// Luck-rolled accuracy contest.
///
/// # Formula
///
/// ```text
/// hit_rate * hit_roll >= evasion_rate * evasion_roll
/// ```
///
/// Both rolls come from `next_luck_random` of their owner, so luck raises the
/// floor of each side's roll. Zero evasion always hits.
pub fn check_hit(hit_rate: f64, hit_roll: f64, evasion_rate: f64, evasion_roll: f64) -> bool {
    hit_rate.max(0.0) * hit_roll >= evasion_rate.max(0.0) * evasion_roll
}

/// Number of strikes in one physical attack.
///
/// `floor(attack_count)` strikes, plus one more with probability equal to the
/// fractional part, never fewer than one. Draws once only when there is a
/// fractional part.
pub fn roll_hit_count(attack_count: f64, rng: &mut BattleRandom) -> u32 {
    if !attack_count.is_finite() || attack_count <= 1.0 {
        return 1;
    }
    let whole = attack_count.floor();
    let fraction = attack_count - whole;
    let bonus = fraction > 0.0 && rng.next_bool(fraction);
    (whole as u32).saturating_add(u32::from(bonus))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_evasion_always_hits() {
        assert!(check_hit(0.0, 0.0, 0.0, 1.0));
        assert!(check_hit(10.0, 0.5, 0.0, 1.0));
    }

    #[test]
    fn accuracy_contest_compares_rolled_scores() {
        assert!(check_hit(100.0, 0.5, 50.0, 1.0));
        assert!(!check_hit(100.0, 0.25, 50.0, 0.75));
    }

    #[test]
    fn hit_count_is_at_least_one() {
        let mut rng = BattleRandom::new(1);
        let before = rng.state();
        assert_eq!(roll_hit_count(0.0, &mut rng), 1);
        assert_eq!(roll_hit_count(f64::NAN, &mut rng), 1);
        assert_eq!(roll_hit_count(3.0, &mut rng), 3);
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn fractional_hit_counts_round_either_way() {
        let mut rng = BattleRandom::new(2);
        let counts: Vec<u32> = (0..200).map(|_| roll_hit_count(2.5, &mut rng)).collect();
        assert!(counts.iter().all(|&count| count == 2 || count == 3));
        assert!(counts.contains(&2) && counts.contains(&3));
    }
}
