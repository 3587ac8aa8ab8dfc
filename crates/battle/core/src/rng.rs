//! Seeded random source for battle resolution.
//!
//! Every random decision in a battle is drawn from one [`BattleRandom`] in a
//! fixed, canonical order. Replaying a battle with the same inputs and the
//! same starting [`RngState`] must reproduce every draw bit for bit, so:
//!
//! - no draw may be skipped or reordered depending on anything other than
//!   battle state (never on logging, timing, or hash-map iteration order);
//! - helpers document exactly how many draws they consume.
//!
//! The generator is PCG-XSH-RR: 64-bit LCG state with a 32-bit permuted
//! output. Its whole state is one `u64`, exposed as [`RngState`] so an
//! exploration session can persist it between battles.

/// Opaque, serializable snapshot of the random source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RngState(u64);

impl RngState {
    /// Raw state word, for storage layers that persist integers.
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Rebuilds a state previously obtained with [`RngState::to_bits`].
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }
}

/// Deterministic PCG random source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleRandom {
    state: u64,
}

impl BattleRandom {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// 2^-53, converts a 53-bit integer into `[0, 1)`.
    const DOUBLE_UNIT: f64 = 1.0 / (1u64 << 53) as f64;

    /// Creates a source from a 64-bit seed.
    ///
    /// The seed is avalanched first so that neighbouring seeds (42, 43, ...)
    /// start from unrelated states.
    pub fn new(seed: u64) -> Self {
        Self {
            state: mix_seed(seed),
        }
    }

    /// Restores a source from a previously captured state.
    pub fn from_state(state: RngState) -> Self {
        Self { state: state.0 }
    }

    /// Captures the current state. Restoring it replays all future draws.
    pub fn state(&self) -> RngState {
        RngState(self.state)
    }

    /// Advance the LCG by one step.
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// One draw.
    pub fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }

    /// Two draws, high word first.
    pub fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.next_u32());
        let low = u64::from(self.next_u32());
        (high << 32) | low
    }

    /// Uniform double in `[0, 1)` with 53 bits of precision. Two draws.
    pub fn next_double(&mut self) -> f64 {
        let high = u64::from(self.next_u32() >> 5); // 27 bits
        let low = u64::from(self.next_u32() >> 6); // 26 bits
        ((high << 26) | low) as f64 * Self::DOUBLE_UNIT
    }

    /// Uniform integer in `lower..=upper`. Two draws; none when the range is a
    /// single value or inverted (then `lower` is returned).
    pub fn next_int(&mut self, lower: i64, upper: i64) -> i64 {
        if upper <= lower {
            return lower;
        }
        let span = (upper as i128 - lower as i128 + 1) as u128;
        let offset = (u128::from(self.next_u64()) % span) as i128;
        (lower as i128 + offset) as i64
    }

    /// `true` with the given probability. Always exactly one `next_double`.
    pub fn next_bool(&mut self, probability: f64) -> bool {
        self.next_double() < probability
    }

    /// Weighted index selection.
    ///
    /// Non-finite and non-positive weights count as zero. Returns `None` without
    /// drawing when no weight is positive; otherwise consumes one `next_double`.
    pub fn next_index(&mut self, weights: &[f64]) -> Option<usize> {
        let usable = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
        let total: f64 = weights.iter().copied().map(usable).sum();
        if total <= 0.0 {
            return None;
        }

        let mut remaining = self.next_double() * total;
        let mut last_positive = None;
        for (index, weight) in weights.iter().copied().map(usable).enumerate() {
            if weight <= 0.0 {
                continue;
            }
            if remaining < weight {
                return Some(index);
            }
            remaining -= weight;
            last_positive = Some(index);
        }
        // Floating-point residue can leave `remaining` a hair above zero.
        last_positive
    }

    /// Luck-biased draw in `[min(luck, 100) / 100, 1]`, in whole percent.
    ///
    /// Used both as a variance multiplier for scores and as the roll behind
    /// [`BattleRandom::luck_gate`]. Higher luck raises the lower bound.
    pub fn next_luck_random(&mut self, luck: u32) -> f64 {
        let lower = i64::from(luck.min(100));
        self.next_int(lower, 100) as f64 / 100.0
    }

    /// Canonical "did it succeed" gate.
    ///
    /// Draws one luck-biased roll `r` and succeeds when
    /// `chance_percent >= 100 * (1 - r)`. A chance of 100 or more always
    /// succeeds, a non-positive chance never does; the roll is consumed in
    /// every case so the draw sequence does not depend on the chance.
    pub fn luck_gate(&mut self, chance_percent: f64, luck: u32) -> bool {
        let roll = self.next_luck_random(luck);
        chance_percent > 0.0 && chance_percent >= 100.0 * (1.0 - roll)
    }

    /// Uniform pick from a non-empty slice. One `next_int` (two draws) unless
    /// the slice has a single element.
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        match items.len() {
            0 => None,
            1 => Some(items[0]),
            len => {
                let index = self.next_int(0, len as i64 - 1) as usize;
                items.get(index).copied()
            }
        }
    }
}

/// SplitMix64 finalizer.
fn mix_seed(seed: u64) -> u64 {
    let mut hash = seed.wrapping_add(0x9e3779b97f4a7c15);
    hash = (hash ^ (hash >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    hash = (hash ^ (hash >> 27)).wrapping_mul(0x94d049bb133111eb);
    hash ^ (hash >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = BattleRandom::new(12345);
        let mut b = BattleRandom::new(12345);
        for _ in 0..256 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = BattleRandom::new(42);
        let mut b = BattleRandom::new(43);
        let left: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let right: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(left, right);
    }

    #[test]
    fn restored_state_replays_future_draws() {
        let mut original = BattleRandom::new(7);
        for _ in 0..17 {
            original.next_double();
        }
        let saved = original.state();
        let expected: Vec<u64> = (0..32).map(|_| original.next_u64()).collect();

        let mut resumed = BattleRandom::from_state(RngState::from_bits(saved.to_bits()));
        let replayed: Vec<u64> = (0..32).map(|_| resumed.next_u64()).collect();
        assert_eq!(expected, replayed);
    }

    #[test]
    fn doubles_stay_in_unit_interval() {
        let mut rng = BattleRandom::new(99);
        for _ in 0..10_000 {
            let value = rng.next_double();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn ints_respect_inclusive_bounds() {
        let mut rng = BattleRandom::new(5);
        let mut seen_low = false;
        let mut seen_high = false;
        for _ in 0..2_000 {
            let value = rng.next_int(-2, 2);
            assert!((-2..=2).contains(&value));
            seen_low |= value == -2;
            seen_high |= value == 2;
        }
        assert!(seen_low && seen_high);
        assert_eq!(rng.next_int(9, 9), 9);
        assert_eq!(rng.next_int(9, 3), 9);
    }

    #[test]
    fn degenerate_ranges_consume_no_draws() {
        let mut rng = BattleRandom::new(1);
        let before = rng.state();
        rng.next_int(4, 4);
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn weighted_index_skips_zero_weights() {
        let mut rng = BattleRandom::new(11);
        for _ in 0..500 {
            let index = rng.next_index(&[0.0, 3.0, 0.0, 1.0]).unwrap();
            assert!(index == 1 || index == 3);
        }
    }

    #[test]
    fn weighted_index_without_positive_weight_is_none_and_draw_free() {
        let mut rng = BattleRandom::new(11);
        let before = rng.state();
        assert_eq!(rng.next_index(&[0.0, -1.0, f64::NAN]), None);
        assert_eq!(rng.next_index(&[]), None);
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn luck_raises_lower_bound() {
        let mut rng = BattleRandom::new(3);
        for _ in 0..1_000 {
            let roll = rng.next_luck_random(35);
            assert!((0.35..=1.0).contains(&roll));
        }
        for _ in 0..100 {
            assert_eq!(rng.next_luck_random(250), 1.0);
        }
    }

    #[test]
    fn luck_gate_extremes() {
        let mut rng = BattleRandom::new(8);
        for _ in 0..500 {
            assert!(rng.luck_gate(100.0, 0));
            assert!(!rng.luck_gate(0.0, 100));
        }
    }

    #[test]
    fn luck_gate_always_consumes_a_roll() {
        let mut gated = BattleRandom::new(21);
        let mut plain = BattleRandom::new(21);
        gated.luck_gate(0.0, 10);
        plain.next_luck_random(10);
        assert_eq!(gated.state(), plain.state());
    }

    #[test]
    fn luck_improves_gate_success_rate() {
        let trials = 4_000;
        let mut unlucky = BattleRandom::new(77);
        let mut lucky = BattleRandom::new(77);
        let low = (0..trials).filter(|_| unlucky.luck_gate(30.0, 0)).count();
        let high = (0..trials).filter(|_| lucky.luck_gate(30.0, 50)).count();
        assert!(high > low, "lucky={high} unlucky={low}");
    }
}
