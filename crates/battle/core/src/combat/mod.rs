//! Combat formulas.
//!
//! Pure functions over already-drawn random values. Handlers draw from the
//! random source in canonical order and pass the rolls in, which keeps every
//! formula testable without a generator.
//!
//! - `check_hit` / `roll_hit_count`: accuracy and multi-hit
//! - `mitigate` / `finalize_damage`: attack vs defense and rounding
//! - `heal_amount` / `percent_of_max` / `tick_damage`: HP restoration and decay

pub mod damage;
pub mod heal;
pub mod hit;

pub use damage::{DamageScaling, finalize_damage, mitigate, round_half_up};
pub use heal::{heal_amount, percent_of_max, tick_damage};
pub use hit::{check_hit, roll_hit_count};
