//! Combat statistics of a single combatant.
//!
//! Stats arrive already computed from character progression, equipment, and
//! enemy level scaling. The battle only layers temporary status modifiers on
//! top of them:
//!
//! ```text
//! [ CoreAttributes ]   strength .. luck, used for turn order and luck draws
//! [ CombatSnapshot ]   max HP, attack/defense, hit/evasion, breath damage ...
//! [ StatModifiers ]    multiplicative, contributed by active statuses
//! ```
pub mod attributes;
pub mod rates;
pub mod resistance;
pub mod snapshot;

pub use attributes::CoreAttributes;
pub use rates::{ActionCategory, ActionRates};
pub use resistance::{DamageCategory, Element, ElementResistances, Resistances};
pub use snapshot::{CombatSnapshot, StatKind, StatModifier, StatModifiers};
