//! Data-driven battle content and loaders.
//!
//! This crate reads the static inputs of a battle from RON/TOML data files:
//! - The combat catalog: status effects, spells, and enemy skills (RON)
//! - Rosters: the party and named enemy encounters (RON)
//! - Battle rules: [`battle_core::BattleConfig`] tunables (TOML)
//!
//! Content is handed to the engine as read-only input and never appears in
//! battle state. A sample data set ships under `data/` and is reachable via
//! [`ContentFactory::bundled`].

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogFile, CatalogLoader, ConfigLoader, ContentFactory, Encounter, LoadResult, Roster,
    RosterLoader,
};
