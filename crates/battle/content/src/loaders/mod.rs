//! Content loaders for reading battle data from files.
//!
//! Catalog and rosters are RON; rules are TOML. Rosters are vetted against the
//! loaded catalog with the engine's construction checks.

pub mod catalog;
pub mod config;
pub mod factory;
pub mod roster;

pub use catalog::{CatalogFile, CatalogLoader};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use roster::{Encounter, Roster, RosterLoader};

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
