//! Data-driven content definitions and loaders.
//!
//! This crate houses the static content of a run and provides loaders for
//! RON/TOML data files:
//! - Ability and bonus catalogs (RON)
//! - Opponent templates (RON)
//! - Overworld regions (RON)
//! - Fixture lexicon (RON)
//! - Game configuration (TOML)
//!
//! Content is consumed through `game_core::Env` and never appears in game
//! state. A default set is embedded in the binary; [`ContentFactory`] loads
//! the same files from a directory.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogLoader, ConfigLoader, Content, ContentFactory, LexiconLoader, LexiconSpec, LoadResult,
    embedded, validate_catalog,
};
