//! Read-only collaborators of the engine.
//!
//! The lexicon oracle, the ability and bonus registries, the content catalog
//! and the configuration are bundled into an [`Env`] so transitions can reach
//! everything they need without ambient global state. Nothing in `Env` is
//! part of the persisted game state; it is passed explicitly to every
//! transition that needs it.
mod catalog;
mod error;
mod oracle;
mod rng;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::{
    AbilitySpec, BonusSpec, Catalog, NodeKind, OpponentTemplate, Region, SceneNode,
};
pub use error::OracleError;
pub use oracle::{HyperSet, LexiconOracle, Relation, ScoredWord, SuggestionQuery};
pub use rng::{Prng, pick_n, sample_indices, shuffle};

use crate::ability::AbilityRegistry;
use crate::bonus::BonusRegistry;
use crate::config::GameConfig;

/// Aggregates the read-only collaborators required by transitions.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    oracle: &'a dyn LexiconOracle,
    abilities: &'a AbilityRegistry,
    bonuses: &'a BonusRegistry,
    catalog: &'a Catalog,
    config: &'a GameConfig,
}

impl<'a> Env<'a> {
    pub fn new(
        oracle: &'a dyn LexiconOracle,
        abilities: &'a AbilityRegistry,
        bonuses: &'a BonusRegistry,
        catalog: &'a Catalog,
        config: &'a GameConfig,
    ) -> Self {
        Self {
            oracle,
            abilities,
            bonuses,
            catalog,
            config,
        }
    }

    pub fn oracle(&self) -> &'a dyn LexiconOracle {
        self.oracle
    }

    pub fn abilities(&self) -> &'a AbilityRegistry {
        self.abilities
    }

    pub fn bonuses(&self) -> &'a BonusRegistry {
        self.bonuses
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }
}

impl std::fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Env")
            .field("abilities", &self.abilities.len())
            .field("bonuses", &self.bonuses.len())
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
