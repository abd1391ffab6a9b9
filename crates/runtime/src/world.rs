//! Owned read-only collaborators behind [`Env`].

use std::path::Path;
use std::sync::Arc;

use game_content::{Content, ContentFactory};
use game_core::{AbilityRegistry, BonusRegistry, Catalog, Env, GameConfig, LexiconOracle};

use crate::error::{Result, RuntimeError};
use crate::lexicon::MemoryLexicon;

/// Everything a session borrows through [`Env`], owned in one place so it
/// can be shared between sessions behind an `Arc`.
pub struct World {
    oracle: Arc<dyn LexiconOracle>,
    abilities: AbilityRegistry,
    bonuses: BonusRegistry,
    catalog: Catalog,
    config: GameConfig,
}

impl World {
    pub fn new(oracle: Arc<dyn LexiconOracle>, catalog: Catalog, config: GameConfig) -> Self {
        let bonuses = BonusRegistry::from_specs(&catalog.bonuses);
        Self {
            oracle,
            abilities: AbilityRegistry::standard(),
            bonuses,
            catalog,
            config,
        }
    }

    /// Content plus the fixture lexicon it ships with.
    pub fn from_content(content: Content) -> Self {
        let oracle = Arc::new(MemoryLexicon::from_spec(&content.lexicon));
        Self::new(oracle, content.catalog, content.config)
    }

    /// The content compiled into the binary.
    pub fn embedded() -> Result<Self> {
        let content = Content::embedded().map_err(RuntimeError::Content)?;
        Ok(Self::from_content(content))
    }

    /// Content loaded from a data directory.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let content = ContentFactory::new(data_dir)
            .load_all()
            .map_err(RuntimeError::Content)?;
        Ok(Self::from_content(content))
    }

    /// Replaces the oracle, keeping the content.
    #[must_use]
    pub fn with_oracle(mut self, oracle: Arc<dyn LexiconOracle>) -> Self {
        self.oracle = oracle;
        self
    }

    pub fn env(&self) -> Env<'_> {
        Env::new(
            self.oracle.as_ref(),
            &self.abilities,
            &self.bonuses,
            &self.catalog,
            &self.config,
        )
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("abilities", &self.abilities.len())
            .field("bonuses", &self.bonuses.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
