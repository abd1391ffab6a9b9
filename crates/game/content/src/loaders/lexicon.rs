//! Fixture lexicon loader.
//!
//! The fixture is a small hypernym graph standing in for the external
//! lexical backend in tests, simulations and offline play.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Hypernym → direct hyponyms, plus words outside any group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconSpec {
    #[serde(default)]
    pub groups: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub words: Vec<String>,
}

impl LexiconSpec {
    /// Every word mentioned anywhere, lowercased.
    pub fn vocabulary(&self) -> BTreeSet<String> {
        self.groups
            .iter()
            .flat_map(|(topic, members)| std::iter::once(topic).chain(members))
            .chain(&self.words)
            .map(|word| word.to_lowercase())
            .collect()
    }
}

/// Loader for the lexicon RON file.
pub struct LexiconLoader;

impl LexiconLoader {
    pub fn load(path: &Path) -> LoadResult<LexiconSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<LexiconSpec> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse lexicon RON: {}", e))
    }
}
