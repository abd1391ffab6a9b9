//! Scripted oracle for unit tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{HyperSet, LexiconOracle, OracleError, Relation, ScoredWord, SuggestionQuery};

/// Answers only what it was told. Every word is valid unless `strict` is set.
#[derive(Clone, Debug, Default)]
pub struct StubOracle {
    strict: bool,
    failing: bool,
    valid: BTreeSet<String>,
    hypernyms: BTreeSet<(String, String)>,
    hypos: BTreeMap<String, Vec<ScoredWord>>,
    clusters: Vec<HyperSet>,
    suggestions: Vec<ScoredWord>,
    queries: Arc<Mutex<Vec<SeenQuery>>>,
}

/// Owned copy of a [`SuggestionQuery`] the stub was asked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeenQuery {
    pub letters: String,
    pub hyper_topics: Vec<String>,
    pub wordbank: Vec<String>,
    pub bonus_weights: Vec<(String, i64)>,
    pub num: usize,
}

impl StubOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only explicitly listed words are valid.
    pub fn strict(mut self, words: &[&str]) -> Self {
        self.strict = true;
        self.valid.extend(words.iter().map(|word| (*word).to_owned()));
        self
    }

    /// Every call fails with [`OracleError::Unavailable`].
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn with_hypernym(mut self, topic: &str, word: &str) -> Self {
        self.hypernyms.insert((topic.to_owned(), word.to_owned()));
        self
    }

    pub fn with_hypos(mut self, topic: &str, words: &[(&str, i64)]) -> Self {
        let entry = self.hypos.entry(topic.to_owned()).or_default();
        entry.extend(words.iter().map(|(word, score)| ScoredWord::new(*word, *score)));
        self
    }

    pub fn with_cluster(mut self, topic: &str, words: &[&str]) -> Self {
        self.clusters.push(HyperSet {
            topic: topic.to_owned(),
            words: words.iter().map(|word| (*word).to_owned()).collect(),
        });
        self
    }

    pub fn with_suggestion(mut self, word: &str, score: i64) -> Self {
        self.suggestions.push(ScoredWord::new(word, score));
        self
    }

    /// Suggestion queries received so far.
    pub fn queries(&self) -> Vec<SeenQuery> {
        self.queries.lock().map(|seen| seen.clone()).unwrap_or_default()
    }

    fn check(&self) -> Result<(), OracleError> {
        if self.failing {
            Err(OracleError::Unavailable)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LexiconOracle for StubOracle {
    async fn valid(&self, word: &str) -> Result<bool, OracleError> {
        self.check()?;
        Ok(!self.strict || self.valid.contains(word))
    }

    async fn related(
        &self,
        relation: Relation,
        left: &str,
        right: &str,
    ) -> Result<bool, OracleError> {
        self.check()?;
        let pair = match relation {
            Relation::Hypernym => (left.to_owned(), right.to_owned()),
            Relation::Hyponym => (right.to_owned(), left.to_owned()),
        };
        Ok(self.hypernyms.contains(&pair))
    }

    async fn hypos(&self, topic: &str) -> Result<Vec<ScoredWord>, OracleError> {
        self.check()?;
        Ok(self.hypos.get(topic).cloned().unwrap_or_default())
    }

    async fn candidates(
        &self,
        _lo: usize,
        _hi: usize,
        _max_len: usize,
        num: usize,
    ) -> Result<Vec<HyperSet>, OracleError> {
        self.check()?;
        Ok(self.clusters.iter().take(num).cloned().collect())
    }

    async fn suggestions(
        &self,
        query: SuggestionQuery<'_>,
    ) -> Result<Vec<ScoredWord>, OracleError> {
        self.check()?;
        if let Ok(mut seen) = self.queries.lock() {
            seen.push(SeenQuery {
                letters: query.letters.clone(),
                hyper_topics: query.hyper_topics.to_vec(),
                wordbank: query.wordbank.iter().map(|entry| entry.word.clone()).collect(),
                bonus_weights: query.bonus_weights.clone(),
                num: query.num,
            });
        }
        Ok(self.suggestions.iter().take(query.num).cloned().collect())
    }
}

/// Owned collaborators behind an [`Env`](super::Env) for tests.
#[derive(Debug)]
pub struct Fixture {
    pub oracle: StubOracle,
    pub abilities: crate::ability::AbilityRegistry,
    pub bonuses: crate::bonus::BonusRegistry,
    pub catalog: super::Catalog,
    pub config: crate::config::GameConfig,
}

impl Fixture {
    pub fn new(oracle: StubOracle) -> Self {
        let catalog = catalog();
        Self {
            oracle,
            abilities: crate::ability::AbilityRegistry::standard(),
            bonuses: crate::bonus::BonusRegistry::from_specs(&catalog.bonuses),
            catalog,
            config: crate::config::GameConfig::default(),
        }
    }

    pub fn env(&self) -> super::Env<'_> {
        super::Env::new(
            &self.oracle,
            &self.abilities,
            &self.bonuses,
            &self.catalog,
            &self.config,
        )
    }
}

pub fn opponent(key: &str, level: u32, words: &[&str]) -> super::OpponentTemplate {
    super::OpponentTemplate {
        key: key.to_owned(),
        name: key.to_uppercase(),
        level,
        health: 20,
        topics: Vec::new(),
        words: words.iter().map(|word| (*word).to_owned()).collect(),
        weaknesses: Vec::new(),
        strengths: Vec::new(),
        bonuses: Vec::new(),
    }
}

/// Small catalog: two regions, five opponents, every standard ability.
pub fn catalog() -> super::Catalog {
    use super::{AbilitySpec, BonusSpec, NodeKind, Region, SceneNode};
    use crate::bonus::BonusKind;

    let ability = |key: &str, uses| AbilitySpec {
        key: key.to_owned(),
        name: key.to_owned(),
        desc: String::new(),
        uses,
        min_level: 0,
    };
    let node = |name: &str, kind| SceneNode {
        name: name.to_owned(),
        kind,
    };

    super::Catalog {
        abilities: ["dump", "mulligan", "swap", "polish", "flip"]
            .into_iter()
            .map(|key| ability(key, 2))
            .collect(),
        bonuses: vec![
            BonusSpec {
                key: "long".to_owned(),
                name: "Long".to_owned(),
                desc: String::new(),
                weight: 1,
                min_level: 0,
                kind: BonusKind::Length(5),
            },
            BonusSpec {
                key: "vowels".to_owned(),
                name: "Vowels".to_owned(),
                desc: String::new(),
                weight: 1,
                min_level: 0,
                kind: BonusKind::Letters("aeiou".to_owned()),
            },
        ],
        opponents: vec![
            opponent("rat", 1, &["rat", "tar"]),
            opponent("owl", 1, &["owl", "low"]),
            opponent("fox", 2, &["fox"]),
            opponent("elk", 3, &["elk"]),
            opponent("yak", 6, &["yak"]),
        ],
        regions: vec![
            Region {
                key: "meadow".to_owned(),
                name: "Meadow".to_owned(),
                nodes: vec![
                    node("gate", NodeKind::Path),
                    node("stall", NodeKind::Shop),
                    node("brook", NodeKind::Path),
                ],
                connections: vec!["ridge".to_owned()],
                loot_chance: 0,
                opponent_chance: 0,
                min_level: 1,
                max_level: 2,
            },
            Region {
                key: "ridge".to_owned(),
                name: "Ridge".to_owned(),
                nodes: vec![node("foot", NodeKind::Path), node("peak", NodeKind::Path)],
                connections: Vec::new(),
                loot_chance: 100,
                opponent_chance: 100,
                min_level: 2,
                max_level: 3,
            },
        ],
    }
}
