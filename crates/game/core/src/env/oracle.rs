//! Narrow capability interface onto the external semantic/lexical backend.
//!
//! The engine never inspects the backend; it only asks the questions below.
//! Every method is a suspension point and the only place a transition can
//! fail.

use async_trait::async_trait;

use super::OracleError;

/// Semantic relation queried through [`LexiconOracle::related`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    /// `left` is a generalization of `right` (`fauna` → `cat`).
    Hypernym,
    /// `left` is a specialization of `right` (`cat` → `fauna`).
    Hyponym,
}

/// A word paired with its base score.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredWord {
    pub word: String,
    pub score: i64,
}

impl ScoredWord {
    pub fn new(word: impl Into<String>, score: i64) -> Self {
        Self {
            word: word.into(),
            score,
        }
    }
}

/// A topic cluster: a hypernym and the words beneath it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HyperSet {
    pub topic: String,
    pub words: Vec<String>,
}

/// Query parameters for [`LexiconOracle::suggestions`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SuggestionQuery<'a> {
    /// Letters available to the player (hand and placed).
    pub letters: String,
    /// Topics whose hyponyms should be favoured.
    pub hyper_topics: &'a [String],
    /// Words the player already knows.
    pub wordbank: &'a [ScoredWord],
    /// `(bonus key, weight * level)` of every owned bonus.
    pub bonus_weights: Vec<(String, i64)>,
    pub num: usize,
}

/// Capabilities the engine consumes from the lexicon backend.
#[async_trait]
pub trait LexiconOracle: Send + Sync {
    /// Legality check for a placed word.
    async fn valid(&self, word: &str) -> Result<bool, OracleError>;

    /// True if `left` stands in `relation` to `right`.
    async fn related(
        &self,
        relation: Relation,
        left: &str,
        right: &str,
    ) -> Result<bool, OracleError>;

    /// Descendant terms of `topic` with base scores.
    async fn hypos(&self, topic: &str) -> Result<Vec<ScoredWord>, OracleError>;

    /// Topic clusters with between `lo` and `hi` members whose average word
    /// length is under `max_len`.
    async fn candidates(
        &self,
        lo: usize,
        hi: usize,
        max_len: usize,
        num: usize,
    ) -> Result<Vec<HyperSet>, OracleError>;

    /// Ranked playable words under the current letter pool and bonus weighting.
    async fn suggestions(
        &self,
        query: SuggestionQuery<'_>,
    ) -> Result<Vec<ScoredWord>, OracleError>;
}
