//! Bonus cards and their async scoring effects.
//!
//! A bonus contributes `units * weight * level` additive points to a
//! scoresheet, where `units` comes from its [`BonusEffect`]. Effects are the
//! only part of scoring (besides the opponent profile checks) that may consult
//! the lexicon oracle.

mod effects;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::env::{BonusSpec, LexiconOracle, OracleError};

pub use effects::{EchoBonus, LengthBonus, LetterBonus, TopicBonus};

/// Key prefix of the topic bonus family (`topic:<hypernym>`).
pub const TOPIC_PREFIX: &str = "topic:";

/// A bonus owned by a battler.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusCard {
    pub key: String,
    pub name: String,
    pub desc: String,
    pub weight: u32,
    pub level: u32,
}

impl BonusCard {
    pub fn new(key: impl Into<String>, name: impl Into<String>, desc: impl Into<String>, weight: u32) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            desc: desc.into(),
            weight,
            level: 1,
        }
    }

    /// Card of the topic family for `topic`.
    pub fn topic(topic: &str, weight: u32) -> Self {
        Self::new(
            format!("{TOPIC_PREFIX}{topic}"),
            format!("{topic} lore"),
            format!("words under \"{topic}\" score extra"),
            weight,
        )
    }

    /// `weight * level`.
    pub fn strength(&self) -> i64 {
        i64::from(self.weight) * i64::from(self.level)
    }
}

/// Adds `card`, bumping the level of an owned card with the same key.
#[must_use]
pub fn acquire_bonus(mut cards: Vec<BonusCard>, card: BonusCard) -> Vec<BonusCard> {
    match cards.iter_mut().find(|owned| owned.key == card.key) {
        Some(owned) => owned.level = owned.level.saturating_add(1),
        None => cards.push(BonusCard { level: 1, ..card }),
    }
    cards
}

/// Data-driven description of a bonus effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BonusKind {
    /// One unit when the topic is a hypernym of the word.
    Topic(String),
    /// `len - min + 1` units for words of at least `min` letters.
    Length(usize),
    /// One unit per word letter found in the set.
    Letters(String),
    /// One unit per letter shared with the opponent's word.
    Echo,
}

impl BonusKind {
    pub fn effect(&self) -> Arc<dyn BonusEffect> {
        match self {
            Self::Topic(topic) => Arc::new(TopicBonus::new(topic.clone())),
            Self::Length(min) => Arc::new(LengthBonus { min: *min }),
            Self::Letters(letters) => Arc::new(LetterBonus::new(letters)),
            Self::Echo => Arc::new(EchoBonus),
        }
    }
}

/// Word under evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BonusInput<'a> {
    pub word: &'a str,
    pub opponent_word: Option<&'a str>,
}

/// Scoring function behind a bonus key.
#[async_trait]
pub trait BonusEffect: Send + Sync + fmt::Debug {
    /// Number of units earned by `input`; zero means no contribution.
    async fn units(
        &self,
        oracle: &dyn LexiconOracle,
        input: BonusInput<'_>,
    ) -> Result<u32, OracleError>;
}

/// Immutable key → effect table.
#[derive(Clone, Debug, Default)]
pub struct BonusRegistry {
    effects: HashMap<String, Arc<dyn BonusEffect>>,
}

impl BonusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one effect (builder style, used while constructing).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, effect: Arc<dyn BonusEffect>) -> Self {
        self.effects.insert(key.into(), effect);
        self
    }

    pub fn from_specs<'a>(specs: impl IntoIterator<Item = &'a BonusSpec>) -> Self {
        specs
            .into_iter()
            .fold(Self::new(), |registry, spec| registry.with(spec.key.clone(), spec.kind.effect()))
    }

    /// Exact key first, then the `topic:` family.
    pub fn resolve(&self, key: &str) -> Option<Arc<dyn BonusEffect>> {
        if let Some(effect) = self.effects.get(key) {
            return Some(Arc::clone(effect));
        }
        let topic = key.strip_prefix(TOPIC_PREFIX)?;
        if topic.is_empty() {
            return None;
        }
        Some(Arc::new(TopicBonus::new(topic.to_owned())))
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Contribution of `card` to a word: `units * weight * level`.
    ///
    /// Cards without a registered effect log a warning and contribute zero.
    pub async fn contribution(
        &self,
        oracle: &dyn LexiconOracle,
        card: &BonusCard,
        input: BonusInput<'_>,
    ) -> Result<i64, OracleError> {
        let Some(effect) = self.resolve(&card.key) else {
            tracing::warn!(key = %card.key, "bonus has no registered implementation");
            return Ok(0);
        };
        let units = effect.units(oracle, input).await?;
        Ok(i64::from(units) * card.strength())
    }
}
