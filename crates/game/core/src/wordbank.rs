//! Known words and playability matching.

use std::collections::BTreeMap;

use crate::env::ScoredWord;

/// Ordered set of words, unique by spelling.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wordbank {
    words: Vec<ScoredWord>,
}

impl Wordbank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bank keeping the first occurrence of every spelling.
    pub fn from_words(words: impl IntoIterator<Item = ScoredWord>) -> Self {
        words.into_iter().fold(Self::new(), Self::insert)
    }

    /// Adds `word` unless its spelling is already known.
    #[must_use]
    pub fn insert(mut self, word: ScoredWord) -> Self {
        if !self.contains(&word.word) {
            self.words.push(word);
        }
        self
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|known| known.word == word)
    }

    pub fn words(&self) -> &[ScoredWord] {
        &self.words
    }

    pub fn get(&self, index: usize) -> Option<&ScoredWord> {
        self.words.get(index)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words spellable from `pool`, best first, at most `limit` of them.
    pub fn check(&self, pool: &BTreeMap<char, usize>, limit: usize) -> Vec<ScoredWord> {
        wordbank_check(&self.words, pool, limit)
    }

    pub fn into_words(self) -> Vec<ScoredWord> {
        self.words
    }
}

/// Character multiset of `word`.
pub fn char_counts(word: &str) -> BTreeMap<char, usize> {
    let mut counts = BTreeMap::new();
    for ch in word.chars().map(|c| c.to_ascii_lowercase()) {
        *counts.entry(ch).or_insert(0) += 1;
    }
    counts
}

/// True if every character of `word` occurs in `pool` at least as often.
pub fn playable(word: &str, pool: &BTreeMap<char, usize>) -> bool {
    char_counts(word)
        .iter()
        .all(|(ch, count)| pool.get(ch).is_some_and(|have| have >= count))
}

/// Playable words of `bank`, sorted by score descending then spelling,
/// truncated to `limit`.
pub fn wordbank_check(
    bank: &[ScoredWord],
    pool: &BTreeMap<char, usize>,
    limit: usize,
) -> Vec<ScoredWord> {
    let mut matches: Vec<ScoredWord> = bank
        .iter()
        .filter(|entry| playable(&entry.word, pool))
        .cloned()
        .collect();
    matches.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.word.cmp(&b.word)));
    matches.truncate(limit);
    matches
}
