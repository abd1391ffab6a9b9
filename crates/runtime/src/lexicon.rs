//! In-memory lexicon oracle built from the fixture hypernym graph.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use game_content::LexiconSpec;
use game_core::bonus::TOPIC_PREFIX;
use game_core::letter::face_score;
use game_core::wordbank::{char_counts, playable};
use game_core::{HyperSet, LexiconOracle, OracleError, Relation, ScoredWord, SuggestionQuery};

/// [`LexiconOracle`] answering from a [`LexiconSpec`].
///
/// Relations are transitive: `fauna` is a hypernym of `cat` when `fauna`
/// lists `mammal` and `mammal` lists `cat`. Base scores are face-value sums.
#[derive(Clone, Debug, Default)]
pub struct MemoryLexicon {
    vocabulary: BTreeSet<String>,
    /// Direct children of each topic.
    children: BTreeMap<String, BTreeSet<String>>,
    /// Direct parents of each word.
    parents: BTreeMap<String, BTreeSet<String>>,
}

impl MemoryLexicon {
    pub fn from_spec(spec: &LexiconSpec) -> Self {
        let mut children: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut parents: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (topic, members) in &spec.groups {
            let topic = topic.to_lowercase();
            for member in members {
                let member = member.to_lowercase();
                children.entry(topic.clone()).or_default().insert(member.clone());
                parents.entry(member).or_default().insert(topic.clone());
            }
        }
        Self {
            vocabulary: spec.vocabulary(),
            children,
            parents,
        }
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.vocabulary.contains(&word.to_lowercase())
    }

    /// Every topic above `word`.
    pub fn ancestors(&self, word: &str) -> BTreeSet<String> {
        let mut seen = BTreeSet::new();
        let mut frontier = vec![word.to_lowercase()];
        while let Some(current) = frontier.pop() {
            for parent in self.parents.get(&current).into_iter().flatten() {
                if seen.insert(parent.clone()) {
                    frontier.push(parent.clone());
                }
            }
        }
        seen
    }

    /// Leaf words anywhere below `topic`.
    fn leaves(&self, topic: &str) -> BTreeSet<String> {
        let mut leaves = BTreeSet::new();
        let mut seen = BTreeSet::new();
        let mut frontier = vec![topic.to_lowercase()];
        while let Some(current) = frontier.pop() {
            for child in self.children.get(&current).into_iter().flatten() {
                if !seen.insert(child.clone()) {
                    continue;
                }
                if self.children.contains_key(child) {
                    frontier.push(child.clone());
                } else {
                    leaves.insert(child.clone());
                }
            }
        }
        leaves
    }

    fn rank(&self, word: &str, query: &SuggestionQuery<'_>) -> i64 {
        let base = face_sum(word);
        let ancestors = self.ancestors(word);
        let weak_hits = query
            .hyper_topics
            .iter()
            .filter(|topic| ancestors.contains(topic.as_str()))
            .count() as i64;
        let topic_weight: i64 = query
            .bonus_weights
            .iter()
            .filter_map(|(key, weight)| {
                key.strip_prefix(TOPIC_PREFIX)
                    .filter(|topic| ancestors.contains(*topic))
                    .map(|_| *weight)
            })
            .sum();
        base * (1 + weak_hits) + topic_weight
    }
}

fn face_sum(word: &str) -> i64 {
    word.chars().map(|ch| i64::from(face_score(ch))).sum()
}

#[async_trait]
impl LexiconOracle for MemoryLexicon {
    async fn valid(&self, word: &str) -> Result<bool, OracleError> {
        Ok(!word.is_empty() && self.contains(word))
    }

    async fn related(
        &self,
        relation: Relation,
        left: &str,
        right: &str,
    ) -> Result<bool, OracleError> {
        let (hypernym, hyponym) = match relation {
            Relation::Hypernym => (left, right),
            Relation::Hyponym => (right, left),
        };
        Ok(self.ancestors(hyponym).contains(&hypernym.to_lowercase()))
    }

    async fn hypos(&self, topic: &str) -> Result<Vec<ScoredWord>, OracleError> {
        Ok(self
            .leaves(topic)
            .into_iter()
            .map(|word| {
                let score = face_sum(&word);
                ScoredWord::new(word, score)
            })
            .collect())
    }

    async fn candidates(
        &self,
        lo: usize,
        hi: usize,
        max_len: usize,
        num: usize,
    ) -> Result<Vec<HyperSet>, OracleError> {
        if lo > hi {
            return Err(OracleError::rejected(
                "candidates",
                format!("empty member range {lo}..={hi}"),
            ));
        }
        let sets = self
            .children
            .keys()
            .filter_map(|topic| {
                let words: Vec<String> = self.leaves(topic).into_iter().collect();
                let count = words.len();
                if count < lo || count > hi {
                    return None;
                }
                let total: usize = words.iter().map(|word| word.chars().count()).sum();
                // average length strictly under max_len
                (total < max_len * count).then(|| HyperSet {
                    topic: topic.clone(),
                    words,
                })
            })
            .take(num)
            .collect();
        Ok(sets)
    }

    async fn suggestions(
        &self,
        query: SuggestionQuery<'_>,
    ) -> Result<Vec<ScoredWord>, OracleError> {
        let pool = char_counts(&query.letters);
        let known = query.wordbank.iter().map(|entry| entry.word.as_str());
        let words: BTreeSet<&str> = self
            .vocabulary
            .iter()
            .map(String::as_str)
            .chain(known)
            .filter(|word| playable(word, &pool))
            .collect();

        let mut ranked: Vec<ScoredWord> = words
            .into_iter()
            .map(|word| ScoredWord::new(word, self.rank(word, &query)))
            .collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.word.cmp(&b.word)));
        ranked.truncate(query.num);
        Ok(ranked)
    }
}
