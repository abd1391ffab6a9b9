use std::collections::BTreeMap;

use async_trait::async_trait;

use super::{BonusEffect, BonusInput};
use crate::env::{LexiconOracle, OracleError, Relation};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicBonus {
    topic: String,
}

impl TopicBonus {
    pub fn new(topic: String) -> Self {
        Self { topic }
    }
}

#[async_trait]
impl BonusEffect for TopicBonus {
    async fn units(
        &self,
        oracle: &dyn LexiconOracle,
        input: BonusInput<'_>,
    ) -> Result<u32, OracleError> {
        let hit = oracle
            .related(Relation::Hypernym, &self.topic, input.word)
            .await?;
        Ok(u32::from(hit))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthBonus {
    pub min: usize,
}

#[async_trait]
impl BonusEffect for LengthBonus {
    async fn units(
        &self,
        _oracle: &dyn LexiconOracle,
        input: BonusInput<'_>,
    ) -> Result<u32, OracleError> {
        let len = input.word.chars().count();
        if len < self.min {
            return Ok(0);
        }
        Ok(u32::try_from(len - self.min + 1).unwrap_or(u32::MAX))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LetterBonus {
    letters: Vec<char>,
}

impl LetterBonus {
    pub fn new(letters: &str) -> Self {
        Self {
            letters: letters.chars().map(|c| c.to_ascii_lowercase()).collect(),
        }
    }
}

#[async_trait]
impl BonusEffect for LetterBonus {
    async fn units(
        &self,
        _oracle: &dyn LexiconOracle,
        input: BonusInput<'_>,
    ) -> Result<u32, OracleError> {
        let count = input
            .word
            .chars()
            .filter(|c| self.letters.contains(c))
            .count();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EchoBonus;

#[async_trait]
impl BonusEffect for EchoBonus {
    async fn units(
        &self,
        _oracle: &dyn LexiconOracle,
        input: BonusInput<'_>,
    ) -> Result<u32, OracleError> {
        let Some(opponent) = input.opponent_word else {
            return Ok(0);
        };
        let mut pool: BTreeMap<char, u32> = BTreeMap::new();
        for ch in opponent.chars() {
            *pool.entry(ch).or_insert(0) += 1;
        }
        let mut shared = 0;
        for ch in input.word.chars() {
            if let Some(left) = pool.get_mut(&ch).filter(|left| **left > 0) {
                *left -= 1;
                shared += 1;
            }
        }
        Ok(shared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::test_support::StubOracle;

    fn input<'a>(word: &'a str, opponent_word: Option<&'a str>) -> BonusInput<'a> {
        BonusInput { word, opponent_word }
    }

    #[tokio::test]
    async fn length_counts_letters_past_threshold() {
        let oracle = StubOracle::new();
        let bonus = LengthBonus { min: 5 };
        assert_eq!(bonus.units(&oracle, input("cat", None)).await, Ok(0));
        assert_eq!(bonus.units(&oracle, input("horse", None)).await, Ok(1));
        assert_eq!(bonus.units(&oracle, input("giraffe", None)).await, Ok(3));
    }

    #[tokio::test]
    async fn letters_counts_every_occurrence() {
        let oracle = StubOracle::new();
        let bonus = LetterBonus::new("AE");
        assert_eq!(bonus.units(&oracle, input("banana", None)).await, Ok(3));
    }

    #[tokio::test]
    async fn echo_counts_shared_multiset() {
        let oracle = StubOracle::new();
        assert_eq!(EchoBonus.units(&oracle, input("tattoo", Some("toast"))).await, Ok(4));
        assert_eq!(EchoBonus.units(&oracle, input("cat", None)).await, Ok(0));
    }
}
