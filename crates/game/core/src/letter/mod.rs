//! Letter tiles: the conserved resource of the game.
//!
//! A [`Letter`] is never created or destroyed by pool operations; it only
//! moves between the bag, hand and placed pools of a
//! [`PlayArea`](crate::PlayArea), or is explicitly upgraded.

mod distribution;

pub use distribution::{
    DISTRIBUTION_SCORE_SUM, DISTRIBUTION_TILE_COUNT, face_score, scrabble_distribution,
    string_to_letters,
};

use std::fmt;

/// Identifier of a letter, unique within one PlayArea.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LetterId(pub u32);

impl fmt::Display for LetterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single letter tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Letter {
    pub id: LetterId,
    /// Lowercase character.
    pub ch: char,
    /// Face score, including every upgrade applied so far.
    pub score: u32,
    /// Number of upgrades applied.
    pub level: u32,
}

impl Letter {
    pub fn new(id: LetterId, ch: char, score: u32) -> Self {
        Self {
            id,
            ch: ch.to_ascii_lowercase(),
            score,
            level: 0,
        }
    }

    /// Returns the letter upgraded by `amount` (score and level).
    ///
    /// Upgrades only ever increase; the arithmetic saturates.
    #[must_use]
    pub const fn upgraded(mut self, amount: u32) -> Self {
        self.score = self.score.saturating_add(amount);
        self.level = self.level.saturating_add(amount);
        self
    }
}

/// Builds the lowercase word spelled by `letters`.
pub fn spell(letters: &[Letter]) -> String {
    letters.iter().map(|letter| letter.ch).collect()
}

/// Sum of face scores of `letters`.
pub fn letter_sum(letters: &[Letter]) -> i64 {
    letters.iter().map(|letter| i64::from(letter.score)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upgrade_raises_score_and_level() {
        let letter = Letter::new(LetterId(0), 'Q', 10).upgraded(2);
        assert_eq!(letter.ch, 'q');
        assert_eq!(letter.score, 12);
        assert_eq!(letter.level, 2);
    }

    #[test]
    fn upgrade_saturates() {
        let mut letter = Letter::new(LetterId(0), 'a', u32::MAX - 1);
        letter = letter.upgraded(5);
        assert_eq!(letter.score, u32::MAX);
    }

    #[test]
    fn spell_and_sum() {
        let letters = string_to_letters("cat", 0);
        assert_eq!(spell(&letters), "cat");
        assert_eq!(letter_sum(&letters), 5);
    }
}
