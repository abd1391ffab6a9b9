//! Long-lived run profile of the human side.

use crate::ability::AbilityCard;
use crate::bonus::BonusCard;
use crate::config::GameConfig;
use crate::env::{Prng, sample_indices};
use crate::letter::{Letter, scrabble_distribution};
use crate::wordbank::Wordbank;

/// Everything the player carries between battles.
///
/// `letters` is the permanent pool; a battle borrows it through a fresh
/// PlayArea and hands it back with `pack_up`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub name: String,
    pub level: u32,
    pub hand_size: usize,
    pub max_health: i64,
    pub letters: Vec<Letter>,
    pub abilities: Vec<AbilityCard>,
    pub bonuses: Vec<BonusCard>,
    pub wordbank: Wordbank,
    pub coins: u32,
}

impl Player {
    /// Fresh level-1 player holding the canonical distribution.
    pub fn new(name: impl Into<String>, config: &GameConfig) -> Self {
        Self {
            name: name.into(),
            level: 1,
            hand_size: config.hand_size,
            max_health: config.player_health,
            letters: scrabble_distribution(),
            abilities: Vec::new(),
            bonuses: Vec::new(),
            wordbank: Wordbank::new(),
            coins: 0,
        }
    }

    /// Upgrades every letter of character `ch` by one.
    #[must_use]
    pub fn boost_char(mut self, ch: char) -> Self {
        for letter in self.letters.iter_mut().filter(|l| l.ch == ch) {
            *letter = letter.upgraded(1);
        }
        self
    }

    /// Upgrades `count` distinct letters chosen uniformly at random.
    ///
    /// Also returns how many letters were upgraded.
    #[must_use]
    pub fn upgrade_random(mut self, count: usize, prng: Prng) -> (Self, usize, Prng) {
        let (mut picked, prng) = sample_indices(self.letters.len(), count, prng);
        picked.sort_unstable();
        for &index in &picked {
            self.letters[index] = self.letters[index].upgraded(1);
        }
        (self, picked.len(), prng)
    }
}
