//! Canonical letter distribution.
//!
//! The table mirrors the classic 98-tile word-game set (no blanks).

use super::{Letter, LetterId};

/// `(char, face score, count)` for every letter of the alphabet.
const TABLE: [(char, u32, u32); 26] = [
    ('a', 1, 9),
    ('b', 3, 2),
    ('c', 3, 2),
    ('d', 2, 4),
    ('e', 1, 12),
    ('f', 4, 2),
    ('g', 2, 3),
    ('h', 4, 2),
    ('i', 1, 9),
    ('j', 8, 1),
    ('k', 5, 1),
    ('l', 1, 4),
    ('m', 3, 2),
    ('n', 1, 6),
    ('o', 1, 8),
    ('p', 3, 2),
    ('q', 10, 1),
    ('r', 1, 6),
    ('s', 1, 4),
    ('t', 1, 6),
    ('u', 1, 4),
    ('v', 4, 2),
    ('w', 4, 2),
    ('x', 8, 1),
    ('y', 4, 2),
    ('z', 10, 1),
];

/// Total number of tiles produced by [`scrabble_distribution`].
pub const DISTRIBUTION_TILE_COUNT: usize = 98;

/// Sum of face scores over the full distribution.
pub const DISTRIBUTION_SCORE_SUM: i64 = 187;

/// Face score of `ch`; characters outside the table score zero.
pub fn face_score(ch: char) -> u32 {
    let ch = ch.to_ascii_lowercase();
    TABLE
        .iter()
        .find(|(c, _, _)| *c == ch)
        .map(|(_, score, _)| *score)
        .unwrap_or(0)
}

/// Builds the canonical multiset, ids assigned sequentially from 0.
pub fn scrabble_distribution() -> Vec<Letter> {
    TABLE
        .iter()
        .flat_map(|&(ch, score, count)| (0..count).map(move |_| (ch, score)))
        .zip(0u32..)
        .map(|((ch, score), id)| Letter::new(LetterId(id), ch, score))
        .collect()
}

/// Reconstructs letters from raw text, applying a uniform upgrade `boost`.
///
/// Non-alphabetic characters are skipped. Ids are assigned sequentially from 0.
pub fn string_to_letters(text: &str, boost: u32) -> Vec<Letter> {
    text.chars()
        .filter(char::is_ascii_alphabetic)
        .zip(0u32..)
        .map(|(ch, id)| Letter::new(LetterId(id), ch, face_score(ch)).upgraded(boost))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letter::letter_sum;

    #[test]
    fn distribution_totals_are_canonical() {
        let letters = scrabble_distribution();
        assert_eq!(letters.len(), DISTRIBUTION_TILE_COUNT);
        assert_eq!(letter_sum(&letters), DISTRIBUTION_SCORE_SUM);
    }

    #[test]
    fn distribution_ids_are_unique() {
        let letters = scrabble_distribution();
        let mut ids: Vec<_> = letters.iter().map(|l| l.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), letters.len());
    }

    #[test]
    fn string_to_letters_applies_boost() {
        let letters = string_to_letters("Zoo!", 2);
        assert_eq!(letters.len(), 3);
        assert_eq!(letters[0].ch, 'z');
        assert_eq!(letters[0].score, 12);
        assert_eq!(letters[0].level, 2);
        assert_eq!(letters[2].id, LetterId(2));
    }
}
