//! Word scoring.
//!
//! [`score_word`] turns a placed word, the owner's bonuses and the opposing
//! profile into a [`Scoresheet`]. Scoring draws no randomness; given the same
//! inputs and oracle answers it always produces the same sheet.

use crate::bonus::{BonusCard, BonusInput, BonusRegistry};
use crate::env::{LexiconOracle, OracleError, Relation};
use crate::letter::{Letter, letter_sum, spell};

/// Name of the base additive entry.
pub const LETTERS_ENTRY: &str = "letters";
/// Name of the base multiplicative entry.
pub const MULT_ENTRY: &str = "mult";

/// One named term of a scoresheet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedValue {
    pub name: String,
    pub value: i64,
}

impl NamedValue {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Structured score of a placed word.
///
/// `score` always equals `sum(adds) * sum(muls)`; the fields are private so a
/// sheet can only be built through constructors that keep it that way.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scoresheet {
    ok: bool,
    score: i64,
    adds: Vec<NamedValue>,
    muls: Vec<NamedValue>,
}

impl Scoresheet {
    pub(crate) fn from_parts(ok: bool, adds: Vec<NamedValue>, muls: Vec<NamedValue>) -> Self {
        let add: i64 = adds.iter().map(|entry| entry.value).sum();
        let mul: i64 = muls.iter().map(|entry| entry.value).sum();
        Self {
            ok,
            score: add.saturating_mul(mul),
            adds,
            muls,
        }
    }

    /// Sheet of an illegal word: the letter sum is recorded, the score is 0.
    pub fn invalid(letters: i64) -> Self {
        Self::from_parts(false, vec![NamedValue::new(LETTERS_ENTRY, letters)], Vec::new())
    }

    pub fn ok(&self) -> bool {
        self.ok
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn adds(&self) -> &[NamedValue] {
        &self.adds
    }

    pub fn muls(&self) -> &[NamedValue] {
        &self.muls
    }
}

/// Inputs of [`score_word`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoreRequest<'a> {
    pub placed: &'a [Letter],
    pub bonuses: &'a [BonusCard],
    /// Opponent topics that add `+1` to the multiplier on a hypernym hit.
    pub weaknesses: &'a [String],
    /// Opponent topics that add `-1` to the multiplier on a hypernym hit.
    pub strengths: &'a [String],
    pub opponent_word: Option<&'a str>,
}

/// Scores the placed letters of `request`.
///
/// Oracle failures propagate unchanged; no fallback score is produced.
pub async fn score_word(
    oracle: &dyn LexiconOracle,
    registry: &BonusRegistry,
    request: ScoreRequest<'_>,
) -> Result<Scoresheet, OracleError> {
    let word = spell(request.placed);
    let letters = letter_sum(request.placed);

    if word.is_empty() || !oracle.valid(&word).await? {
        return Ok(Scoresheet::invalid(letters));
    }

    let mut adds = vec![NamedValue::new(LETTERS_ENTRY, letters)];
    let mut muls = vec![NamedValue::new(MULT_ENTRY, 1)];

    let input = BonusInput {
        word: &word,
        opponent_word: request.opponent_word,
    };
    for card in request.bonuses {
        let value = registry.contribution(oracle, card, input).await?;
        if value != 0 {
            adds.push(NamedValue::new(card.name.clone(), value));
        }
    }

    for topic in request.weaknesses {
        if oracle.related(Relation::Hypernym, topic, &word).await? {
            muls.push(NamedValue::new(format!("weak: {topic}"), 1));
        }
    }
    for topic in request.strengths {
        if oracle.related(Relation::Hypernym, topic, &word).await? {
            muls.push(NamedValue::new(format!("strong: {topic}"), -1));
        }
    }

    Ok(Scoresheet::from_parts(true, adds, muls))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::test_support::StubOracle;
    use crate::letter::string_to_letters;

    fn assert_arithmetic(sheet: &Scoresheet) {
        let add: i64 = sheet.adds().iter().map(|e| e.value).sum();
        let mul: i64 = sheet.muls().iter().map(|e| e.value).sum();
        assert_eq!(sheet.score(), add * mul);
    }

    #[tokio::test]
    async fn weakness_doubles_cat() {
        let oracle = StubOracle::new().with_hypernym("fauna", "cat");
        let placed = string_to_letters("CAT", 0);
        let weaknesses = vec!["fauna".to_owned()];
        let request = ScoreRequest {
            placed: &placed,
            weaknesses: &weaknesses,
            ..ScoreRequest::default()
        };

        let sheet = score_word(&oracle, &BonusRegistry::new(), request).await.unwrap();

        assert!(sheet.ok());
        assert_eq!(sheet.adds(), [NamedValue::new("letters", 5)]);
        assert_eq!(
            sheet.muls(),
            [NamedValue::new("mult", 1), NamedValue::new("weak: fauna", 1)]
        );
        assert_eq!(sheet.score(), 10);
        assert_arithmetic(&sheet);
    }

    #[tokio::test]
    async fn invalid_word_keeps_letter_sum_only() {
        let oracle = StubOracle::new().strict(&[]);
        let placed = string_to_letters("zzq", 0);
        let weaknesses = vec!["fauna".to_owned()];
        let bonuses = vec![BonusCard::topic("fauna", 4)];
        let request = ScoreRequest {
            placed: &placed,
            bonuses: &bonuses,
            weaknesses: &weaknesses,
            ..ScoreRequest::default()
        };

        let sheet = score_word(&oracle, &BonusRegistry::new(), request).await.unwrap();

        assert!(!sheet.ok());
        assert_eq!(sheet.score(), 0);
        assert_eq!(sheet.adds(), [NamedValue::new("letters", 30)]);
        assert!(sheet.muls().is_empty());
        assert_arithmetic(&sheet);
    }

    #[tokio::test]
    async fn empty_placement_skips_the_oracle() {
        let oracle = StubOracle::new().failing();
        let sheet = score_word(&oracle, &BonusRegistry::new(), ScoreRequest::default())
            .await
            .unwrap();
        assert_eq!(sheet, Scoresheet::invalid(0));
    }

    #[tokio::test]
    async fn strengths_can_drive_the_score_negative() {
        let oracle = StubOracle::new()
            .with_hypernym("fauna", "cat")
            .with_hypernym("pet", "cat");
        let placed = string_to_letters("cat", 0);
        let strengths = vec!["fauna".to_owned(), "pet".to_owned()];
        let request = ScoreRequest {
            placed: &placed,
            strengths: &strengths,
            ..ScoreRequest::default()
        };

        let sheet = score_word(&oracle, &BonusRegistry::new(), request).await.unwrap();

        assert_eq!(sheet.muls().len(), 3);
        assert_eq!(sheet.score(), -5);
        assert_arithmetic(&sheet);
    }

    #[tokio::test]
    async fn bonuses_add_named_entries_only_when_nonzero() {
        let oracle = StubOracle::new().with_hypernym("fauna", "cat");
        let placed = string_to_letters("cat", 0);
        let bonuses = vec![BonusCard::topic("fauna", 2), BonusCard::topic("flora", 2)];
        let request = ScoreRequest {
            placed: &placed,
            bonuses: &bonuses,
            ..ScoreRequest::default()
        };

        let sheet = score_word(&oracle, &BonusRegistry::new(), request).await.unwrap();

        assert_eq!(sheet.adds().len(), 2);
        assert_eq!(sheet.adds()[1], NamedValue::new("fauna lore", 2));
        assert_eq!(sheet.score(), 7);
    }

    #[tokio::test]
    async fn oracle_failure_propagates() {
        let oracle = StubOracle::new().failing();
        let placed = string_to_letters("cat", 0);
        let request = ScoreRequest {
            placed: &placed,
            ..ScoreRequest::default()
        };
        let result = score_word(&oracle, &BonusRegistry::new(), request).await;
        assert_eq!(result, Err(OracleError::Unavailable));
    }
}
