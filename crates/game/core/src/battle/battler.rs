use crate::ability::AbilityCard;
use crate::bonus::BonusCard;
use crate::env::{Env, OracleError, ScoredWord};
use crate::play_area::PlayArea;
use crate::scoring::{ScoreRequest, Scoresheet, score_word};
use crate::wordbank::Wordbank;

/// Identity and matchup profile of one side.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Profile {
    pub name: String,
    pub level: u32,
    /// Topics that multiply up words played against this side.
    pub weaknesses: Vec<String>,
    /// Topics that multiply down words played against this side.
    pub strengths: Vec<String>,
}

/// One side of a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Battler {
    pub health: i64,
    pub play_area: PlayArea,
    pub profile: Profile,
    /// A score check is pending (presentation only).
    pub checking: bool,
    /// Unset whenever the placed letters change.
    pub scoresheet: Option<Scoresheet>,
    pub abilities: Vec<AbilityCard>,
    pub bonuses: Vec<BonusCard>,
    pub wordbank: Wordbank,
    /// Wordbank entries spellable from hand and placed.
    pub word_matches: Vec<ScoredWord>,
}

impl Battler {
    pub fn score(&self) -> Option<i64> {
        self.scoresheet.as_ref().map(Scoresheet::score)
    }

    pub fn placed_word(&self) -> String {
        self.play_area.placed_word()
    }

    /// Installs a mutated PlayArea: the sheet is invalidated and derived
    /// state recomputed.
    #[must_use]
    pub fn with_play_area(mut self, env: &Env<'_>, play_area: PlayArea) -> Self {
        self.play_area = play_area;
        self.scoresheet = None;
        self.refresh(env)
    }

    /// Recomputes ability eligibility and wordbank matches.
    #[must_use]
    pub fn refresh(mut self, env: &Env<'_>) -> Self {
        self.abilities = env.abilities().refresh(self.abilities, &self.play_area);
        self.word_matches = self
            .wordbank
            .check(&self.play_area.char_pool(), env.config().suggestion_count);
        self
    }

    /// Scores the placed word against `against`; clears `checking`.
    pub async fn rescore(
        mut self,
        env: &Env<'_>,
        against: &Profile,
        opponent_word: Option<&str>,
    ) -> Result<Self, OracleError> {
        let request = ScoreRequest {
            placed: self.play_area.placed(),
            bonuses: &self.bonuses,
            weaknesses: &against.weaknesses,
            strengths: &against.strengths,
            opponent_word,
        };
        let sheet = score_word(env.oracle(), env.bonuses(), request).await?;
        self.scoresheet = Some(sheet);
        self.checking = false;
        Ok(self)
    }

    /// `(bonus key, weight * level)` of every owned bonus.
    pub fn bonus_weights(&self) -> Vec<(String, i64)> {
        self.bonuses
            .iter()
            .map(|card| (card.key.clone(), card.strength()))
            .collect()
    }
}
