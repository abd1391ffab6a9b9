//! Pairwise battle between the player and one opponent.
//!
//! A [`Battle`] owns both [`Battler`]s by value. Synchronous transitions
//! consume the battle and return the next one; transitions that consult the
//! oracle borrow it and build the next battle from a clone, so a failed call
//! leaves the original untouched.

mod battler;

pub use battler::{Battler, Profile};

use crate::ability::AbilityCard;
use crate::env::{Env, OpponentTemplate, OracleError, Prng, ScoredWord, SuggestionQuery, shuffle};
use crate::letter::{Letter, LetterId, letter_sum, string_to_letters};
use crate::play_area::PlayArea;
use crate::player::Player;
use crate::wordbank::Wordbank;

/// Resolution state of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum BattleStatus {
    Active,
    Victory,
    Defeat,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Battle {
    pub player: Battler,
    pub opponent: Battler,
    pub round: u32,
    pub done: bool,
    pub victory: bool,
}

impl Battle {
    /// Opens a battle between `player` and an opponent built from `template`.
    ///
    /// The opponent wordbank is the template's words plus the hyponyms of its
    /// topics, deduplicated and shuffled once; round `r` plays entry
    /// `r mod len`.
    pub async fn start(
        env: &Env<'_>,
        player: &Player,
        template: &OpponentTemplate,
        prng: Prng,
    ) -> Result<(Self, Prng), OracleError> {
        let (player_rng, prng) = prng.fork(1);
        let (opponent_rng, prng) = prng.fork(2);

        let mut words: Vec<ScoredWord> = template
            .words
            .iter()
            .map(|word| ScoredWord::new(word.clone(), letter_sum(&string_to_letters(word, 0))))
            .collect();
        for topic in &template.topics {
            words.extend(env.oracle().hypos(topic).await?);
        }
        let words = Wordbank::from_words(words).into_words();
        let (words, prng) = shuffle(words, prng);

        let bonuses = template
            .bonuses
            .iter()
            .filter_map(|key| {
                let card = env.catalog().bonus_card(key);
                if card.is_none() {
                    tracing::warn!(key = %key, opponent = %template.key, "unknown opponent bonus");
                }
                card
            })
            .collect();

        let opponent = Battler {
            health: template.health,
            play_area: PlayArea::with_placed(Vec::new(), opponent_rng),
            profile: Profile {
                name: template.name.clone(),
                level: template.level,
                weaknesses: template.weaknesses.clone(),
                strengths: template.strengths.clone(),
            },
            checking: false,
            scoresheet: None,
            abilities: Vec::new(),
            bonuses,
            wordbank: Wordbank::from_words(words),
            word_matches: Vec::new(),
        };

        let area = PlayArea::new(player.letters.clone(), player.hand_size, player_rng).draw_all();
        let player = Battler {
            health: player.max_health,
            play_area: area,
            profile: Profile {
                name: player.name.clone(),
                level: player.level,
                ..Profile::default()
            },
            checking: false,
            scoresheet: None,
            abilities: player.abilities.clone(),
            bonuses: player.bonuses.clone(),
            wordbank: player.wordbank.clone(),
            word_matches: Vec::new(),
        };

        let battle = Self {
            player: player.refresh(env),
            opponent,
            round: 0,
            done: false,
            victory: false,
        }
        .select_opponent_word(env);

        tracing::info!(
            opponent = %template.name,
            level = template.level,
            bank = battle.opponent.wordbank.len(),
            "battle started"
        );
        let battle = battle.score_both(env).await?;
        Ok((battle, prng))
    }

    pub fn status(&self) -> BattleStatus {
        match (self.done, self.victory) {
            (false, _) => BattleStatus::Active,
            (true, true) => BattleStatus::Victory,
            (true, false) => BattleStatus::Defeat,
        }
    }

    /// Marks the player's score as pending.
    #[must_use]
    pub fn checking(mut self) -> Self {
        self.player.checking = true;
        self
    }

    /// Rescores both sides against each other's current word, so opponent
    /// bonuses that read the player's word see what will be submitted.
    pub async fn update_scores(&self, env: &Env<'_>) -> Result<Self, OracleError> {
        self.clone().score_both(env).await
    }

    #[must_use]
    pub fn place(self, env: &Env<'_>, ch: char) -> Self {
        self.map_player_area(env, |area| area.place_by_char(ch))
    }

    #[must_use]
    pub fn place_by_id(self, env: &Env<'_>, id: LetterId) -> Self {
        self.map_player_area(env, |area| area.place_by_id(id))
    }

    #[must_use]
    pub fn backspace(self, env: &Env<'_>) -> Self {
        self.map_player_area(env, PlayArea::unplace_last)
    }

    #[must_use]
    pub fn wipe(self, env: &Env<'_>) -> Self {
        self.map_player_area(env, PlayArea::unplace_all)
    }

    /// Replaces the placed letters with `word`, if the hand and placed
    /// letters can spell it.
    #[must_use]
    pub fn place_wordbank(self, env: &Env<'_>, word: &str) -> Self {
        let candidate = self.player.play_area.clone().unplace_all().place_word(word);
        if candidate.placed_word() != word.to_ascii_lowercase() {
            tracing::debug!(word, "wordbank word not spellable");
            return self;
        }
        self.map_player_area(env, |_| candidate)
    }

    #[must_use]
    pub fn use_ability(mut self, env: &Env<'_>, key: &str) -> Self {
        if self.done {
            return self;
        }
        let before = self.player.play_area.clone();
        let cards = std::mem::take(&mut self.player.abilities);
        let (cards, area) = env.abilities().use_ability(cards, key, before.clone());
        self.player.abilities = cards;
        if area == before {
            self.player = self.player.refresh(env);
            return self;
        }
        self.player = self.player.with_play_area(env, area);
        self
    }

    /// Resolves the round.
    ///
    /// Requires both scoresheets. A positive difference damages the opponent,
    /// a negative one damages the player, a tie changes nothing.
    pub async fn submit(&self, env: &Env<'_>) -> Result<Self, OracleError> {
        if self.done {
            return Ok(self.clone());
        }
        let (Some(player_sheet), Some(opponent_score)) =
            (self.player.scoresheet.as_ref(), self.opponent.score())
        else {
            tracing::debug!(round = self.round, "submit without both scoresheets");
            return Ok(self.clone());
        };

        let mut next = self.clone();
        let diff = player_sheet.score() - opponent_score;
        if diff > 0 {
            next.opponent.health -= diff;
        } else if diff < 0 {
            next.player.health += diff;
        }

        let word = self.player.placed_word();
        if player_sheet.ok() && !word.is_empty() {
            let entry = ScoredWord::new(word, self.player.play_area.placed_sum());
            next.player.wordbank = next.player.wordbank.insert(entry);
        }

        tracing::debug!(
            round = self.round,
            player = player_sheet.score(),
            opponent = opponent_score,
            diff,
            "round resolved"
        );

        if next.player.health <= 0 {
            next.done = true;
            next.victory = false;
        } else if next.opponent.health <= 0 {
            next.done = true;
            next.victory = true;
        }
        if next.done {
            tracing::info!(victory = next.victory, rounds = next.round + 1, "battle resolved");
            next.player = next.player.refresh(env);
            return Ok(next);
        }

        next.round += 1;
        let area = next.player.play_area.clone().redraw();
        next.player = next.player.with_play_area(env, area);
        next.select_opponent_word(env).score_both(env).await
    }

    /// Ranked playable suggestions from the oracle for the player's letters.
    pub async fn suggest(&self, env: &Env<'_>, num: usize) -> Result<Vec<ScoredWord>, OracleError> {
        let letters: String = self
            .player
            .play_area
            .hand_letters()
            .chain(self.player.play_area.placed())
            .map(|letter| letter.ch)
            .collect();
        let query = SuggestionQuery {
            letters,
            hyper_topics: &self.opponent.profile.weaknesses,
            wordbank: self.player.wordbank.words(),
            bonus_weights: self.player.bonus_weights(),
            num,
        };
        env.oracle().suggestions(query).await
    }

    /// Recomputes derived state of the player side.
    #[must_use]
    pub fn refresh(mut self, env: &Env<'_>) -> Self {
        self.player = self.player.refresh(env);
        self
    }

    /// Returns the player's letters, remaining ability uses and wordbank.
    pub fn into_spoils(self) -> (Vec<Letter>, Vec<AbilityCard>, Wordbank) {
        let letters = self.player.play_area.into_letters();
        (letters, self.player.abilities, self.player.wordbank)
    }

    fn map_player_area(mut self, env: &Env<'_>, op: impl FnOnce(PlayArea) -> PlayArea) -> Self {
        if self.done {
            return self;
        }
        let area = op(self.player.play_area.clone());
        if area == self.player.play_area {
            return self;
        }
        self.player = self.player.with_play_area(env, area);
        self
    }

    fn select_opponent_word(mut self, env: &Env<'_>) -> Self {
        let boost = env.config().opponent_boost(self.opponent.profile.level);
        let bank = &self.opponent.wordbank;
        let letters = if bank.is_empty() {
            Vec::new()
        } else {
            let index = self.round as usize % bank.len();
            bank.get(index)
                .map(|entry| string_to_letters(&entry.word, boost))
                .unwrap_or_default()
        };
        self.opponent.play_area = self.opponent.play_area.replace_placed(letters);
        self.opponent.scoresheet = None;
        self
    }

    async fn score_both(mut self, env: &Env<'_>) -> Result<Self, OracleError> {
        let player_word = self.player.placed_word();
        let opponent_word = self.opponent.placed_word();
        self.player = self
            .player
            .rescore(env, &self.opponent.profile, Some(&opponent_word))
            .await?;
        self.opponent = self
            .opponent
            .rescore(env, &self.player.profile, Some(&player_word))
            .await?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::test_support::{Fixture, StubOracle, opponent};
    use crate::scoring::{NamedValue, Scoresheet};

    fn sheet(score: i64) -> Scoresheet {
        Scoresheet::from_parts(
            true,
            vec![NamedValue::new("letters", score)],
            vec![NamedValue::new("mult", 1)],
        )
    }

    async fn started(fixture: &Fixture, template: &OpponentTemplate) -> Battle {
        let player = Player::new("ada", &fixture.config);
        let (battle, _) = Battle::start(&fixture.env(), &player, template, Prng::from_seed(11))
            .await
            .unwrap();
        battle
    }

    fn with_sheets(mut battle: Battle, player: i64, opponent: i64) -> Battle {
        battle.player.scoresheet = Some(sheet(player));
        battle.opponent.scoresheet = Some(sheet(opponent));
        battle
    }

    #[tokio::test]
    async fn start_deals_and_scores() {
        let fixture = Fixture::new(StubOracle::new());
        let battle = started(&fixture, &opponent("rat", 1, &["rat"])).await;

        assert_eq!(battle.player.play_area.hand_count(), 7);
        assert_eq!(battle.player.play_area.total(), 98);
        assert_eq!(battle.opponent.placed_word(), "rat");
        assert_eq!(battle.opponent.score(), Some(3));
        assert_eq!(battle.player.score(), Some(0));
        assert_eq!(battle.status(), BattleStatus::Active);
    }

    #[tokio::test]
    async fn opponent_bank_merges_topic_hyponyms() {
        let oracle = StubOracle::new().with_hypos("fauna", &[("cat", 5), ("dog", 5)]);
        let fixture = Fixture::new(oracle);
        let mut template = opponent("rat", 1, &["cat"]);
        template.topics = vec!["fauna".to_owned()];

        let battle = started(&fixture, &template).await;

        assert_eq!(battle.opponent.wordbank.len(), 2);
        assert!(battle.opponent.wordbank.contains("dog"));
    }

    #[tokio::test]
    async fn high_level_opponents_boost_their_letters() {
        let fixture = Fixture::new(StubOracle::new());
        let battle = started(&fixture, &opponent("yak", 9, &["yak"])).await;

        let placed = battle.opponent.play_area.placed();
        assert!(placed.iter().all(|l| l.level == 2));
        assert_eq!(battle.opponent.score(), Some(4 + 1 + 5 + 6));
    }

    #[tokio::test]
    async fn winning_round_damages_opponent_only() {
        let fixture = Fixture::new(StubOracle::new());
        let battle = with_sheets(started(&fixture, &opponent("rat", 1, &["rat"])).await, 8, 5);

        let next = battle.submit(&fixture.env()).await.unwrap();

        assert_eq!(next.opponent.health, 17);
        assert_eq!(next.player.health, 40);
        assert_eq!(next.round, 1);
        assert!(!next.done);
    }

    #[tokio::test]
    async fn losing_round_damages_player_and_tie_is_harmless() {
        let fixture = Fixture::new(StubOracle::new());
        let base = started(&fixture, &opponent("rat", 1, &["rat"])).await;

        let lost = with_sheets(base.clone(), 2, 5).submit(&fixture.env()).await.unwrap();
        assert_eq!(lost.player.health, 37);
        assert_eq!(lost.opponent.health, 20);

        let tied = with_sheets(base, 5, 5).submit(&fixture.env()).await.unwrap();
        assert_eq!(tied.player.health, 40);
        assert_eq!(tied.opponent.health, 20);
    }

    #[tokio::test]
    async fn lethal_rounds_resolve_the_battle() {
        let fixture = Fixture::new(StubOracle::new());
        let base = started(&fixture, &opponent("rat", 1, &["rat"])).await;

        let mut win = with_sheets(base.clone(), 30, 5);
        win.opponent.health = 2;
        let win = win.submit(&fixture.env()).await.unwrap();
        assert!(win.done && win.victory);
        assert_eq!(win.status(), BattleStatus::Victory);

        let mut loss = with_sheets(base, 0, 5);
        loss.player.health = 5;
        let loss = loss.submit(&fixture.env()).await.unwrap();
        assert!(loss.done && !loss.victory);
        assert_eq!(loss.status(), BattleStatus::Defeat);

        let after = loss.clone().place(&fixture.env(), 'a');
        assert_eq!(after, loss);
    }

    #[tokio::test]
    async fn placement_invalidates_the_sheet_and_submit_waits() {
        let fixture = Fixture::new(StubOracle::new());
        let env = fixture.env();
        let battle = started(&fixture, &opponent("rat", 1, &["rat"])).await;
        let id = battle.player.play_area.hand_letters().next().unwrap().id;

        let placed = battle.place_by_id(&env, id);
        assert!(placed.player.scoresheet.is_none());
        assert_eq!(placed.player.play_area.placed().len(), 1);

        let submitted = placed.submit(&env).await.unwrap();
        assert_eq!(submitted, placed);

        let scored = placed.checking().update_scores(&env).await.unwrap();
        assert!(!scored.player.checking);
        assert!(scored.player.scoresheet.is_some());

        let wiped = scored.wipe(&env);
        assert!(wiped.player.play_area.placed().is_empty());
    }

    #[tokio::test]
    async fn valid_words_enter_the_wordbank() {
        let fixture = Fixture::new(StubOracle::new());
        let env = fixture.env();
        let battle = started(&fixture, &opponent("rat", 1, &["rat"])).await;
        let id = battle.player.play_area.hand_letters().next().unwrap().id;

        let battle = battle.place_by_id(&env, id).update_scores(&env).await.unwrap();
        let word = battle.player.placed_word();
        let next = battle.submit(&env).await.unwrap();

        assert!(next.player.wordbank.contains(&word));
        assert!(next.player.play_area.placed().is_empty());
        assert_eq!(next.player.play_area.total(), 98);
    }

    #[tokio::test]
    async fn opponent_echo_reads_the_submitted_word() {
        use crate::bonus::{BonusKind, BonusRegistry};
        use crate::env::BonusSpec;

        let mut fixture = Fixture::new(StubOracle::new());
        fixture.catalog.bonuses.push(BonusSpec {
            key: "echo".to_owned(),
            name: "Echo".to_owned(),
            desc: String::new(),
            weight: 2,
            min_level: 0,
            kind: BonusKind::Echo,
        });
        fixture.bonuses = BonusRegistry::from_specs(&fixture.catalog.bonuses);
        let env = fixture.env();

        let mut template = opponent("rat", 1, &["rat"]);
        template.bonuses = vec!["echo".to_owned()];
        let mut battle = started(&fixture, &template).await;
        assert_eq!(battle.opponent.score(), Some(3));

        battle.player.play_area = battle
            .player
            .play_area
            .replace_placed(string_to_letters("rat", 0));
        let battle = battle.update_scores(&env).await.unwrap();

        let sheet = battle.opponent.scoresheet.as_ref().unwrap();
        assert!(sheet.adds().contains(&NamedValue::new("Echo", 6)));
        assert_eq!(battle.opponent.score(), Some(9));
        assert_eq!(battle.player.score(), Some(3));

        let next = battle.submit(&env).await.unwrap();
        assert_eq!(next.player.health, 34);
    }

    #[tokio::test]
    async fn suggest_asks_with_letters_weaknesses_bank_and_bonuses() {
        use crate::bonus::BonusCard;

        let oracle = StubOracle::new()
            .with_suggestion("cat", 5)
            .with_suggestion("act", 5)
            .with_suggestion("tac", 1);
        let fixture = Fixture::new(oracle);
        let mut template = opponent("rat", 1, &["rat"]);
        template.weaknesses = vec!["fauna".to_owned()];
        let mut battle = started(&fixture, &template).await;

        let mut card = BonusCard::topic("fauna", 2);
        card.level = 3;
        battle.player.bonuses = vec![card];
        battle.player.wordbank = Wordbank::from_words([ScoredWord::new("ox", 9)]);
        let id = battle.player.play_area.hand_letters().next().unwrap().id;
        let battle = battle.place_by_id(&fixture.env(), id);

        let suggestions = battle.suggest(&fixture.env(), 2).await.unwrap();
        assert_eq!(suggestions, [ScoredWord::new("cat", 5), ScoredWord::new("act", 5)]);

        let queries = fixture.oracle.queries();
        assert_eq!(queries.len(), 1);
        let query = &queries[0];
        assert_eq!(query.letters.chars().count(), 7);
        assert_eq!(query.hyper_topics, ["fauna"]);
        assert_eq!(query.wordbank, ["ox"]);
        assert_eq!(query.bonus_weights, [("topic:fauna".to_owned(), 6)]);
        assert_eq!(query.num, 2);
    }

    #[tokio::test]
    async fn oracle_failure_aborts_start() {
        let fixture = Fixture::new(StubOracle::new().failing());
        let player = Player::new("ada", &fixture.config);
        let template = opponent("rat", 1, &["rat"]);
        let result = Battle::start(&fixture.env(), &player, &template, Prng::from_seed(1)).await;
        assert_eq!(result.unwrap_err(), OracleError::Unavailable);
    }
}
