//! Pre-battle selection flow.
//!
//! A [`Preamble`] walks a fixed stage order (opponent, ability, bonus,
//! booster). Every stage's options are generated up front when the preamble
//! opens, so replaying the same choices reproduces the same run. Stages with
//! nothing to offer are left out; the opponent stage is left out when the
//! encounter already fixed the opponent.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use strum::IntoEnumIterator;

use crate::ability::{AbilityCard, acquire_ability};
use crate::bonus::{BonusCard, acquire_bonus};
use crate::config::GameConfig;
use crate::env::{Env, OpponentTemplate, OracleError, Prng, sample_indices, pick_n};
use crate::player::Player;

/// Weight of topic bonuses offered by the bonus stage.
pub const TOPIC_BONUS_WEIGHT: u32 = 2;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StageKey {
    Opponent,
    Ability,
    Bonus,
    Booster,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StageOptions {
    Opponent(Vec<OpponentTemplate>),
    Ability(Vec<AbilityCard>),
    Bonus(Vec<BonusCard>),
    /// Characters whose every copy gets upgraded.
    Booster(Vec<char>),
}

impl StageOptions {
    pub fn key(&self) -> StageKey {
        match self {
            Self::Opponent(_) => StageKey::Opponent,
            Self::Ability(_) => StageKey::Ability,
            Self::Bonus(_) => StageKey::Bonus,
            Self::Booster(_) => StageKey::Booster,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Opponent(options) => options.len(),
            Self::Ability(options) => options.len(),
            Self::Bonus(options) => options.len(),
            Self::Booster(options) => options.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stage {
    pub options: StageOptions,
    pub choice: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Preamble {
    stages: ArrayVec<Stage, { GameConfig::MAX_STAGES }>,
    current: usize,
    /// Opponent decided by the encounter that opened this preamble.
    fixed: Option<OpponentTemplate>,
}

impl Preamble {
    pub async fn new(
        env: &Env<'_>,
        player: &Player,
        fixed: Option<OpponentTemplate>,
        prng: Prng,
    ) -> Result<(Self, Prng), OracleError> {
        let config = env.config();
        let per_stage = config.options_per_stage;
        let mut prng = prng;
        let mut stages = ArrayVec::new();

        for key in StageKey::iter() {
            let (options, next) = match key {
                StageKey::Opponent if fixed.is_some() => continue,
                StageKey::Opponent => {
                    let (options, next) =
                        opponent_options(&env.catalog().opponents, player.level, per_stage, prng);
                    (StageOptions::Opponent(options), next)
                }
                StageKey::Ability => {
                    let pool: Vec<AbilityCard> = env
                        .catalog()
                        .abilities
                        .iter()
                        .filter(|spec| spec.min_level <= player.level)
                        .map(|spec| spec.card())
                        .collect();
                    let (options, next) = sample(pool, per_stage, prng);
                    (StageOptions::Ability(options), next)
                }
                StageKey::Bonus => {
                    let (options, next) = bonus_options(env, player, prng).await?;
                    (StageOptions::Bonus(options), next)
                }
                StageKey::Booster => {
                    let pool: BTreeMap<char, ()> =
                        player.letters.iter().map(|letter| (letter.ch, ())).collect();
                    let (options, next) = pick_n(&pool, per_stage, prng);
                    (StageOptions::Booster(options), next)
                }
            };
            prng = next;
            if options.is_empty() {
                tracing::debug!(stage = %key, "stage has no options");
                continue;
            }
            stages.push(Stage {
                options,
                choice: None,
            });
        }

        tracing::info!(stages = stages.len(), fixed = fixed.is_some(), "preamble opened");
        Ok((
            Self {
                stages,
                current: 0,
                fixed,
            },
            prng,
        ))
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn current_stage(&self) -> Option<&Stage> {
        self.stages.get(self.current)
    }

    /// Key of the stage awaiting a choice.
    pub fn stage_key(&self) -> Option<StageKey> {
        self.current_stage().map(|stage| stage.options.key())
    }

    pub fn is_done(&self) -> bool {
        self.current >= self.stages.len()
    }

    /// Records `index` for the current stage and moves on.
    #[must_use]
    pub fn select(mut self, index: usize) -> Self {
        let Some(stage) = self.stages.get_mut(self.current) else {
            tracing::debug!(index, "preamble already done");
            return self;
        };
        if index >= stage.options.len() {
            tracing::debug!(index, stage = %stage.options.key(), "option out of range");
            return self;
        }
        stage.choice = Some(index);
        self.current += 1;
        self
    }

    /// Declines the current stage's offer and moves on.
    ///
    /// Skipping the opponent stage leaves the preamble without an opponent.
    #[must_use]
    pub fn skip(mut self) -> Self {
        match self.stages.get(self.current) {
            Some(stage) => {
                tracing::debug!(stage = %stage.options.key(), "stage skipped");
                self.current += 1;
            }
            None => tracing::debug!("preamble already done"),
        }
        self
    }

    /// Fixed opponent, or the one chosen in the opponent stage.
    pub fn opponent(&self) -> Option<&OpponentTemplate> {
        if let Some(fixed) = &self.fixed {
            return Some(fixed);
        }
        self.stages.iter().find_map(|stage| match (&stage.options, stage.choice) {
            (StageOptions::Opponent(options), Some(choice)) => options.get(choice),
            _ => None,
        })
    }

    /// Applies the ability, bonus and booster choices to `player`.
    pub fn apply_choices(&self, player: Player) -> Player {
        self.stages.iter().fold(player, |player, stage| {
            let Some(choice) = stage.choice else {
                return player;
            };
            match &stage.options {
                StageOptions::Opponent(_) => player,
                StageOptions::Ability(options) => match options.get(choice) {
                    Some(card) => Player {
                        abilities: acquire_ability(player.abilities.clone(), card.clone()),
                        ..player
                    },
                    None => player,
                },
                StageOptions::Bonus(options) => match options.get(choice) {
                    Some(card) => Player {
                        bonuses: acquire_bonus(player.bonuses.clone(), card.clone()),
                        ..player
                    },
                    None => player,
                },
                StageOptions::Booster(options) => match options.get(choice) {
                    Some(ch) => player.boost_char(*ch),
                    None => player,
                },
            }
        })
    }
}

fn sample<T: Clone>(pool: Vec<T>, n: usize, prng: Prng) -> (Vec<T>, Prng) {
    let (indices, prng) = sample_indices(pool.len(), n, prng);
    let picked = indices.into_iter().filter_map(|i| pool.get(i).cloned()).collect();
    (picked, prng)
}

/// Widens a level band around `level` until `n` candidates fit or the band
/// covers the whole pool, then samples `n` of them.
fn opponent_options(
    pool: &[OpponentTemplate],
    level: u32,
    n: usize,
    prng: Prng,
) -> (Vec<OpponentTemplate>, Prng) {
    let max_gap = pool
        .iter()
        .map(|template| template.level.abs_diff(level))
        .max()
        .unwrap_or(0);
    let mut band = 0;
    let candidates = loop {
        let within: Vec<OpponentTemplate> = pool
            .iter()
            .filter(|template| template.level.abs_diff(level) <= band)
            .cloned()
            .collect();
        if within.len() >= n || band >= max_gap {
            break within;
        }
        band += 1;
    };
    sample(candidates, n, prng)
}

async fn bonus_options(
    env: &Env<'_>,
    player: &Player,
    prng: Prng,
) -> Result<(Vec<BonusCard>, Prng), OracleError> {
    let config = env.config();
    let pool: Vec<BonusCard> = env
        .catalog()
        .bonuses
        .iter()
        .filter(|spec| spec.min_level <= player.level)
        .map(|spec| spec.card())
        .collect();
    let (mut options, prng) = sample(pool, config.options_per_stage, prng);

    let clusters = env
        .oracle()
        .candidates(
            config.topic_min_members,
            config.topic_max_members,
            config.topic_max_word_len,
            config.options_per_stage,
        )
        .await?;
    let (picked, prng) = sample(clusters, 1, prng);
    if let Some(cluster) = picked.first() {
        options.push(BonusCard::topic(&cluster.topic, TOPIC_BONUS_WEIGHT));
    }
    Ok((options, prng))
}
