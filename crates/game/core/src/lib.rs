//! Deterministic word-battle rules shared by the runtime and offline tools.
//!
//! `game-core` owns the letter economy, scoring, battles and the run-level
//! phase machine. Every transition is a function from one state value to the
//! next; all randomness flows through [`Prng`] and the only external input is
//! the [`LexiconOracle`] handed in through [`Env`]. [`Game::apply`] is the
//! entry point for driving a run.
pub mod ability;
pub mod battle;
pub mod bonus;
pub mod config;
pub mod economy;
pub mod engine;
pub mod env;
pub mod letter;
pub mod outcome;
pub mod play_area;
pub mod player;
pub mod preamble;
pub mod scene;
pub mod scoring;
pub mod wordbank;

pub use ability::{AbilityCard, AbilityDef, AbilityRegistry, acquire_ability};
pub use battle::{Battle, BattleStatus, Battler, Profile};
pub use bonus::{BonusCard, BonusEffect, BonusInput, BonusKind, BonusRegistry, acquire_bonus};
pub use config::GameConfig;
pub use economy::{Loot, Offer, Reward, Shop};
pub use engine::{Command, Game, GameError, Phase};
pub use env::{
    AbilitySpec, BonusSpec, Catalog, Env, HyperSet, LexiconOracle, NodeKind, OpponentTemplate,
    OracleError, Prng, Region, Relation, SceneNode, ScoredWord, SuggestionQuery,
};
pub use letter::{Letter, LetterId, scrabble_distribution, string_to_letters};
pub use outcome::Outcome;
pub use play_area::{PlayArea, StackOrder};
pub use player::Player;
pub use preamble::{Preamble, Stage, StageKey, StageOptions};
pub use scene::Scene;
pub use scoring::{NamedValue, ScoreRequest, Scoresheet, score_word};
pub use wordbank::{Wordbank, wordbank_check};
