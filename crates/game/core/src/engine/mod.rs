//! Run-level phase machine.
//!
//! A [`Game`] is the whole persisted state of a run: the seed and generator,
//! the player's long-lived profile, the overworld [`Scene`] and the active
//! [`Phase`]. [`Game::apply`] is the single entry point for player input; it
//! works on a draft and only hands back a new game when every oracle call
//! succeeded.

mod command;
mod errors;
mod transition;

pub use command::Command;
pub use errors::GameError;

use crate::battle::Battle;
use crate::env::{Env, Prng, ScoredWord};
use crate::outcome::Outcome;
use crate::player::Player;
use crate::preamble::Preamble;
use crate::scene::Scene;

/// Active phase of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Preamble(Preamble),
    Battle(Battle),
    Outcome(Outcome),
    /// Free roaming; the scene itself lives on [`Game`].
    Scene,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Preamble(_) => "preamble",
            Self::Battle(_) => "battle",
            Self::Outcome(_) => "outcome",
            Self::Scene => "scene",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    pub seed: u64,
    pub prng: Prng,
    pub player: Player,
    pub scene: Scene,
    /// Battles resolved so far.
    pub battles: u32,
    pub phase: Phase,
}

impl Game {
    /// Starts a run in a preamble with a free opponent choice.
    pub async fn new(env: &Env<'_>, name: &str, seed: u64) -> Result<Self, GameError> {
        let player = Player::new(name, env.config());
        let scene = Scene::new(env.config().start_region.clone());
        let (preamble, prng) = Preamble::new(env, &player, None, Prng::from_seed(seed)).await?;
        tracing::info!(seed, player = name, region = %scene.region, "new game");
        Ok(Self {
            seed,
            prng,
            player,
            scene,
            battles: 0,
            phase: Phase::Preamble(preamble),
        })
    }

    /// Applies one command. On error `self` is unchanged.
    pub async fn apply(&self, env: &Env<'_>, command: Command) -> Result<Self, GameError> {
        let before = self.phase.name();
        let next = transition::step(env, self.clone(), command).await?;
        if next.phase.name() != before {
            tracing::info!(from = before, to = next.phase.name(), "phase changed");
        }
        Ok(next)
    }

    pub fn battle(&self) -> Option<&Battle> {
        match &self.phase {
            Phase::Battle(battle) => Some(battle),
            _ => None,
        }
    }

    /// Oracle suggestions for the current battle; empty outside battle.
    pub async fn suggest(&self, env: &Env<'_>, num: usize) -> Result<Vec<ScoredWord>, GameError> {
        match &self.phase {
            Phase::Battle(battle) => Ok(battle.suggest(env, num).await?),
            _ => Ok(Vec::new()),
        }
    }

    /// Recomputes derived flags that are not persisted (ability eligibility,
    /// wordbank matches). Called after loading a saved game.
    #[must_use]
    pub fn refresh(mut self, env: &Env<'_>) -> Self {
        if let Phase::Battle(battle) = self.phase {
            self.phase = Phase::Battle(battle.refresh(env));
        }
        self
    }

    /// SHA-256 over the bincode encoding of the game.
    #[cfg(feature = "serde")]
    pub fn state_root(&self) -> Result<[u8; 32], bincode::Error> {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}
