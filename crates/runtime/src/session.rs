//! A live run driven one command at a time.

use std::sync::Arc;

use game_core::{Command, Game, ScoredWord};
use tokio::sync::Mutex;

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::repository::{FileSessionRepository, SaveDocument, SessionRepository};
use crate::world::World;

#[derive(Debug)]
struct Live {
    game: Game,
    turn: u64,
}

/// Serializes transitions over one [`Game`].
///
/// The game sits behind an async mutex that stays locked across the oracle
/// calls of a transition, so a second command waits for the first to finish.
/// Each command runs against a clone; the live game is only replaced (and
/// autosaved) once the transition succeeded.
pub struct Session {
    session_id: String,
    world: Arc<World>,
    repository: Option<Arc<dyn SessionRepository>>,
    autosave: bool,
    live: Mutex<Live>,
}

impl Session {
    /// Starts a new run and, with a repository attached, saves it at turn 0.
    pub async fn start(
        world: Arc<World>,
        repository: Option<Arc<dyn SessionRepository>>,
        session_id: impl Into<String>,
        seed: u64,
        player_name: &str,
    ) -> Result<Self> {
        let session_id = session_id.into();
        let game = Game::new(&world.env(), player_name, seed).await?;
        let session = Self {
            session_id,
            world,
            repository,
            autosave: true,
            live: Mutex::new(Live { game, turn: 0 }),
        };
        if session.repository.is_some() {
            session.save().await?;
        }
        tracing::info!(session = %session.session_id, seed, "session started");
        Ok(session)
    }

    /// Continues a saved run.
    pub async fn resume(
        world: Arc<World>,
        repository: Arc<dyn SessionRepository>,
        session_id: &str,
    ) -> Result<Self> {
        let document = repository
            .load(session_id)?
            .ok_or_else(|| RuntimeError::SessionNotFound(session_id.to_owned()))?;
        let game = document.game.refresh(&world.env());
        tracing::info!(session = session_id, turn = document.turn, "session resumed");
        Ok(Self {
            session_id: session_id.to_owned(),
            world,
            repository: Some(repository),
            autosave: true,
            live: Mutex::new(Live {
                game,
                turn: document.turn,
            }),
        })
    }

    /// Resumes the configured session from `save_dir` if it exists, otherwise
    /// starts it. Without a configured id one is derived from the seed.
    pub async fn open(
        world: Arc<World>,
        config: &RuntimeConfig,
        seed: u64,
        player_name: &str,
    ) -> Result<Self> {
        let repository: Arc<dyn SessionRepository> =
            Arc::new(FileSessionRepository::new(&config.save_dir)?);
        let session_id = config
            .session_id
            .clone()
            .unwrap_or_else(|| format!("session_{seed}"));

        let session = if repository.exists(&session_id) {
            Self::resume(world, repository, &session_id).await?
        } else {
            Self::start(world, Some(repository), session_id, seed, player_name).await?
        };
        Ok(session.with_autosave(config.autosave))
    }

    #[must_use]
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Applies one command and returns the new state.
    ///
    /// On error, including a failed autosave, the live game is unchanged.
    pub async fn apply(&self, command: Command) -> Result<Game> {
        let mut live = self.live.lock().await;
        let label: &str = command.as_ref();
        let label = label.to_owned();
        let next = live.game.apply(&self.world.env(), command).await?;
        let turn = live.turn + 1;

        if self.autosave
            && let Some(repository) = &self.repository
        {
            let document = SaveDocument::new(&self.session_id, turn, next.clone())?;
            repository.save(&self.session_id, &document)?;
        }

        tracing::debug!(session = %self.session_id, turn, command = %label, "command applied");
        live.game = next.clone();
        live.turn = turn;
        Ok(next)
    }

    /// Copy of the current game.
    pub async fn snapshot(&self) -> Game {
        self.live.lock().await.game.clone()
    }

    /// Number of commands applied since the run began.
    pub async fn turn(&self) -> u64 {
        self.live.lock().await.turn
    }

    pub async fn document(&self) -> Result<SaveDocument> {
        let live = self.live.lock().await;
        Ok(SaveDocument::new(
            &self.session_id,
            live.turn,
            live.game.clone(),
        )?)
    }

    /// Writes the current state; a no-op without a repository.
    pub async fn save(&self) -> Result<()> {
        let Some(repository) = &self.repository else {
            return Ok(());
        };
        let document = self.document().await?;
        repository.save(&self.session_id, &document)?;
        tracing::info!(session = %self.session_id, turn = document.turn, "session saved");
        Ok(())
    }

    /// Ranked word suggestions for the current battle.
    pub async fn suggest(&self, num: usize) -> Result<Vec<ScoredWord>> {
        let live = self.live.lock().await;
        Ok(live.game.suggest(&self.world.env(), num).await?)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("session_id", &self.session_id)
            .field("autosave", &self.autosave)
            .finish_non_exhaustive()
    }
}
