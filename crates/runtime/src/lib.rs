//! Runtime orchestration for word-battle sessions.
//!
//! This crate wires the deterministic engine in `game-core` to everything it
//! treats as external: the lexicon backend, persistence and process
//! configuration. Consumers open a [`Session`] to drive a run one command at a
//! time.
//!
//! Modules are organized by responsibility:
//! - [`session`] serializes transitions over a live game and autosaves
//! - [`autopilot`] plays a session with a scripted greedy player
//! - [`world`] owns the read-only collaborators behind `game_core::Env`
//! - [`lexicon`] provides an in-memory lexicon oracle
//! - [`repository`] saves and loads session documents
//! - [`config`] and [`logging`] cover process setup
pub mod autopilot;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod logging;
pub mod repository;
pub mod session;
pub mod world;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use lexicon::MemoryLexicon;
pub use repository::{
    FileSessionRepository, InMemorySessionRepository, RepositoryError, SAVE_FORMAT, SAVE_VERSION,
    SaveDocument, SessionRepository,
};
pub use session::Session;
pub use world::World;
