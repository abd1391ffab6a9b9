//! Errors surfaced by game transitions.

use crate::env::OracleError;

/// Failure of a [`Game`](super::Game) transition.
///
/// Invalid commands are silent no-ops, so the only way a transition fails is
/// an oracle call failing. The game the transition started from is left
/// untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameError {
    #[error(transparent)]
    Oracle(#[from] OracleError),
}
