//! Self-describing save document.

use game_core::Game;
use serde::{Deserialize, Serialize};

use crate::repository::{RepositoryError, Result};

/// Value of [`SaveDocument::format`].
pub const SAVE_FORMAT: &str = "wordbattle-save";
/// Current document layout version.
pub const SAVE_VERSION: u32 = 1;

/// Persisted form of a session.
///
/// `state_root` fingerprints `game` at save time; loading recomputes it so a
/// document edited by hand is reported instead of silently resumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveDocument {
    pub format: String,
    pub version: u32,
    pub session_id: String,
    /// Number of commands applied since the session began.
    pub turn: u64,
    /// Hex SHA-256 of the bincode encoding of `game`.
    pub state_root: String,
    pub game: Game,
}

impl SaveDocument {
    pub fn new(session_id: impl Into<String>, turn: u64, game: Game) -> Result<Self> {
        let state_root = state_root_hex(&game)?;
        Ok(Self {
            format: SAVE_FORMAT.to_owned(),
            version: SAVE_VERSION,
            session_id: session_id.into(),
            turn,
            state_root,
            game,
        })
    }

    /// Checks the header and the fingerprint.
    pub fn validate(&self) -> Result<()> {
        if self.format != SAVE_FORMAT {
            return Err(RepositoryError::CorruptedData(format!(
                "unexpected format `{}`",
                self.format
            )));
        }
        if self.version != SAVE_VERSION {
            return Err(RepositoryError::CorruptedData(format!(
                "unsupported version {}",
                self.version
            )));
        }
        let actual = state_root_hex(&self.game)?;
        if actual != self.state_root {
            return Err(RepositoryError::CorruptedData(format!(
                "state root mismatch for session `{}`",
                self.session_id
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses and validates a document.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }
}

fn state_root_hex(game: &Game) -> Result<String> {
    let root = game
        .state_root()
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    Ok(hex::encode(root))
}
