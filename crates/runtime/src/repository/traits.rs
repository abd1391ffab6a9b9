//! Repository contract for saving and loading sessions.

use crate::repository::{Result, SaveDocument};

/// Repository for session documents, keyed by session id.
pub trait SessionRepository: Send + Sync {
    /// Save (or overwrite) the document of `session_id`.
    fn save(&self, session_id: &str, document: &SaveDocument) -> Result<()>;

    /// Load the document of `session_id`, if one exists.
    fn load(&self, session_id: &str) -> Result<Option<SaveDocument>>;

    /// Delete the document of `session_id`; missing sessions are ignored.
    fn delete(&self, session_id: &str) -> Result<()>;

    /// List all saved session ids, sorted.
    fn list_sessions(&self) -> Result<Vec<String>>;

    fn exists(&self, session_id: &str) -> bool {
        matches!(self.load(session_id), Ok(Some(_)))
    }
}
