//! File-based SessionRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::{RepositoryError, Result, SaveDocument, SessionRepository};

/// Stores each session as `{session_id}.json` under a base directory.
///
/// Writes go to a temp file first and are renamed into place, so a crash
/// never leaves a half-written document behind.
pub struct FileSessionRepository {
    base_dir: PathBuf,
}

impl FileSessionRepository {
    /// Create a new file-based session repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a session file.
    pub fn session_path(&self, session_id: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", session_id))
    }
}

impl SessionRepository for FileSessionRepository {
    fn save(&self, session_id: &str, document: &SaveDocument) -> Result<()> {
        let path = self.session_path(session_id);
        let temp_path = path.with_extension("json.tmp");

        let json = document.to_json()?;
        fs::write(&temp_path, json).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved session[{}] to {}", session_id, path.display());

        Ok(())
    }

    fn load(&self, session_id: &str) -> Result<Option<SaveDocument>> {
        let path = self.session_path(session_id);

        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path).map_err(RepositoryError::Io)?;
        let document = SaveDocument::from_json(&json)?;
        if document.session_id != session_id {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds session `{}`",
                path.display(),
                document.session_id
            )));
        }

        tracing::debug!("Loaded session[{}] from {}", session_id, path.display());

        Ok(Some(document))
    }

    fn delete(&self, session_id: &str) -> Result<()> {
        let path = self.session_path(session_id);

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted session[{}]", session_id);
        }

        Ok(())
    }

    fn list_sessions(&self) -> Result<Vec<String>> {
        let mut sessions = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(session_id) = filename.strip_suffix(".json")
            {
                sessions.push(session_id.to_owned());
            }
        }

        sessions.sort_unstable();
        Ok(sessions)
    }

    fn exists(&self, session_id: &str) -> bool {
        self.session_path(session_id).exists()
    }
}
