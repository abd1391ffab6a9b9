//! Process-level runtime configuration.
use std::env;
use std::path::PathBuf;

/// Where saves live and how a session is opened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Session to resume or create; a fresh id is generated when unset.
    pub session_id: Option<String>,
    pub save_dir: PathBuf,
    /// Data directory overriding the embedded content.
    pub content_dir: Option<PathBuf>,
    /// Save after every successful command.
    pub autosave: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            session_id: None,
            save_dir: default_save_dir(),
            content_dir: None,
            autosave: true,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `GAME_SESSION_ID`
    /// - `SAVE_DATA_DIR`
    /// - `CONTENT_DIR`
    /// - `AUTOSAVE` (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(session_id) = read_env::<String>("GAME_SESSION_ID")
            .filter(|id| !id.trim().is_empty())
        {
            config.session_id = Some(session_id);
        }

        if let Some(dir) = read_env::<PathBuf>("SAVE_DATA_DIR") {
            config.save_dir = dir;
        }

        config.content_dir = read_env::<PathBuf>("CONTENT_DIR");

        if let Some(autosave) = read_env_bool("AUTOSAVE") {
            config.autosave = autosave;
        }

        config
    }
}

/// Platform data directory, e.g. `~/.local/share/wordbattle/saves` on Linux.
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "wordbattle")
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

/// Platform cache directory for log files.
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "wordbattle")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("/tmp/wordbattle/logs"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_autosave_into_a_saves_directory() {
        let config = RuntimeConfig::default();
        assert!(config.autosave);
        assert!(config.session_id.is_none());
        assert!(config.save_dir.ends_with("saves") || config.save_dir.ends_with("save_data"));
    }
}
