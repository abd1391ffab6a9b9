//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their default values.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("hand_size = 9\nstart_region = \"marsh\"\n").unwrap();
        assert_eq!(config.hand_size, 9);
        assert_eq!(config.start_region, "marsh");
        assert_eq!(config.player_health, GameConfig::DEFAULT_PLAYER_HEALTH);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(ConfigLoader::parse("hand_size = \"seven\"").is_err());
    }
}
