//! Content factory for loading everything a run needs from data files.

use std::path::{Path, PathBuf};

use anyhow::bail;
use game_core::{Catalog, GameConfig};

use crate::loaders::{CatalogLoader, ConfigLoader, LexiconLoader, LexiconSpec, LoadResult, embedded};

/// All static content of a run.
#[derive(Debug, Clone)]
pub struct Content {
    pub config: GameConfig,
    pub catalog: Catalog,
    pub lexicon: LexiconSpec,
}

impl Content {
    /// The content compiled into the binary.
    pub fn embedded() -> LoadResult<Self> {
        let content = Self {
            config: embedded::config()?,
            catalog: embedded::catalog()?,
            lexicon: embedded::lexicon()?,
        };
        content.validate()?;
        Ok(content)
    }

    /// Cross-file checks the individual loaders cannot make.
    pub fn validate(&self) -> LoadResult<()> {
        if self.catalog.region(&self.config.start_region).is_none() {
            bail!("start region `{}` is not in the catalog", self.config.start_region);
        }
        if self.catalog.opponents.is_empty() {
            bail!("catalog has no opponents");
        }
        Ok(())
    }
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── abilities.ron
/// ├── bonuses.ron
/// ├── opponents.ron
/// ├── regions.ron
/// └── lexicon.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load and validate the four catalog files.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        CatalogLoader::load_dir(&self.data_dir)
    }

    /// Load the fixture lexicon from `lexicon.ron`.
    pub fn load_lexicon(&self) -> LoadResult<LexiconSpec> {
        let path = self.data_dir.join("lexicon.ron");
        LexiconLoader::load(&path)
    }

    pub fn load_all(&self) -> LoadResult<Content> {
        let content = Content {
            config: self.load_config()?,
            catalog: self.load_catalog()?,
            lexicon: self.load_lexicon()?,
        };
        content.validate()?;
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_a_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        for name in [
            "config.toml",
            "abilities.ron",
            "bonuses.ron",
            "opponents.ron",
            "regions.ron",
            "lexicon.ron",
        ] {
            std::fs::copy(source.join(name), dir.path().join(name)).unwrap();
        }
        std::fs::write(dir.path().join("config.toml"), "hand_size = 5\n").unwrap();

        let content = ContentFactory::new(dir.path()).load_all().unwrap();

        assert_eq!(content.config.hand_size, 5);
        assert_eq!(content.catalog, embedded::catalog().unwrap());
    }

    #[test]
    fn missing_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentFactory::new(dir.path()).load_catalog().unwrap_err();
        assert!(err.to_string().contains("abilities.ron"));
    }

    #[test]
    fn unknown_start_region_is_rejected() {
        let mut content = Content::embedded().unwrap();
        content.config.start_region = "nowhere".to_owned();
        assert!(content.validate().is_err());
    }
}
