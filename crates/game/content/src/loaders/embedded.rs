//! Default content compiled into the binary.

use game_core::{Catalog, GameConfig};

use crate::loaders::{CatalogLoader, ConfigLoader, LexiconLoader, LexiconSpec, LoadResult};
use crate::loaders::validate_catalog;

const CONFIG: &str = include_str!("../../data/config.toml");
const ABILITIES: &str = include_str!("../../data/abilities.ron");
const BONUSES: &str = include_str!("../../data/bonuses.ron");
const OPPONENTS: &str = include_str!("../../data/opponents.ron");
const REGIONS: &str = include_str!("../../data/regions.ron");
const LEXICON: &str = include_str!("../../data/lexicon.ron");

pub fn config() -> LoadResult<GameConfig> {
    ConfigLoader::parse(CONFIG)
}

pub fn catalog() -> LoadResult<Catalog> {
    let catalog = Catalog {
        abilities: CatalogLoader::parse_abilities(ABILITIES)?,
        bonuses: CatalogLoader::parse_bonuses(BONUSES)?,
        opponents: CatalogLoader::parse_opponents(OPPONENTS)?,
        regions: CatalogLoader::parse_regions(REGIONS)?,
    };
    validate_catalog(&catalog)?;
    Ok(catalog)
}

pub fn lexicon() -> LoadResult<LexiconSpec> {
    LexiconLoader::parse(LEXICON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::AbilityRegistry;

    #[test]
    fn embedded_content_parses_and_validates() {
        let config = config().unwrap();
        let catalog = catalog().unwrap();
        let lexicon = lexicon().unwrap();

        assert_eq!(config, GameConfig::default());
        assert!(catalog.region(&config.start_region).is_some());
        assert!(catalog.opponents.len() >= 3);
        assert!(lexicon.vocabulary().contains("cat"));
    }

    #[test]
    fn every_embedded_ability_is_implemented() {
        let registry = AbilityRegistry::standard();
        for spec in catalog().unwrap().abilities {
            assert!(registry.contains(&spec.key), "{} has no implementation", spec.key);
        }
    }

    #[test]
    fn opponent_words_are_in_the_lexicon() {
        let vocabulary = lexicon().unwrap().vocabulary();
        let catalog = catalog().unwrap();
        for template in &catalog.opponents {
            for word in &template.words {
                assert!(vocabulary.contains(word), "{word} missing from lexicon");
            }
            for topic in template.topics.iter().chain(&template.weaknesses) {
                assert!(vocabulary.contains(topic), "{topic} missing from lexicon");
            }
        }
    }
}
