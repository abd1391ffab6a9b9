//! Catalog loaders: abilities, bonuses, opponents and regions.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::bail;
use game_core::{AbilitySpec, BonusSpec, Catalog, OpponentTemplate, Region};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalog {
    pub abilities: Vec<AbilitySpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusCatalog {
    pub bonuses: Vec<BonusSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpponentCatalog {
    pub opponents: Vec<OpponentTemplate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionCatalog {
    pub regions: Vec<Region>,
}

/// Loader for the four RON catalog files.
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn parse_abilities(content: &str) -> LoadResult<Vec<AbilitySpec>> {
        let catalog: AbilityCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))?;
        Ok(catalog.abilities)
    }

    pub fn parse_bonuses(content: &str) -> LoadResult<Vec<BonusSpec>> {
        let catalog: BonusCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse bonus catalog RON: {}", e))?;
        Ok(catalog.bonuses)
    }

    pub fn parse_opponents(content: &str) -> LoadResult<Vec<OpponentTemplate>> {
        let catalog: OpponentCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse opponent catalog RON: {}", e))?;
        Ok(catalog.opponents)
    }

    pub fn parse_regions(content: &str) -> LoadResult<Vec<Region>> {
        let catalog: RegionCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse region catalog RON: {}", e))?;
        Ok(catalog.regions)
    }

    /// Loads `abilities.ron`, `bonuses.ron`, `opponents.ron` and
    /// `regions.ron` from `dir` and validates the result.
    pub fn load_dir(dir: &Path) -> LoadResult<Catalog> {
        let catalog = Catalog {
            abilities: Self::parse_abilities(&read_file(&dir.join("abilities.ron"))?)?,
            bonuses: Self::parse_bonuses(&read_file(&dir.join("bonuses.ron"))?)?,
            opponents: Self::parse_opponents(&read_file(&dir.join("opponents.ron"))?)?,
            regions: Self::parse_regions(&read_file(&dir.join("regions.ron"))?)?,
        };
        validate_catalog(&catalog)?;
        Ok(catalog)
    }
}

fn unique<'a>(what: &str, keys: impl IntoIterator<Item = &'a str>) -> LoadResult<()> {
    let mut seen = BTreeSet::new();
    for key in keys {
        if !seen.insert(key) {
            bail!("duplicate {what} key `{key}`");
        }
    }
    Ok(())
}

/// Rejects catalogs with duplicate keys, dangling references or empty
/// regions.
pub fn validate_catalog(catalog: &Catalog) -> LoadResult<()> {
    unique("ability", catalog.abilities.iter().map(|s| s.key.as_str()))?;
    unique("bonus", catalog.bonuses.iter().map(|s| s.key.as_str()))?;
    unique("opponent", catalog.opponents.iter().map(|t| t.key.as_str()))?;
    unique("region", catalog.regions.iter().map(|r| r.key.as_str()))?;

    for template in &catalog.opponents {
        for key in &template.bonuses {
            if catalog.bonus_card(key).is_none() {
                bail!("opponent `{}` references unknown bonus `{key}`", template.key);
            }
        }
    }

    for region in &catalog.regions {
        if region.nodes.is_empty() {
            bail!("region `{}` has no nodes", region.key);
        }
        if region.min_level > region.max_level {
            bail!("region `{}` has min_level above max_level", region.key);
        }
        for target in &region.connections {
            if catalog.region(target).is_none() {
                bail!("region `{}` connects to unknown region `{target}`", region.key);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::BonusKind;

    #[test]
    fn parses_bonus_kinds() {
        let bonuses = CatalogLoader::parse_bonuses(
            r#"(bonuses: [
                (key: "long", name: "Long", desc: "", weight: 2, kind: Length(5)),
                (key: "echo", name: "Echo", desc: "", weight: 1, min_level: 2, kind: Echo),
            ])"#,
        )
        .unwrap();
        assert_eq!(bonuses[0].kind, BonusKind::Length(5));
        assert_eq!(bonuses[0].min_level, 0);
        assert_eq!(bonuses[1].kind, BonusKind::Echo);
    }

    #[test]
    fn rejects_dangling_connections() {
        let regions = CatalogLoader::parse_regions(
            r#"(regions: [
                (key: "a", name: "A", nodes: [(name: "x")], connections: ["b"],
                 loot_chance: 0, opponent_chance: 0, min_level: 1, max_level: 1),
            ])"#,
        )
        .unwrap();
        let catalog = Catalog {
            regions,
            ..Catalog::default()
        };
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(err.to_string().contains("unknown region `b`"));
    }

    #[test]
    fn rejects_duplicate_keys() {
        let abilities = CatalogLoader::parse_abilities(
            r#"(abilities: [
                (key: "dump", name: "Dump", desc: "", uses: 1),
                (key: "dump", name: "Dump", desc: "", uses: 2),
            ])"#,
        )
        .unwrap();
        let catalog = Catalog {
            abilities,
            ..Catalog::default()
        };
        assert!(validate_catalog(&catalog).is_err());
    }
}
