//! Static content the engine draws options from.
//!
//! A [`Catalog`] is loaded once (see the `game-content` crate) and shared
//! read-only through [`Env`](super::Env). It never appears in game state.

use crate::ability::AbilityCard;
use crate::bonus::{BonusCard, BonusKind};

/// Catalog entry describing an ability offer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySpec {
    pub key: String,
    pub name: String,
    pub desc: String,
    pub uses: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_level: u32,
}

impl AbilitySpec {
    pub fn card(&self) -> AbilityCard {
        AbilityCard::new(&self.key, &self.name, &self.desc, self.uses)
    }
}

/// Catalog entry describing a bonus offer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusSpec {
    pub key: String,
    pub name: String,
    pub desc: String,
    pub weight: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_level: u32,
    pub kind: BonusKind,
}

impl BonusSpec {
    pub fn card(&self) -> BonusCard {
        BonusCard::new(&self.key, &self.name, &self.desc, self.weight)
    }
}

/// Opponent blueprint; a battle turns it into a live battler.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpponentTemplate {
    pub key: String,
    pub name: String,
    pub level: u32,
    pub health: i64,
    /// Topics whose hyponyms make up the opponent's wordbank.
    #[cfg_attr(feature = "serde", serde(default))]
    pub topics: Vec<String>,
    /// Extra words always in the opponent's wordbank.
    #[cfg_attr(feature = "serde", serde(default))]
    pub words: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weaknesses: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub strengths: Vec<String>,
    /// Bonus keys the opponent holds at level 1.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: Vec<String>,
}

impl OpponentTemplate {
    /// Same opponent promoted to `level` (boss encounters).
    #[must_use]
    pub fn at_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    #[default]
    Path,
    Shop,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneNode {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: NodeKind,
}

/// A fixed ordered path of nodes plus branch connections to other regions.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    pub key: String,
    pub name: String,
    pub nodes: Vec<SceneNode>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub connections: Vec<String>,
    /// Percent chance of a loot drop per step.
    pub loot_chance: u32,
    /// Percent chance of an opponent encounter per step.
    pub opponent_chance: u32,
    pub min_level: u32,
    pub max_level: u32,
}

/// All static content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    pub abilities: Vec<AbilitySpec>,
    pub bonuses: Vec<BonusSpec>,
    pub opponents: Vec<OpponentTemplate>,
    pub regions: Vec<Region>,
}

impl Catalog {
    pub fn ability(&self, key: &str) -> Option<&AbilitySpec> {
        self.abilities.iter().find(|spec| spec.key == key)
    }

    pub fn bonus(&self, key: &str) -> Option<&BonusSpec> {
        self.bonuses.iter().find(|spec| spec.key == key)
    }

    pub fn opponent(&self, key: &str) -> Option<&OpponentTemplate> {
        self.opponents.iter().find(|template| template.key == key)
    }

    pub fn region(&self, key: &str) -> Option<&Region> {
        self.regions.iter().find(|region| region.key == key)
    }

    /// Bonus card for `key`: catalog entries first, then the topic family.
    pub fn bonus_card(&self, key: &str) -> Option<BonusCard> {
        if let Some(spec) = self.bonus(key) {
            return Some(spec.card());
        }
        key.strip_prefix(crate::bonus::TOPIC_PREFIX)
            .filter(|topic| !topic.is_empty())
            .map(|topic| BonusCard::topic(topic, 1))
    }
}
