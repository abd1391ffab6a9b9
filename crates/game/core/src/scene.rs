//! Overworld traversal.
//!
//! A run walks the node path of one [`Region`] at a time. Each step rolls
//! independently for an opponent encounter and a loot drop; shop nodes stock
//! a shop. At the end of a path the player picks one of the region's
//! connections and a boss encounter awaits on arrival.

use crate::economy::{Loot, Shop};
use crate::env::{Env, NodeKind, OpponentTemplate, Prng, Region, SceneNode};
use crate::player::Player;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scene {
    pub region: String,
    pub index: usize,
    /// Encounter waiting to be engaged.
    pub opponent: Option<OpponentTemplate>,
    pub loot: Option<Loot>,
    pub shop: Option<Shop>,
    /// Regions reachable from the end of the path.
    pub exit: Option<Vec<String>>,
}

impl Scene {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            index: 0,
            opponent: None,
            loot: None,
            shop: None,
            exit: None,
        }
    }

    /// True while an encounter, loot, shop or exit choice awaits the player.
    pub fn is_pending(&self) -> bool {
        self.opponent.is_some() || self.loot.is_some() || self.shop.is_some() || self.exit.is_some()
    }

    pub fn current_region<'a>(&self, env: &Env<'a>) -> Option<&'a Region> {
        env.catalog().region(&self.region)
    }

    pub fn node<'a>(&self, env: &Env<'a>) -> Option<&'a SceneNode> {
        self.current_region(env)?.nodes.get(self.index)
    }

    /// Steps to the next node of the path, or opens the exit at its end.
    #[must_use]
    pub fn advance(mut self, env: &Env<'_>, player: &Player, prng: Prng) -> (Self, Prng) {
        if self.is_pending() {
            tracing::debug!(region = %self.region, index = self.index, "advance while pending");
            return (self, prng);
        }
        let Some(region) = self.current_region(env) else {
            tracing::warn!(region = %self.region, "unknown region");
            return (self, prng);
        };

        if self.index + 1 >= region.nodes.len() {
            let exits = if region.connections.is_empty() {
                vec![region.key.clone()]
            } else {
                region.connections.clone()
            };
            tracing::debug!(region = %region.key, ?exits, "reached end of path");
            self.exit = Some(exits);
            return (self, prng);
        }

        self.index += 1;
        let mut prng = prng;
        if region.nodes[self.index].kind == NodeKind::Shop {
            let (shop, next) = Shop::stock(env, player, prng);
            self.shop = Some(shop);
            prng = next;
        }

        let (encounter, next) = prng.chance(region.opponent_chance);
        prng = next;
        if encounter {
            let (opponent, next) = path_opponent(env, region, prng);
            self.opponent = opponent;
            prng = next;
        }

        let (drop, next) = prng.chance(region.loot_chance);
        prng = next;
        if drop {
            let (loot, next) = Loot::roll(env, player, prng);
            self.loot = Some(loot);
            prng = next;
        }

        tracing::debug!(
            region = %self.region,
            index = self.index,
            encounter = self.opponent.is_some(),
            loot = self.loot.is_some(),
            shop = self.shop.is_some(),
            "advanced"
        );
        (self, prng)
    }

    /// Enters `key` at its first node and schedules the boss of the region
    /// being left.
    #[must_use]
    pub fn choose_exit(self, env: &Env<'_>, key: &str) -> Self {
        let offered = self
            .exit
            .as_ref()
            .is_some_and(|exits| exits.iter().any(|exit| exit == key));
        if !offered {
            tracing::debug!(key, "exit not offered");
            return self;
        }
        let (Some(departed), Some(_)) = (self.current_region(env), env.catalog().region(key)) else {
            tracing::warn!(key, "exit leads to an unknown region");
            return self;
        };

        let boss_level = departed.max_level + env.config().boss_level_offset;
        let boss = boss_template(&env.catalog().opponents, boss_level);
        tracing::info!(from = %departed.key, to = key, boss_level, "region changed");

        Self {
            opponent: boss,
            ..Self::new(key)
        }
    }

    /// Takes the pending encounter.
    #[must_use]
    pub fn engage(mut self) -> (Self, Option<OpponentTemplate>) {
        let opponent = self.opponent.take();
        (self, opponent)
    }

    #[must_use]
    pub fn take_loot(mut self, index: usize, player: Player, prng: Prng) -> (Self, Player, Prng) {
        let Some(reward) = self.loot.as_ref().and_then(|loot| loot.get(index)).cloned() else {
            tracing::debug!(index, "no such loot");
            return (self, player, prng);
        };
        self.loot = None;
        let (player, prng) = reward.apply(player, prng);
        (self, player, prng)
    }

    #[must_use]
    pub fn skip_loot(mut self) -> Self {
        self.loot = None;
        self
    }

    #[must_use]
    pub fn buy(mut self, index: usize, player: Player, prng: Prng) -> (Self, Player, Prng) {
        let Some(shop) = self.shop.take() else {
            tracing::debug!(index, "no shop here");
            return (self, player, prng);
        };
        let (shop, player, prng) = shop.buy(index, player, prng);
        self.shop = Some(shop);
        (self, player, prng)
    }

    #[must_use]
    pub fn leave_shop(mut self) -> Self {
        self.shop = None;
        self
    }
}

fn path_opponent(env: &Env<'_>, region: &Region, prng: Prng) -> (Option<OpponentTemplate>, Prng) {
    let pool: Vec<&OpponentTemplate> = env
        .catalog()
        .opponents
        .iter()
        .filter(|t| (region.min_level..=region.max_level).contains(&t.level))
        .collect();
    let Ok(len) = u32::try_from(pool.len()) else {
        return (None, prng);
    };
    if len == 0 {
        return (None, prng);
    }
    let (index, prng) = prng.below(len);
    (pool.get(index as usize).map(|t| (*t).clone()), prng)
}

/// Strongest template not above `level`, promoted to `level`.
fn boss_template(pool: &[OpponentTemplate], level: u32) -> Option<OpponentTemplate> {
    let strongest_below = pool
        .iter()
        .filter(|t| t.level <= level)
        .max_by(|a, b| a.level.cmp(&b.level).then_with(|| b.key.cmp(&a.key)));
    let fallback = || pool.iter().min_by_key(|t| t.level);
    strongest_below
        .or_else(fallback)
        .map(|t| t.clone().at_level(level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::test_support::{Fixture, StubOracle};

    fn walk(fixture: &Fixture) -> (Scene, Player, Prng) {
        (
            Scene::new("meadow"),
            Player::new("ada", &fixture.config),
            Prng::from_seed(21),
        )
    }

    #[test]
    fn shop_nodes_stock_a_shop_and_block_advance() {
        let fixture = Fixture::new(StubOracle::new());
        let env = fixture.env();
        let (scene, player, prng) = walk(&fixture);

        let (scene, prng) = scene.advance(&env, &player, prng);
        assert_eq!(scene.index, 1);
        assert!(scene.shop.is_some());
        assert!(scene.opponent.is_none());

        let (blocked, _) = scene.clone().advance(&env, &player, prng);
        assert_eq!(blocked, scene);

        let (scene, _) = scene.leave_shop().advance(&env, &player, prng);
        assert_eq!(scene.index, 2);
    }

    #[test]
    fn path_end_offers_exits_and_boss() {
        let fixture = Fixture::new(StubOracle::new());
        let env = fixture.env();
        let (mut scene, player, prng) = walk(&fixture);
        scene.index = 2;

        let (scene, _) = scene.advance(&env, &player, prng);
        assert_eq!(scene.exit, Some(vec!["ridge".to_owned()]));

        let unchanged = scene.clone().choose_exit(&env, "nowhere");
        assert_eq!(unchanged, scene);

        let scene = scene.choose_exit(&env, "ridge");
        assert_eq!(scene.region, "ridge");
        assert_eq!(scene.index, 0);
        let boss = scene.opponent.clone().unwrap();
        assert_eq!(boss.key, "elk");
        assert_eq!(boss.level, 3);

        let (scene, engaged) = scene.engage();
        assert_eq!(engaged, Some(boss));
        assert!(!scene.is_pending());
    }

    #[test]
    fn guaranteed_rolls_yield_encounter_and_loot() {
        let fixture = Fixture::new(StubOracle::new());
        let env = fixture.env();
        let player = Player::new("ada", &fixture.config);

        let (scene, prng) = Scene::new("ridge").advance(&env, &player, Prng::from_seed(2));
        let opponent = scene.opponent.as_ref().unwrap();
        assert!((2..=3).contains(&opponent.level));
        assert!(scene.loot.is_some());

        let (scene, player, _) = scene.take_loot(0, player, prng);
        assert!(scene.loot.is_none());
        assert!(scene.opponent.is_some());
        assert_eq!(player.name, "ada");
    }
}
