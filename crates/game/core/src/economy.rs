//! Loot drops and shops.

use crate::ability::{AbilityCard, acquire_ability};
use crate::bonus::{BonusCard, acquire_bonus};
use crate::config::GameConfig;
use crate::env::{Env, Prng};
use crate::player::Player;

/// Something the player can receive outside battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reward {
    Ability(AbilityCard),
    Bonus(BonusCard),
    /// Upgrade this many random letters by one.
    Upgrade(u32),
    Coins(u32),
}

impl Reward {
    /// Rolls one reward. Coins are never rolled for sale.
    pub fn roll(env: &Env<'_>, player: &Player, for_sale: bool, prng: Prng) -> (Self, Prng) {
        let config = env.config();
        let kinds = if for_sale { 3 } else { 4 };
        let (kind, prng) = prng.below(kinds);
        let upgrade = Self::Upgrade(config.upgrades_per_level);

        match kind {
            0 => {
                let pool: Vec<_> = env
                    .catalog()
                    .abilities
                    .iter()
                    .filter(|spec| spec.min_level <= player.level)
                    .collect();
                pick(&pool, prng)
                    .map(|(spec, prng)| (Self::Ability(spec.card()), prng))
                    .unwrap_or((upgrade, prng))
            }
            1 => {
                let pool: Vec<_> = env
                    .catalog()
                    .bonuses
                    .iter()
                    .filter(|spec| spec.min_level <= player.level)
                    .collect();
                pick(&pool, prng)
                    .map(|(spec, prng)| (Self::Bonus(spec.card()), prng))
                    .unwrap_or((upgrade, prng))
            }
            2 => (upgrade, prng),
            _ => (
                Self::Coins(player.level.saturating_mul(config.coins_per_level)),
                prng,
            ),
        }
    }

    pub fn price(&self, config: &GameConfig) -> u32 {
        match self {
            Self::Ability(_) => config.ability_price,
            Self::Bonus(_) => config.bonus_price,
            Self::Upgrade(_) => config.upgrade_price,
            Self::Coins(n) => *n,
        }
    }

    #[must_use]
    pub fn apply(self, player: Player, prng: Prng) -> (Player, Prng) {
        match self {
            Self::Ability(card) => {
                let abilities = acquire_ability(player.abilities.clone(), card);
                (Player { abilities, ..player }, prng)
            }
            Self::Bonus(card) => {
                let bonuses = acquire_bonus(player.bonuses.clone(), card);
                (Player { bonuses, ..player }, prng)
            }
            Self::Upgrade(count) => {
                let (player, _, prng) = player.upgrade_random(count as usize, prng);
                (player, prng)
            }
            Self::Coins(n) => {
                let coins = player.coins.saturating_add(n);
                (Player { coins, ..player }, prng)
            }
        }
    }
}

fn pick<'a, T>(pool: &[&'a T], prng: Prng) -> Option<(&'a T, Prng)> {
    let len = u32::try_from(pool.len()).ok().filter(|len| *len > 0)?;
    let (index, prng) = prng.below(len);
    pool.get(index as usize).map(|item| (*item, prng))
}

fn roll_many(env: &Env<'_>, player: &Player, for_sale: bool, prng: Prng) -> (Vec<Reward>, Prng) {
    let mut prng = prng;
    let mut rewards = Vec::with_capacity(env.config().offers_per_stock);
    for _ in 0..env.config().offers_per_stock {
        let (reward, next) = Reward::roll(env, player, for_sale, prng);
        rewards.push(reward);
        prng = next;
    }
    (rewards, prng)
}

/// A free drop: take one reward or skip all.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loot {
    pub offers: Vec<Reward>,
}

impl Loot {
    pub fn roll(env: &Env<'_>, player: &Player, prng: Prng) -> (Self, Prng) {
        let (offers, prng) = roll_many(env, player, false, prng);
        (Self { offers }, prng)
    }

    pub fn get(&self, index: usize) -> Option<&Reward> {
        self.offers.get(index)
    }
}

/// A priced reward on a shop shelf.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offer {
    pub reward: Reward,
    pub price: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shop {
    pub offers: Vec<Offer>,
}

impl Shop {
    pub fn stock(env: &Env<'_>, player: &Player, prng: Prng) -> (Self, Prng) {
        let (rewards, prng) = roll_many(env, player, true, prng);
        let offers = rewards
            .into_iter()
            .map(|reward| Offer {
                price: reward.price(env.config()),
                reward,
            })
            .collect();
        (Self { offers }, prng)
    }

    /// Buys offer `index`. Unknown offers and unaffordable prices are no-ops.
    #[must_use]
    pub fn buy(mut self, index: usize, player: Player, prng: Prng) -> (Self, Player, Prng) {
        let Some(offer) = self.offers.get(index) else {
            tracing::debug!(index, "no such offer");
            return (self, player, prng);
        };
        if player.coins < offer.price {
            tracing::debug!(index, price = offer.price, coins = player.coins, "cannot afford offer");
            return (self, player, prng);
        }
        let offer = self.offers.remove(index);
        let player = Player {
            coins: player.coins - offer.price,
            ..player
        };
        let (player, prng) = offer.reward.apply(player, prng);
        (self, player, prng)
    }
}
