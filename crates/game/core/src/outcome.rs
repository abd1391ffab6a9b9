//! Summary of a resolved battle and the rewards it grants.

use crate::battle::Battle;
use crate::config::GameConfig;
use crate::env::Prng;
use crate::player::Player;

/// Result of one battle as shown to the player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome {
    pub victory: bool,
    pub opponent: String,
    pub opponent_level: u32,
    /// Rounds played, including the deciding one.
    pub rounds: u32,
    /// Letters upgraded by the victory.
    pub upgraded: usize,
    pub coins: u32,
    /// Player level after the battle.
    pub level: u32,
    /// Player hand size after the battle.
    pub hand_size: usize,
}

impl Outcome {
    /// Folds a finished battle back into `player`.
    ///
    /// Letters, remaining ability uses and the wordbank always return to the
    /// player. A victory additionally upgrades random letters, grows the hand,
    /// raises the level and pays coins.
    pub fn resolve(
        config: &GameConfig,
        player: Player,
        battle: Battle,
        prng: Prng,
    ) -> (Self, Player, Prng) {
        let victory = battle.victory;
        let opponent = battle.opponent.profile.name.clone();
        let opponent_level = battle.opponent.profile.level;
        let rounds = battle.round + 1;

        let (letters, abilities, wordbank) = battle.into_spoils();
        let mut player = Player {
            letters,
            abilities,
            wordbank,
            ..player
        };

        let mut upgraded = 0;
        let mut coins = 0;
        let mut prng = prng;
        if victory {
            let count = opponent_level.saturating_mul(config.upgrades_per_level) as usize;
            let (next, n, next_prng) = player.upgrade_random(count, prng);
            player = next;
            upgraded = n;
            prng = next_prng;

            coins = opponent_level.saturating_mul(config.coins_per_level);
            player.coins = player.coins.saturating_add(coins);
            player.hand_size += config.hand_growth;
            player.level += 1;
        }

        tracing::info!(victory, opponent = %opponent, upgraded, coins, "battle outcome");

        let outcome = Self {
            victory,
            opponent,
            opponent_level,
            rounds,
            upgraded,
            coins,
            level: player.level,
            hand_size: player.hand_size,
        };
        (outcome, player, prng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::AbilityCard;
    use crate::env::test_support::{Fixture, StubOracle, opponent};
    use crate::letter::letter_sum;

    async fn started(fixture: &Fixture, player: &Player) -> Battle {
        let template = opponent("fox", 2, &["fox"]);
        let (battle, _) = Battle::start(&fixture.env(), player, &template, Prng::from_seed(4))
            .await
            .unwrap();
        battle
    }

    #[tokio::test]
    async fn victory_rewards_the_player() {
        let fixture = Fixture::new(StubOracle::new());
        let player = Player::new("ada", &fixture.config);
        let before = letter_sum(&player.letters);
        let mut battle = started(&fixture, &player).await;
        battle.done = true;
        battle.victory = true;

        let (outcome, player, _) = Outcome::resolve(&fixture.config, player, battle, Prng::from_seed(5));

        assert!(outcome.victory);
        assert_eq!(outcome.upgraded, 10);
        assert_eq!(letter_sum(&player.letters), before + 10);
        assert_eq!(player.letters.len(), 98);
        assert_eq!(player.level, 2);
        assert_eq!(player.hand_size, 9);
        assert_eq!(player.coins, 6);
        assert_eq!(outcome.coins, 6);
    }

    #[tokio::test]
    async fn defeat_returns_resources_without_rewards() {
        let fixture = Fixture::new(StubOracle::new());
        let mut player = Player::new("ada", &fixture.config);
        player.abilities = vec![AbilityCard::new("flip", "Flip", "", 2)];
        let before = player.letters.clone();
        let mut battle = started(&fixture, &player).await.use_ability(&fixture.env(), "flip");
        battle.done = true;

        let (outcome, player, _) = Outcome::resolve(&fixture.config, player, battle, Prng::from_seed(5));

        assert!(!outcome.victory);
        assert_eq!(outcome.upgraded, 0);
        assert_eq!(player.letters, before);
        assert_eq!(player.level, 1);
        assert_eq!(player.abilities[0].uses, 1);
    }
}
