/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Hand size of a fresh player.
    pub hand_size: usize,
    /// Health each side of a battle starts with (player side).
    pub player_health: i64,
    /// Maximum number of wordbank matches surfaced per check.
    pub suggestion_count: usize,
    /// Number of options offered by each preamble stage.
    pub options_per_stage: usize,
    /// Letters upgraded per opponent level on victory.
    pub upgrades_per_level: u32,
    /// Hand size gained on victory.
    pub hand_growth: usize,
    /// Opponent level above which its placed letters are boosted.
    pub boost_threshold: u32,
    /// Upper bound of the opponent letter boost.
    pub boost_cap: u32,
    /// Boss level above the departed region's maximum level.
    pub boss_level_offset: u32,
    /// Coins earned per opponent level on victory.
    pub coins_per_level: u32,
    /// Offers in a loot drop or a shop stock.
    pub offers_per_stock: usize,
    pub ability_price: u32,
    pub bonus_price: u32,
    pub upgrade_price: u32,
    /// Topic cluster query used for topic bonus offers.
    pub topic_min_members: usize,
    pub topic_max_members: usize,
    pub topic_max_word_len: usize,
    /// Region a new run starts in.
    pub start_region: String,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Preamble stages: opponent, ability, bonus, booster.
    pub const MAX_STAGES: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HAND_SIZE: usize = 7;
    pub const DEFAULT_PLAYER_HEALTH: i64 = 40;
    pub const DEFAULT_SUGGESTION_COUNT: usize = 15;

    pub fn new() -> Self {
        Self {
            hand_size: Self::DEFAULT_HAND_SIZE,
            player_health: Self::DEFAULT_PLAYER_HEALTH,
            suggestion_count: Self::DEFAULT_SUGGESTION_COUNT,
            options_per_stage: 3,
            upgrades_per_level: 5,
            hand_growth: 2,
            boost_threshold: 7,
            boost_cap: 4,
            boss_level_offset: 1,
            coins_per_level: 3,
            offers_per_stock: 3,
            ability_price: 6,
            bonus_price: 8,
            upgrade_price: 4,
            topic_min_members: 4,
            topic_max_members: 64,
            topic_max_word_len: 8,
            start_region: "meadow".to_owned(),
        }
    }

    /// Letter boost applied to an opponent of `level`: `min(cap, level - threshold)`.
    pub fn opponent_boost(&self, level: u32) -> u32 {
        level.saturating_sub(self.boost_threshold).min(self.boost_cap)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
