use crate::letter::LetterId;

/// Every player input the game understands.
///
/// Commands are grouped by the phase that accepts them; a command sent in
/// any other phase is ignored.
#[derive(Clone, Debug, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    // Preamble
    Select(usize),
    /// Declines the current stage; declining the opponent returns to the scene.
    Skip,

    // Battle
    Checking,
    UpdateScores,
    Place(char),
    PlaceById(LetterId),
    Backspace,
    Wipe,
    PlaceWordbank(String),
    UseAbility(String),
    Submit,

    // Outcome
    Continue,

    // Scene
    Advance,
    Engage,
    TakeLoot(usize),
    SkipLoot,
    Buy(usize),
    LeaveShop,
    ChooseExit(String),
}
