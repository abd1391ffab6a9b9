//! Scripted player used by headless simulations and tests.

use game_core::{Command, Game, Phase, ScoredWord, StageKey};

use crate::error::Result;
use crate::session::Session;

/// Commands for the next decision of a simple greedy player.
///
/// In battle the player spells `best` (the top suggestion) from a wiped
/// area, or submits nothing when there is none. Outside battle it takes the
/// first option of every stage, buys the first affordable offer and walks on.
/// After its first battle it declines free opponents and only fights what
/// the scene puts in its way.
pub fn plan(game: &Game, best: Option<&ScoredWord>) -> Vec<Command> {
    match &game.phase {
        Phase::Preamble(preamble) => {
            if game.battles > 0 && preamble.stage_key() == Some(StageKey::Opponent) {
                vec![Command::Skip]
            } else {
                vec![Command::Select(0)]
            }
        }
        Phase::Battle(_) => {
            let mut commands = vec![Command::Wipe];
            if let Some(word) = best {
                commands.extend(word.word.chars().map(Command::Place));
            }
            commands.push(Command::UpdateScores);
            commands.push(Command::Submit);
            commands
        }
        Phase::Outcome(_) => vec![Command::Continue],
        Phase::Scene => {
            let scene = &game.scene;
            if scene.loot.is_some() {
                vec![Command::TakeLoot(0)]
            } else if let Some(shop) = &scene.shop {
                let affordable = shop
                    .offers
                    .iter()
                    .position(|offer| offer.price <= game.player.coins);
                match affordable {
                    Some(index) => vec![Command::Buy(index)],
                    None => vec![Command::LeaveShop],
                }
            } else if scene.opponent.is_some() {
                vec![Command::Engage]
            } else if let Some(exit) = scene.exit.as_ref().and_then(|exits| exits.first()) {
                vec![Command::ChooseExit(exit.clone())]
            } else {
                vec![Command::Advance]
            }
        }
    }
}

/// Plays one decision on `session`; returns the commands applied.
pub async fn step(session: &Session) -> Result<Vec<Command>> {
    let game = session.snapshot().await;
    let best = match game.phase {
        Phase::Battle(_) => session.suggest(1).await?.into_iter().next(),
        _ => None,
    };
    let commands = plan(&game, best.as_ref());
    for command in commands.iter().cloned() {
        session.apply(command).await?;
    }
    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::world::World;

    #[tokio::test]
    async fn battle_plan_spells_the_suggestion() {
        let world = Arc::new(World::embedded().unwrap());
        let session = Session::start(world, None, "plan", 5, "ada").await.unwrap();
        while !matches!(session.snapshot().await.phase, Phase::Battle(_)) {
            step(&session).await.unwrap();
        }

        let game = session.snapshot().await;
        let commands = plan(&game, Some(&ScoredWord::new("cat", 5)));
        assert_eq!(
            commands,
            [
                Command::Wipe,
                Command::Place('c'),
                Command::Place('a'),
                Command::Place('t'),
                Command::UpdateScores,
                Command::Submit,
            ]
        );
        assert_eq!(
            plan(&game, None),
            [Command::Wipe, Command::UpdateScores, Command::Submit]
        );
    }
}
