//! Phase-by-phase command dispatch.

use super::{Command, Game, Phase};
use crate::battle::Battle;
use crate::env::Env;
use crate::outcome::Outcome;
use crate::preamble::Preamble;

use super::GameError;

/// Applies `command` to an owned draft of the game.
pub(super) async fn step(env: &Env<'_>, game: Game, command: Command) -> Result<Game, GameError> {
    let Game {
        seed,
        prng,
        player,
        scene,
        battles,
        phase,
    } = game;
    let mut draft = Game {
        seed,
        prng,
        player,
        scene,
        battles,
        phase: Phase::Scene,
    };

    draft.phase = match (phase, command) {
        (Phase::Preamble(preamble), Command::Select(index)) => {
            let preamble = preamble.select(index);
            if preamble.is_done() {
                begin_battle(env, &mut draft, preamble).await?
            } else {
                Phase::Preamble(preamble)
            }
        }
        (Phase::Preamble(preamble), Command::Skip) => {
            let preamble = preamble.skip();
            if preamble.is_done() {
                begin_battle(env, &mut draft, preamble).await?
            } else {
                Phase::Preamble(preamble)
            }
        }

        (Phase::Battle(battle), Command::Checking) => Phase::Battle(battle.checking()),
        (Phase::Battle(battle), Command::UpdateScores) => {
            Phase::Battle(battle.update_scores(env).await?)
        }
        (Phase::Battle(battle), Command::Place(ch)) => Phase::Battle(battle.place(env, ch)),
        (Phase::Battle(battle), Command::PlaceById(id)) => {
            Phase::Battle(battle.place_by_id(env, id))
        }
        (Phase::Battle(battle), Command::Backspace) => Phase::Battle(battle.backspace(env)),
        (Phase::Battle(battle), Command::Wipe) => Phase::Battle(battle.wipe(env)),
        (Phase::Battle(battle), Command::PlaceWordbank(word)) => {
            Phase::Battle(battle.place_wordbank(env, &word))
        }
        (Phase::Battle(battle), Command::UseAbility(key)) => {
            Phase::Battle(battle.use_ability(env, &key))
        }
        (Phase::Battle(battle), Command::Submit) => {
            let battle = battle.submit(env).await?;
            if battle.done {
                finish_battle(env, &mut draft, battle)
            } else {
                Phase::Battle(battle)
            }
        }

        (Phase::Outcome(_), Command::Continue) => {
            let (preamble, prng) = Preamble::new(env, &draft.player, None, draft.prng).await?;
            draft.prng = prng;
            Phase::Preamble(preamble)
        }

        (Phase::Scene, Command::Advance) => {
            let scene = draft.scene.clone();
            let (scene, prng) = scene.advance(env, &draft.player, draft.prng);
            draft.scene = scene;
            draft.prng = prng;
            Phase::Scene
        }
        (Phase::Scene, Command::Engage) => {
            let (scene, opponent) = draft.scene.clone().engage();
            draft.scene = scene;
            match opponent {
                Some(template) => {
                    let (preamble, prng) =
                        Preamble::new(env, &draft.player, Some(template), draft.prng).await?;
                    draft.prng = prng;
                    Phase::Preamble(preamble)
                }
                None => {
                    tracing::debug!("nothing to engage");
                    Phase::Scene
                }
            }
        }
        (Phase::Scene, Command::TakeLoot(index)) => {
            let (scene, player, prng) =
                draft.scene.clone().take_loot(index, draft.player.clone(), draft.prng);
            draft.scene = scene;
            draft.player = player;
            draft.prng = prng;
            Phase::Scene
        }
        (Phase::Scene, Command::SkipLoot) => {
            draft.scene = draft.scene.clone().skip_loot();
            Phase::Scene
        }
        (Phase::Scene, Command::Buy(index)) => {
            let (scene, player, prng) =
                draft.scene.clone().buy(index, draft.player.clone(), draft.prng);
            draft.scene = scene;
            draft.player = player;
            draft.prng = prng;
            Phase::Scene
        }
        (Phase::Scene, Command::LeaveShop) => {
            draft.scene = draft.scene.clone().leave_shop();
            Phase::Scene
        }
        (Phase::Scene, Command::ChooseExit(key)) => {
            draft.scene = draft.scene.clone().choose_exit(env, &key);
            Phase::Scene
        }

        (phase, command) => {
            tracing::debug!(
                phase = phase.name(),
                command = command.as_ref(),
                "command ignored in this phase"
            );
            phase
        }
    };

    Ok(draft)
}

async fn begin_battle(
    env: &Env<'_>,
    draft: &mut Game,
    preamble: Preamble,
) -> Result<Phase, GameError> {
    draft.player = preamble.apply_choices(draft.player.clone());
    let Some(template) = preamble.opponent() else {
        tracing::info!(region = %draft.scene.region, "no opponent chosen, back to the scene");
        return Ok(Phase::Scene);
    };
    let (battle, prng) = Battle::start(env, &draft.player, template, draft.prng).await?;
    draft.prng = prng;
    Ok(Phase::Battle(battle))
}

fn finish_battle(env: &Env<'_>, draft: &mut Game, battle: Battle) -> Phase {
    let (outcome, player, prng) =
        Outcome::resolve(env.config(), draft.player.clone(), battle, draft.prng);
    draft.player = player;
    draft.prng = prng;
    draft.battles += 1;
    Phase::Outcome(outcome)
}
