//! Headless simulation command
//!
//! Plays a seeded run with the scripted player from `runtime::autopilot`
//! against the fixture lexicon, logging to stderr and a session log file.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use game_core::{Game, Phase};
use runtime::{RuntimeConfig, Session, World, autopilot};

use crate::dirs;

/// Run a seeded headless game with a scripted player
#[derive(Parser, Debug)]
pub struct Simulate {
    /// Seed of the run
    #[arg(long, default_value = "1")]
    pub seed: u64,

    /// Number of player decisions to play
    #[arg(long, default_value = "200")]
    pub steps: usize,

    /// Player name
    #[arg(long, default_value = "sim")]
    pub name: String,

    /// Content directory (defaults to `CONTENT_DIR`, then the embedded data)
    #[arg(long, value_name = "DIR")]
    pub content_dir: Option<PathBuf>,

    /// Save the session under this id when done
    #[arg(long, value_name = "SESSION")]
    pub save: Option<String>,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build tokio runtime")?;
        runtime.block_on(self.run())
    }

    async fn run(self) -> Result<()> {
        let mut config = RuntimeConfig::from_env();
        if let Some(dir) = self.content_dir {
            config.content_dir = Some(dir);
        }
        let session_id = self
            .save
            .clone()
            .unwrap_or_else(|| format!("sim_{}", self.seed));
        let _guard = runtime::logging::init(&dirs::log_dir(), &session_id, "simulate.log")?;

        let world = match &config.content_dir {
            Some(dir) => World::load(dir)?,
            None => World::embedded()?,
        };
        let world = Arc::new(world);

        let session = match &self.save {
            Some(_) => {
                config.session_id = Some(session_id.clone());
                Session::open(world, &config, self.seed, &self.name).await?
            }
            None => Session::start(world, None, &session_id, self.seed, &self.name).await?,
        };

        let mut tally = Tally::default();
        let mut previous = session.snapshot().await.phase.name();
        for step in 0..self.steps {
            autopilot::step(&session).await?;
            let game = session.snapshot().await;
            if game.phase.name() != previous {
                tally.record(&game);
                previous = game.phase.name();
            }
            tracing::debug!(step, phase = previous, "step");
        }

        let game = session.snapshot().await;
        if self.save.is_some() {
            session.save().await?;
        }
        print_report(&session_id, self.seed, &game, &tally)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Tally {
    battles: usize,
    victories: usize,
}

impl Tally {
    fn record(&mut self, game: &Game) {
        if let Phase::Outcome(outcome) = &game.phase {
            self.battles += 1;
            if outcome.victory {
                self.victories += 1;
            }
            tracing::info!(
                victory = outcome.victory,
                opponent = %outcome.opponent,
                rounds = outcome.rounds,
                level = outcome.level,
                "battle finished"
            );
        }
    }
}

fn print_report(session_id: &str, seed: u64, game: &Game, tally: &Tally) -> Result<()> {
    let root = game.state_root().context("Failed to hash final state")?;

    println!("{}", style("=== Simulation ===").bold().green());
    println!("  Session:    {}", style(session_id).cyan());
    println!("  Seed:       {}", seed);
    println!("  Phase:      {}", game.phase.name());
    println!("  Region:     {} (node {})", game.scene.region, game.scene.index);
    println!(
        "  Battles:    {} ({} won)",
        tally.battles,
        style(tally.victories).bold()
    );
    println!(
        "  Player:     level {}, hand {}, {} coins, {} words known",
        game.player.level,
        game.player.hand_size,
        game.player.coins,
        game.player.wordbank.len()
    );
    println!("  State root: {}", style(hex::encode(root)).dim());
    Ok(())
}
