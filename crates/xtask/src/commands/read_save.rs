//! Read and inspect saved sessions
//!
//! Loads `{session}.json` through the file repository (which validates the
//! header and state root) and displays its contents.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use game_core::Phase;
use runtime::{FileSessionRepository, SaveDocument, SessionRepository};

use crate::dirs;

/// Read and inspect a saved session
#[derive(Parser)]
pub struct ReadSave {
    /// Session id to read (lists saved sessions when omitted)
    #[arg(value_name = "SESSION")]
    session: Option<String>,

    /// Custom save directory (defaults to `SAVE_DATA_DIR` or the platform location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Summary view (phase, player, scene)
    Summary,
    /// Full JSON document
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl ReadSave {
    pub fn execute(self) -> Result<()> {
        let data_dir = self.data_dir.unwrap_or_else(dirs::save_dir);
        if !data_dir.exists() {
            anyhow::bail!(
                "Save directory not found: {}\n\nHint: run `cargo xtask simulate --save <id>` first",
                data_dir.display()
            );
        }
        let repository = FileSessionRepository::new(&data_dir)?;

        let Some(session_id) = self.session else {
            return list_sessions(&repository);
        };

        let document = repository
            .load(&session_id)
            .with_context(|| format!("Failed to read session `{}`", session_id))?
            .with_context(|| format!("No saved session `{}`", session_id))?;

        println!(
            "{} {}",
            style("Save File:").bold().cyan(),
            repository.session_path(&session_id).display()
        );
        println!(
            "{} {} v{}",
            style("Format:").bold().cyan(),
            document.format,
            document.version
        );
        println!("{} {}", style("Turn:").bold().cyan(), document.turn);
        println!();

        match self.format {
            OutputFormat::Summary => print_summary(&document),
            OutputFormat::Json => println!("{}", document.to_json()?),
            OutputFormat::Debug => println!("{:#?}", document),
        }

        Ok(())
    }
}

fn list_sessions(repository: &FileSessionRepository) -> Result<()> {
    let sessions = repository.list_sessions()?;
    if sessions.is_empty() {
        println!("{}", style("No saved sessions").dim());
        return Ok(());
    }
    println!("{}", style("Saved sessions:").bold().yellow());
    for session in sessions {
        println!("  {} {}", style("→").cyan(), session);
    }
    Ok(())
}

fn print_summary(document: &SaveDocument) {
    let game = &document.game;
    println!("{}", style("=== Session Summary ===").bold().green());
    println!();

    println!("{}", style("Run:").bold().yellow());
    println!("  Seed: {}", game.seed);
    println!("  Phase: {}", game.phase.name());
    println!("  Battles: {}", game.battles);
    println!("  State Root: {}", document.state_root);
    println!();

    let player = &game.player;
    println!("{}", style("Player:").bold().yellow());
    println!("  Name: {}", player.name);
    println!("  Level: {} (hand {}, health {})", player.level, player.hand_size, player.max_health);
    println!("  Coins: {}", player.coins);
    println!("  Letters: {}", player.letters.len());
    println!("  Words Known: {}", player.wordbank.len());
    for ability in &player.abilities {
        println!("  Ability: {} ({} uses)", ability.name, ability.uses);
    }
    for bonus in &player.bonuses {
        println!("  Bonus: {} (level {})", bonus.name, bonus.level);
    }
    println!();

    println!("{}", style("Scene:").bold().yellow());
    println!("  Region: {} (node {})", game.scene.region, game.scene.index);
    if let Some(opponent) = &game.scene.opponent {
        println!("  Encounter: {} (level {})", opponent.name, opponent.level);
    }
    if let Some(exits) = &game.scene.exit {
        println!("  Exits: {}", exits.join(", "));
    }
    println!();

    if let Phase::Battle(battle) = &game.phase {
        println!("{}", style("Battle:").bold().yellow());
        println!("  Round: {}", battle.round);
        println!(
            "  {} {} hp vs {} {} hp",
            battle.player.profile.name,
            battle.player.health,
            battle.opponent.profile.name,
            battle.opponent.health
        );
        println!("  Opponent Word: {}", battle.opponent.placed_word());
        println!();
    }
}
