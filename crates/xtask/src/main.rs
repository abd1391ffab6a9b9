//! Development tasks for the word-battle workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{Clean, ReadSave, Simulate};

/// Development tasks for the word-battle workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for word-battle", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a seeded headless game with a scripted player
    Simulate(Simulate),

    /// Read and inspect a saved session
    ReadSave(ReadSave),

    /// Clean save data and logs
    Clean(Clean),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for SAVE_DATA_DIR and other env vars)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::ReadSave(cmd) => cmd.execute(),
        Command::Clean(cmd) => cmd.execute(),
    }
}
