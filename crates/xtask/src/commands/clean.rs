//! Clean save data and logs command
//!
//! Removes save documents and simulation logs, either everything or one
//! session. Always prompts for confirmation before deletion.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use runtime::{FileSessionRepository, SessionRepository};

use crate::dirs;

/// Clean save data and logs
#[derive(Parser, Debug)]
pub struct Clean {
    /// Clean only logs
    #[arg(long)]
    pub logs: bool,

    /// Clean only save data
    #[arg(long)]
    pub data: bool,

    /// Skip confirmation prompt (dangerous!)
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Specific session to clean
    #[arg(long)]
    pub session: Option<String>,
}

enum Target {
    Dir(PathBuf),
    Save(FileSessionRepository, String),
}

impl Clean {
    pub fn execute(self) -> Result<()> {
        // If no flags specified, clean both
        let clean_logs = self.logs || !self.data;
        let clean_data = self.data || !self.logs;

        let mut targets: Vec<(String, PathBuf, Target)> = Vec::new();

        if clean_logs {
            let log_dir = dirs::log_dir();
            let dir = match &self.session {
                Some(session_id) => log_dir.join(session_id),
                None => log_dir,
            };
            if dir.exists() {
                targets.push(("Logs".to_string(), dir.clone(), Target::Dir(dir)));
            }
        }

        if clean_data {
            let save_dir = dirs::save_dir();
            if save_dir.exists() {
                match &self.session {
                    Some(session_id) => {
                        let repository = FileSessionRepository::new(&save_dir)?;
                        if repository.exists(session_id) {
                            let path = repository.session_path(session_id);
                            targets.push((
                                format!("Save ({})", session_id),
                                path,
                                Target::Save(repository, session_id.clone()),
                            ));
                        }
                    }
                    None => targets.push((
                        "Save data".to_string(),
                        save_dir.clone(),
                        Target::Dir(save_dir),
                    )),
                }
            }
        }

        if targets.is_empty() {
            println!("{}", style("Nothing to clean").dim());
            return Ok(());
        }

        println!("{}", style("Clean word-battle data").yellow().bold());
        println!();
        println!("The following will be deleted:");
        for (label, path, _) in &targets {
            println!("  {} {}", style("→").cyan(), style(label).bold());
            println!("    {}", style(path.display()).dim());
        }
        println!();

        if !self.yes && !confirm()? {
            println!("{}", style("Cancelled").dim());
            return Ok(());
        }

        for (label, path, target) in targets {
            print!("Deleting {}... ", label);
            io::stdout().flush()?;

            match target {
                Target::Dir(dir) => std::fs::remove_dir_all(&dir)
                    .with_context(|| format!("Failed to delete: {}", path.display()))?,
                Target::Save(repository, session_id) => repository.delete(&session_id)?,
            }

            println!("{}", style("✓").green());
        }

        println!();
        println!("{}", style("✓ Cleanup complete!").green().bold());

        Ok(())
    }
}

/// Prompt user for confirmation
fn confirm() -> Result<bool> {
    print!("{} ", style("Proceed? [y/N]").yellow().bold());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}
