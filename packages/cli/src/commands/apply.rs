use super::{open_page, open_repository};
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{Document, Mutation, PageRepository};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Page to edit
    pub page_id: String,

    /// JSON array of mutations, `"undo"` and `"redo"` steps
    pub script: PathBuf,

    /// Apply and report without saving
    #[arg(long)]
    pub dry_run: bool,
}

/// One entry of an edit script
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    History(HistoryStep),
    Mutation(Mutation),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryStep {
    Undo,
    Redo,
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut repo = open_repository(&config, cwd)?;
    let (page, mut doc) = open_page(&config, &repo, &args.page_id)?;

    let source = fs::read_to_string(&args.script)
        .with_context(|| format!("Cannot read {}", args.script.display()))?;
    let steps: Vec<ScriptStep> = serde_json::from_str(&source)
        .with_context(|| format!("Invalid edit script {}", args.script.display()))?;

    println!(
        "{} {} steps to {}",
        "🔨 Applying".bright_blue().bold(),
        steps.len(),
        page.title.bright_white()
    );

    run_script(&mut doc, &steps)?;

    if args.dry_run {
        println!("{}", "(dry run, page not saved)".dimmed());
        return Ok(());
    }

    let page = repo.save(&page.id, doc.elements())?;
    println!();
    println!(
        "{} Saved {} ({} layers)",
        "✅".green(),
        page.title,
        page.layers.len()
    );

    Ok(())
}

/// Run every step in order; the first refused mutation aborts the script
pub fn run_script(doc: &mut Document, steps: &[ScriptStep]) -> Result<()> {
    for (index, step) in steps.iter().enumerate() {
        match step {
            ScriptStep::History(HistoryStep::Undo) => {
                let label = doc.undo_description();
                if doc.undo() {
                    println!("  {} Undo {}", "↶".green(), label.unwrap_or_default());
                } else {
                    println!("  {} Nothing to undo", "⚠️".yellow());
                }
            }
            ScriptStep::History(HistoryStep::Redo) => {
                let label = doc.redo_description();
                if doc.redo() {
                    println!("  {} Redo {}", "↷".green(), label.unwrap_or_default());
                } else {
                    println!("  {} Nothing to redo", "⚠️".yellow());
                }
            }
            ScriptStep::Mutation(mutation) => match doc.apply(mutation.clone()) {
                Ok(result) => match result.created {
                    Some(id) => println!("  {} {} {}", "✓".green(), mutation.name(), id.dimmed()),
                    None => println!("  {} {}", "✓".green(), mutation.name()),
                },
                Err(err) => {
                    eprintln!("  {} {} - {}", "✗".red(), mutation.name(), err.to_string().red());
                    return Err(anyhow!("Step {} refused: {}", index + 1, err));
                }
            },
        }
    }
    Ok(())
}
